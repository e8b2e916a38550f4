use clap::Command;

mod context;
mod person;

use context::Context;

fn cli() -> Command {
    Command::new("phonebook")
        .about("manage the phonebook stored in postgres")
        .version("0.1.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(person::list_args())
        .subcommand(person::add_args())
        .subcommand(person::delete_args())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();

    let context = Context::connect().await?;

    person::handlers(&matches, &context).await
}
