use ascii_table::{Align, AsciiTable};
use clap::{arg, Command};

use phonebook::models::NewPerson;

use crate::context::Context;

pub fn list_args() -> Command {
    Command::new("list").about("list everyone in the phonebook")
}

pub fn add_args() -> Command {
    Command::new("add")
        .about("add a person to the phonebook")
        .arg(arg!(<NAME> "person name"))
        .arg(arg!(<NUMBER> "phone number"))
        .arg_required_else_help(true)
}

pub fn delete_args() -> Command {
    Command::new("delete")
        .about("remove a person from the phonebook")
        .arg(arg!(<ID> "person id"))
        .arg_required_else_help(true)
}

pub async fn handlers(matches: &clap::ArgMatches, context: &Context) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("add", add_match)) => {
            let name = required(add_match, "NAME")?;
            let number = required(add_match, "NUMBER")?;

            let person = context
                .person_service
                .create(NewPerson::new(name, number))
                .await?;

            println!("added {} number {} to phonebook", person.name, person.number);

            Ok(())
        }
        Some(("delete", delete_match)) => {
            let id = required(delete_match, "ID")?;

            match context.person_service.delete(id).await? {
                0 => tracing::info!("person {id} not found"),
                _ => tracing::info!("person {id} deleted"),
            }

            Ok(())
        }
        Some(("list", _)) => {
            let persons = context.person_service.list().await?;

            println!("Phonebook:");

            if persons.is_empty() {
                return Ok(());
            }

            let table_data: Vec<Vec<String>> = persons
                .into_iter()
                .map(|person| vec![person.id.to_string(), person.name, person.number])
                .collect();

            let mut ascii_table = AsciiTable::default();

            ascii_table
                .column(0)
                .set_header("ID")
                .set_align(Align::Left);

            ascii_table
                .column(1)
                .set_header("NAME")
                .set_align(Align::Left);

            ascii_table
                .column(2)
                .set_header("NUMBER")
                .set_align(Align::Left);

            ascii_table.print(table_data);

            Ok(())
        }
        _ => unreachable!(), // subcommand_required guarantees one of the above
    }
}

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("{id} expected"))
}
