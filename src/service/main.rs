use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phonebook::config::{Config, StoreConfig};
use phonebook::http::http_router;
use phonebook::models::seed_persons;
use phonebook::persistence::memory::PersonMemoryPersistence;
use phonebook::persistence::relational::{self, PersonRelationalPersistence};
use phonebook::persistence::PersonPersistence;
use phonebook::services::PersonService;

const DEFAULT_LOG_FILTER: &str = "phonebook=info,api=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    let config = Config::from_env()?;

    let persistence: Box<dyn PersonPersistence> = match &config.store {
        StoreConfig::Memory {
            id_policy,
            seed_persons: seed,
        } => {
            let persons = if *seed { seed_persons() } else { Vec::new() };

            tracing::info!(
                "using in-memory store with {} persons and {:?} ids",
                persons.len(),
                id_policy
            );

            Box::new(PersonMemoryPersistence::with_persons(*id_policy, persons))
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let db = relational::connect(database_url, *max_connections).await?;

            tracing::info!("using postgres store");

            Box::new(PersonRelationalPersistence { db })
        }
    };

    let person_service = Arc::new(PersonService { persistence });

    let addr = config.socket_addr();

    tracing::info!("phonebook listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(http_router(person_service).into_make_service())
        .await?;

    Ok(())
}
