use phonebook::persistence::relational::{self, PersonRelationalPersistence};
use phonebook::services::PersonService;

const CLI_MAX_CONNECTIONS: u32 = 1;

pub struct Context {
    pub person_service: PersonService,
}

impl Context {
    pub async fn connect() -> anyhow::Result<Self> {
        let database_url = dotenvy::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let db = relational::connect(&database_url, CLI_MAX_CONNECTIONS).await?;

        Ok(Self {
            person_service: PersonService {
                persistence: Box::new(PersonRelationalPersistence { db }),
            },
        })
    }
}
