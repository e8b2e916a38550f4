use std::net::{IpAddr, SocketAddr};

use crate::models::IdPolicy;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreConfig {
    Memory {
        id_policy: IdPolicy,
        seed_persons: bool,
    },
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

/// Process configuration, read once at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = lookup("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse()?;

        let port: u16 = match lookup("PORT") {
            Some(port) => port.parse()?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("STORE").as_deref().unwrap_or("memory") {
            "memory" => {
                let id_policy: IdPolicy = match lookup("ID_POLICY") {
                    Some(id_policy) => id_policy.parse()?,
                    None => IdPolicy::default(),
                };

                let seed_persons: bool = match lookup("SEED_PERSONS") {
                    Some(seed_persons) => seed_persons.parse()?,
                    None => true,
                };

                StoreConfig::Memory {
                    id_policy,
                    seed_persons,
                }
            }
            "postgres" => {
                let database_url = lookup("DATABASE_URL").ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL must be set when STORE=postgres")
                })?;

                let max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(max_connections) => max_connections.parse()?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };

                StoreConfig::Postgres {
                    database_url,
                    max_connections,
                }
            }
            other => return Err(anyhow::anyhow!("unknown store '{other}'")),
        };

        Ok(Self { host, port, store })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
