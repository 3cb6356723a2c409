//! Document store configuration.
//!
//! # Environment Variables
//!
//! - `STORE_BACKEND`: `mongo` (default) or `memory`
//! - `MONGODB_URI`: full connection string; takes precedence when set
//! - `DB_USER`, `DB_PASS`, `DB_CLUSTER`: Atlas credentials used to build the
//!   connection string when `MONGODB_URI` is absent
//! - `DB_NAME`: database name (default `musicFairyDB`)

use std::env;

pub const DEFAULT_DATABASE_NAME: &str = "musicFairyDB";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Which document store implementation backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Some(Self::Mongo),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub database_name: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let backend = env::var("STORE_BACKEND")
            .ok()
            .and_then(|v| StoreBackend::parse(&v))
            .unwrap_or(StoreBackend::Mongo);

        let uri = env::var("MONGODB_URI").ok().unwrap_or_else(|| {
            match (env::var("DB_USER"), env::var("DB_PASS")) {
                (Ok(user), Ok(pass)) => {
                    let cluster = env::var("DB_CLUSTER")
                        .unwrap_or_else(|_| "cluster0.ynccjdb.mongodb.net".to_string());
                    atlas_uri(&user, &pass, &cluster)
                }
                _ => DEFAULT_MONGODB_URI.to_string(),
            }
        });

        Self {
            backend,
            uri,
            database_name: env::var("DB_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            uri: String::new(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
        }
    }
}

/// Builds an Atlas SRV connection string from credentials.
pub fn atlas_uri(user: &str, pass: &str, cluster: &str) -> String {
    format!("mongodb+srv://{user}:{pass}@{cluster}/?retryWrites=true&w=majority")
}
