use std::sync::Arc;

use musicfairy_config::{DatabaseConfig, StoreBackend};
use musicfairy_db::{DocumentStore, MemoryStore, MongoStore};
use tracing::{info, warn};

/// Opens the configured document store. The MongoDB backend is pinged and
/// gets its unique indexes before the server accepts requests.
pub async fn init_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Mongo => {
            let store = MongoStore::connect(&config.uri, &config.database_name).await?;
            store.ensure_indexes().await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            info!(database = %config.database_name, "In-memory store ready");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
