use musicfairy_db::DocumentStore;
use tracing::{instrument, warn};

use super::model::HealthResponse;

pub struct HealthService;

impl HealthService {
    #[instrument(skip(store))]
    pub async fn check(store: &dyn DocumentStore) -> HealthResponse {
        match store.ping().await {
            Ok(()) => HealthResponse::from_ping(true),
            Err(err) => {
                warn!(error = %err, "Store ping failed");
                HealthResponse::from_ping(false)
            }
        }
    }
}
