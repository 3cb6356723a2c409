use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const BANNER: &str = "Music Fairy is playing";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    /// `connected` or `unreachable`
    pub database: String,
}

impl HealthResponse {
    pub fn from_ping(reachable: bool) -> Self {
        let (status, database) = if reachable {
            ("ok", "connected")
        } else {
            ("degraded", "unreachable")
        };
        Self {
            status: status.to_string(),
            database: database.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}
