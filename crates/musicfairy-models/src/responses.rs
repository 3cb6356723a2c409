//! Stable response bodies built from store acknowledgments.

use musicfairy_db::{DeleteAck, InsertAck, UpdateAck};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InsertResponse {
    pub acknowledged: bool,
    /// Hex id of the created document
    pub inserted_id: String,
}

impl From<InsertAck> for InsertResponse {
    fn from(ack: InsertAck) -> Self {
        Self {
            acknowledged: true,
            inserted_id: ack.inserted_id,
        }
    }
}

/// Result of a single-document update. A zero `matched_count` means no
/// document had the given id; this is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    /// Id of the document created by an upsert
    pub upserted_id: Option<String>,
}

impl From<UpdateAck> for UpdateResponse {
    fn from(ack: UpdateAck) -> Self {
        Self {
            acknowledged: true,
            matched_count: ack.matched_count,
            modified_count: ack.modified_count,
            upserted_id: ack.upserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<DeleteAck> for DeleteResponse {
    fn from(ack: DeleteAck) -> Self {
        Self {
            acknowledged: true,
            deleted_count: ack.deleted_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_response_serializes_null_upserted_id() {
        let response = UpdateResponse::from(UpdateAck {
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["acknowledged"], true);
        assert_eq!(json["matched_count"], 0);
        assert!(json["upserted_id"].is_null());
    }
}
