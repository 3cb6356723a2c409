use anyhow::anyhow;
use musicfairy_db::bson::oid::ObjectId;

use crate::utils::errors::AppError;

/// Parses a 24-hex-digit document id taken from the request path.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim()).map_err(|_| AppError::bad_request(anyhow!("Invalid id: {id}")))
}

/// Parses every id of a list, failing on the first invalid one.
pub fn parse_object_ids(ids: &[String]) -> Result<Vec<ObjectId>, AppError> {
    ids.iter().map(|id| parse_object_id(id)).collect()
}
