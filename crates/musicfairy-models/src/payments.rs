//! Payment records and payment intents.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::responses::{DeleteResponse, InsertResponse};

/// A completed payment. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub price: f64,
    pub transaction_id: String,
    /// RFC 3339 timestamp of when the payment was recorded
    #[serde(default)]
    pub date: String,
    /// Cart items this payment settled
    #[serde(default)]
    pub cart_item_ids: Vec<String>,
    #[serde(default)]
    pub class_ids: Vec<String>,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreatePaymentDto {
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 255))]
    pub transaction_id: String,
    #[validate(length(min = 1))]
    pub cart_item_ids: Vec<String>,
    #[serde(default)]
    pub class_ids: Vec<String>,
}

impl CreatePaymentDto {
    pub fn into_record(self, email: &str, date: chrono::DateTime<chrono::Utc>) -> PaymentRecord {
        PaymentRecord {
            id: None,
            email: email.to_string(),
            price: self.price,
            transaction_id: self.transaction_id,
            date: date.to_rfc3339(),
            cart_item_ids: self.cart_item_ids,
            class_ids: self.class_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResult {
    pub insert_result: InsertResponse,
    pub delete_result: DeleteResponse,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct PaymentIntentRequest {
    /// Decimal amount in major currency units
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}
