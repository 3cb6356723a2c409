//! The payment processor port.

use async_trait::async_trait;
use musicfairy_core::AppError;

use crate::amount::to_minor_units;

/// A processor-side intent for a pending charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    /// Handed to the browser to confirm the payment
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("payment processor is not configured")]
    NotConfigured,
    #[error("payment processor unreachable: {0}")]
    Transport(String),
    #[error("payment processor rejected the request ({status}): {message}")]
    Processor { status: u16, message: String },
    #[error("unexpected payment processor response: {0}")]
    Decode(String),
}

impl PaymentError {
    /// HTTP rendering: a bad amount is the caller's fault (400); anything
    /// else is an upstream failure (502).
    pub fn into_app_error(self) -> AppError {
        match self {
            PaymentError::InvalidAmount(_) => AppError::bad_request(self),
            _ => AppError::bad_gateway(self),
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates an intent for `amount` minor units of `currency`.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Converts `price` to minor units and asks `gateway` for an intent.
pub async fn create_intent(
    gateway: &dyn PaymentGateway,
    price: f64,
    currency: &str,
) -> Result<PaymentIntent, PaymentError> {
    let amount = to_minor_units(price)?;
    gateway.create_payment_intent(amount, currency).await
}
