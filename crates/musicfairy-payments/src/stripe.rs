//! Stripe adapter: `POST /v1/payment_intents`, form-encoded, bearer auth.

use std::time::Duration;

use async_trait::async_trait;
use musicfairy_config::PaymentConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::gateway::{PaymentError, PaymentGateway, PaymentIntent};

const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";

#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .field("configured", &!self.secret_key.is_empty())
            .finish()
    }
}

#[derive(Deserialize)]
struct IntentBody {
    id: String,
    client_secret: Option<String>,
    amount: i64,
    currency: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl StripeGateway {
    /// Builds the HTTP client. A missing secret key is accepted here and
    /// reported as [`PaymentError::NotConfigured`] on first use.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !config.is_configured() {
            warn!("STRIPE_SECRET_KEY is not set; payment intents will fail");
        }

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.trim().to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[instrument(skip(self))]
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.secret_key.is_empty() {
            return Err(PaymentError::NotConfigured);
        }

        let amount_field = amount.to_string();
        let response = self
            .client
            .post(format!("{}{}", self.api_base, PAYMENT_INTENTS_PATH))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount_field.as_str()),
                ("currency", currency),
                ("payment_method_types[]", "card"),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            return Err(PaymentError::Processor {
                status: status.as_u16(),
                message,
            });
        }

        let intent: IntentBody =
            serde_json::from_slice(&body).map_err(|e| PaymentError::Decode(e.to_string()))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Decode("intent has no client_secret".to_string()))?;

        info!(intent_id = %intent.id, amount = intent.amount, "Payment intent created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            currency: intent.currency,
        })
    }
}
