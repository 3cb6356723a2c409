use std::env;

/// Settings for the external payment processor.
#[derive(Clone, Debug)]
pub struct PaymentConfig {
    /// Processor secret key. Empty when payments are not configured.
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
    pub timeout_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_base: "https://api.stripe.com".to_string(),
            currency: "usd".to_string(),
            timeout_secs: 30,
        }
    }
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret_key: env::var("STRIPE_SECRET_KEY")
                .or_else(|_| env::var("PAYMENT_SECRET_KEY"))
                .unwrap_or(defaults.secret_key),
            api_base: env::var("STRIPE_API_BASE").unwrap_or(defaults.api_base),
            currency: env::var("PAYMENT_CURRENCY")
                .map(|c| c.to_ascii_lowercase())
                .unwrap_or(defaults.currency),
            timeout_secs: env::var("STRIPE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret_key.trim().is_empty()
    }
}
