use std::fmt;
use std::sync::Arc;

use musicfairy_config::{CorsConfig, DatabaseConfig, JwtConfig, PaymentConfig};
use musicfairy_db::DocumentStore;
use musicfairy_payments::{PaymentGateway, StripeGateway};

use crate::db::init_store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub payments: Arc<dyn PaymentGateway>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub payment_config: PaymentConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("currency", &self.payment_config.currency)
            .finish_non_exhaustive()
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let payment_config = PaymentConfig::from_env();

    Ok(AppState {
        store: init_store(&DatabaseConfig::from_env()).await?,
        payments: Arc::new(StripeGateway::new(&payment_config)?),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        payment_config,
    })
}
