//! # Music Fairy Payments
//!
//! Payment intents through an external processor.
//!
//! - [`amount`]: decimal price to integer minor units
//! - [`gateway`]: the [`PaymentGateway`] port and its error type
//! - [`stripe`]: Stripe implementation of the port
//!
//! # Example
//!
//! ```ignore
//! use musicfairy_payments::{StripeGateway, create_intent};
//!
//! let gateway = StripeGateway::new(&PaymentConfig::from_env())?;
//! let intent = create_intent(&gateway, 19.99, "usd").await?;
//! println!("{}", intent.client_secret);
//! ```

pub mod amount;
pub mod gateway;
pub mod stripe;

pub use amount::to_minor_units;
pub use gateway::{PaymentError, PaymentGateway, PaymentIntent, create_intent};
pub use stripe::StripeGateway;
