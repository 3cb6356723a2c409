//! Sample data generation.

pub mod news;

pub use news::{generate_news, seed_news};
