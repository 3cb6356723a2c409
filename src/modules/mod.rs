//! Feature modules. Each one is split into `model`, `service`,
//! `controller` and `router`.

pub mod auth;
pub mod carts;
pub mod classes;
pub mod health;
pub mod news;
pub mod payments;
pub mod students;
