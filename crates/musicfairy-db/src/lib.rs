//! # Music Fairy DB
//!
//! Persistence for the Music Fairy API.
//!
//! - [`store`]: the [`DocumentStore`] port plus filter, sort and update types
//! - [`mongo`]: MongoDB adapter used in production
//! - [`memory`]: in-process adapter for tests and local runs

pub mod memory;
pub mod mongo;
pub mod store;

pub use bson;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{
    Collection, DeleteAck, DocumentStore, Filter, FindOptions, InsertAck, Sort, SortOrder,
    StoreError, Update, UpdateAck, normalize_id,
};
