//! # Music Fairy Models
//!
//! Records stored in the document store and the request/response DTOs
//! exchanged over HTTP.
//!
//! # Modules
//!
//! - [`users`]: user accounts and roles
//! - [`classes`]: class listings and moderation
//! - [`carts`]: cart items
//! - [`payments`]: payment records and intents
//! - [`news`]: news items
//! - [`responses`]: acknowledgment and message bodies shared by every module
//!
//! Records carry their id as `_id`, a hex string, and are read from store
//! documents with [`from_document`].

pub mod carts;
pub mod classes;
pub mod news;
pub mod payments;
pub mod responses;
pub mod users;

use bson::Document;
use serde::de::DeserializeOwned;

pub use carts::{AddToCartDto, CartItem, EmailQuery};
pub use classes::{ClassListing, ClassQuery, ClassStatus, CreateClassDto, FeedbackDto};
pub use news::NewsItem;
pub use payments::{
    CreatePaymentDto, PaymentIntentRequest, PaymentIntentResponse, PaymentRecord, PaymentResult,
};
pub use responses::{
    DeleteResponse, InsertResponse, MessageResponse, TokenResponse, UpdateResponse,
};
pub use users::{
    AdminStatusResponse, CreateUserDto, InstructorStatusResponse, RegisterOutcome, User, UserRole,
};

/// Deserializes a store document into a record.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, bson::de::Error> {
    bson::from_document(doc)
}

/// Deserializes every document of a query result.
pub fn from_documents<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, bson::de::Error> {
    docs.into_iter().map(from_document).collect()
}
