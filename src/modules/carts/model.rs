pub use musicfairy_models::{AddToCartDto, CartItem, DeleteResponse, EmailQuery, InsertResponse};
