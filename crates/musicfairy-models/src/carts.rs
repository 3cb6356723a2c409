//! Cart items.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Hex id of the class listing
    pub class_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    /// Owner of the item
    pub user_email: String,
    #[serde(default)]
    pub price: f64,
}

/// Body of `POST /carts`. The owner is taken from the caller's token.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct AddToCartDto {
    #[validate(length(equal = 24))]
    pub class_id: String,
    pub title: Option<String>,
    pub image: Option<String>,
    pub instructor_name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl AddToCartDto {
    pub fn into_item(self, user_email: &str) -> CartItem {
        CartItem {
            id: None,
            class_id: self.class_id,
            title: self.title,
            image: self.image,
            instructor_name: self.instructor_name,
            user_email: user_email.to_string(),
            price: self.price,
        }
    }
}

/// Optional owner filter for listings scoped to the caller.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Must match the authenticated email when given
    pub email: Option<String>,
}
