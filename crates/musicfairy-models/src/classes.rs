//! Class listings and their moderation workflow.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Moderation state of a listing. New listings are always `pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ClassStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassStatus::Pending => "pending",
            ClassStatus::Approved => "approved",
            ClassStatus::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ClassListing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub available_seats: i64,
    pub enrolled: i64,
    pub price: f64,
    pub status: ClassStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub image: Option<String>,
    /// Defaults to the name carried by the caller's token
    #[validate(length(min = 1, max = 100))]
    pub instructor_name: Option<String>,
    #[validate(range(min = 0))]
    pub available_seats: i64,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl CreateClassDto {
    /// Builds a pending listing owned by `instructor_email`.
    pub fn into_listing(self, instructor_email: &str, fallback_name: Option<&str>) -> ClassListing {
        ClassListing {
            id: None,
            title: self.title,
            image: self.image,
            instructor_name: self
                .instructor_name
                .or_else(|| fallback_name.map(str::to_string))
                .unwrap_or_default(),
            instructor_email: instructor_email.to_string(),
            available_seats: self.available_seats,
            enrolled: 0,
            price: self.price,
            status: ClassStatus::Pending,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct FeedbackDto {
    #[validate(length(min = 1, max = 2000))]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ClassQuery {
    /// Only listings owned by this instructor
    pub instructor_email: Option<String>,
}
