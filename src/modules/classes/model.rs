pub use musicfairy_models::{
    ClassListing, ClassQuery, ClassStatus, CreateClassDto, FeedbackDto, InsertResponse,
    UpdateResponse,
};

/// Cap of the popular classes listing.
pub const POPULAR_CLASSES_LIMIT: i64 = 6;
