pub use musicfairy_models::{
    AdminStatusResponse, CreateUserDto, InsertResponse, InstructorStatusResponse,
    MessageResponse, RegisterOutcome, UpdateResponse, User, UserRole,
};

/// Cap of the popular instructors listing.
pub const POPULAR_INSTRUCTORS_LIMIT: i64 = 6;

pub const USER_EXISTS_MESSAGE: &str = "user already exists";
