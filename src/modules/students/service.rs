use musicfairy_db::bson::{self, Document, doc};
use musicfairy_db::{Collection, DocumentStore, Filter, FindOptions, StoreError, Update};
use tracing::{info, instrument, warn};

use super::model::{
    CreateUserDto, InsertResponse, MessageResponse, POPULAR_INSTRUCTORS_LIMIT, RegisterOutcome,
    USER_EXISTS_MESSAGE, UpdateResponse, User, UserRole,
};
use crate::metrics::{track_role_granted, track_user_registered};
use crate::middleware::role::lookup_role;
use crate::utils::errors::AppError;
use crate::utils::ids::parse_object_id;

/// Decodes stored users, skipping records that are not valid users (no
/// email, unknown role). Role lookups tolerate the same records.
fn decode_users(docs: Vec<Document>) -> Vec<User> {
    docs.into_iter()
        .filter_map(|document| match bson::from_document::<User>(document) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable user record");
                None
            }
        })
        .collect()
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store))]
    pub async fn list_users(store: &dyn DocumentStore) -> Result<Vec<User>, AppError> {
        let docs = store
            .find(Collection::Students, Filter::all(), FindOptions::default())
            .await?;
        Ok(decode_users(docs))
    }

    /// Registers the user unless the email is already taken. A taken email
    /// is reported as a message, not an error.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register(
        store: &dyn DocumentStore,
        dto: CreateUserDto,
    ) -> Result<RegisterOutcome, AppError> {
        let existing = store
            .find_one(Collection::Students, Filter::all().eq("email", dto.email.as_str()))
            .await?;
        if existing.is_some() {
            track_user_registered(false);
            return Ok(RegisterOutcome::AlreadyExists(MessageResponse::new(
                USER_EXISTS_MESSAGE,
            )));
        }

        let document = bson::to_document(&User::from(dto))?;
        match store.insert_one(Collection::Students, document).await {
            Ok(ack) => {
                track_user_registered(true);
                info!(inserted_id = %ack.inserted_id, "User registered");
                Ok(RegisterOutcome::Created(InsertResponse::from(ack)))
            }
            // Lost a race with a concurrent registration of the same email
            Err(StoreError::DuplicateKey(_)) => {
                track_user_registered(false);
                Ok(RegisterOutcome::AlreadyExists(MessageResponse::new(
                    USER_EXISTS_MESSAGE,
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(store))]
    pub async fn set_role(
        store: &dyn DocumentStore,
        id: &str,
        role: UserRole,
    ) -> Result<UpdateResponse, AppError> {
        let id = parse_object_id(id)?;
        let ack = store
            .update_one(
                Collection::Students,
                Filter::by_id(id),
                Update::set(doc! { "role": role.as_str() }),
            )
            .await?;

        if ack.matched_count > 0 {
            track_role_granted(role.as_str());
            info!(user_id = %id, role = %role, "Role granted");
        }
        Ok(UpdateResponse::from(ack))
    }

    /// Whether `email` currently holds `role`.
    #[instrument(skip(store))]
    pub async fn has_role(
        store: &dyn DocumentStore,
        email: &str,
        role: UserRole,
    ) -> Result<bool, AppError> {
        Ok(lookup_role(store, email).await? == Some(role))
    }

    #[instrument(skip(store))]
    pub async fn list_instructors(
        store: &dyn DocumentStore,
        limit: Option<i64>,
    ) -> Result<Vec<User>, AppError> {
        let mut options = FindOptions::default();
        if let Some(limit) = limit {
            options = options.limit(limit);
        }

        let docs = store
            .find(
                Collection::Students,
                Filter::all().eq("role", UserRole::Instructor.as_str()),
                options,
            )
            .await?;
        Ok(decode_users(docs))
    }

    pub async fn popular_instructors(store: &dyn DocumentStore) -> Result<Vec<User>, AppError> {
        Self::list_instructors(store, Some(POPULAR_INSTRUCTORS_LIMIT)).await
    }
}
