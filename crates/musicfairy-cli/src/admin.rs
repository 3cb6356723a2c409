//! Role management outside the HTTP API.
//!
//! The API only lets admins promote users, so the first admin has to be
//! created here.

use bson::doc;
use musicfairy_db::{Collection, DocumentStore, Filter, StoreError, Update};
use musicfairy_models::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoteOutcome {
    Promoted,
    /// The user already had the role
    Unchanged,
    NotFound,
}

/// Sets the role of the user registered under `email`.
pub async fn promote_user(
    store: &dyn DocumentStore,
    email: &str,
    role: UserRole,
) -> Result<PromoteOutcome, StoreError> {
    let ack = store
        .update_one(
            Collection::Students,
            Filter::all().eq("email", email),
            Update::set(doc! { "role": role.as_str() }),
        )
        .await?;

    Ok(match (ack.matched_count, ack.modified_count) {
        (0, _) => PromoteOutcome::NotFound,
        (_, 0) => PromoteOutcome::Unchanged,
        _ => PromoteOutcome::Promoted,
    })
}
