use musicfairy_db::{Collection, DocumentStore, Filter, FindOptions};
use musicfairy_models::from_documents;
use tracing::instrument;

use super::model::{AddToCartDto, CartItem, DeleteResponse, InsertResponse};
use crate::utils::errors::AppError;
use crate::utils::ids::parse_object_id;

pub struct CartService;

impl CartService {
    #[instrument(skip(store))]
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_email: &str,
    ) -> Result<Vec<CartItem>, AppError> {
        let docs = store
            .find(
                Collection::Carts,
                Filter::all().eq("user_email", user_email),
                FindOptions::default(),
            )
            .await?;
        Ok(from_documents(docs)?)
    }

    #[instrument(skip(store, dto))]
    pub async fn add_item(
        store: &dyn DocumentStore,
        user_email: &str,
        dto: AddToCartDto,
    ) -> Result<InsertResponse, AppError> {
        let document = musicfairy_db::bson::to_document(&dto.into_item(user_email))?;
        let ack = store.insert_one(Collection::Carts, document).await?;
        Ok(InsertResponse::from(ack))
    }

    /// Removes one of the caller's items. Another user's item id matches
    /// nothing and reports a zero count.
    #[instrument(skip(store))]
    pub async fn remove_item(
        store: &dyn DocumentStore,
        user_email: &str,
        id: &str,
    ) -> Result<DeleteResponse, AppError> {
        let id = parse_object_id(id)?;
        let ack = store
            .delete_one(
                Collection::Carts,
                Filter::by_id(id).eq("user_email", user_email),
            )
            .await?;
        Ok(DeleteResponse::from(ack))
    }
}
