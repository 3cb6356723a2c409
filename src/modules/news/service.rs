use musicfairy_db::{Collection, DocumentStore, Filter, FindOptions};
use musicfairy_models::from_documents;
use tracing::instrument;

use super::model::NewsItem;
use crate::utils::errors::AppError;

pub struct NewsService;

impl NewsService {
    #[instrument(skip(store))]
    pub async fn list_news(store: &dyn DocumentStore) -> Result<Vec<NewsItem>, AppError> {
        let docs = store
            .find(Collection::News, Filter::all(), FindOptions::default())
            .await?;
        Ok(from_documents(docs)?)
    }
}
