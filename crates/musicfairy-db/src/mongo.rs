//! MongoDB-backed [`DocumentStore`].

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Database, IndexModel,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
};
use tracing::{info, instrument};

use crate::store::{
    Collection, DeleteAck, DocumentStore, Filter, FindOptions, InsertAck, StoreError, Update,
    UpdateAck, id_to_string, normalize_id,
};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store handle owning one MongoDB client for the process lifetime.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connects with the Stable API v1 and verifies the deployment with a ping.
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.app_name = Some("musicfairy".to_string());

        let client = Client::with_options(options)?;
        let store = Self {
            database: client.database(database_name),
            client,
        };

        store.ping().await?;
        info!(database = %database_name, "Connected to MongoDB");
        Ok(store)
    }

    /// Creates the unique indexes declared by [`Collection::unique_key`].
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            if let Some(field) = collection.unique_key() {
                let mut keys = Document::new();
                keys.insert(field, 1);
                let index = IndexModel::builder()
                    .keys(keys)
                    .options(IndexOptions::builder().unique(true).build())
                    .build();
                self.collection(collection).create_index(index).await?;
            }
        }
        Ok(())
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }
}

fn map_write_error(err: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return StoreError::DuplicateKey(write_error.message.clone());
        }
    }
    StoreError::Driver(err)
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[instrument(skip(self), fields(collection = collection.name()))]
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let coll = self.collection(collection);
        let mut action = coll.find(filter.to_document());
        if let Some(sort) = &options.sort {
            action = action.sort(sort.to_document());
        }
        if let Some(limit) = options.limit {
            action = action.limit(limit);
        }

        let documents: Vec<Document> = action.await?.try_collect().await?;
        Ok(documents.into_iter().map(normalize_id).collect())
    }

    #[instrument(skip(self), fields(collection = collection.name()))]
    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let document = self
            .collection(collection)
            .find_one(filter.to_document())
            .await?;
        Ok(document.map(normalize_id))
    }

    #[instrument(skip(self, document), fields(collection = collection.name()))]
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, StoreError> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(map_write_error)?;
        Ok(InsertAck {
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    #[instrument(skip(self), fields(collection = collection.name()))]
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> Result<UpdateAck, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), update.to_document())
            .upsert(update.is_upsert())
            .await
            .map_err(map_write_error)?;
        Ok(UpdateAck {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(id_to_string),
        })
    }

    #[instrument(skip(self), fields(collection = collection.name()))]
    async fn delete_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter.to_document())
            .await?;
        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }

    #[instrument(skip(self), fields(collection = collection.name()))]
    async fn delete_many(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        let result = self
            .collection(collection)
            .delete_many(filter.to_document())
            .await?;
        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn shutdown(&self) {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
