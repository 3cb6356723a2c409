//! In-process [`DocumentStore`] with MongoDB-compatible semantics for the
//! subset of operations the API uses. Backs the test suite and
//! `STORE_BACKEND=memory` local runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};

use crate::store::{
    Collection, DeleteAck, DocumentStore, Filter, FindOptions, InsertAck, SortOrder, StoreError,
    Update, UpdateAck, compare_bson, id_to_string, normalize_id,
};

type Collections = HashMap<Collection, Vec<Document>>;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .map(|guard| guard.get(&collection).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }

    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> Result<T, StoreError> {
        let guard = self
            .collections
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut Collections) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        f(&mut guard)
    }
}

fn check_unique(
    collection: Collection,
    documents: &[Document],
    candidate: &Document,
    skip: Option<usize>,
) -> Result<(), StoreError> {
    let Some(key) = collection.unique_key() else {
        return Ok(());
    };
    let Some(value) = candidate.get(key) else {
        return Ok(());
    };

    let clash = documents
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .any(|(_, doc)| doc.get(key) == Some(value));

    if clash {
        return Err(StoreError::DuplicateKey(format!(
            "{} already has a document with {key} {value}",
            collection.name()
        )));
    }
    Ok(())
}

fn apply_set(target: &mut Document, fields: &Document) {
    for (key, value) in fields {
        target.insert(key.clone(), value.clone());
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let mut documents: Vec<Document> = self.read(|collections| {
            collections
                .get(&collection)
                .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
                .unwrap_or_default()
        })?;

        if let Some(sort) = &options.sort {
            documents.sort_by(|a, b| {
                let ordering = compare_bson(a.get(&sort.field), b.get(&sort.field));
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = options.limit.filter(|l| *l > 0) {
            documents.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(documents.into_iter().map(normalize_id).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.read(|collections| {
            collections
                .get(&collection)
                .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned())
                .map(normalize_id)
        })
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertAck, StoreError> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document
            .get("_id")
            .map(id_to_string)
            .unwrap_or_default();

        self.write(|collections| {
            let docs = collections.entry(collection).or_default();
            if docs.iter().any(|d| d.get("_id") == document.get("_id")) {
                return Err(StoreError::DuplicateKey(format!("_id {inserted_id}")));
            }
            check_unique(collection, docs, &document, None)?;
            docs.push(document);
            Ok(())
        })?;

        Ok(InsertAck { inserted_id })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> Result<UpdateAck, StoreError> {
        self.write(|collections| {
            let docs = collections.entry(collection).or_default();

            if let Some(index) = docs.iter().position(|d| filter.matches(d)) {
                let mut updated = docs[index].clone();
                apply_set(&mut updated, update.set_fields());
                check_unique(collection, docs, &updated, Some(index))?;

                let modified = updated != docs[index];
                docs[index] = updated;
                return Ok(UpdateAck {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                    upserted_id: None,
                });
            }

            if !update.is_upsert() {
                return Ok(UpdateAck {
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: None,
                });
            }

            let mut created = filter.equality_fields();
            if let Some(on_insert) = update.insert_fields() {
                apply_set(&mut created, on_insert);
            }
            apply_set(&mut created, update.set_fields());
            if !created.contains_key("_id") {
                created.insert("_id", ObjectId::new());
            }
            check_unique(collection, docs, &created, None)?;

            let upserted_id = created.get("_id").map(id_to_string);
            docs.push(created);
            Ok(UpdateAck {
                matched_count: 0,
                modified_count: 0,
                upserted_id,
            })
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        self.write(|collections| {
            let docs = collections.entry(collection).or_default();
            let deleted_count = match docs.iter().position(|d| filter.matches(d)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            };
            Ok(DeleteAck { deleted_count })
        })
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        self.write(|collections| {
            let docs = collections.entry(collection).or_default();
            let before = docs.len();
            docs.retain(|d| !filter.matches(d));
            Ok(DeleteAck {
                deleted_count: (before - docs.len()) as u64,
            })
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read(|_| ())
    }
}
