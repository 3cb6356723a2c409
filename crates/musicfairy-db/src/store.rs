//! The document store port.
//!
//! Handlers talk to persistence exclusively through [`DocumentStore`], a
//! collection-scoped interface with equality filters, optional sort/limit on
//! reads, `$set`/`$setOnInsert` updates with an upsert flag, and deletes.
//!
//! Documents returned from the store always carry their primary key as a
//! hex string under `_id` (see [`normalize_id`]), so records can be
//! deserialized into plain `Option<String>` id fields.

use std::cmp::Ordering;

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};

/// Collections used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// User accounts of every role; the name is kept for compatibility
    /// with existing data.
    Students,
    Classes,
    Carts,
    Payments,
    News,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Students,
        Collection::Classes,
        Collection::Carts,
        Collection::Payments,
        Collection::News,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Classes => "classes",
            Collection::Carts => "carts",
            Collection::Payments => "payments",
            Collection::News => "news",
        }
    }

    /// Field that must be unique across the collection, if any.
    pub fn unique_key(self) -> Option<&'static str> {
        match self {
            Collection::Students => Some("email"),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("document serialization failed: {0}")]
    Serialization(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq { field: String, value: Bson },
    In { field: String, values: Vec<Bson> },
}

/// Conjunction of equality / membership conditions on top-level fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: ObjectId) -> Self {
        Self::all().eq("_id", id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.conditions.push(Condition::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Field value must equal one of `values` (`$in`).
    pub fn any_of<V>(mut self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Bson>,
    {
        self.conditions.push(Condition::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for condition in &self.conditions {
            match condition {
                Condition::Eq { field, value } => {
                    doc.insert(field.clone(), value.clone());
                }
                Condition::In { field, values } => {
                    doc.insert(field.clone(), bson::doc! { "$in": values.clone() });
                }
            }
        }
        doc
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Eq { field, value } => doc.get(field) == Some(value),
            Condition::In { field, values } => doc
                .get(field)
                .map(|actual| values.contains(actual))
                .unwrap_or(false),
        })
    }

    /// Equality fields, used to seed a document created by an upsert.
    pub fn equality_fields(&self) -> Document {
        let mut doc = Document::new();
        for condition in &self.conditions {
            if let Condition::Eq { field, value } = condition {
                doc.insert(field.clone(), value.clone());
            }
        }
        doc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn to_document(&self) -> Document {
        let direction = match self.order {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        };
        let mut doc = Document::new();
        doc.insert(self.field.clone(), direction);
        doc
    }
}

/// Read options for [`DocumentStore::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<Sort>,
    pub limit: Option<i64>,
}

impl FindOptions {
    pub fn sort_asc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            order: SortOrder::Ascending,
        });
        self
    }

    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            order: SortOrder::Descending,
        });
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A `$set` update, optionally with `$setOnInsert` fields and upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    set: Document,
    set_on_insert: Option<Document>,
    upsert: bool,
}

impl Update {
    pub fn set(fields: Document) -> Self {
        Self {
            set: fields,
            set_on_insert: None,
            upsert: false,
        }
    }

    /// Fields written only when the update creates a new document.
    pub fn set_on_insert(mut self, fields: Document) -> Self {
        self.set_on_insert = Some(fields);
        self
    }

    pub fn upsert(mut self) -> Self {
        self.upsert = true;
        self
    }

    pub fn is_upsert(&self) -> bool {
        self.upsert
    }

    pub fn set_fields(&self) -> &Document {
        &self.set
    }

    pub fn insert_fields(&self) -> Option<&Document> {
        self.set_on_insert.as_ref()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = bson::doc! { "$set": self.set.clone() };
        if let Some(on_insert) = &self.set_on_insert {
            doc.insert("$setOnInsert", on_insert.clone());
        }
        doc
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertAck {
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAck {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAck {
    pub deleted_count: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: Collection,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Inserts a document, generating an ObjectId `_id` when absent.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, StoreError>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> Result<UpdateAck, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Filter)
    -> Result<DeleteAck, StoreError>;

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases connections. Called once on graceful shutdown.
    async fn shutdown(&self) {}
}

pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rewrites an ObjectId `_id` as its hex string.
pub fn normalize_id(mut doc: Document) -> Document {
    if let Some(Bson::ObjectId(oid)) = doc.get("_id") {
        let hex = oid.to_hex();
        doc.insert("_id", hex);
    }
    doc
}

/// Total order over the BSON values the API sorts on: numbers compare
/// numerically, strings lexically, missing values first.
pub fn compare_bson(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    fn as_f64(value: &Bson) -> Option<f64> {
        match value {
            Bson::Int32(v) => Some(f64::from(*v)),
            Bson::Int64(v) => Some(*v as f64),
            Bson::Double(v) => Some(*v),
            _ => None,
        }
    }

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (as_f64(a), as_f64(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => match (a, b) {
                (Bson::String(x), Bson::String(y)) => x.cmp(y),
                (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
                (Bson::ObjectId(x), Bson::ObjectId(y)) => x.cmp(y),
                _ => Ordering::Equal,
            },
        },
    }
}
