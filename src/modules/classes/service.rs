use musicfairy_db::{Collection, DocumentStore, Filter, FindOptions, Update, bson::doc};
use musicfairy_models::from_documents;
use tracing::{info, instrument};

use super::model::{
    ClassListing, ClassQuery, ClassStatus, CreateClassDto, InsertResponse, POPULAR_CLASSES_LIMIT,
    UpdateResponse,
};
use crate::metrics::{track_class_created, track_class_moderated};
use crate::utils::errors::AppError;
use crate::utils::ids::parse_object_id;

pub struct ClassService;

impl ClassService {
    #[instrument(skip(store))]
    pub async fn list_classes(
        store: &dyn DocumentStore,
        query: ClassQuery,
    ) -> Result<Vec<ClassListing>, AppError> {
        let filter = match query.instructor_email {
            Some(email) => Filter::all().eq("instructor_email", email),
            None => Filter::all(),
        };

        let docs = store
            .find(Collection::Classes, filter, FindOptions::default())
            .await?;
        Ok(from_documents(docs)?)
    }

    #[instrument(skip(store))]
    pub async fn list_approved(store: &dyn DocumentStore) -> Result<Vec<ClassListing>, AppError> {
        let docs = store
            .find(
                Collection::Classes,
                Filter::all().eq("status", ClassStatus::Approved.as_str()),
                FindOptions::default(),
            )
            .await?;
        Ok(from_documents(docs)?)
    }

    /// Approved classes with the most enrollments first.
    #[instrument(skip(store))]
    pub async fn popular_approved(
        store: &dyn DocumentStore,
    ) -> Result<Vec<ClassListing>, AppError> {
        let docs = store
            .find(
                Collection::Classes,
                Filter::all().eq("status", ClassStatus::Approved.as_str()),
                FindOptions::default()
                    .sort_desc("enrolled")
                    .limit(POPULAR_CLASSES_LIMIT),
            )
            .await?;
        Ok(from_documents(docs)?)
    }

    #[instrument(skip(store, dto))]
    pub async fn create_class(
        store: &dyn DocumentStore,
        instructor_email: &str,
        instructor_name: Option<&str>,
        dto: CreateClassDto,
    ) -> Result<InsertResponse, AppError> {
        let listing = dto.into_listing(instructor_email, instructor_name);
        let document = musicfairy_db::bson::to_document(&listing)?;
        let ack = store.insert_one(Collection::Classes, document).await?;

        track_class_created();
        info!(class_id = %ack.inserted_id, "Class submitted for review");
        Ok(InsertResponse::from(ack))
    }

    #[instrument(skip(store))]
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        status: ClassStatus,
    ) -> Result<UpdateResponse, AppError> {
        let id = parse_object_id(id)?;
        let ack = store
            .update_one(
                Collection::Classes,
                Filter::by_id(id),
                Update::set(doc! { "status": status.as_str() }),
            )
            .await?;

        if ack.matched_count > 0 {
            track_class_moderated(status.as_str());
            info!(class_id = %id, status = %status.as_str(), "Class moderated");
        }
        Ok(UpdateResponse::from(ack))
    }

    /// Stores moderator feedback. A missing listing is created as a pending
    /// stub holding only the feedback.
    #[instrument(skip(store, feedback))]
    pub async fn set_feedback(
        store: &dyn DocumentStore,
        id: &str,
        feedback: String,
    ) -> Result<UpdateResponse, AppError> {
        let id = parse_object_id(id)?;
        let ack = store
            .update_one(
                Collection::Classes,
                Filter::by_id(id),
                Update::set(doc! { "feedback": feedback })
                    .set_on_insert(doc! { "status": ClassStatus::Pending.as_str() })
                    .upsert(),
            )
            .await?;

        track_class_moderated("feedback");
        Ok(UpdateResponse::from(ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicfairy_db::MemoryStore;
    use musicfairy_db::bson::oid::ObjectId;

    fn dto(title: &str) -> CreateClassDto {
        CreateClassDto {
            title: title.to_string(),
            image: None,
            instructor_name: None,
            available_seats: 10,
            price: 25.0,
        }
    }

    async fn insert_approved(store: &MemoryStore, enrolled: i64) {
        store
            .insert_one(
                Collection::Classes,
                doc! { "title": format!("class {enrolled}"), "status": "approved", "enrolled": enrolled },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_status_on_missing_class_matches_nothing() {
        let store = MemoryStore::new();
        let ack = ClassService::set_status(&store, &ObjectId::new().to_hex(), ClassStatus::Denied)
            .await
            .unwrap();
        assert_eq!((ack.matched_count, ack.modified_count), (0, 0));
        assert!(ack.upserted_id.is_none());
        assert!(store.is_empty(Collection::Classes));
    }

    #[tokio::test]
    async fn test_created_class_is_pending_until_moderated() {
        let store = MemoryStore::new();
        let created = ClassService::create_class(&store, "t@x.com", Some("Tess"), dto("Harp"))
            .await
            .unwrap();

        let classes = ClassService::list_classes(&store, ClassQuery::default())
            .await
            .unwrap();
        assert_eq!(classes[0].status, ClassStatus::Pending);
        assert!(ClassService::list_approved(&store).await.unwrap().is_empty());

        ClassService::set_status(&store, &created.inserted_id, ClassStatus::Approved)
            .await
            .unwrap();
        let approved = ClassService::list_approved(&store).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].title, "Harp");
    }

    #[tokio::test]
    async fn test_filter_by_instructor() {
        let store = MemoryStore::new();
        ClassService::create_class(&store, "a@x.com", None, dto("Oboe"))
            .await
            .unwrap();
        ClassService::create_class(&store, "b@x.com", None, dto("Flute"))
            .await
            .unwrap();

        let classes = ClassService::list_classes(
            &store,
            ClassQuery {
                instructor_email: Some("b@x.com".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].title, "Flute");
    }

    #[tokio::test]
    async fn test_popular_approved_sorted_and_capped() {
        let store = MemoryStore::new();
        for enrolled in [4, 9, 1, 12, 7, 3, 15, 2] {
            insert_approved(&store, enrolled).await;
        }

        let popular = ClassService::popular_approved(&store).await.unwrap();
        let enrolled: Vec<i64> = popular.iter().map(|c| c.enrolled).collect();
        assert_eq!(enrolled, vec![15, 12, 9, 7, 4, 3]);
    }

    #[tokio::test]
    async fn test_feedback_on_missing_class_upserts_pending_stub() {
        let store = MemoryStore::new();
        let id = ObjectId::new().to_hex();

        let result = ClassService::set_feedback(&store, &id, "add a syllabus".to_string())
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.upserted_id.as_deref(), Some(id.as_str()));

        let classes = ClassService::list_classes(&store, ClassQuery::default())
            .await
            .unwrap();
        assert_eq!(classes[0].feedback.as_deref(), Some("add a syllabus"));
        assert_eq!(classes[0].status, ClassStatus::Pending);
    }
}
