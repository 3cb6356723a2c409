use chrono::Utc;
use musicfairy_db::{Collection, DocumentStore, Filter, FindOptions};
use musicfairy_models::from_documents;
use musicfairy_payments::{PaymentError, PaymentGateway, create_intent};
use tracing::{error, info, instrument};

use super::model::{
    CreatePaymentDto, DeleteResponse, InsertResponse, PaymentIntentResponse, PaymentRecord,
    PaymentResult,
};
use crate::metrics::{track_payment_intent_created, track_payment_recorded};
use crate::utils::errors::AppError;
use crate::utils::ids::parse_object_ids;

pub struct PaymentService;

impl PaymentService {
    #[instrument(skip(gateway))]
    pub async fn create_payment_intent(
        gateway: &dyn PaymentGateway,
        price: f64,
        currency: &str,
    ) -> Result<PaymentIntentResponse, AppError> {
        let result = create_intent(gateway, price, currency).await;
        track_payment_intent_created(result.is_ok());

        let intent = result.map_err(PaymentError::into_app_error)?;
        info!(intent_id = %intent.id, amount = intent.amount, "Payment intent created");
        Ok(PaymentIntentResponse {
            client_secret: intent.client_secret,
        })
    }

    /// Stores the payment, then clears the cart items it settled.
    ///
    /// The two writes are not atomic. When the cleanup fails the payment
    /// stays recorded and the error is returned.
    #[instrument(skip(store, dto), fields(transaction_id = %dto.transaction_id))]
    pub async fn record_payment(
        store: &dyn DocumentStore,
        email: &str,
        dto: CreatePaymentDto,
    ) -> Result<PaymentResult, AppError> {
        let cart_item_ids = parse_object_ids(&dto.cart_item_ids)?;
        let record = dto.into_record(email, Utc::now());
        let price = record.price;

        let document = musicfairy_db::bson::to_document(&record)?;
        let inserted = store.insert_one(Collection::Payments, document).await?;

        let deleted = store
            .delete_many(
                Collection::Carts,
                Filter::all()
                    .any_of("_id", cart_item_ids)
                    .eq("user_email", email),
            )
            .await
            .map_err(|err| {
                error!(
                    payment_id = %inserted.inserted_id,
                    email = %email,
                    error = %err,
                    "Payment recorded but cart cleanup failed"
                );
                err
            })?;

        track_payment_recorded(price);
        info!(
            payment_id = %inserted.inserted_id,
            deleted = deleted.deleted_count,
            "Payment recorded"
        );

        Ok(PaymentResult {
            insert_result: InsertResponse::from(inserted),
            delete_result: DeleteResponse::from(deleted),
        })
    }

    /// The user's payments, newest first.
    #[instrument(skip(store))]
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Vec<PaymentRecord>, AppError> {
        let docs = store
            .find(
                Collection::Payments,
                Filter::all().eq("email", email),
                FindOptions::default().sort_desc("date"),
            )
            .await?;
        Ok(from_documents(docs)?)
    }
}
