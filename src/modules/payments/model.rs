pub use musicfairy_models::{
    CreatePaymentDto, DeleteResponse, EmailQuery, InsertResponse, PaymentIntentRequest,
    PaymentIntentResponse, PaymentRecord, PaymentResult,
};
