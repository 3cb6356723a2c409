pub use musicfairy_models::NewsItem;
