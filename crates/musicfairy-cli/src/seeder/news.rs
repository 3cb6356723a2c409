//! News seeding functionality.

use std::time::Instant;

use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use musicfairy_db::{Collection, DocumentStore, StoreError};
use musicfairy_models::NewsItem;

/// Generates `count` news items dated within the last year.
pub fn generate_news(count: usize) -> Vec<NewsItem> {
    (0..count)
        .map(|n| {
            let title: String = Sentence(3..7).fake();
            let content: String = Paragraph(2..5).fake();
            let days_ago: i64 = (0..365).fake();

            NewsItem {
                id: None,
                title: Some(title.trim_end_matches('.').to_string()),
                content,
                image: Some(format!("https://picsum.photos/seed/musicfairy-{n}/800/450")),
                date: Some((Utc::now() - Duration::days(days_ago)).to_rfc3339()),
            }
        })
        .collect()
}

/// Inserts generated news items and returns their ids.
pub async fn seed_news(store: &dyn DocumentStore, count: usize) -> Result<Vec<String>, StoreError> {
    let start_time = Instant::now();
    println!("📰 Seeding {} news items...", count);

    let mut ids = Vec::with_capacity(count);
    for item in generate_news(count) {
        let ack = store
            .insert_one(Collection::News, bson::to_document(&item)?)
            .await?;
        ids.push(ack.inserted_id);
    }

    println!("   ✓ Inserted {} news items in {:?}", ids.len(), start_time.elapsed());
    Ok(ids)
}
