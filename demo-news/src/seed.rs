use chrono::{Duration, Utc};

use owned_content::{NewsStore, Stores};

const SAMPLE_NEWS: [(&str, &str); 3] = [
    (
        "Observatory opens to visitors",
        "The city observatory opens its doors this weekend for night sky tours.",
    ),
    (
        "River festival moves downstream",
        "This year's river festival takes place on the south embankment.",
    ),
    (
        "Library extends opening hours",
        "The central library now stays open until ten in the evening.",
    ),
];

/// Fill an empty news table with a few dated items, newest first.
///
/// Returns the number of items created.
pub async fn seed_news(stores: &Stores) -> Result<usize, owned_content::NewsError> {
    if !NewsStore::latest_news(stores, 1).await?.is_empty() {
        tracing::debug!("News table already populated, skipping seed");
        return Ok(0);
    }

    let today = Utc::now().date_naive();
    for (days_ago, (title, text)) in SAMPLE_NEWS.iter().enumerate() {
        let date = today - Duration::days(days_ago as i64);
        NewsStore::create_news(stores, title, text, date).await?;
    }

    tracing::info!("Seeded {} news items", SAMPLE_NEWS.len());
    Ok(SAMPLE_NEWS.len())
}
