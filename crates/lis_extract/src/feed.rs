use chrono::{DateTime, Utc};
use futures::future::join_all;
use lis_core::PostRecord;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::post::extract_post;

const MAX_CONCURRENT_EXTRACTIONS: usize = 10;

/// Extract every fragment on a bounded pool, collecting records in arrival
/// order. Fragments without body text are dropped. All fragments share the
/// single read-only `scrape_time` reference.
pub async fn collect_posts(fragments: &[String], scrape_time: DateTime<Utc>) -> Vec<PostRecord> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_EXTRACTIONS));

    let extraction_futures: Vec<_> = fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                let record = extract_post(fragment, scrape_time);
                if record.is_none() {
                    debug!("Fragment {} has no post text, dropping", index);
                }
                record
            }
        })
        .collect();

    join_all(extraction_futures)
        .await
        .into_iter()
        .flatten()
        .collect()
}
