use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    adapters::FeedAdapter,
    error::{AppError, Result},
    parser::parse_neo,
    repo::ObjectRepository,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub message: String,
    pub processed_count: u64,
    pub failed_count: u64,
    /// `element_count` as reported by the feed.
    pub total_count: u64,
    pub date_range: String,
}

/// `today ..= today + days_ahead`, in UTC.
pub fn window_from_today(days_ahead: u32) -> Result<(NaiveDate, NaiveDate)> {
    let start = Utc::now().date_naive();
    let end = start
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .ok_or_else(|| {
            AppError::InvalidParameter(format!("days_ahead {days_ahead} is out of range"))
        })?;
    Ok((start, end))
}

/// Fetches one window and upserts every record in it.
///
/// A fetch failure fails the whole call. After that each record is committed
/// on its own: a record that fails to parse or store is logged and skipped.
pub async fn ingest_window(
    feed: &dyn FeedAdapter,
    objects: &ObjectRepository,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IngestReport> {
    let raw = feed.fetch_window(start, end).await?;
    let total_count = raw.element_count;
    let now = Utc::now();

    let mut processed_count = 0u64;
    let mut failed_count = 0u64;
    for record in raw.into_records() {
        let reference_id = record
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string();

        let stored = match parse_neo(record, now) {
            Ok(neo) => objects.upsert(neo).await,
            Err(e) => Err(e),
        };
        match stored {
            Ok(_) => processed_count += 1,
            Err(e) => {
                warn!(error = %e, reference_id = %reference_id, "skipping feed record");
                failed_count += 1;
            }
        }
    }

    info!(
        feed = feed.name(),
        %start,
        %end,
        processed = processed_count,
        failed = failed_count,
        "ingestion completed"
    );

    Ok(IngestReport {
        message: format!("Successfully processed {processed_count} asteroids"),
        processed_count,
        failed_count,
        total_count,
        date_range: format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
    })
}
