//! CSV snapshot export.
//!
//! One row per enriched item, list fields joined with `;`, absent
//! horizon labels written as empty cells.

use anyhow::{Context, Result};
use newslab_core::pipeline::EnrichedRecord;
use std::path::Path;

const COLUMNS: &[&str] = &[
    "event_id",
    "timestamp",
    "source",
    "headline",
    "text",
    "url",
    "tickers_all",
    "primary_ticker",
    "ticker_resolution_reason",
    "name_tickers_all",
    "primary_ticker_name",
    "name_ticker_resolution_reason",
    "ticker",
    "ticker_confidence",
    "source_credibility",
    "label_time_horizon_1_min",
    "label_time_horizon_2_min",
];

pub fn write_snapshot(path: &Path, records: &[EnrichedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating snapshot {}", path.display()))?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(snapshot_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

fn snapshot_row(record: &EnrichedRecord) -> Vec<String> {
    vec![
        record.event_id.clone(),
        record.timestamp.clone(),
        record.source.clone(),
        record.headline.clone(),
        record.body.clone(),
        record.url.clone(),
        record.tickers_all.join(";"),
        record.primary_ticker.clone(),
        record.ticker_resolution_reason.as_str().to_string(),
        record.name_tickers_all.join(";"),
        record.primary_ticker_name.clone(),
        record.name_ticker_resolution_reason.as_str().to_string(),
        record.ticker.clone(),
        record.ticker_confidence.as_str().to_string(),
        record.source_credibility.clone(),
        opt_minutes(record.label_time_horizon_1_min),
        opt_minutes(record.label_time_horizon_2_min),
    ]
}

fn opt_minutes(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
