//! Price samples and derived horizon labels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped price sample, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub ts: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(ts: DateTime<Utc>, price: f64) -> Self {
        Self { ts, price }
    }
}

/// Durations (whole minutes) from the event to a local price bottom and
/// from that bottom to a subsequent peak, with the extremum timestamps.
///
/// All four fields are absent when the bottom window held no data; the
/// peak fields alone are absent when nothing traded strictly after the
/// bottom inside the peak window. A peak is never reported without a
/// bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonLabels {
    pub time_to_bottom_min: Option<i64>,
    pub time_bottom_to_peak_min: Option<i64>,
    pub bottom_ts: Option<DateTime<Utc>>,
    pub peak_ts: Option<DateTime<Utc>>,
}

impl HorizonLabels {
    /// True when phase 1 found no data at all.
    pub fn is_empty(&self) -> bool {
        self.bottom_ts.is_none()
    }
}
