//! Price-horizon calculator.
//!
//! Two chained, bounded window searches over minute prices: find the
//! local bottom after the event, then the local peak after that bottom.
//! Missing data at either phase is a normal silent outcome — labels stay
//! absent and nothing is retried.

use crate::domain::{HorizonLabels, PricePoint};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Collaborator supplying price samples for a symbol and time range.
///
/// Implementations may return any subset of the requested range,
/// unsorted, possibly empty. The calculator normalizes and filters;
/// timeout and retry policy belong to the implementation, not here.
pub trait PriceSource: Send + Sync {
    fn fetch_prices(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<PricePoint>;
}

/// Price source with no data; every query comes back empty. Used for
/// offline runs where horizon labels are intentionally left absent.
pub struct NoPriceData;

impl PriceSource for NoPriceData {
    fn fetch_prices(&self, _: &str, _: DateTime<Utc>, _: DateTime<Utc>) -> Vec<PricePoint> {
        Vec::new()
    }
}

/// Search window lengths in minutes. Both default to 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonWindows {
    /// Window after the event in which to find the bottom.
    pub bottom_window_min: i64,
    /// Window after the bottom in which to find the peak.
    pub peak_window_min: i64,
}

impl Default for HorizonWindows {
    fn default() -> Self {
        Self {
            bottom_window_min: 7 * 24 * 60,
            peak_window_min: 7 * 24 * 60,
        }
    }
}

/// Compute both horizon labels for `symbol` around `event_ts`.
///
/// Phase 1 searches `[event_ts, event_ts + bottom_window]` (inclusive)
/// for the minimum price, earliest timestamp on ties. Phase 2 searches
/// `(bottom_ts, bottom_ts + peak_window]` — strictly after the bottom —
/// for the maximum price, earliest timestamp on ties. The peak window
/// never opens without a bottom.
pub fn compute_time_horizons(
    source: &dyn PriceSource,
    symbol: &str,
    event_ts: DateTime<Utc>,
    windows: &HorizonWindows,
) -> HorizonLabels {
    let bottom_end = event_ts + Duration::minutes(windows.bottom_window_min);
    let mut bottom_points = source.fetch_prices(symbol, event_ts, bottom_end);
    bottom_points.retain(|p| p.ts >= event_ts && p.ts <= bottom_end);
    bottom_points.sort_by_key(|p| p.ts);

    let Some(bottom) = min_point(&bottom_points) else {
        return HorizonLabels::default();
    };
    let time_to_bottom_min = Some(whole_minutes(event_ts, bottom.ts));

    let peak_end = bottom.ts + Duration::minutes(windows.peak_window_min);
    let mut peak_points = source.fetch_prices(symbol, bottom.ts, peak_end);
    peak_points.retain(|p| p.ts > bottom.ts && p.ts <= peak_end);
    peak_points.sort_by_key(|p| p.ts);

    let Some(peak) = max_point(&peak_points) else {
        return HorizonLabels {
            time_to_bottom_min,
            bottom_ts: Some(bottom.ts),
            ..HorizonLabels::default()
        };
    };

    HorizonLabels {
        time_to_bottom_min,
        time_bottom_to_peak_min: Some(whole_minutes(bottom.ts, peak.ts)),
        bottom_ts: Some(bottom.ts),
        peak_ts: Some(peak.ts),
    }
}

/// Minimum price; on ties the earliest timestamp wins. Points must be
/// sorted by timestamp.
fn min_point(points: &[PricePoint]) -> Option<PricePoint> {
    let mut iter = points.iter();
    let mut best = *iter.next()?;
    for &p in iter {
        if p.price < best.price {
            best = p;
        }
    }
    Some(best)
}

/// Maximum price; on ties the earliest timestamp wins. Points must be
/// sorted by timestamp.
fn max_point(points: &[PricePoint]) -> Option<PricePoint> {
    let mut iter = points.iter();
    let mut best = *iter.next()?;
    for &p in iter {
        if p.price > best.price {
            best = p;
        }
    }
    Some(best)
}

/// Elapsed time in whole minutes, rounded to nearest.
fn whole_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let seconds = (to - from).num_seconds();
    (seconds as f64 / 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Fetcher over a fixed in-memory series, honoring the query range.
    struct SeriesSource(Vec<PricePoint>);

    impl PriceSource for SeriesSource {
        fn fetch_prices(
            &self,
            _: &str,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Vec<PricePoint> {
            self.0
                .iter()
                .copied()
                .filter(|p| p.ts >= start && p.ts <= end)
                .collect()
        }
    }

    fn event_ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn at(minutes: i64, price: f64) -> PricePoint {
        PricePoint::new(event_ts() + Duration::minutes(minutes), price)
    }

    #[test]
    fn drop_then_recovery() {
        let source = SeriesSource(vec![at(0, 100.0), at(10, 95.0), at(20, 110.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels.time_to_bottom_min, Some(10));
        assert_eq!(labels.time_bottom_to_peak_min, Some(10));
        assert_eq!(labels.bottom_ts, Some(event_ts() + Duration::minutes(10)));
        assert_eq!(labels.peak_ts, Some(event_ts() + Duration::minutes(20)));
    }

    #[test]
    fn bottom_at_series_end_has_no_peak() {
        let source = SeriesSource(vec![at(0, 50.0), at(5, 51.0), at(15, 49.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels.time_to_bottom_min, Some(15));
        assert_eq!(labels.bottom_ts, Some(event_ts() + Duration::minutes(15)));
        assert_eq!(labels.time_bottom_to_peak_min, None);
        assert_eq!(labels.peak_ts, None);
    }

    #[test]
    fn empty_series_leaves_all_labels_absent() {
        let source = SeriesSource(Vec::new());
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels, HorizonLabels::default());
    }

    #[test]
    fn tied_minimum_takes_the_earliest_timestamp() {
        let source = SeriesSource(vec![at(0, 100.0), at(10, 95.0), at(30, 95.0), at(40, 99.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels.bottom_ts, Some(event_ts() + Duration::minutes(10)));
        // Peak search starts strictly after the bottom; the later tied low
        // is inside the peak window but 99.0 is the max.
        assert_eq!(labels.peak_ts, Some(event_ts() + Duration::minutes(40)));
    }

    #[test]
    fn tied_maximum_takes_the_earliest_timestamp() {
        let source = SeriesSource(vec![at(0, 90.0), at(10, 110.0), at(20, 110.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels.peak_ts, Some(event_ts() + Duration::minutes(10)));
        assert_eq!(labels.time_bottom_to_peak_min, Some(10));
    }

    #[test]
    fn points_outside_the_bottom_window_are_ignored() {
        let windows = HorizonWindows {
            bottom_window_min: 60,
            peak_window_min: 60,
        };
        // The deeper low sits past the window end.
        let source = SeriesSource(vec![at(30, 95.0), at(90, 80.0)]);
        let labels = compute_time_horizons(&source, "TEST", event_ts(), &windows);
        assert_eq!(labels.bottom_ts, Some(event_ts() + Duration::minutes(30)));
        // 90 min is inside the peak window (30 + 60), so it becomes the peak.
        assert_eq!(labels.peak_ts, Some(event_ts() + Duration::minutes(90)));
    }

    #[test]
    fn sample_at_bottom_timestamp_is_excluded_from_peak_phase() {
        let source = SeriesSource(vec![at(0, 100.0), at(10, 95.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        // Only the bottom sample itself lies at or after bottom_ts.
        assert_eq!(labels.time_to_bottom_min, Some(10));
        assert_eq!(labels.peak_ts, None);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let source = SeriesSource(vec![at(20, 110.0), at(0, 100.0), at(10, 95.0)]);
        let labels =
            compute_time_horizons(&source, "TEST", event_ts(), &HorizonWindows::default());
        assert_eq!(labels.time_to_bottom_min, Some(10));
        assert_eq!(labels.time_bottom_to_peak_min, Some(10));
    }

    #[test]
    fn no_price_data_source_yields_absent_labels() {
        let labels =
            compute_time_horizons(&NoPriceData, "TEST", event_ts(), &HorizonWindows::default());
        assert!(labels.is_empty());
    }
}
