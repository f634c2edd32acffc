//! Property tests for the extractor and the horizon calculator.

use chrono::{DateTime, Duration, TimeZone, Utc};
use newslab_core::domain::{PricePoint, Provenance};
use newslab_core::extract::{CandidateExtractor, ExtractionPolicy};
use newslab_core::horizon::{compute_time_horizons, HorizonWindows, PriceSource};
use proptest::prelude::*;

struct SeriesSource(Vec<PricePoint>);

impl PriceSource for SeriesSource {
    fn fetch_prices(&self, _: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<PricePoint> {
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

/// Strategy: up to 40 samples at distinct minute offsets inside 14 days,
/// prices in a plausible band.
fn price_series() -> impl Strategy<Value = Vec<PricePoint>> {
    proptest::collection::btree_map(0i64..(14 * 24 * 60), 1.0f64..500.0, 0..40).prop_map(|map| {
        map.into_iter()
            .map(|(offset, price)| PricePoint::new(event_ts() + Duration::minutes(offset), price))
            .collect()
    })
}

proptest! {
    #[test]
    fn bottom_stays_inside_its_window_and_peak_after_bottom(series in price_series()) {
        let windows = HorizonWindows::default();
        let labels =
            compute_time_horizons(&SeriesSource(series), "TEST", event_ts(), &windows);

        if let Some(mins) = labels.time_to_bottom_min {
            prop_assert!(mins >= 0);
            prop_assert!(mins <= windows.bottom_window_min);
            prop_assert!(labels.bottom_ts.is_some());
        } else {
            prop_assert!(labels.bottom_ts.is_none());
            prop_assert!(labels.peak_ts.is_none());
        }

        if let (Some(bottom), Some(peak)) = (labels.bottom_ts, labels.peak_ts) {
            prop_assert!(peak > bottom);
            prop_assert!(peak <= bottom + Duration::minutes(windows.peak_window_min));
            let mins = labels.time_bottom_to_peak_min.unwrap();
            prop_assert!(mins >= 0 && mins <= windows.peak_window_min);
        }
    }

    #[test]
    fn horizon_labels_ignore_sample_order(series in price_series(), seed in any::<u64>()) {
        let windows = HorizonWindows::default();
        let baseline =
            compute_time_horizons(&SeriesSource(series.clone()), "TEST", event_ts(), &windows);

        // Cheap deterministic shuffle.
        let mut shuffled = series;
        let len = shuffled.len();
        if len > 1 {
            for i in 0..len {
                shuffled.swap(i, (seed as usize).wrapping_mul(i + 1) % len);
            }
        }
        let reordered =
            compute_time_horizons(&SeriesSource(shuffled), "TEST", event_ts(), &windows);
        prop_assert_eq!(baseline, reordered);
    }

    #[test]
    fn extracted_symbols_are_short_uppercase_and_unique(text in ".{0,300}") {
        let extractor = CandidateExtractor::new(ExtractionPolicy::Coarse);
        let out = extractor.extract(&text);
        let mut seen = std::collections::HashSet::new();
        for candidate in &out {
            prop_assert!(candidate.symbol.len() >= 2 && candidate.symbol.len() <= 5);
            prop_assert!(candidate.symbol.chars().all(|c| c.is_ascii_uppercase()));
            prop_assert!(!candidate.provenance.is_empty());
            prop_assert!(seen.insert(candidate.symbol.clone()));
        }
    }

    #[test]
    fn strict_policy_never_emits_bare_token_provenance(text in ".{0,300}") {
        let extractor = CandidateExtractor::new(ExtractionPolicy::Strict);
        for candidate in extractor.extract(&text) {
            prop_assert!(!candidate.has_tag(Provenance::CapitalizedToken));
        }
    }

    #[test]
    fn coarse_output_is_superset_of_strict(text in ".{0,300}") {
        let strict: Vec<String> = CandidateExtractor::new(ExtractionPolicy::Strict)
            .extract(&text)
            .into_iter()
            .map(|c| c.symbol)
            .collect();
        let coarse: std::collections::HashSet<String> =
            CandidateExtractor::new(ExtractionPolicy::Coarse)
                .extract(&text)
                .into_iter()
                .map(|c| c.symbol)
                .collect();
        for symbol in strict {
            prop_assert!(coarse.contains(&symbol));
        }
    }
}
