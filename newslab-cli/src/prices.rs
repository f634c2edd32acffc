//! CSV-backed price source.
//!
//! Loads a minute-price file once (`symbol,timestamp,price`) and serves
//! range queries from memory. Rows with unparseable timestamps or prices
//! are skipped and counted rather than failing the load.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use newslab_core::domain::PricePoint;
use newslab_core::horizon::PriceSource;
use newslab_core::pipeline::parse_event_timestamp;
use std::collections::BTreeMap;
use std::path::Path;

pub struct CsvPriceSource {
    series: BTreeMap<String, Vec<PricePoint>>,
    pub skipped_rows: usize,
}

impl CsvPriceSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("opening price file {}", path.display()))?;

        let headers = reader.headers()?.clone();
        let col = |name: &str| headers.iter().position(|h| h == name);
        let (Some(sym_idx), Some(ts_idx), Some(price_idx)) =
            (col("symbol"), col("timestamp"), col("price"))
        else {
            bail!(
                "price file {} must have symbol, timestamp and price columns",
                path.display()
            );
        };

        let mut series: BTreeMap<String, Vec<PricePoint>> = BTreeMap::new();
        let mut skipped_rows = 0;
        for record in reader.records() {
            let record = record?;
            let parsed = record
                .get(ts_idx)
                .and_then(parse_event_timestamp)
                .zip(record.get(price_idx).and_then(|p| p.trim().parse::<f64>().ok()));
            let Some((ts, price)) = parsed else {
                skipped_rows += 1;
                continue;
            };
            let symbol = record.get(sym_idx).unwrap_or_default().trim().to_uppercase();
            if symbol.is_empty() {
                skipped_rows += 1;
                continue;
            }
            series.entry(symbol).or_default().push(PricePoint::new(ts, price));
        }

        for points in series.values_mut() {
            points.sort_by_key(|p| p.ts);
        }

        Ok(Self { series, skipped_rows })
    }

    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch_prices(&self, symbol: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<PricePoint> {
        let Some(points) = self.series.get(&symbol.to_uppercase()) else {
            return Vec::new();
        };
        points
            .iter()
            .copied()
            .filter(|p| p.ts >= start && p.ts <= end)
            .collect()
    }
}
