//! Per-item enrichment pipeline.
//!
//! Glues the stages together for one news item: extract candidates, run
//! both resolvers, classify confidence, and — when the tier is usable and
//! the timestamp parses — compute price horizons. Items are independent;
//! callers may run this across items in parallel.

use crate::confidence::{classify, ConfidenceTier};
use crate::config::EnrichConfig;
use crate::domain::{
    Candidate, NameReason, NameScore, NewsItem, Provenance, SymbolReason, SymbolScore,
};
use crate::extract::CandidateExtractor;
use crate::horizon::{compute_time_horizons, PriceSource};
use crate::registry::CompanyRegistry;
use crate::resolve::{resolve_by_name, resolve_primary_symbol};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feed-source prefixes with known credibility ratings.
const SOURCE_CREDIBILITY: &[(&str, &str)] = &[
    ("ap_news_", "high"),
    ("npr_", "high"),
    ("abc_news_", "high"),
    ("cbs_news_", "high"),
    ("nbc_news_", "high"),
];

/// Everything the enrichment stage exposes for one news item.
///
/// A pure function of the item, the registry, the configuration, and the
/// supplied price samples — two identical calls produce identical records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub event_id: String,
    pub timestamp: String,
    pub source: String,
    pub headline: String,
    pub body: String,
    pub url: String,

    /// Ordered candidate symbols from extraction.
    pub tickers_all: Vec<String>,
    /// Positional resolver score table, descending.
    pub ticker_scores: Vec<SymbolScore>,
    pub primary_ticker: String,
    pub ticker_resolution_reason: SymbolReason,
    /// Descriptive marker behind an accepted primary (strongest
    /// provenance tag), empty when the resolver rejected.
    pub primary_ticker_marker: String,

    /// Symbols the name resolver scored above zero.
    pub name_tickers_all: Vec<String>,
    pub primary_ticker_name: String,
    pub name_ticker_scores: Vec<NameScore>,
    pub name_ticker_resolution_reason: NameReason,

    /// Display symbol chosen by the confidence classifier.
    pub ticker: String,
    pub ticker_confidence: ConfidenceTier,
    pub source_credibility: String,

    /// Minutes from event to the local price bottom.
    pub label_time_horizon_1_min: Option<i64>,
    /// Minutes from that bottom to the subsequent peak.
    pub label_time_horizon_2_min: Option<i64>,
}

/// Parse an event timestamp: RFC 3339 first, then a naive ISO form
/// (`T` or space separator, optional fractional seconds), then a bare
/// date taken as midnight. Naive inputs are assumed UTC.
pub fn parse_event_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Descriptive marker for an accepted primary, from its strongest
/// provenance tag: exchange prefix, then cashtag, then quote URL. A
/// primary accepted on a bare-token sweep falls back to a generic tag.
fn primary_marker(candidates: &[Candidate], primary: &str) -> &'static str {
    if primary.is_empty() {
        return "";
    }
    let Some(candidate) = candidates.iter().find(|c| c.symbol == primary) else {
        return "";
    };
    if candidate.has_tag(Provenance::ExchangePrefix) {
        "exchange_prefix"
    } else if candidate.has_tag(Provenance::Cashtag) {
        "cashtag"
    } else if candidate.has_tag(Provenance::QuoteUrl) {
        "quote_url"
    } else {
        "explicit_ticker"
    }
}

/// Resolve source credibility from an existing field or the feed-source
/// prefix mapping.
pub fn source_credibility(existing: &str, source: &str) -> String {
    let existing = existing.trim();
    if !existing.is_empty() {
        return existing.to_string();
    }
    let source = source.to_lowercase();
    for (prefix, rating) in SOURCE_CREDIBILITY {
        if source.starts_with(prefix) {
            return (*rating).to_string();
        }
    }
    "unknown".to_string()
}

/// Enrich one item end to end. Never fails: non-matches and missing
/// market data are encoded in the record, not raised.
pub fn enrich_item(
    item: &NewsItem,
    extractor: &CandidateExtractor,
    registry: &CompanyRegistry,
    config: &EnrichConfig,
    prices: &dyn PriceSource,
) -> EnrichedRecord {
    let candidates = extractor.extract(&item.combined_text());

    let symbol_res = resolve_primary_symbol(
        &item.headline,
        &item.body,
        &item.url,
        &candidates,
        &config.symbol_resolver,
    );
    let name_res = resolve_by_name(&item.headline, &item.body, registry, &config.name_resolver);

    let (ticker, tier) = classify(&symbol_res, &name_res, &item.ticker);

    let raw_ts = item.timestamp.as_deref().unwrap_or_default();
    let event_ts = parse_event_timestamp(raw_ts);

    let labels = match event_ts {
        Some(ts) if !ticker.is_empty() && tier.is_usable() => {
            compute_time_horizons(prices, &ticker, ts, &config.horizon)
        }
        _ => Default::default(),
    };

    EnrichedRecord {
        event_id: item.event_id.clone(),
        timestamp: raw_ts.to_string(),
        source: item.source.clone(),
        headline: item.headline.clone(),
        body: item.body.clone(),
        url: item.url.clone(),
        tickers_all: candidates.iter().map(|c| c.symbol.clone()).collect(),
        ticker_scores: symbol_res.scores.clone(),
        primary_ticker_marker: primary_marker(&candidates, &symbol_res.primary).to_string(),
        primary_ticker: symbol_res.primary.clone(),
        ticker_resolution_reason: symbol_res.reason,
        name_tickers_all: name_res.symbols(),
        primary_ticker_name: name_res.primary.clone(),
        name_ticker_scores: name_res.scores.clone(),
        name_ticker_resolution_reason: name_res.reason,
        ticker,
        ticker_confidence: tier,
        source_credibility: source_credibility("", &item.source),
        label_time_horizon_1_min: labels.time_to_bottom_min,
        label_time_horizon_2_min: labels.time_bottom_to_peak_min,
    }
}

/// Drop duplicate items, keyed by URL when present, otherwise by
/// headline + timestamp. First seen wins; order is preserved.
pub fn dedupe_items(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let url = item.url.trim();
        let key = if url.is_empty() {
            format!(
                "headline:{}|{}",
                item.headline,
                item.timestamp.as_deref().unwrap_or_default()
            )
        } else {
            format!("url:{url}")
        };
        if seen.insert(key) {
            out.push(item);
        }
    }
    out
}
