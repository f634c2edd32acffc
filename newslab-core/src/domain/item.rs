//! News item — the external input record.

use serde::{Deserialize, Serialize};

/// A normalized news item as produced by upstream ingest/clean stages.
///
/// The core treats this as read-only: enrichment builds a separate record
/// next to it and never writes back into the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub event_id: String,

    /// Event timestamp as received from the feed; may be absent or unparseable.
    #[serde(default)]
    pub timestamp: Option<String>,

    /// Feed source identifier (e.g. "ap_news_business").
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub headline: String,

    /// Cleaned article body text.
    #[serde(default, alias = "text")]
    pub body: String,

    #[serde(default)]
    pub url: String,

    /// Symbol assigned by an earlier stage, if any. Lowest-priority input
    /// to the confidence classifier.
    #[serde(default)]
    pub ticker: String,
}

impl NewsItem {
    /// Headline, body, and URL joined for candidate extraction.
    pub fn combined_text(&self) -> String {
        format!("{}\n{}\n{}", self.headline, self.body, self.url)
    }
}
