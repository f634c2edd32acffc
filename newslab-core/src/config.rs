//! Enrichment configuration.
//!
//! Score weights, acceptance thresholds, and search windows are
//! empirically chosen constants. They live here as named fields with
//! defaults matching production values, overridable from a TOML file —
//! never re-derived in code.

use crate::extract::ExtractionPolicy;
use crate::horizon::HorizonWindows;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Weights and thresholds for the positional symbol resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolResolverConfig {
    /// Symbol sits right after a quote-page marker in the URL.
    pub quote_url_weight: u32,
    /// Symbol appears as a cashtag in the headline.
    pub headline_cashtag_weight: u32,
    /// Symbol appears as a bare word in the headline.
    pub headline_word_weight: u32,
    /// Symbol appears within the headline's opening tokens (stacks with the above).
    pub topic_zone_weight: u32,
    /// Symbol appears early in the body.
    pub body_prefix_weight: u32,
    /// Ceiling on the body-frequency boost, `min(cap, count / 2)`.
    pub body_frequency_cap: u32,
    /// Number of whitespace tokens in the headline topic zone.
    pub topic_zone_tokens: usize,
    /// Number of characters in the early-body prefix.
    pub body_prefix_chars: usize,
    /// Candidate-count ceiling before the crowded-list rejection applies.
    pub max_candidates: usize,
    /// Best score a crowded candidate list must reach to escape the
    /// too-many-candidates rejection.
    pub crowded_accept_score: u32,
    /// Best score at or above this accepts outright.
    pub accept_score: u32,
    /// Best score at or above this accepts when the margin also holds.
    pub margin_accept_score: u32,
    /// Required lead over the second-best score for a margin accept.
    pub accept_margin: u32,
}

impl Default for SymbolResolverConfig {
    fn default() -> Self {
        Self {
            quote_url_weight: 12,
            headline_cashtag_weight: 10,
            headline_word_weight: 6,
            topic_zone_weight: 3,
            body_prefix_weight: 2,
            body_frequency_cap: 3,
            topic_zone_tokens: 12,
            body_prefix_chars: 300,
            max_candidates: 5,
            crowded_accept_score: 12,
            accept_score: 10,
            margin_accept_score: 8,
            accept_margin: 3,
        }
    }
}

/// Weights and thresholds for the name-based resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameResolverConfig {
    pub headline_weight: u32,
    pub body_weight: u32,
    /// Best score below this rejects even a unique match.
    pub min_accept_score: u32,
    /// Per-surface-form cap on counted headline matches.
    pub headline_match_cap: u32,
    /// Per-surface-form cap on counted body matches.
    pub body_match_cap: u32,
    /// Best must reach this multiple of the second-best to dominate.
    pub dominance_ratio: u32,
}

impl Default for NameResolverConfig {
    fn default() -> Self {
        Self {
            headline_weight: 3,
            body_weight: 1,
            min_accept_score: 3,
            headline_match_cap: 3,
            body_match_cap: 5,
            dominance_ratio: 2,
        }
    }
}

/// Top-level enrichment configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub extraction_policy: ExtractionPolicy,
    pub symbol_resolver: SymbolResolverConfig,
    pub name_resolver: NameResolverConfig,
    pub horizon: HorizonWindows,
}

impl EnrichConfig {
    /// Load configuration overrides from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration overrides from a TOML string. Omitted fields
    /// keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_constants() {
        let cfg = EnrichConfig::default();
        assert_eq!(cfg.symbol_resolver.quote_url_weight, 12);
        assert_eq!(cfg.symbol_resolver.headline_cashtag_weight, 10);
        assert_eq!(cfg.symbol_resolver.crowded_accept_score, 12);
        assert_eq!(cfg.symbol_resolver.accept_score, 10);
        assert_eq!(cfg.symbol_resolver.margin_accept_score, 8);
        assert_eq!(cfg.symbol_resolver.accept_margin, 3);
        assert_eq!(cfg.name_resolver.min_accept_score, 3);
        assert_eq!(cfg.name_resolver.dominance_ratio, 2);
        assert_eq!(cfg.horizon.bottom_window_min, 7 * 24 * 60);
        assert_eq!(cfg.horizon.peak_window_min, 7 * 24 * 60);
        assert_eq!(cfg.extraction_policy, ExtractionPolicy::Strict);
    }

    #[test]
    fn partial_toml_overrides_keep_other_defaults() {
        let cfg = EnrichConfig::from_toml(
            "extraction_policy = \"coarse\"\n\n[horizon]\nbottom_window_min = 1440\n",
        )
        .unwrap();
        assert_eq!(cfg.extraction_policy, ExtractionPolicy::Coarse);
        assert_eq!(cfg.horizon.bottom_window_min, 1440);
        assert_eq!(cfg.horizon.peak_window_min, 7 * 24 * 60);
        assert_eq!(cfg.symbol_resolver.accept_score, 10);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = EnrichConfig::default();
        let toml_str = toml::to_string(&cfg).unwrap();
        let parsed = EnrichConfig::from_toml(&toml_str).unwrap();
        assert_eq!(cfg, parsed);
    }
}
