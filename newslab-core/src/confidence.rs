//! Confidence classification.
//!
//! Merges the two resolvers' outputs (plus any symbol assigned upstream)
//! into one display symbol and one tier. The tier gates price-horizon
//! enrichment: only non-`Unknown` items with a parseable timestamp get
//! labels.

use crate::domain::{NameReason, NameResolution, SymbolResolution};
use serde::{Deserialize, Serialize};

/// Categorical strength of a resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    /// Accepted by the positional resolver from an explicit marker.
    Explicit,
    /// Accepted by the name resolver (unique or dominant match).
    NameHigh,
    /// Name path engaged but did not fully disambiguate.
    NameMedium,
    Unknown,
}

impl ConfidenceTier {
    pub fn is_usable(self) -> bool {
        self != Self::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::NameHigh => "name_high",
            Self::NameMedium => "name_medium",
            Self::Unknown => "unknown",
        }
    }
}

/// Pick the display symbol and classify its confidence.
///
/// Priority: positional-resolver primary, then name-resolver primary,
/// then whatever an earlier stage already assigned.
pub fn classify(
    symbol_res: &SymbolResolution,
    name_res: &NameResolution,
    preexisting: &str,
) -> (String, ConfidenceTier) {
    let display = if !symbol_res.primary.is_empty() {
        symbol_res.primary.clone()
    } else if !name_res.primary.is_empty() {
        name_res.primary.clone()
    } else {
        preexisting.trim().to_string()
    };

    let tier = if !symbol_res.primary.is_empty() {
        ConfidenceTier::Explicit
    } else {
        match name_res.reason {
            NameReason::UniqueMatch | NameReason::DominantMatch => ConfidenceTier::NameHigh,
            NameReason::Ambiguous => ConfidenceTier::NameMedium,
            NameReason::NoMatch => ConfidenceTier::Unknown,
        }
    };

    (display, tier)
}
