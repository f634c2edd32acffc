//! Resolver outputs: score tables, reason tags, accepted primaries.

use serde::{Deserialize, Serialize};

/// One symbol's score in the positional resolver's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolScore {
    pub symbol: String,
    pub score: u32,
}

/// Why the positional symbol resolver accepted or rejected its best candidate.
///
/// Downstream confidence classification distinguishes acceptance reasons
/// from rejection reasons, so the exact set is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolReason {
    NoCandidates,
    TooManyCandidates,
    StrongPrimary,
    ClearMargin,
    AmbiguousOrLowConfidence,
}

impl SymbolReason {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::StrongPrimary | Self::ClearMargin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoCandidates => "no_candidates",
            Self::TooManyCandidates => "too_many_candidates",
            Self::StrongPrimary => "strong_primary",
            Self::ClearMargin => "clear_margin",
            Self::AmbiguousOrLowConfidence => "ambiguous_or_low_confidence",
        }
    }
}

/// Outcome of the positional symbol resolver. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolResolution {
    /// Accepted primary symbol, or empty when rejected.
    pub primary: String,
    pub reason: SymbolReason,
    /// Full score table, sorted by descending score (ties keep candidate order).
    pub scores: Vec<SymbolScore>,
}

impl SymbolResolution {
    pub fn rejected(reason: SymbolReason, scores: Vec<SymbolScore>) -> Self {
        Self {
            primary: String::new(),
            reason,
            scores,
        }
    }
}

/// Why the name-based resolver accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameReason {
    NoMatch,
    UniqueMatch,
    DominantMatch,
    Ambiguous,
}

impl NameReason {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::UniqueMatch | Self::DominantMatch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::UniqueMatch => "unique_match",
            Self::DominantMatch => "dominant_match",
            Self::Ambiguous => "ambiguous",
        }
    }
}

/// One symbol's name-match score, with the surface forms that hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameScore {
    pub symbol: String,
    pub score: u32,
    pub matched_names: Vec<String>,
}

/// Outcome of the name-based resolver. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameResolution {
    /// Accepted primary symbol, or empty when rejected.
    pub primary: String,
    pub reason: NameReason,
    /// Symbols that scored above zero, sorted by descending score.
    pub scores: Vec<NameScore>,
}

impl NameResolution {
    pub fn no_match() -> Self {
        Self {
            primary: String::new(),
            reason: NameReason::NoMatch,
            scores: Vec::new(),
        }
    }

    /// Symbols present in the score table, in table order.
    pub fn symbols(&self) -> Vec<String> {
        self.scores.iter().map(|s| s.symbol.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_reasons_are_distinguished() {
        assert!(SymbolReason::StrongPrimary.is_accept());
        assert!(SymbolReason::ClearMargin.is_accept());
        assert!(!SymbolReason::NoCandidates.is_accept());
        assert!(!SymbolReason::TooManyCandidates.is_accept());
        assert!(!SymbolReason::AmbiguousOrLowConfidence.is_accept());

        assert!(NameReason::UniqueMatch.is_accept());
        assert!(NameReason::DominantMatch.is_accept());
        assert!(!NameReason::NoMatch.is_accept());
        assert!(!NameReason::Ambiguous.is_accept());
    }

    #[test]
    fn reason_tags_serialize_snake_case() {
        let json = serde_json::to_string(&SymbolReason::AmbiguousOrLowConfidence).unwrap();
        assert_eq!(json, "\"ambiguous_or_low_confidence\"");
        let json = serde_json::to_string(&NameReason::DominantMatch).unwrap();
        assert_eq!(json, "\"dominant_match\"");
    }

    #[test]
    fn as_str_matches_serde_names() {
        for reason in [
            SymbolReason::NoCandidates,
            SymbolReason::TooManyCandidates,
            SymbolReason::StrongPrimary,
            SymbolReason::ClearMargin,
            SymbolReason::AmbiguousOrLowConfidence,
        ] {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }
}
