//! Ticker candidates and their extraction provenance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which extraction mechanism produced a candidate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Cashtag,
    ExchangePrefix,
    QuoteUrl,
    CapitalizedToken,
}

/// A ticker-like token found in the text.
///
/// `symbol` is 2–5 uppercase ASCII letters after normalization.
/// `provenance` is the union of every mechanism that saw this symbol
/// anywhere in the item — repeated occurrences do not create new
/// candidates, they add tags to the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub symbol: String,
    pub provenance: BTreeSet<Provenance>,
}

impl Candidate {
    pub fn new(symbol: impl Into<String>, tag: Provenance) -> Self {
        Self {
            symbol: symbol.into(),
            provenance: BTreeSet::from([tag]),
        }
    }

    pub fn has_tag(&self, tag: Provenance) -> bool {
        self.provenance.contains(&tag)
    }
}
