//! Symbol candidate extraction.
//!
//! Four mechanisms run independently over the combined text and their
//! results are unioned: cashtags, exchange-prefixed symbols, quote-page
//! URL segments, and (coarse policy only) bare all-caps tokens. Output
//! order is mechanism-major — all cashtag hits in textual order, then
//! exchange hits, then quote-URL hits, then bare tokens. A repeated
//! symbol merges its provenance tags into the first occurrence instead
//! of appearing again. The resolver's stable tie-break leans on this
//! order, so it is part of the contract.

use crate::domain::{Candidate, Provenance};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which token mechanisms participate in extraction.
///
/// `Strict` trusts only explicit markers. `Coarse` additionally sweeps
/// bare 2–5 letter all-caps words not on the stoplist, trading precision
/// for recall on feeds that never use cashtags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPolicy {
    #[default]
    Strict,
    Coarse,
}

/// All-caps words that look like tickers but never are: common words,
/// URL fragments, news orgs, regulators, and the exchange mnemonics
/// themselves.
const STOPLIST: &[&str] = &[
    "THE", "AND", "FOR", "WITH", "THIS", "FROM", "THAT", "HAVE", "WILL", "YOUR", "YOU", "ARE",
    "WAS", "HAS", "NEW", "NEWS", "POST", "LINK", "URL", "HTTP", "HTTPS", "WWW", "EDIT", "NYSE",
    "NASDAQ", "AMEX", "OTC", "TSX", "AI", "NBC", "ABC", "CBS", "FDA", "DOJ", "TODAY", "SEC",
    "IRS", "CDC", "WHO", "NATO", "UN", "EU",
];

/// Candidate extractor with its patterns compiled once at construction.
///
/// Build one per process (or per policy) and share it by reference;
/// extraction itself is pure and holds no per-item state.
#[derive(Debug)]
pub struct CandidateExtractor {
    policy: ExtractionPolicy,
    cashtag: Regex,
    exchange: Regex,
    quote_url: Regex,
    all_caps: Regex,
    stoplist: HashSet<&'static str>,
}

impl CandidateExtractor {
    pub fn new(policy: ExtractionPolicy) -> Self {
        Self {
            policy,
            cashtag: Regex::new(r"\$([A-Za-z]{1,5})").unwrap(),
            exchange: Regex::new(
                r"(?i)(?:\(|\b)(?:NASDAQ|NYSE|AMEX|OTC|TSX)\s*:\s*([A-Za-z]{1,5})(?:\)|\b)",
            )
            .unwrap(),
            quote_url: Regex::new(r"finance\.yahoo\.com/quote/([A-Za-z]{1,5})").unwrap(),
            all_caps: Regex::new(r"\b([A-Z]{2,5})\b").unwrap(),
            stoplist: STOPLIST.iter().copied().collect(),
        }
    }

    pub fn policy(&self) -> ExtractionPolicy {
        self.policy
    }

    /// Scan `text` and return ordered, duplicate-free candidates with
    /// unioned provenance. Empty input yields an empty list.
    pub fn extract(&self, text: &str) -> Vec<Candidate> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for cap in self.cashtag.captures_iter(text) {
            push_candidate(&mut candidates, &mut seen, &cap[1], Provenance::Cashtag);
        }
        for cap in self.exchange.captures_iter(text) {
            push_candidate(&mut candidates, &mut seen, &cap[1], Provenance::ExchangePrefix);
        }
        for cap in self.quote_url.captures_iter(text) {
            push_candidate(&mut candidates, &mut seen, &cap[1], Provenance::QuoteUrl);
        }

        if self.policy == ExtractionPolicy::Coarse {
            for cap in self.all_caps.captures_iter(text) {
                let token = &cap[1];
                if self.stoplist.contains(token) {
                    continue;
                }
                push_candidate(&mut candidates, &mut seen, token, Provenance::CapitalizedToken);
            }
        }

        candidates
    }
}

/// Normalize a raw match and append it, or union its tag into the
/// first occurrence. Single-character matches and anything carrying
/// index/futures markers (`^`, `=`) are discarded.
fn push_candidate(
    candidates: &mut Vec<Candidate>,
    seen: &mut HashMap<String, usize>,
    raw: &str,
    tag: Provenance,
) {
    let symbol = raw.to_ascii_uppercase();
    if symbol.len() < 2 || symbol.len() > 5 || symbol.contains('^') || symbol.contains('=') {
        return;
    }
    match seen.get(&symbol) {
        Some(&idx) => {
            candidates[idx].provenance.insert(tag);
        }
        None => {
            seen.insert(symbol.clone(), candidates.len());
            candidates.push(Candidate::new(symbol, tag));
        }
    }
}
