//! Positional symbol resolver.
//!
//! Scores each candidate against where and how it appears (quote URL,
//! headline cashtag, headline word, early-headline topic zone, early body,
//! body frequency) and selects at most one primary symbol. Scoring is
//! additive and case-insensitive; selection follows a fixed order whose
//! rejection reasons the confidence classifier depends on.

use crate::config::SymbolResolverConfig;
use crate::domain::{Candidate, SymbolReason, SymbolResolution, SymbolScore};
use regex::Regex;

/// Score `candidates` against the item's headline, body, and URL, then
/// select a primary symbol or reject with a reason. Pure function of its
/// inputs: identical calls produce identical resolutions.
pub fn resolve_primary_symbol(
    headline: &str,
    body: &str,
    url: &str,
    candidates: &[Candidate],
    cfg: &SymbolResolverConfig,
) -> SymbolResolution {
    let topic_zone = headline
        .split_whitespace()
        .take(cfg.topic_zone_tokens)
        .collect::<Vec<_>>()
        .join(" ");
    let body_prefix: String = body.chars().take(cfg.body_prefix_chars).collect();

    let mut scores: Vec<SymbolScore> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let escaped = regex::escape(&candidate.symbol);
        let quote = compile(&format!(r"(?i)/quote/{escaped}\b"));
        let cashtag = compile(&format!(r"(?i)\${escaped}\b"));
        let word = compile(&format!(r"(?i)\b{escaped}\b"));

        let mut score = 0u32;
        if quote.is_match(url) {
            score += cfg.quote_url_weight;
        }
        if cashtag.is_match(headline) {
            score += cfg.headline_cashtag_weight;
        }
        if word.is_match(headline) {
            score += cfg.headline_word_weight;
        }
        if word.is_match(&topic_zone) {
            score += cfg.topic_zone_weight;
        }
        if word.is_match(&body_prefix) {
            score += cfg.body_prefix_weight;
        }
        let frequency = word.find_iter(body).count() as u32;
        score += cfg.body_frequency_cap.min(frequency / 2);

        scores.push(SymbolScore {
            symbol: candidate.symbol.clone(),
            score,
        });
    }

    if scores.is_empty() {
        return SymbolResolution::rejected(SymbolReason::NoCandidates, scores);
    }

    // Stable sort: tied scores keep first-seen candidate order.
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    let best = scores[0].clone();
    let second = scores.get(1).map_or(0, |s| s.score);

    // A crowded candidate list needs a strong best score to pass.
    if candidates.len() > cfg.max_candidates && best.score < cfg.crowded_accept_score {
        return SymbolResolution::rejected(SymbolReason::TooManyCandidates, scores);
    }
    if best.score >= cfg.accept_score {
        return SymbolResolution {
            primary: best.symbol,
            reason: SymbolReason::StrongPrimary,
            scores,
        };
    }
    if best.score >= cfg.margin_accept_score && best.score - second >= cfg.accept_margin {
        return SymbolResolution {
            primary: best.symbol,
            reason: SymbolReason::ClearMargin,
            scores,
        };
    }
    SymbolResolution::rejected(SymbolReason::AmbiguousOrLowConfidence, scores)
}

fn compile(pattern: &str) -> Regex {
    // Candidate symbols are escaped before interpolation, so the pattern
    // is always valid.
    Regex::new(pattern).unwrap()
}
