//! Name-based resolver.
//!
//! Independent resolution path: instead of ticker-like tokens, it scores
//! company-name surface forms from the registry against the headline and
//! body, with its own disambiguation policy (unique match, or a best score
//! at least twice the runner-up).

use crate::config::NameResolverConfig;
use crate::domain::{NameReason, NameResolution, NameScore};
use crate::registry::{CompanyRegistry, NamePattern};

/// Obvious non-article headlines (live blogs, video markers) that should
/// never resolve to a company.
pub fn is_junk_headline(headline: &str) -> bool {
    let lower = headline.trim().to_lowercase();
    lower.starts_with("watch:") || lower.starts_with("live:") || lower.contains("news live")
}

/// Per-symbol score over its surface forms, with the forms that matched.
fn score_symbol(
    headline: &str,
    body: &str,
    patterns: &[NamePattern],
    cfg: &NameResolverConfig,
) -> (u32, Vec<String>) {
    let mut score = 0u32;
    let mut matched_names = Vec::new();

    for np in patterns {
        let headline_matches = np.pattern.find_iter(headline).count() as u32;
        let body_matches = np.pattern.find_iter(body).count() as u32;
        if headline_matches > 0 || body_matches > 0 {
            matched_names.push(np.name.clone());
        }
        score += headline_matches.min(cfg.headline_match_cap) * cfg.headline_weight;
        score += body_matches.min(cfg.body_match_cap) * cfg.body_weight;
    }

    (score, matched_names)
}

/// Resolve a primary symbol from company-name matches, or reject with a
/// reason. The registry is read-only shared state; this function is pure
/// with respect to it.
pub fn resolve_by_name(
    headline: &str,
    body: &str,
    registry: &CompanyRegistry,
    cfg: &NameResolverConfig,
) -> NameResolution {
    if is_junk_headline(headline) {
        return NameResolution::no_match();
    }

    let mut scored: Vec<NameScore> = Vec::new();
    for (symbol, patterns) in registry.iter() {
        let (score, matched_names) = score_symbol(headline, body, patterns, cfg);
        if score > 0 {
            scored.push(NameScore {
                symbol: symbol.to_string(),
                score,
                matched_names,
            });
        }
    }

    if scored.is_empty() {
        return NameResolution::no_match();
    }

    // Stable sort keeps registry (symbol) order among ties.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    let best = scored[0].clone();
    let second = scored.get(1).map_or(0, |s| s.score);

    if best.score < cfg.min_accept_score {
        return NameResolution {
            primary: String::new(),
            reason: NameReason::NoMatch,
            scores: scored,
        };
    }
    if scored.len() == 1 {
        return NameResolution {
            primary: best.symbol,
            reason: NameReason::UniqueMatch,
            scores: scored,
        };
    }
    if best.score >= cfg.dominance_ratio * second {
        return NameResolution {
            primary: best.symbol,
            reason: NameReason::DominantMatch,
            scores: scored,
        };
    }
    NameResolution {
        primary: String::new(),
        reason: NameReason::Ambiguous,
        scores: scored,
    }
}
