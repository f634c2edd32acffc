//! NewsLab Core — symbol resolution and market-reaction horizon labels
//! for news items.
//!
//! This crate contains the decision logic of the enrichment pipeline:
//! - Candidate extraction with strict (explicit markers only) and coarse
//!   (bare all-caps sweep) policies
//! - Positional symbol resolver with multi-signal scoring and tie-breaks
//! - Name-based resolver over a compiled company registry
//! - Confidence classification gating price enrichment
//! - Two-phase bounded-window price-horizon search
//!
//! Everything here is pure, synchronous computation over materialized
//! inputs. Blocking I/O (feeds, articles, prices, the registry file)
//! lives in collaborators invoked before — or injected into — the core.

pub mod confidence;
pub mod config;
pub mod domain;
pub mod extract;
pub mod horizon;
pub mod pipeline;
pub mod registry;
pub mod resolve;
