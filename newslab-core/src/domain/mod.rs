//! Domain types: news items, candidates, resolution results, prices, labels.

mod candidate;
mod item;
mod price;
mod resolution;

pub use candidate::{Candidate, Provenance};
pub use item::NewsItem;
pub use price::{HorizonLabels, PricePoint};
pub use resolution::{
    NameReason, NameResolution, NameScore, SymbolReason, SymbolResolution, SymbolScore,
};
