//! Primary-symbol resolution: positional scoring and name-based matching.

pub mod name;
pub mod symbol;

pub use name::{is_junk_headline, resolve_by_name};
pub use symbol::resolve_primary_symbol;
