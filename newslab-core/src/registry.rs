//! Company-name registry: symbol → compiled surface-form matchers.
//!
//! Built once at startup from a reference CSV (`ticker`, `company_full`,
//! `company_short` columns), read-only thereafter. Construction failures
//! are configuration errors and abort the run — a registry that loaded
//! successfully is never empty.

use regex::Regex;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Fatal configuration errors from registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("company registry not found at {path}")]
    NotFound { path: String },

    #[error("missing required column(s) in registry: {0}")]
    MissingColumns(String),

    #[error("registry has no usable rows")]
    Empty,

    #[error("registry I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One normalized surface form and its compiled matcher.
#[derive(Debug, Clone)]
pub struct NamePattern {
    pub name: String,
    pub pattern: Regex,
}

/// Read-only mapping from symbol to its name matchers.
///
/// Shared by immutable reference across concurrent callers; there is no
/// interior mutability, so no locking. Rebuilding requires a restart.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistry {
    entries: BTreeMap<String, Vec<NamePattern>>,
}

impl CompanyRegistry {
    /// Load the registry from a CSV file on disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Err(RegistryError::NotFound {
                path: path.display().to_string(),
            });
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Build the registry from any CSV reader with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let required = ["ticker", "company_full", "company_short"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::MissingColumns(missing.join(", ")));
        }

        let col = |name: &str| headers.iter().position(|h| h == name);
        let (ticker_idx, full_idx, short_idx) = match (
            col("ticker"),
            col("company_full"),
            col("company_short"),
        ) {
            (Some(t), Some(f), Some(s)) => (t, f, s),
            _ => return Err(RegistryError::MissingColumns(required.join(", "))),
        };

        let mut entries: BTreeMap<String, Vec<NamePattern>> = BTreeMap::new();

        for record in csv_reader.records() {
            let record = record?;
            let ticker = record
                .get(ticker_idx)
                .unwrap_or_default()
                .trim()
                .to_ascii_uppercase();
            let full = normalize_company_name(record.get(full_idx).unwrap_or_default());
            let short = normalize_company_name(record.get(short_idx).unwrap_or_default());

            // A row needs a ticker and at least one surface form.
            if ticker.is_empty() || (full.is_empty() && short.is_empty()) {
                continue;
            }

            let mut names: Vec<String> = Vec::new();
            if !full.is_empty() {
                names.push(full);
            }
            if !short.is_empty()
                && !names
                    .iter()
                    .any(|n| n.eq_ignore_ascii_case(&short))
            {
                names.push(short);
            }

            let patterns = entries.entry(ticker).or_default();
            for name in names {
                let pattern = build_name_pattern(&name);
                patterns.push(NamePattern { name, pattern });
            }
        }

        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, symbol: &str) -> Option<&[NamePattern]> {
        self.entries.get(symbol).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NamePattern])> {
        self.entries
            .iter()
            .map(|(sym, patterns)| (sym.as_str(), patterns.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trim whitespace/quotes and collapse internal runs of whitespace.
fn normalize_company_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compile a case-insensitive matcher for a surface form: whitespace is
/// flexible, apostrophes and periods are optional, word boundaries sit
/// at both ends.
fn build_name_pattern(name: &str) -> Regex {
    let mut body = String::new();
    for ch in name.chars() {
        if ch.is_whitespace() {
            body.push_str(r"\s+");
        } else if ch == '\'' || ch == '\u{2019}' {
            body.push_str(r"[’']?");
        } else if ch == '.' {
            body.push_str(r"\.?");
        } else {
            body.push_str(&regex::escape(&ch.to_string()));
        }
    }
    let pattern = format!(r"(?i)\b{body}\b");
    // The body is escaped character by character, so compilation cannot fail.
    Regex::new(&pattern).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ticker,company_full,company_short
ZTA,Zeta Corp,Zeta
ACME,Acme Holdings Inc.,Acme
";

    #[test]
    fn loads_symbols_and_surface_forms() {
        let registry = CompanyRegistry::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(registry.len(), 2);
        let zta = registry.get("ZTA").unwrap();
        assert_eq!(zta.len(), 2);
        assert_eq!(zta[0].name, "Zeta Corp");
    }

    #[test]
    fn duplicate_short_name_is_not_added_twice() {
        let csv = "ticker,company_full,company_short\nZTA,Zeta,zeta\n";
        let registry = CompanyRegistry::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(registry.get("ZTA").unwrap().len(), 1);
    }

    #[test]
    fn missing_columns_is_a_configuration_error() {
        let csv = "symbol,name\nZTA,Zeta Corp\n";
        let err = CompanyRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RegistryError::MissingColumns(_)));
    }

    #[test]
    fn no_usable_rows_is_a_configuration_error() {
        let csv = "ticker,company_full,company_short\n,Zeta Corp,\nZTA,,\n";
        let err = CompanyRegistry::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RegistryError::Empty));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err =
            CompanyRegistry::from_csv_path(Path::new("/nonexistent/company_tickers.csv"))
                .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[test]
    fn pattern_has_flexible_whitespace_and_optional_punctuation() {
        let pattern = build_name_pattern("Acme Holdings Inc.");
        assert!(pattern.is_match("acme  holdings inc"));
        assert!(pattern.is_match("Acme Holdings Inc. said today"));
        assert!(!pattern.is_match("Acme"));
    }

    #[test]
    fn pattern_requires_word_boundaries() {
        let pattern = build_name_pattern("Zeta");
        assert!(pattern.is_match("Zeta posts record profit"));
        assert!(!pattern.is_match("Zetamax posts record profit"));
    }

    #[test]
    fn apostrophes_are_optional_in_either_form() {
        let pattern = build_name_pattern("O'Neil Industries");
        assert!(pattern.is_match("ONeil Industries"));
        assert!(pattern.is_match("O\u{2019}Neil Industries"));
    }
}
