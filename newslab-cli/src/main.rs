//! NewsLab CLI — enrich news items and export the labeled CSV snapshot.
//!
//! Commands:
//! - `enrich` — resolve symbols, classify confidence, compute price
//!   horizons, and write the snapshot CSV
//! - `registry check` — load a company registry file and report its shape

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use newslab_core::config::EnrichConfig;
use newslab_core::domain::NewsItem;
use newslab_core::extract::{CandidateExtractor, ExtractionPolicy};
use newslab_core::horizon::{NoPriceData, PriceSource};
use newslab_core::pipeline::{dedupe_items, enrich_item, EnrichedRecord};
use newslab_core::registry::CompanyRegistry;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod export;
mod prices;

#[derive(Parser)]
#[command(
    name = "newslab",
    about = "NewsLab CLI — news-to-ticker resolution and horizon labeling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich news items and write the snapshot CSV.
    Enrich {
        /// Input news items: a JSON array or one JSON object per line.
        #[arg(long)]
        input: PathBuf,

        /// Company registry CSV (ticker, company_full, company_short).
        #[arg(long)]
        registry: PathBuf,

        /// Snapshot CSV to write.
        #[arg(long)]
        output: PathBuf,

        /// Minute prices CSV (symbol, timestamp, price). Without it,
        /// horizon labels are left absent.
        #[arg(long)]
        prices: Option<PathBuf>,

        /// TOML config file with resolver thresholds and windows.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extraction policy override: strict or coarse.
        #[arg(long)]
        policy: Option<String>,

        /// Also write the full per-item records (scores included) as JSON.
        #[arg(long)]
        details: Option<PathBuf>,
    },
    /// Registry inspection commands.
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
}

#[derive(Subcommand)]
enum RegistryAction {
    /// Load a registry file and report symbol and pattern counts.
    Check {
        /// Company registry CSV.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Enrich {
            input,
            registry,
            output,
            prices,
            config,
            policy,
            details,
        } => run_enrich(input, registry, output, prices, config, policy, details),
        Commands::Registry { action } => match action {
            RegistryAction::Check { path } => run_registry_check(&path),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn run_enrich(
    input: PathBuf,
    registry_path: PathBuf,
    output: PathBuf,
    prices_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    policy: Option<String>,
    details: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => EnrichConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EnrichConfig::default(),
    };
    if let Some(name) = policy.as_deref() {
        config.extraction_policy = parse_policy(name)?;
    }

    let registry = CompanyRegistry::from_csv_path(&registry_path)
        .with_context(|| format!("loading registry {}", registry_path.display()))?;

    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("reading input {}", input.display()))?;
    let items = read_items(&raw).with_context(|| format!("parsing input {}", input.display()))?;
    let total_read = items.len();
    let items = dedupe_items(items);

    let price_source: Box<dyn PriceSource> = match &prices_path {
        Some(path) => {
            let source = prices::CsvPriceSource::from_path(path)?;
            if source.skipped_rows > 0 {
                eprintln!("Skipped {} unparseable price rows", source.skipped_rows);
            }
            println!("Prices loaded for {} symbol(s)", source.symbol_count());
            Box::new(source)
        }
        None => Box::new(NoPriceData),
    };

    let extractor = CandidateExtractor::new(config.extraction_policy);

    let records: Vec<EnrichedRecord> = items
        .par_iter()
        .map(|item| enrich_item(item, &extractor, &registry, &config, price_source.as_ref()))
        .collect();

    export::write_snapshot(&output, &records)?;
    println!("Snapshot written to: {}", output.display());

    if let Some(path) = details {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating details file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &records)?;
        println!("Details written to: {}", path.display());
    }

    print_summary(total_read, &records, prices_path.is_some());
    Ok(())
}

fn parse_policy(name: &str) -> Result<ExtractionPolicy> {
    match name {
        "strict" => Ok(ExtractionPolicy::Strict),
        "coarse" => Ok(ExtractionPolicy::Coarse),
        _ => bail!("unknown policy '{name}'. Valid: strict, coarse"),
    }
}

/// Parse items from a JSON array or from JSON lines, whichever the file
/// holds.
fn read_items(raw: &str) -> Result<Vec<NewsItem>> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    let mut items = Vec::new();
    for (number, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item: NewsItem = serde_json::from_str(line)
            .with_context(|| format!("line {} is not a news item", number + 1))?;
        items.push(item);
    }
    Ok(items)
}

fn run_registry_check(path: &Path) -> Result<()> {
    let registry = CompanyRegistry::from_csv_path(path)
        .with_context(|| format!("loading registry {}", path.display()))?;

    let pattern_count: usize = registry.iter().map(|(_, patterns)| patterns.len()).sum();
    println!("Registry: {}", path.display());
    println!("Symbols:  {}", registry.len());
    println!("Patterns: {pattern_count}");
    Ok(())
}

fn print_summary(total_read: usize, records: &[EnrichedRecord], with_prices: bool) {
    let mut confidence: BTreeMap<&str, usize> = BTreeMap::new();
    let mut symbol_reasons: BTreeMap<&str, usize> = BTreeMap::new();
    let mut name_reasons: BTreeMap<&str, usize> = BTreeMap::new();
    let mut labeled = 0;
    for record in records {
        *confidence
            .entry(record.ticker_confidence.as_str())
            .or_default() += 1;
        *symbol_reasons
            .entry(record.ticker_resolution_reason.as_str())
            .or_default() += 1;
        *name_reasons
            .entry(record.name_ticker_resolution_reason.as_str())
            .or_default() += 1;
        if record.label_time_horizon_1_min.is_some() {
            labeled += 1;
        }
    }

    println!();
    println!("=== Enrichment Summary ===");
    println!("Items read:     {total_read}");
    println!(
        "After dedupe:   {} ({} duplicate(s) dropped)",
        records.len(),
        total_read - records.len()
    );
    println!();
    println!("--- Confidence ---");
    for (tier, count) in &confidence {
        println!("{tier:<24} {count}");
    }
    println!();
    println!("--- Symbol resolution ---");
    for (reason, count) in &symbol_reasons {
        println!("{reason:<24} {count}");
    }
    println!();
    println!("--- Name resolution ---");
    for (reason, count) in &name_reasons {
        println!("{reason:<24} {count}");
    }
    if with_prices {
        println!();
        println!("Horizon-labeled: {labeled}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_json_array() {
        let raw = r#"[{"headline": "one"}, {"headline": "two"}]"#;
        let items = read_items(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "one");
    }

    #[test]
    fn reads_json_lines_skipping_blanks() {
        let raw = "{\"headline\": \"one\"}\n\n{\"headline\": \"two\", \"text\": \"body\"}\n";
        let items = read_items(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].body, "body");
    }

    #[test]
    fn reports_the_offending_json_line() {
        let raw = "{\"headline\": \"one\"}\nnot json\n";
        let err = read_items(raw).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_unknown_policy_names() {
        assert!(parse_policy("strict").is_ok());
        assert!(parse_policy("coarse").is_ok());
        assert!(parse_policy("loose").is_err());
    }
}
