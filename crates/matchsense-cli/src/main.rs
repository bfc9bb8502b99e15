//! Batch reconciliation of purchase line items against a product registry.
//!
//! Loads the registry and purchase CSVs, runs the matching cascade and
//! writes the flat result table plus an optional JSON run summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use matchsense_core::{flatten, MatchConfig, Matcher, Scorer};

mod ingest;
mod output;
mod report;

#[derive(Debug, Parser)]
#[command(name = "matchsense", version, about = "Reconcile purchase lines against a product registry")]
struct Cli {
    /// Registry CSV (columns: identity, trade_name, dosage, ...)
    #[arg(long)]
    register: PathBuf,

    /// Purchase list CSV (columns: item_name_raw, quantity)
    #[arg(long)]
    purchases: PathBuf,

    /// Result CSV path
    #[arg(long)]
    output: PathBuf,

    /// Optional run summary JSON path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Dosage similarity acceptance threshold (0-100)
    #[arg(long, default_value_t = 80.0)]
    dosage_threshold: f64,

    /// Identity resolution cutoff (0-100)
    #[arg(long, default_value_t = 65.0)]
    identity_cutoff: f64,

    /// Identity similarity scorer
    #[arg(long, value_enum, default_value_t = ScorerArg::Weighted)]
    scorer: ScorerArg,

    /// CSV field delimiter for both input and output
    #[arg(long, default_value_t = ';')]
    delimiter: char,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScorerArg {
    Weighted,
    TokenSort,
}

impl From<ScorerArg> for Scorer {
    fn from(arg: ScorerArg) -> Self {
        match arg {
            ScorerArg::Weighted => Scorer::WeightedRatio,
            ScorerArg::TokenSort => Scorer::TokenSortRatio,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let delimiter = u8::try_from(cli.delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .context("delimiter must be a single ASCII character")?;

    let registry = ingest::load_register(&cli.register, delimiter)
        .with_context(|| format!("loading registry from {}", cli.register.display()))?;
    let purchases = ingest::load_purchases(&cli.purchases, delimiter)
        .with_context(|| format!("loading purchases from {}", cli.purchases.display()))?;
    info!(
        registry_entries = registry.len(),
        purchase_rows = purchases.len(),
        "inputs loaded"
    );

    let config = MatchConfig {
        dosage_threshold: cli.dosage_threshold,
        identity_cutoff: cli.identity_cutoff,
        scorer: cli.scorer.into(),
    };
    let matcher = Matcher::new(&registry, config);
    let results = matcher.run(&purchases);
    let rows = flatten(&results);

    output::write_rows(&cli.output, &rows, delimiter)
        .with_context(|| format!("writing results to {}", cli.output.display()))?;

    let summary = report::summarize(&rows);
    info!(
        total_rows = summary.total_rows,
        matched_rows = summary.matched_rows,
        overpaid_rows = summary.overpaid_rows,
        total_potential_saving = summary.total_potential_saving,
        "run complete"
    );
    if let Some(path) = &cli.summary {
        output::write_summary(path, &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    Ok(())
}
