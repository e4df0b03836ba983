use anyhow::{Context, Result};
use chrono::Local;
use suiyu_core::{Pipeline, PipelineConfig, RunReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// Initialize logging (RUST_LOG overrides the info default).
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("suiyu_cli=info,suiyu_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Run one pipeline with the command-line overrides applied.
pub fn run(defaults: PipelineConfig, args: &Args) -> Result<()> {
    let config = args.apply(defaults);
    let name = config.name.clone();
    let output = config.output.clone();

    eprintln!("suiyu {} - {} conversion", env!("CARGO_PKG_VERSION"), name);
    info!("Reading {}", config.source.display());

    let today = Local::now().date_naive();
    let report = Pipeline::new(config)
        .run(today)
        .with_context(|| format!("{} conversion failed", name))?;

    print_summary(&report);
    eprintln!("Saved to: {}", output.display());
    Ok(())
}

fn print_summary(report: &RunReport) {
    eprintln!("Current version: {}", report.current_version);
    eprintln!("Records: {}", report.records);
    if report.gap_fill_applied {
        eprintln!(
            "Gap-fill: {} constants in {} records ({} records without a match)",
            report.gap_fill.constants_filled,
            report.gap_fill.records_filled,
            report.gap_fill.unmatched
        );
    } else {
        eprintln!("Gap-fill: skipped");
    }
    eprintln!("Estimated from levels: {}", report.estimated_constants);
    if report.dropped_undated > 0 {
        eprintln!("Dropped undated records: {}", report.dropped_undated);
    }
    if report.versions_adopted > 0 {
        eprintln!("Versions taken from gap-fill data: {}", report.versions_adopted);
    }

    let unresolved = &report.overlay.unresolved;
    if unresolved.is_empty() {
        eprintln!(
            "Ids: all {} resolved ({} by title)",
            report.overlay.resolved, report.overlay.by_reference
        );
    } else {
        eprintln!(
            "Ids: {} resolved ({} by title), {} kept as strings:",
            report.overlay.resolved,
            report.overlay.by_reference,
            unresolved.len()
        );
        for missing in unresolved {
            eprintln!("  {}\t{}\t{}", missing.legacy_id, missing.chart_type, missing.title);
        }
    }
}
