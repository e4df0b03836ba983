use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use suiyu_core::{GapFillSource, PipelineConfig};

/// Convert an otogedb music dataset into the suiyu schema.
///
/// Every option has a compiled-in default, so the converters run with no
/// arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Upstream otogedb dataset
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Version mapping table
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Numeric id overlay table
    #[arg(long, value_name = "FILE")]
    pub overlay: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Gap-fill dataset URL
    ///
    /// `--gap-fill-file` and `--no-gap-fill` take precedence.
    #[arg(long, env = "SUIYU_GAP_FILL_URL")]
    pub gap_fill_url: Option<String>,

    /// Read the gap-fill dataset from a local file instead
    #[arg(long, value_name = "FILE", conflicts_with = "no_gap_fill")]
    pub gap_fill_file: Option<PathBuf>,

    /// Skip the gap-fill stage
    #[arg(long)]
    pub no_gap_fill: bool,

    /// Gap-fill request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

impl Args {
    /// Apply the given options on top of a pipeline's defaults.
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(mapping) = &self.mapping {
            config.version_map = mapping.clone();
        }
        if let Some(overlay) = &self.overlay {
            config.overlay = overlay.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }

        if self.no_gap_fill {
            config.gap_fill = None;
        } else if let Some(path) = &self.gap_fill_file {
            config.gap_fill = Some(GapFillSource::File(path.clone()));
        } else if let Some(url) = &self.gap_fill_url {
            config.gap_fill = Some(GapFillSource::remote(url.clone()));
        }

        if let (Some(secs), Some(GapFillSource::Remote { timeout, .. })) =
            (self.timeout_secs, config.gap_fill.as_mut())
        {
            *timeout = Duration::from_secs(secs);
        }

        config
    }
}
