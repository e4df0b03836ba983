use anyhow::Result;
use clap::Parser;
use suiyu_cli::Args;
use suiyu_core::PipelineConfig;

fn main() -> Result<()> {
    let args = Args::parse();
    suiyu_cli::init_logging();
    suiyu_cli::run(PipelineConfig::domestic(), &args)
}
