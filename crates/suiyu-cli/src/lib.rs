//! Shared code of the `suiyu-convert` and `suiyu-intl-convert` binaries.

mod cli;
mod run;

pub use cli::Args;
pub use run::{init_logging, run};
