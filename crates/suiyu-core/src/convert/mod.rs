//! Conversion stages, applied in order by the pipeline:
//!
//! 1. `FieldRemapper` - otogedb entry to suiyu records
//! 2. `gap_fill::merge_all` - unknown constants from the gap-fill dataset
//! 3. `gap_fill::fill_from_levels` - remaining constants estimated from levels
//! 4. `finish::drop_undated` - international only
//! 5. `canonical::canonicalize_all` - legacy ids to numeric ids, by overlay
//!    then by `(title, type)` in the gap-fill dataset
//! 6. `gap_fill::adopt_versions` / `finish::assign_chart_ids` - international only

pub mod canonical;
pub mod finish;
pub mod gap_fill;
mod release;
mod remap;

pub use canonical::{OverlayReport, UnresolvedId, canonicalize, canonicalize_all};
pub use gap_fill::{GapFillEntry, GapFillIndex, GapFillStats, ReferenceChart};
pub use release::ReleaseDateRule;
pub use remap::{FieldRemapper, RemapOptions};
