//! Music data model.
//!
//! - `UpstreamSong` - one otogedb entry
//! - `SongRecord` - one chart family in the suiyu schema
//! - `ChartType` / `Difficulty` - chart families and difficulty slots

mod chart;
mod level;
mod song;
mod upstream;

pub use chart::*;
pub use level::*;
pub use song::*;
pub use upstream::*;
