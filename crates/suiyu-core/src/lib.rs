//! otogedb → suiyu music data conversion.
//!
//! The binaries in `suiyu-cli` only pick a [`PipelineConfig`] and call
//! [`Pipeline::run`]; every stage lives here so it can be tested without
//! touching the network.

pub mod config;
pub mod convert;
pub mod error;
pub mod music;
pub mod network;
pub mod pipeline;
pub mod retry;
pub mod storage;

pub use config::{IdOverlay, OverlayEntry, VersionEntry, VersionMap};
pub use convert::{
    FieldRemapper, GapFillIndex, GapFillStats, OverlayReport, ReferenceChart, ReleaseDateRule,
    RemapOptions, UnresolvedId,
};
pub use error::{Error, Result};
pub use music::{
    BasicInfo, ChartNotes, ChartType, Difficulty, IdResolution, SongId, SongRecord, UpstreamSong,
};
pub use network::HttpClient;
pub use pipeline::{GapFillSource, Inputs, Pipeline, PipelineConfig, RunReport, run_stages};
pub use retry::{ExponentialBackoff, NoRetry, RetryStrategy};
pub use storage::{read_songs, to_json_bytes, write_songs};
