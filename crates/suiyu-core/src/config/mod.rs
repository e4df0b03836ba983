//! Configuration and support files.
//!
//! This module contains the data tables the converters read:
//! - `VersionMap` - release date ranges to version labels
//! - `IdOverlay` - legacy string ids to canonical numeric ids
//!
//! and the compiled-in paths, endpoints and limits.

mod overlay;
mod version_map;

pub use overlay::*;
pub use version_map::*;

/// Default file locations, relative to the working directory.
pub mod paths {
    pub const DOMESTIC_SOURCE: &str = "music_data/music-ex.json";
    pub const INTL_SOURCE: &str = "music_data/music-ex-intl.json";

    pub const DOMESTIC_VERSION_MAP: &str = "music_data/mapping.json";
    pub const INTL_VERSION_MAP: &str = "music_data/intl_mapping.json";

    pub const ID_OVERLAY: &str = "music_data/id_overlay.json";

    pub const DOMESTIC_OUTPUT: &str = "convert_music_data.json";
    pub const INTL_OUTPUT: &str = "convert_intl_music_data.json";
}

/// Gap-fill dataset download.
///
/// Exponential backoff: 1000ms → 2000ms between three attempts, on top of the
/// per-request timeout.
pub mod fetch {
    use std::time::Duration;

    pub const GAP_FILL_URL: &str = "https://www.diving-fish.com/api/maimaidxprober/music_data";

    /// Global timeout of a single request.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    pub const MAX_ATTEMPTS: u32 = 3;

    /// Delay (in ms) after each failed attempt.
    pub const RETRY_DELAYS_MS: [u64; 2] = [1000, 2000];

    /// Largest response body accepted (64 MiB).
    pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;
}

/// Field remapping defaults.
pub mod remap {
    /// Genre used when the upstream entry has no category.
    pub const DEFAULT_GENRE: &str = "其他游戏";

    /// Added to a display level ending in `+` when estimating a constant.
    pub const DOMESTIC_PLUS_OFFSET: f64 = 0.5;
    pub const INTL_PLUS_OFFSET: f64 = 0.6;

    /// Deluxe charts sharing a song with a standard chart use the standard
    /// id plus this offset.
    pub const DX_ID_OFFSET: u32 = 10000;

    /// International entries added before this date list the standard chart
    /// under `date_intl_added`; later entries list the deluxe chart there.
    pub const INTL_DATE_ROLE_SWAP: &str = "20191115";

    /// International release dates fixed by title.
    pub const INTL_RELEASE_DATE_OVERRIDES: [(&str, &str); 2] =
        [("夜明けまであと３秒", "20170214"), ("みんなの", "20181002")];
}
