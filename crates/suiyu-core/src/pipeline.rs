//! Pipeline driver: load inputs, run the conversion stages, write the output.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::{self, IdOverlay, VersionMap, fetch as fetch_config, paths};
use crate::convert::{
    FieldRemapper, GapFillEntry, GapFillIndex, GapFillStats, OverlayReport, ReleaseDateRule,
    RemapOptions, canonicalize_all, finish, gap_fill,
};
use crate::error::{Error, Result};
use crate::music::{SongRecord, UpstreamSong};
use crate::network::HttpClient;
use crate::retry::{ExponentialBackoff, RetryStrategy};
use crate::storage::{read_json, write_songs};

/// Where the gap-fill dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapFillSource {
    Remote { url: String, timeout: Duration },
    File(PathBuf),
}

impl GapFillSource {
    pub fn remote(url: impl Into<String>) -> Self {
        Self::Remote {
            url: url.into(),
            timeout: fetch_config::TIMEOUT,
        }
    }
}

impl std::fmt::Display for GapFillSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote { url, .. } => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub name: String,
    pub source: PathBuf,
    pub version_map: PathBuf,
    pub overlay: PathBuf,
    pub output: PathBuf,
    /// `None` skips the gap-fill stage.
    pub gap_fill: Option<GapFillSource>,
    pub remap: RemapOptions,
    pub drop_undated: bool,
    /// Records matched in the gap-fill dataset take its version label.
    pub adopt_reference_versions: bool,
    pub assign_chart_ids: bool,
}

impl PipelineConfig {
    /// Japanese dataset.
    pub fn domestic() -> Self {
        Self {
            name: "domestic".to_string(),
            source: paths::DOMESTIC_SOURCE.into(),
            version_map: paths::DOMESTIC_VERSION_MAP.into(),
            overlay: paths::ID_OVERLAY.into(),
            output: paths::DOMESTIC_OUTPUT.into(),
            gap_fill: Some(GapFillSource::remote(fetch_config::GAP_FILL_URL)),
            remap: RemapOptions {
                rule: ReleaseDateRule::Domestic,
                plus_offset: config::remap::DOMESTIC_PLUS_OFFSET,
                default_genre: config::remap::DEFAULT_GENRE.to_string(),
                release_date_overrides: HashMap::new(),
            },
            drop_undated: false,
            adopt_reference_versions: false,
            assign_chart_ids: false,
        }
    }

    /// International dataset.
    pub fn international() -> Self {
        let release_date_overrides = config::remap::INTL_RELEASE_DATE_OVERRIDES
            .iter()
            .map(|(title, date)| (title.to_string(), date.to_string()))
            .collect();

        Self {
            name: "international".to_string(),
            source: paths::INTL_SOURCE.into(),
            version_map: paths::INTL_VERSION_MAP.into(),
            overlay: paths::ID_OVERLAY.into(),
            output: paths::INTL_OUTPUT.into(),
            gap_fill: Some(GapFillSource::remote(fetch_config::GAP_FILL_URL)),
            remap: RemapOptions {
                rule: ReleaseDateRule::International,
                plus_offset: config::remap::INTL_PLUS_OFFSET,
                default_genre: config::remap::DEFAULT_GENRE.to_string(),
                release_date_overrides,
            },
            drop_undated: true,
            adopt_reference_versions: true,
            assign_chart_ids: true,
        }
    }
}

/// Everything a conversion reads, loaded up front.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub upstream: Vec<UpstreamSong>,
    pub versions: VersionMap,
    pub overlay: IdOverlay,
    /// `None` when the gap-fill stage is skipped.
    pub gap_fill: Option<GapFillIndex>,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub records: usize,
    pub current_version: String,
    pub gap_fill_applied: bool,
    pub gap_fill: GapFillStats,
    pub estimated_constants: usize,
    pub dropped_undated: usize,
    pub versions_adopted: usize,
    pub overlay: OverlayReport,
}

/// Run every conversion stage over already loaded inputs.
pub fn run_stages(
    inputs: &Inputs,
    config: &PipelineConfig,
    today: NaiveDate,
) -> Result<(Vec<SongRecord>, RunReport)> {
    let remapper = FieldRemapper::new(&inputs.versions, &config.remap, today)?;
    let mut report = RunReport {
        current_version: remapper.current_version().to_string(),
        ..Default::default()
    };

    let mut songs = Vec::with_capacity(inputs.upstream.len() * 2);
    for (index, song) in inputs.upstream.iter().enumerate() {
        songs.extend(remapper.remap(index, song)?);
    }
    debug!("Remapped {} entries into {} records", inputs.upstream.len(), songs.len());

    if let Some(index) = &inputs.gap_fill {
        report.gap_fill = gap_fill::merge_all(&mut songs, index);
        report.gap_fill_applied = true;
    }
    report.estimated_constants = gap_fill::fill_from_levels(&mut songs, config.remap.plus_offset);

    if config.drop_undated {
        report.dropped_undated = finish::drop_undated(&mut songs);
    }

    report.overlay = canonicalize_all(&mut songs, &inputs.overlay, inputs.gap_fill.as_ref())?;

    if config.adopt_reference_versions {
        if let Some(index) = &inputs.gap_fill {
            report.versions_adopted =
                gap_fill::adopt_versions(&mut songs, index, &report.current_version);
        }
    }
    if config.assign_chart_ids {
        finish::assign_chart_ids(&mut songs);
    }

    report.records = songs.len();
    Ok((songs, report))
}

pub struct Pipeline<R: RetryStrategy = ExponentialBackoff> {
    config: PipelineConfig,
    retry: R,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_retry(config, ExponentialBackoff::new())
    }
}

impl<R: RetryStrategy> Pipeline<R> {
    pub fn with_retry(config: PipelineConfig, retry: R) -> Self {
        Self { config, retry }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert and write the output file.
    ///
    /// Missing or malformed local inputs and version table gaps abort the run
    /// before anything is written; an unavailable gap-fill source only skips
    /// that stage.
    pub fn run(&self, today: NaiveDate) -> Result<RunReport> {
        let inputs = self.load_inputs()?;
        let (songs, report) = run_stages(&inputs, &self.config, today)?;

        write_songs(&self.config.output, &songs)?;
        info!(
            "[{}] Wrote {} records to {}",
            self.config.name,
            songs.len(),
            self.config.output.display()
        );
        log_overlay_report(&self.config.name, &report.overlay);

        Ok(report)
    }

    pub fn load_inputs(&self) -> Result<Inputs> {
        let versions = VersionMap::load(&self.config.version_map)?;
        info!(
            "[{}] Loaded {} versions (latest: {})",
            self.config.name,
            versions.len(),
            versions.latest().label
        );

        let overlay = IdOverlay::load(&self.config.overlay)?;
        if overlay.is_empty() {
            warn!(
                "[{}] Id overlay {} is empty",
                self.config.name,
                self.config.overlay.display()
            );
        } else {
            info!("[{}] Loaded {} overlay entries", self.config.name, overlay.len());
        }

        let upstream: Vec<UpstreamSong> = read_json(&self.config.source)?;
        info!("[{}] Loaded {} upstream entries", self.config.name, upstream.len());

        let gap_fill = match self.load_gap_fill() {
            Ok(index) => index,
            Err(e) => {
                warn!(
                    "[{}] {}; continuing without gap-fill",
                    self.config.name, e
                );
                None
            }
        };

        Ok(Inputs {
            upstream,
            versions,
            overlay,
            gap_fill,
        })
    }

    /// Load the gap-fill dataset. `Ok(None)` when the stage is disabled.
    pub fn load_gap_fill(&self) -> Result<Option<GapFillIndex>> {
        let Some(source) = &self.config.gap_fill else {
            info!("[{}] Gap-fill disabled", self.config.name);
            return Ok(None);
        };

        let entries: Vec<GapFillEntry> = match source {
            GapFillSource::Remote { url, timeout } => {
                HttpClient::new(*timeout)
                    .get_json_with_retry::<Vec<GapFillEntry>, _>(url, &self.retry)
            }
            GapFillSource::File(path) => read_json::<Vec<GapFillEntry>, _>(path),
        }
        .map_err(|e| Error::GapFillFetch(format!("{}: {}", source, e)))?;

        let index = GapFillIndex::from_entries(entries);
        if index.is_empty() {
            warn!("[{}] Gap-fill source {} has no usable entries", self.config.name, source);
        }
        info!(
            "[{}] Loaded {} gap-fill entries from {}",
            self.config.name,
            index.len(),
            source
        );
        Ok(Some(index))
    }
}

fn log_overlay_report(name: &str, report: &OverlayReport) {
    if report.is_complete() {
        info!(
            "[{}] All {} ids resolved ({} by title)",
            name, report.resolved, report.by_reference
        );
        return;
    }

    warn!(
        "[{}] {} records kept a string id ({} resolved, {} by title); add them to the id overlay",
        name,
        report.unresolved.len(),
        report.resolved,
        report.by_reference
    );
    for missing in &report.unresolved {
        info!(
            "[{}]   {} {} {:?}",
            name, missing.legacy_id, missing.chart_type, missing.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let domestic = PipelineConfig::domestic();
        assert_eq!(domestic.output, PathBuf::from(paths::DOMESTIC_OUTPUT));
        assert_eq!(domestic.remap.rule, ReleaseDateRule::Domestic);
        assert!(!domestic.drop_undated);
        assert!(!domestic.adopt_reference_versions);
        assert!(domestic.gap_fill.is_some());

        let intl = PipelineConfig::international();
        assert_eq!(intl.output, PathBuf::from(paths::INTL_OUTPUT));
        assert_eq!(intl.remap.rule, ReleaseDateRule::International);
        assert!(intl.drop_undated);
        assert!(intl.assign_chart_ids);
        assert!(intl.adopt_reference_versions);
        assert_eq!(
            intl.remap.release_date_overrides.get("みんなの").map(String::as_str),
            Some("20181002")
        );
    }

    #[test]
    fn test_gap_fill_source_display() {
        let remote = GapFillSource::remote("https://example.com/data");
        assert_eq!(remote.to_string(), "https://example.com/data");
        assert_eq!(
            GapFillSource::File(PathBuf::from("a/b.json")).to_string(),
            "a/b.json"
        );
    }
}
