use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::music::{ChartType, SongRecord, parse_level};

/// One record of the gap-fill dataset. Only the fields used for filling and
/// id resolution are read; the dataset carries the full suiyu schema.
#[derive(Debug, Clone, Deserialize)]
pub struct GapFillEntry {
    #[serde(default)]
    pub id: Option<ReferenceId>,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(default)]
    pub ds: Vec<Option<f64>>,
    #[serde(default)]
    pub basic_info: Option<ReferenceInfo>,
}

/// The dataset writes ids as strings; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReferenceId {
    Numeric(u32),
    Text(String),
}

impl ReferenceId {
    pub fn numeric(&self) -> Option<u32> {
        match self {
            Self::Numeric(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceInfo {
    #[serde(default)]
    pub from: String,
}

/// What the dataset knows about one `(title, type)` chart family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceChart {
    pub id: Option<u32>,
    pub ds: Vec<Option<f64>>,
    /// Version label, `None` when the dataset leaves it empty.
    pub from: Option<String>,
}

impl From<GapFillEntry> for ReferenceChart {
    fn from(entry: GapFillEntry) -> Self {
        Self {
            id: entry.id.as_ref().and_then(ReferenceId::numeric),
            ds: entry.ds,
            from: entry
                .basic_info
                .map(|info| info.from)
                .filter(|from| !from.trim().is_empty()),
        }
    }
}

/// Gap-fill dataset indexed by `(title, type)`.
#[derive(Debug, Clone, Default)]
pub struct GapFillIndex {
    entries: HashMap<(String, ChartType), ReferenceChart>,
}

impl GapFillIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index; entries with an unknown type are skipped and later
    /// duplicates replace earlier ones.
    pub fn from_entries(entries: Vec<GapFillEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            match ChartType::from_str(&entry.chart_type) {
                Ok(chart_type) => {
                    let title = entry.title.clone();
                    index.insert(title, chart_type, entry.into());
                }
                Err(_) => debug!(
                    "Skipping gap-fill entry {:?} with type {:?}",
                    entry.title, entry.chart_type
                ),
            }
        }
        index
    }

    pub fn insert(&mut self, title: String, chart_type: ChartType, chart: ReferenceChart) {
        self.entries.insert((title, chart_type), chart);
    }

    pub fn get(&self, title: &str, chart_type: ChartType) -> Option<&ReferenceChart> {
        self.entries.get(&(title.to_string(), chart_type))
    }

    /// Numeric id the dataset gives the chart family, if any.
    pub fn id_of(&self, title: &str, chart_type: ChartType) -> Option<u32> {
        self.get(title, chart_type).and_then(|chart| chart.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters from one gap-fill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapFillStats {
    /// Records with at least one constant filled.
    pub records_filled: usize,
    pub constants_filled: usize,
    /// Records missing constants with no entry in the dataset.
    pub unmatched: usize,
}

/// Fill the unknown constants of `song` from the index.
///
/// Known constants are never replaced. Returns how many were filled; a record
/// without a matching entry is left as it is.
pub fn merge(song: &mut SongRecord, index: &GapFillIndex) -> Option<usize> {
    let source = &index.get(&song.title, song.chart_type)?.ds;

    let mut filled = 0;
    for (slot, value) in song.ds.iter_mut().enumerate() {
        if value.is_some() {
            continue;
        }
        if let Some(Some(constant)) = source.get(slot) {
            *value = Some(*constant);
            filled += 1;
        }
    }
    Some(filled)
}

pub fn merge_all(songs: &mut [SongRecord], index: &GapFillIndex) -> GapFillStats {
    let mut stats = GapFillStats::default();
    for song in songs.iter_mut() {
        if song.missing_constants() == 0 {
            continue;
        }
        match merge(song, index) {
            Some(0) => {}
            Some(filled) => {
                stats.records_filled += 1;
                stats.constants_filled += filled;
            }
            None => stats.unmatched += 1,
        }
    }
    stats
}

/// Estimate the constants still unknown after gap-fill from the display
/// levels. Returns how many were estimated.
pub fn fill_from_levels(songs: &mut [SongRecord], plus_offset: f64) -> usize {
    let mut estimated = 0;
    for song in songs.iter_mut() {
        for (value, level) in song.ds.iter_mut().zip(&song.level) {
            if value.is_none() {
                *value = parse_level(level, plus_offset);
                if value.is_some() {
                    estimated += 1;
                }
            }
        }
    }
    estimated
}

/// Take the dataset's version label for every matched record that has one
/// and recompute `is_new` against `current_version`. Returns how many labels
/// changed.
pub fn adopt_versions(songs: &mut [SongRecord], index: &GapFillIndex, current_version: &str) -> usize {
    let mut changed = 0;
    for song in songs.iter_mut() {
        let Some(from) = index
            .get(&song.title, song.chart_type)
            .and_then(|chart| chart.from.as_deref())
        else {
            continue;
        };
        if song.basic_info.from != from {
            debug!(
                "{} [{}]: version {:?} -> {:?}",
                song.title, song.chart_type, song.basic_info.from, from
            );
            song.basic_info.from = from.to_string();
            changed += 1;
        }
        song.basic_info.is_new = song.basic_info.from == current_version;
    }
    changed
}
