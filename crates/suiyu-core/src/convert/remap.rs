use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::{VersionMap, parse_release_date};
use crate::convert::ReleaseDateRule;
use crate::error::{Error, Result};
use crate::music::{
    BasicInfo, ChartNotes, ChartType, Difficulty, SongId, SongRecord, UpstreamSong, parse_level,
};

/// Per-pipeline remapping knobs.
#[derive(Debug, Clone)]
pub struct RemapOptions {
    pub rule: ReleaseDateRule,
    /// Added to `+` levels when a constant has to be estimated.
    pub plus_offset: f64,
    pub default_genre: String,
    /// Release dates fixed by title, taking precedence over the rule.
    pub release_date_overrides: HashMap<String, String>,
}

/// Turns otogedb entries into suiyu records.
pub struct FieldRemapper<'a> {
    versions: &'a VersionMap,
    current_version: &'a str,
    options: &'a RemapOptions,
}

impl<'a> FieldRemapper<'a> {
    /// `today` selects the current version, which marks records as new.
    pub fn new(versions: &'a VersionMap, options: &'a RemapOptions, today: NaiveDate) -> Result<Self> {
        let current_version = versions.current(today)?;
        Ok(Self {
            versions,
            current_version,
            options,
        })
    }

    pub fn current_version(&self) -> &str {
        self.current_version
    }

    /// Remap one upstream entry into one record per chart family it carries.
    ///
    /// `index` is the entry's position in the dataset, used in errors.
    pub fn remap(&self, index: usize, song: &UpstreamSong) -> Result<Vec<SongRecord>> {
        let title = song.title().ok_or(Error::MalformedRecord {
            index,
            field: "title",
        })?;

        song.chart_types()
            .into_iter()
            .map(|chart_type| self.remap_family(song, &title, chart_type))
            .collect()
    }

    fn remap_family(
        &self,
        song: &UpstreamSong,
        title: &str,
        chart_type: ChartType,
    ) -> Result<SongRecord> {
        let (ds, level, charts) = match chart_type {
            ChartType::Utage => self.utage_slots(song),
            _ => self.standard_slots(song, chart_type),
        };
        let comment = match chart_type {
            ChartType::Utage => song.text_or_empty("comment"),
            _ => String::new(),
        };

        Ok(SongRecord {
            id: SongId::Legacy(song.legacy_id()),
            title: title.to_string(),
            chart_type,
            comment,
            ds,
            level,
            cids: Vec::new(),
            charts,
            basic_info: self.basic_info(song, title, chart_type)?,
        })
    }

    fn basic_info(&self, song: &UpstreamSong, title: &str, chart_type: ChartType) -> Result<BasicInfo> {
        let release_date = match self.options.release_date_overrides.get(title) {
            Some(date) => date.clone(),
            None => self.options.rule.release_date(song, chart_type),
        };
        let from = match parse_release_date(&release_date)? {
            Some(date) => self.versions.lookup(date)?.to_string(),
            None => String::new(),
        };
        let is_new = !from.is_empty() && from == self.current_version;

        Ok(BasicInfo {
            title: title.to_string(),
            artist: song.text_or_empty("artist"),
            genre: song
                .non_empty("catcode")
                .unwrap_or_else(|| self.options.default_genre.clone()),
            bpm: song.count("bpm"),
            release_date,
            from,
            is_new,
        })
    }

    fn standard_slots(
        &self,
        song: &UpstreamSong,
        chart_type: ChartType,
    ) -> (Vec<Option<f64>>, Vec<String>, Vec<ChartNotes>) {
        let mut slots = Difficulty::REQUIRED.to_vec();
        if song
            .non_empty(&Difficulty::ReMaster.level_key(chart_type))
            .is_some()
        {
            slots.push(Difficulty::ReMaster);
        }

        let mut ds = Vec::with_capacity(slots.len());
        let mut level = Vec::with_capacity(slots.len());
        let mut charts = Vec::with_capacity(slots.len());
        for difficulty in slots {
            let prefix = difficulty.level_key(chart_type);
            ds.push(self.constant(song, &prefix));
            level.push(song.text_or_empty(&prefix));
            charts.push(ChartNotes {
                notes: note_counts(song, &prefix, chart_type),
                charter: song
                    .non_empty(&format!("{}_designer", prefix))
                    .unwrap_or_else(|| "-".to_string()),
            });
        }

        (ds, level, charts)
    }

    /// Utage charts have one slot, or a left and a right slot for two-player
    /// charts. Both slots share the level.
    fn utage_slots(&self, song: &UpstreamSong) -> (Vec<Option<f64>>, Vec<String>, Vec<ChartNotes>) {
        let prefix = ChartType::Utage.level_prefix();
        let constant = self.constant(song, prefix);
        let level = song.text_or_empty(prefix);

        let note_prefixes = if song.has("lev_utage_right_notes") {
            vec!["lev_utage_left", "lev_utage_right"]
        } else {
            vec![prefix]
        };

        let charts: Vec<ChartNotes> = note_prefixes
            .iter()
            .map(|p| ChartNotes {
                notes: note_counts(song, p, ChartType::Utage),
                charter: "-".to_string(),
            })
            .collect();

        (
            vec![constant; charts.len()],
            vec![level; charts.len()],
            charts,
        )
    }

    /// Internal constant from `<prefix>_i`; `None` when the dataset lacks it.
    fn constant(&self, song: &UpstreamSong, prefix: &str) -> Option<f64> {
        song.non_empty(&format!("{}_i", prefix))
            .and_then(|raw| parse_level(&raw, self.options.plus_offset))
    }
}

fn note_counts(song: &UpstreamSong, prefix: &str, chart_type: ChartType) -> Vec<u32> {
    chart_type
        .note_keys()
        .iter()
        .map(|key| song.count(&format!("{}_{}", prefix, key)))
        .collect()
}
