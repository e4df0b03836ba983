use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::storage::read_json;

/// One row of the version table: the label applies from `start` (inclusive)
/// up to the next row's start (exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub start: NaiveDate,
    pub label: String,
}

/// Date-range to version label table.
///
/// File format: a JSON object mapping each version's first day
/// (`"YYYYMMDD"`) to its label. The trailing row is open-ended, so the
/// current version is simply whatever row covers today.
#[derive(Debug, Clone)]
pub struct VersionMap {
    /// Sorted by `start`, never empty.
    entries: Vec<VersionEntry>,
}

impl VersionMap {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw: BTreeMap<String, String> = read_json(path)?;
        Self::from_raw(raw)
    }

    /// Parse the table from JSON text.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, String>) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for (key, label) in raw {
            let start = parse_date(&key)
                .map_err(|_| Error::Config(format!("invalid version start date {:?}", key)))?;
            entries.push(VersionEntry { start, label });
        }
        Self::from_entries(entries)
    }

    pub fn from_entries(mut entries: Vec<VersionEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::Config("version table is empty".to_string()));
        }

        entries.sort_by_key(|e| e.start);
        for pair in entries.windows(2) {
            if pair[0].start == pair[1].start {
                return Err(Error::Config(format!(
                    "version table has two rows starting {}",
                    pair[0].start
                )));
            }
        }
        if let Some(entry) = entries.iter().find(|e| e.label.trim().is_empty()) {
            return Err(Error::Config(format!(
                "version starting {} has an empty label",
                entry.start
            )));
        }

        Ok(Self { entries })
    }

    /// Label of the row covering `date`.
    ///
    /// Dates before the first row are not covered and fail as a config error.
    pub fn lookup(&self, date: NaiveDate) -> Result<&str> {
        let idx = self.entries.partition_point(|e| e.start <= date);
        if idx == 0 {
            return Err(Error::Config(format!(
                "no version covers {} (table starts {})",
                date, self.entries[0].start
            )));
        }
        Ok(&self.entries[idx - 1].label)
    }

    /// Label of the version running on `today`.
    pub fn current(&self, today: NaiveDate) -> Result<&str> {
        self.lookup(today)
    }

    pub fn latest(&self) -> &VersionEntry {
        // from_entries rejects empty tables
        &self.entries[self.entries.len() - 1]
    }

    /// Rows with their exclusive end, `None` for the open trailing row.
    pub fn ranges(&self) -> impl Iterator<Item = (&VersionEntry, Option<NaiveDate>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e, self.entries.get(i + 1).map(|next| next.start)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a release date (`YYYYMMDD` or `YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| Error::InvalidDate(raw.to_string()))
}

/// Parse an upstream release date; empty means the record is undated.
pub fn parse_release_date(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some)
}
