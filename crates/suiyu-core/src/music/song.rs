use serde::{Deserialize, Serialize};

use crate::music::ChartType;

/// Identifier of a target record.
///
/// Canonical ids are numeric; records the overlay cannot resolve keep the
/// upstream image hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongId {
    Numeric(u32),
    Legacy(String),
}

impl SongId {
    pub fn as_legacy(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Legacy(id) => Some(id),
        }
    }
}

impl std::fmt::Display for SongId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{}", id),
            Self::Legacy(id) => write!(f, "{}", id),
        }
    }
}

/// Outcome of looking an identifier up in the numeric id overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdResolution {
    Resolved(u32),
    /// No overlay entry; the string id is kept.
    Unresolved(String),
}

impl From<IdResolution> for SongId {
    fn from(resolution: IdResolution) -> Self {
        match resolution {
            IdResolution::Resolved(id) => SongId::Numeric(id),
            IdResolution::Unresolved(id) => SongId::Legacy(id),
        }
    }
}

/// Note counts and designer of one difficulty slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartNotes {
    pub notes: Vec<u32>,
    pub charter: String,
}

impl ChartNotes {
    pub fn empty(chart_type: ChartType) -> Self {
        Self {
            notes: vec![0; chart_type.note_keys().len()],
            charter: "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: u32,
    pub release_date: String,
    /// Version label the release date maps to.
    pub from: String,
    pub is_new: bool,
}

/// A song chart family in the suiyu schema.
///
/// `ds`, `level` and `charts` are indexed by difficulty slot and always have
/// the same length. A `None` constant is unknown and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub id: SongId,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub comment: String,
    pub ds: Vec<Option<f64>>,
    pub level: Vec<String>,
    pub cids: Vec<u32>,
    pub charts: Vec<ChartNotes>,
    pub basic_info: BasicInfo,
}

impl SongRecord {
    /// Number of difficulty slots with a known constant missing.
    pub fn missing_constants(&self) -> usize {
        self.ds.iter().filter(|ds| ds.is_none()).count()
    }

    pub fn is_undated(&self) -> bool {
        self.basic_info.release_date.trim().is_empty()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.basic_info.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&SongId::Numeric(131)).unwrap(), "131");
        assert_eq!(
            serde_json::to_string(&SongId::Legacy("abc".to_string())).unwrap(),
            "\"abc\""
        );

        let numeric: SongId = serde_json::from_str("4567").unwrap();
        assert_eq!(numeric, SongId::Numeric(4567));
        let legacy: SongId = serde_json::from_str("\"123\"").unwrap();
        assert_eq!(legacy, SongId::Legacy("123".to_string()));
    }

    #[test]
    fn test_resolution_into_song_id() {
        assert_eq!(SongId::from(IdResolution::Resolved(8)), SongId::Numeric(8));
        assert_eq!(
            SongId::from(IdResolution::Unresolved("x".to_string())),
            SongId::Legacy("x".to_string())
        );
    }

    #[test]
    fn test_empty_chart_notes() {
        assert_eq!(ChartNotes::empty(ChartType::Sd).notes, vec![0; 4]);
        assert_eq!(ChartNotes::empty(ChartType::Dx).charter, "-");
    }
}
