use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::music::ChartType;
use crate::storage::read_json;

/// Overlay value: a bare numeric id, or an id with a replacement title.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OverlayEntry {
    Id(u32),
    Detailed {
        id: u32,
        #[serde(default)]
        title: Option<String>,
    },
}

impl OverlayEntry {
    pub fn id(&self) -> u32 {
        match self {
            Self::Id(id) | Self::Detailed { id, .. } => *id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Detailed { title, .. } => title.as_deref(),
        }
    }
}

/// An overlay match for a legacy id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHit<'a> {
    pub entry: &'a OverlayEntry,
    /// The key named the chart type explicitly (`"<legacy>/DX"`).
    pub qualified: bool,
}

/// Legacy string id to canonical numeric id table.
///
/// Keys are upstream image hashes, optionally suffixed with `/SD`, `/DX` or
/// `/UTAGE` when the chart families of one song need different ids.
#[derive(Debug, Clone, Default)]
pub struct IdOverlay {
    entries: HashMap<String, OverlayEntry>,
}

impl IdOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries: HashMap<String, OverlayEntry> = read_json(path)?;
        Ok(Self { entries })
    }

    pub fn parse(content: &str) -> Result<Self> {
        let entries: HashMap<String, OverlayEntry> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Find the entry for a legacy id, preferring the type-qualified key.
    pub fn lookup(&self, legacy_id: &str, chart_type: ChartType) -> Option<OverlayHit<'_>> {
        let qualified = format!("{}/{}", legacy_id, chart_type.short_name());
        if let Some(entry) = self.entries.get(&qualified) {
            return Some(OverlayHit {
                entry,
                qualified: true,
            });
        }
        self.entries.get(legacy_id).map(|entry| OverlayHit {
            entry,
            qualified: false,
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: OverlayEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overlay() {
        let overlay = IdOverlay::parse(
            r#"{
                "123abc": 4567,
                "1e44516a8a3b5a51": { "id": 131, "title": "Link" },
                "ffee/UTAGE": { "id": 100131 }
            }"#,
        )
        .unwrap();

        assert_eq!(overlay.len(), 3);

        let hit = overlay.lookup("123abc", ChartType::Sd).unwrap();
        assert_eq!(hit.entry.id(), 4567);
        assert!(!hit.qualified);

        let hit = overlay.lookup("1e44516a8a3b5a51", ChartType::Sd).unwrap();
        assert_eq!(hit.entry.title(), Some("Link"));

        let hit = overlay.lookup("ffee", ChartType::Utage).unwrap();
        assert_eq!(hit.entry.id(), 100131);
        assert!(hit.qualified);
        assert!(overlay.lookup("ffee", ChartType::Sd).is_none());
    }

    #[test]
    fn test_qualified_key_wins() {
        let mut overlay = IdOverlay::new();
        overlay.insert("aa", OverlayEntry::Id(8));
        overlay.insert("aa/DX", OverlayEntry::Id(10008));

        assert_eq!(overlay.lookup("aa", ChartType::Sd).unwrap().entry.id(), 8);
        assert_eq!(overlay.lookup("aa", ChartType::Dx).unwrap().entry.id(), 10008);
        assert!(overlay.lookup("bb", ChartType::Dx).is_none());
    }
}
