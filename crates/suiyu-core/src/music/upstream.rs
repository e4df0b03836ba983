use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::music::ChartType;

/// One song entry of the otogedb dataset.
///
/// The dataset is a flat object whose keys are built from chart prefixes
/// (`lev_mas_notes_tap`, `dx_lev_exp_designer`, ...), so the record is kept as
/// a JSON map with typed accessors instead of a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpstreamSong(Map<String, Value>);

impl UpstreamSong {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Field as text. Numbers are rendered, other JSON types count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Field as text, `None` when absent or empty.
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.trim().is_empty())
    }

    pub fn text_or_empty(&self, key: &str) -> String {
        self.text(key).unwrap_or_default()
    }

    /// Integer field; anything that is not a plain integer reads as 0.
    pub fn count(&self, key: &str) -> u32 {
        self.text(key)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    /// Image file name without extension; the dataset's only stable key.
    pub fn legacy_id(&self) -> String {
        let image = self.text_or_empty("image_url");
        image
            .strip_suffix(".png")
            .map(str::to_string)
            .unwrap_or(image)
    }

    /// Chart families this entry carries, in output order.
    pub fn chart_types(&self) -> Vec<ChartType> {
        let mut types = Vec::new();
        if self.has("lev_bas") {
            types.push(ChartType::Sd);
        }
        if self.has("dx_lev_bas") {
            types.push(ChartType::Dx);
        }
        if self.has("lev_utage") {
            types.push(ChartType::Utage);
        }
        types
    }

    /// Whether both a standard and a deluxe chart exist for this entry.
    pub fn has_sd_and_dx(&self) -> bool {
        self.has("lev_bas") && self.has("dx_lev_bas")
    }
}

impl From<Value> for UpstreamSong {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_accessors() {
        let song = UpstreamSong::from(json!({
            "title": "Test",
            "bpm": 150,
            "lev_bas_notes_tap": "abc",
            "comment": "",
        }));

        assert_eq!(song.text("title").as_deref(), Some("Test"));
        assert_eq!(song.text("bpm").as_deref(), Some("150"));
        assert_eq!(song.count("bpm"), 150);
        assert_eq!(song.count("lev_bas_notes_tap"), 0);
        assert_eq!(song.non_empty("comment"), None);
        assert_eq!(song.text_or_empty("missing"), "");
    }

    #[test]
    fn test_legacy_id_strips_extension() {
        let song = UpstreamSong::from(json!({ "image_url": "1e44516a8a3b5a51.png" }));
        assert_eq!(song.legacy_id(), "1e44516a8a3b5a51");

        let song = UpstreamSong::from(json!({ "image_url": "plain" }));
        assert_eq!(song.legacy_id(), "plain");
    }

    #[test]
    fn test_chart_types() {
        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "4",
            "lev_utage": "12?",
        }));
        assert_eq!(
            song.chart_types(),
            vec![ChartType::Sd, ChartType::Dx, ChartType::Utage]
        );
        assert!(song.has_sd_and_dx());
    }
}
