use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Chart family of a target record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
)]
pub enum ChartType {
    #[serde(rename = "SD")]
    #[strum(serialize = "SD")]
    Sd,
    #[serde(rename = "DX")]
    #[strum(serialize = "DX")]
    Dx,
    #[serde(rename = "UTAGE", alias = "utage")]
    #[strum(to_string = "UTAGE", serialize = "utage")]
    Utage,
}

impl ChartType {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }

    /// Key prefix of this family's level fields in the upstream dataset.
    pub fn level_prefix(&self) -> &'static str {
        match self {
            Self::Sd => "lev",
            Self::Dx => "dx_lev",
            Self::Utage => "lev_utage",
        }
    }

    /// Note count columns, in output order.
    pub fn note_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Sd => &["notes_tap", "notes_hold", "notes_slide", "notes_break"],
            Self::Dx | Self::Utage => &[
                "notes_tap",
                "notes_hold",
                "notes_slide",
                "notes_touch",
                "notes_break",
            ],
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Difficulty slot of a standard (SD/DX) chart.
///
/// The discriminant is the slot's position in `ds`, `level` and `charts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum Difficulty {
    #[strum(serialize = "bas")]
    Basic = 0,
    #[strum(serialize = "adv")]
    Advanced = 1,
    #[strum(serialize = "exp")]
    Expert = 2,
    #[strum(serialize = "mas")]
    Master = 3,
    #[strum(serialize = "remas")]
    ReMaster = 4,
}

impl Difficulty {
    /// Slots every standard chart has.
    pub const REQUIRED: [Difficulty; 4] = [
        Difficulty::Basic,
        Difficulty::Advanced,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    pub fn key(&self) -> &'static str {
        self.into()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Upstream key of the display level, e.g. `dx_lev_mas`.
    pub fn level_key(&self, chart_type: ChartType) -> String {
        format!("{}_{}", chart_type.level_prefix(), self.key())
    }
}
