use std::collections::HashSet;

use crate::config::IdOverlay;
use crate::config::remap::DX_ID_OFFSET;
use crate::convert::GapFillIndex;
use crate::error::{Error, Result};
use crate::music::{ChartType, IdResolution, SongId, SongRecord};

/// A record whose id stayed a legacy string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedId {
    pub legacy_id: String,
    pub title: String,
    pub chart_type: ChartType,
}

/// Overlay coverage of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub resolved: usize,
    /// Of `resolved`, records matched by `(title, type)` in the reference
    /// dataset rather than by the overlay.
    pub by_reference: usize,
    pub unresolved: Vec<UnresolvedId>,
}

impl OverlayReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolve one record's legacy id.
///
/// The overlay is consulted first. `paired` holds the legacy ids that also
/// have a standard chart in the same output; a deluxe chart of such a song
/// takes the bare entry's id plus `DX_ID_OFFSET` unless the overlay names the
/// deluxe chart explicitly. Without an overlay entry the id given to the same
/// `(title, type)` by `reference` is used as is. Records that already carry a
/// numeric id are left alone.
pub fn canonicalize(
    song: &mut SongRecord,
    overlay: &IdOverlay,
    paired: &HashSet<String>,
    reference: Option<&GapFillIndex>,
) -> Result<IdResolution> {
    let legacy = match &song.id {
        SongId::Numeric(id) => return Ok(IdResolution::Resolved(*id)),
        SongId::Legacy(legacy) => legacy.clone(),
    };

    let Some(hit) = overlay.lookup(&legacy, song.chart_type) else {
        let resolution = match reference.and_then(|index| index.id_of(&song.title, song.chart_type)) {
            Some(id) => IdResolution::Resolved(id),
            None => IdResolution::Unresolved(legacy),
        };
        song.id = resolution.clone().into();
        return Ok(resolution);
    };

    let mut id = hit.entry.id();
    if !hit.qualified && song.chart_type == ChartType::Dx && paired.contains(&legacy) {
        id = id.checked_add(DX_ID_OFFSET).ok_or_else(|| {
            Error::Config(format!(
                "overlay id {} of {} leaves no room for the deluxe offset",
                id, legacy
            ))
        })?;
    }
    if let Some(title) = hit.entry.title() {
        song.set_title(title);
    }

    let resolution = IdResolution::Resolved(id);
    song.id = resolution.clone().into();
    Ok(resolution)
}

pub fn canonicalize_all(
    songs: &mut [SongRecord],
    overlay: &IdOverlay,
    reference: Option<&GapFillIndex>,
) -> Result<OverlayReport> {
    let paired: HashSet<String> = songs
        .iter()
        .filter(|s| s.chart_type == ChartType::Sd)
        .filter_map(|s| s.id.as_legacy().map(str::to_string))
        .collect();

    let mut report = OverlayReport::default();
    for song in songs.iter_mut() {
        let through_overlay = match &song.id {
            SongId::Legacy(legacy) => overlay.lookup(legacy, song.chart_type).is_some(),
            SongId::Numeric(_) => true,
        };
        match canonicalize(song, overlay, &paired, reference)? {
            IdResolution::Resolved(_) => {
                report.resolved += 1;
                if !through_overlay {
                    report.by_reference += 1;
                }
            }
            IdResolution::Unresolved(legacy_id) => report.unresolved.push(UnresolvedId {
                legacy_id,
                title: song.title.clone(),
                chart_type: song.chart_type,
            }),
        }
    }
    Ok(report)
}
