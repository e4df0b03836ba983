use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::music::SongRecord;
use crate::storage::read_json;

/// Render records as a 4-space indented JSON array with non-ASCII kept as is.
pub fn to_json_bytes(songs: &[SongRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    songs.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write the output file atomically.
///
/// The content goes to a temporary file next to `path` which then replaces
/// `path`, so a failure never leaves a truncated file and never touches an
/// earlier output.
pub fn write_songs<P: AsRef<Path>>(path: P, songs: &[SongRecord]) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_json_bytes(songs)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn read_songs<P: AsRef<Path>>(path: P) -> Result<Vec<SongRecord>> {
    read_json(path)
}
