use crate::music::SongRecord;

/// Remove records without a release date (charts deleted from the game).
/// Returns how many were removed.
pub fn drop_undated(songs: &mut Vec<SongRecord>) -> usize {
    let before = songs.len();
    songs.retain(|song| !song.is_undated());
    before - songs.len()
}

/// Number every chart slot sequentially from 1, in output order.
pub fn assign_chart_ids(songs: &mut [SongRecord]) {
    let mut next = 1;
    for song in songs.iter_mut() {
        song.cids = (next..next + song.ds.len() as u32).collect();
        next += song.ds.len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{BasicInfo, ChartNotes, ChartType, SongId};

    fn record(release_date: &str, slots: usize) -> SongRecord {
        SongRecord {
            id: SongId::Legacy("x".to_string()),
            title: "Song".to_string(),
            chart_type: ChartType::Dx,
            comment: String::new(),
            ds: vec![None; slots],
            level: vec![String::new(); slots],
            cids: Vec::new(),
            charts: vec![ChartNotes::empty(ChartType::Dx); slots],
            basic_info: BasicInfo {
                title: "Song".to_string(),
                artist: String::new(),
                genre: String::new(),
                bpm: 0,
                release_date: release_date.to_string(),
                from: String::new(),
                is_new: false,
            },
        }
    }

    #[test]
    fn test_drop_undated() {
        let mut songs = vec![record("20200101", 4), record("", 4), record(" ", 4)];
        assert_eq!(drop_undated(&mut songs), 2);
        assert_eq!(songs.len(), 1);
    }

    #[test]
    fn test_assign_chart_ids() {
        let mut songs = vec![record("20200101", 4), record("20200101", 5), record("20200101", 1)];
        assign_chart_ids(&mut songs);
        assert_eq!(songs[0].cids, vec![1, 2, 3, 4]);
        assert_eq!(songs[1].cids, vec![5, 6, 7, 8, 9]);
        assert_eq!(songs[2].cids, vec![10]);
    }
}
