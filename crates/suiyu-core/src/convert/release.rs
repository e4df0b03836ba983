use crate::config::{parse_date, remap as remap_config};
use crate::music::{ChartType, UpstreamSong};

/// Which upstream date field holds a chart family's release date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDateRule {
    /// Japanese dataset: `date_added`, or `date_updated` for the deluxe chart
    /// of a song that also has a standard chart.
    Domestic,
    /// International dataset: `date_intl_added` / `date_intl_updated`, with the
    /// standard/deluxe roles swapped for entries added from late 2019 on.
    International,
}

impl ReleaseDateRule {
    /// The raw `YYYYMMDD` release date, empty when the entry has none.
    pub fn release_date(&self, song: &UpstreamSong, chart_type: ChartType) -> String {
        match self {
            Self::Domestic => domestic_date(song, chart_type),
            Self::International => international_date(song, chart_type),
        }
    }
}

fn domestic_date(song: &UpstreamSong, chart_type: ChartType) -> String {
    if song.has_sd_and_dx() && chart_type == ChartType::Dx {
        song.text_or_empty("date_updated")
    } else {
        song.text_or_empty("date_added")
    }
}

fn international_date(song: &UpstreamSong, chart_type: ChartType) -> String {
    let added = song.text_or_empty("date_intl_added");
    let updated = song.text_or_empty("date_intl_updated");

    if chart_type == ChartType::Utage {
        return if updated.is_empty() { added } else { updated };
    }
    if !song.has_sd_and_dx() {
        return added;
    }

    // Entries without a readable date count as early.
    let early = match (parse_date(&added), parse_date(remap_config::INTL_DATE_ROLE_SWAP)) {
        (Ok(added), Ok(swap)) => added < swap,
        _ => true,
    };
    let added_type = if early { ChartType::Sd } else { ChartType::Dx };

    if chart_type == added_type { added } else { updated }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_domestic_single_family_uses_added() {
        let song = UpstreamSong::from(json!({
            "dx_lev_bas": "5",
            "date_added": "20200101",
            "date_updated": "20210101",
        }));
        assert_eq!(
            ReleaseDateRule::Domestic.release_date(&song, ChartType::Dx),
            "20200101"
        );
    }

    #[test]
    fn test_domestic_dx_of_pair_uses_updated() {
        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "5",
            "date_added": "20150101",
            "date_updated": "20200101",
        }));
        assert_eq!(
            ReleaseDateRule::Domestic.release_date(&song, ChartType::Sd),
            "20150101"
        );
        assert_eq!(
            ReleaseDateRule::Domestic.release_date(&song, ChartType::Dx),
            "20200101"
        );
    }

    #[test]
    fn test_international_early_pair() {
        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "5",
            "date_intl_added": "20190101",
            "date_intl_updated": "20200101",
        }));
        let rule = ReleaseDateRule::International;
        assert_eq!(rule.release_date(&song, ChartType::Sd), "20190101");
        assert_eq!(rule.release_date(&song, ChartType::Dx), "20200101");
    }

    #[test]
    fn test_international_late_pair_swaps_roles() {
        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "5",
            "date_intl_added": "20191115",
            "date_intl_updated": "20230101",
        }));
        let rule = ReleaseDateRule::International;
        assert_eq!(rule.release_date(&song, ChartType::Dx), "20191115");
        assert_eq!(rule.release_date(&song, ChartType::Sd), "20230101");
    }

    #[test]
    fn test_international_utage_prefers_updated() {
        let song = UpstreamSong::from(json!({
            "lev_utage": "12?",
            "date_intl_added": "20220101",
            "date_intl_updated": "20230101",
        }));
        let rule = ReleaseDateRule::International;
        assert_eq!(rule.release_date(&song, ChartType::Utage), "20230101");

        let song = UpstreamSong::from(json!({
            "lev_utage": "12?",
            "date_intl_added": "20220101",
            "date_intl_updated": "",
        }));
        assert_eq!(rule.release_date(&song, ChartType::Utage), "20220101");
    }

    #[test]
    fn test_international_missing_dates_are_empty() {
        let song = UpstreamSong::from(json!({ "lev_bas": "3" }));
        assert_eq!(
            ReleaseDateRule::International.release_date(&song, ChartType::Sd),
            ""
        );
    }

    #[test]
    fn test_international_dashed_dates_swap_roles() {
        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "5",
            "date_intl_added": "2021-03-05",
            "date_intl_updated": "2023-01-01",
        }));
        let rule = ReleaseDateRule::International;
        assert_eq!(rule.release_date(&song, ChartType::Dx), "2021-03-05");
        assert_eq!(rule.release_date(&song, ChartType::Sd), "2023-01-01");

        let song = UpstreamSong::from(json!({
            "lev_bas": "3",
            "dx_lev_bas": "5",
            "date_intl_added": "2019-11-14",
            "date_intl_updated": "2023-01-01",
        }));
        assert_eq!(rule.release_date(&song, ChartType::Sd), "2019-11-14");
    }
}
