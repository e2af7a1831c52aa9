use std::collections::BTreeMap;

use crate::model::ParsedShowName;

/// Group episodes by show, keyed by lowercased title.
///
/// Each group is ordered by season, then episode.
///
/// ```
/// use scenescape_parser::{group_episodes, parse_show_name};
///
/// let episodes = ["Show.S01E02.mkv", "show.S01E01.mkv", "Other.2x01.mkv"]
///     .into_iter()
///     .filter_map(parse_show_name);
/// let groups = group_episodes(episodes);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups["show"][0].episode, Some(1));
/// ```
pub fn group_episodes<I>(episodes: I) -> BTreeMap<String, Vec<ParsedShowName>>
where
    I: IntoIterator<Item = ParsedShowName>,
{
    let mut groups: BTreeMap<String, Vec<ParsedShowName>> = BTreeMap::new();
    for episode in episodes {
        groups
            .entry(episode.title.to_lowercase())
            .or_default()
            .push(episode);
    }

    for list in groups.values_mut() {
        list.sort_by_key(ParsedShowName::sort_key);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(title: &str, season: u32, episode: u32) -> ParsedShowName {
        ParsedShowName {
            title: title.into(),
            season: Some(season),
            episode: Some(episode),
        }
    }

    #[test]
    fn test_grouping_is_case_insensitive() {
        let groups = group_episodes(vec![ep("Show", 1, 1), ep("SHOW", 1, 2)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["show"].len(), 2);
    }

    #[test]
    fn test_groups_sorted_by_season_then_episode() {
        let groups = group_episodes(vec![
            ep("Show", 2, 1),
            ep("Show", 1, 10),
            ep("Show", 1, 2),
        ]);
        let order: Vec<_> = groups["show"].iter().map(ParsedShowName::sort_key).collect();
        assert_eq!(order, vec![(1, 2), (1, 10), (2, 1)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_episodes(Vec::new()).is_empty());
    }
}
