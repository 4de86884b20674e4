/// Look up the value of a `key:value` tag in a flat tag list.
///
/// Only the first colon is structural; the value may itself contain
/// further colons. When the same key appears more than once, the first
/// occurrence in iteration order wins.
pub fn tag_value<'a>(tags: &'a [String], key: &str) -> Option<&'a str> {
    tags.iter().find_map(|tag| {
        let (k, v) = tag.split_once(':')?;
        (k == key).then_some(v)
    })
}

/// Split a pipe-joined multi-value field (e.g. `480p|720p|1080p`).
///
/// Empty segments are dropped.
pub fn split_multi(value: &str) -> Vec<&str> {
    value.split('|').filter(|s| !s.is_empty()).collect()
}

/// Bare tags (no colon anywhere) are genre labels.
pub fn genres(tags: &[String]) -> Vec<&str> {
    tags.iter()
        .filter(|tag| !tag.contains(':'))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tag_value_first_colon_only() {
        let t = tags(&["mal_id:52991", "schedule:5:20.30", "Action"]);
        assert_eq!(tag_value(&t, "mal_id"), Some("52991"));
        // Value keeps its own colon intact.
        assert_eq!(tag_value(&t, "schedule"), Some("5:20.30"));
        assert_eq!(tag_value(&t, "episode"), None);
    }

    #[test]
    fn test_tag_value_first_match_wins() {
        let t = tags(&["status:ongoing", "status:completed"]);
        assert_eq!(tag_value(&t, "status"), Some("ongoing"));
    }

    #[test]
    fn test_split_multi_roundtrip() {
        let t = tags(&["resolution:480p|720p|1080p"]);
        let value = tag_value(&t, "resolution").unwrap();
        assert_eq!(split_multi(value), vec!["480p", "720p", "1080p"]);
        // Joining back reproduces the tagged value.
        assert_eq!(split_multi(value).join("|"), value);
    }

    #[test]
    fn test_split_multi_drops_empty_segments() {
        assert_eq!(split_multi("720p||1080p|"), vec!["720p", "1080p"]);
    }

    #[test]
    fn test_genres_are_bare_tags() {
        let t = tags(&["Action", "mal_id:1", "Slice of Life"]);
        assert_eq!(genres(&t), vec!["Action", "Slice of Life"]);
    }
}
