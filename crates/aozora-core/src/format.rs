//! Display formatting helpers for catalog metadata values.

/// Airing-status tag in display form.
pub fn airing_status(s: &str) -> String {
    match s {
        "ongoing" => "Ongoing".into(),
        "completed" => "Completed".into(),
        "upcoming" => "Upcoming".into(),
        "hiatus" => "On Hiatus".into(),
        other => other.to_string(),
    }
}

/// Format a UTC timestamp as a human-readable relative time string.
pub fn relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let secs = (now - *dt).num_seconds().max(0);

    if secs < 60 {
        "just now".into()
    } else if secs < 3600 {
        let m = secs / 60;
        format!("{m}m ago")
    } else if secs < 86400 {
        let h = secs / 3600;
        format!("{h}h ago")
    } else {
        let d = secs / 86400;
        format!("{d}d ago")
    }
}

/// Short weekday label for a 1-based Monday index.
pub fn day_label(day: u8) -> &'static str {
    match day {
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        7 => "Sun",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn test_airing_status() {
        assert_eq!(airing_status("ongoing"), "Ongoing");
        assert_eq!(airing_status("weird"), "weird");
    }

    #[test]
    fn test_relative_time_buckets() {
        assert_eq!(relative_time(&Utc::now()), "just now");
        assert_eq!(relative_time(&(Utc::now() - Duration::minutes(5))), "5m ago");
        assert_eq!(relative_time(&(Utc::now() - Duration::hours(3))), "3h ago");
        assert_eq!(relative_time(&(Utc::now() - Duration::days(2))), "2d ago");
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(day_label(1), "Mon");
        assert_eq!(day_label(7), "Sun");
        assert_eq!(day_label(9), "?");
    }
}
