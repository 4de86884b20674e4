use serde::{Deserialize, Serialize};

/// Weekly airing slot: ISO day of week (Monday = 1) plus an `HH.MM`
/// time-of-day string, as carried by a `schedule:<day>:<HH.MM>` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// 1 = Monday .. 7 = Sunday.
    pub day: u8,
    /// Time of day in the catalog's `HH.MM` form.
    pub time: String,
}

impl ScheduleSlot {
    /// Parse a `schedule` tag value of the form `<day>:<HH.MM>`.
    ///
    /// The value itself contains a colon; the tag lookup already split
    /// on the first one, so this sees `3:20.30` whole. The day must be
    /// 1-7 and the time a valid 24-hour `HH.MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (day, time) = value.split_once(':')?;
        let day: u8 = day.trim().parse().ok()?;
        if !(1..=7).contains(&day) {
            return None;
        }
        let (h, m) = time.split_once('.')?;
        let hour: u8 = h.trim().parse().ok()?;
        let minute: u8 = m.trim().parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            day,
            time: time.trim().to_string(),
        })
    }
}
