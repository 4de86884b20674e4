//! Weekly schedule projection.
//!
//! Maps the `schedule:<day>:<HH.MM>` airing slots carried by catalog
//! entries onto concrete calendar dates for an arbitrary week, and
//! groups entries by day. Pure date math; callers pass "today" in.

use chrono::{Datelike, Duration, NaiveDate};

use aozora_api::traits::CatalogEntry;
use aozora_parse::ScheduleSlot;

/// Concrete dates for Monday..Sunday of the week `week_offset` weeks
/// away from the week containing `today` (0 = current week, negative =
/// past, positive = future).
pub fn week_dates(today: NaiveDate, week_offset: i64) -> [NaiveDate; 7] {
    let back = today.weekday().num_days_from_monday() as i64;
    let monday = today - Duration::days(back) + Duration::days(7 * week_offset);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// One day of a projected week.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// 1 = Monday .. 7 = Sunday.
    pub day: u8,
    pub entries: Vec<ScheduledEntry>,
}

/// A catalog entry paired with its airing slot.
#[derive(Debug, Clone)]
pub struct ScheduledEntry {
    pub entry: CatalogEntry,
    pub slot: ScheduleSlot,
}

/// Group entries by airing day over the selected week.
///
/// The partition is stable: entries keep their fetched order within
/// each day. Entries without a valid slot tag are left out.
pub fn project_week(
    entries: &[CatalogEntry],
    today: NaiveDate,
    week_offset: i64,
) -> [DaySchedule; 7] {
    let dates = week_dates(today, week_offset);
    let mut days: [DaySchedule; 7] = std::array::from_fn(|i| DaySchedule {
        date: dates[i],
        day: i as u8 + 1,
        entries: Vec::new(),
    });
    for entry in entries {
        let Some(slot) = entry.meta().slot else {
            continue;
        };
        let idx = usize::from(slot.day - 1);
        days[idx].entries.push(ScheduledEntry {
            entry: entry.clone(),
            slot,
        });
    }
    days
}

/// Render an `HH.MM` slot time on a 12-hour clock.
///
/// Hour 0 and hour 12 both display as 12 ("00.30" is "12:30 AM").
/// Returns `None` for values that are not a valid 24-hour `HH.MM`.
pub fn format_slot_time(time: &str) -> Option<String> {
    let (h, m) = time.split_once('.')?;
    let hour: u32 = h.trim().parse().ok()?;
    let minute: u32 = m.trim().parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        other => other,
    };
    Some(format!("{display}:{minute:02} {meridiem}"))
}
