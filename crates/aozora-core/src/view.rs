//! Per-view controller state.
//!
//! Each open view owns its own controller instance; there is no shared
//! module-level state.

use chrono::{Datelike, NaiveDate};

use aozora_api::traits::CatalogEntry;

use crate::schedule::{project_week, DaySchedule};

/// Loading lifecycle of a fetch-backed view.
///
/// `Error` is only left through `retry`, which re-enters `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
    Error(String),
}

/// Controller for a weekly schedule view.
///
/// Day selection and week paging never refetch; they re-project the
/// entries already loaded.
#[derive(Debug)]
pub struct ScheduleBoard {
    phase: LoadPhase,
    entries: Vec<CatalogEntry>,
    /// 1 = Monday .. 7 = Sunday.
    selected_day: u8,
    week_offset: i64,
}

impl ScheduleBoard {
    /// New board with today's weekday preselected, waiting for data.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            phase: LoadPhase::Loading,
            entries: Vec::new(),
            selected_day: today.weekday().num_days_from_monday() as u8 + 1,
            week_offset: 0,
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn selected_day(&self) -> u8 {
        self.selected_day
    }

    pub fn week_offset(&self) -> i64 {
        self.week_offset
    }

    /// Store the fetched entries and leave `Loading`.
    pub fn loaded(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
        self.phase = LoadPhase::Loaded;
    }

    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.phase = LoadPhase::Error(message.into());
    }

    /// Leave `Error` and re-enter `Loading`. Returns whether a refetch
    /// should be issued (false when not in `Error`).
    pub fn retry(&mut self) -> bool {
        if matches!(self.phase, LoadPhase::Error(_)) {
            self.phase = LoadPhase::Loading;
            true
        } else {
            false
        }
    }

    /// Select a day (1-7). Out-of-range values are ignored.
    pub fn select_day(&mut self, day: u8) {
        if (1..=7).contains(&day) {
            self.selected_day = day;
        }
    }

    pub fn set_week_offset(&mut self, offset: i64) {
        self.week_offset = offset;
    }

    /// Project the loaded entries over the selected week.
    pub fn week(&self, today: NaiveDate) -> [DaySchedule; 7] {
        project_week(&self.entries, today, self.week_offset)
    }

    /// The selected day's slice of the projected week.
    pub fn selected(&self, today: NaiveDate) -> DaySchedule {
        self.week(today)[usize::from(self.selected_day - 1)].clone()
    }
}
