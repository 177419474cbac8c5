//! Reminder list filtering.
//!
//! # Responsibility
//! - Apply the list-screen filters (text search, category, pending-only,
//!   date window preset) in one pass.
//! - Build the dashboard "upcoming" short list.
//!
//! # Invariants
//! - Filtered output is always agenda-ordered (pending first, nearest due).
//! - The upcoming list keeps input order and never exceeds `UPCOMING_LIMIT`.

use crate::config::{UPCOMING_LIMIT, UPCOMING_WINDOW_DAYS};
use crate::model::reminder::Reminder;
use crate::schedule::urgency::{filter_by_date_range, sort_for_agenda};
use chrono::{DateTime, Utc};

/// Date window presets offered by the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRangePreset {
    Today,
    Week,
    Month,
}

impl DateRangePreset {
    /// Window length in days.
    pub fn days(self) -> i64 {
        match self {
            Self::Today => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// Parses a preset key. `"all"` and unknown keys mean no window.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

/// Combined list filter. `Default` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderFilter {
    /// Case-insensitive substring matched against title or description.
    /// Matched as typed, surrounding whitespace included; empty means no filter.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    pub only_pending: bool,
    pub range: Option<DateRangePreset>,
}

impl ReminderFilter {
    /// Applies every configured filter and returns agenda-ordered copies.
    pub fn apply(&self, reminders: &[Reminder], now: DateTime<Utc>) -> Vec<Reminder> {
        let query = self
            .search
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        let mut filtered = reminders
            .iter()
            .filter(|reminder| match query.as_deref() {
                Some(query) => matches_text(reminder, query),
                None => true,
            })
            .filter(|reminder| match self.category.as_deref() {
                Some(category) => reminder.category.as_deref() == Some(category),
                None => true,
            })
            .filter(|reminder| !self.only_pending || reminder.is_pending())
            .cloned()
            .collect::<Vec<_>>();

        if let Some(range) = self.range {
            filtered = filter_by_date_range(&filtered, range.days(), now);
        }
        sort_for_agenda(&filtered)
    }
}

fn matches_text(reminder: &Reminder, lowered_query: &str) -> bool {
    reminder.title.to_lowercase().contains(lowered_query)
        || reminder
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(lowered_query))
}

/// Pending reminders due within the next week, capped, in input order.
pub fn upcoming(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<Reminder> {
    let pending = reminders
        .iter()
        .filter(|reminder| reminder.is_pending())
        .cloned()
        .collect::<Vec<_>>();
    let mut window = filter_by_date_range(&pending, UPCOMING_WINDOW_DAYS, now);
    window.truncate(UPCOMING_LIMIT);
    window
}
