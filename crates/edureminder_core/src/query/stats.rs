//! Dashboard counters.

use crate::model::reminder::Reminder;
use crate::schedule::urgency::{urgency_of, UrgencyLevel};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headline counts for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Pending reminders due within the urgent window (not overdue ones).
    pub urgent: usize,
}

impl ReminderStats {
    pub fn collect(reminders: &[Reminder], now: DateTime<Utc>) -> Self {
        let total = reminders.len();
        let completed = reminders.iter().filter(|r| r.completed).count();
        let urgent = reminders
            .iter()
            .filter(|r| r.is_pending() && urgency_of(r, now) == UrgencyLevel::Urgent)
            .count();
        Self {
            total,
            completed,
            pending: total - completed,
            urgent,
        }
    }
}
