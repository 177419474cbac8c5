//! Reminder lifecycle transitions over caller-owned collections.
//!
//! # Responsibility
//! - Apply edit, completion toggle, delete and clear-completed to a reminder
//!   slice and hand back the resulting collection.
//!
//! # Invariants
//! - Inputs are never mutated; every call returns a fresh `Vec`.
//! - Transitions that target an id act on the first matching record only.
//! - `completed_at` is set exactly when `completed` flips to `true` and
//!   cleared when it flips back.

use crate::model::reminder::Reminder;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;

/// Field-wise patch for [`update_reminder`]. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

impl ReminderUpdate {
    fn apply_to(&self, reminder: &mut Reminder) {
        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(description) = &self.description {
            reminder.description = Some(description.clone());
        }
        if let Some(due_date) = &self.due_date {
            reminder.due_date = Some(due_date.clone());
        }
        if let Some(category) = &self.category {
            reminder.category = Some(category.clone());
        }
        if let Some(completed) = self.completed {
            reminder.completed = completed;
        }
    }
}

fn with_first_match(
    reminders: &[Reminder],
    id: &str,
    change: impl FnOnce(&mut Reminder),
) -> Option<Vec<Reminder>> {
    let index = reminders.iter().position(|reminder| reminder.id == id)?;
    let mut updated = reminders.to_vec();
    change(&mut updated[index]);
    Some(updated)
}

fn completion_stamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Shallow-merges `update` into the reminder with `id`.
///
/// Returns `None` when no reminder has that id.
pub fn update_reminder(
    reminders: &[Reminder],
    id: &str,
    update: &ReminderUpdate,
) -> Option<Vec<Reminder>> {
    let updated = with_first_match(reminders, id, |reminder| update.apply_to(reminder));
    debug!(
        "event=reminder_update module=lifecycle status={} id={}",
        if updated.is_some() { "ok" } else { "not_found" },
        id
    );
    updated
}

/// Marks the reminder done or reopens it, stamping `completed_at` on done.
///
/// Returns `None` when no reminder has that id.
pub fn set_completed(
    reminders: &[Reminder],
    id: &str,
    completed: bool,
    now: DateTime<Utc>,
) -> Option<Vec<Reminder>> {
    with_first_match(reminders, id, |reminder| {
        reminder.completed = completed;
        reminder.completed_at = completed.then(|| completion_stamp(now));
    })
}

/// Flips the completion state of the reminder with `id`.
pub fn toggle_complete(
    reminders: &[Reminder],
    id: &str,
    now: DateTime<Utc>,
) -> Option<Vec<Reminder>> {
    let completed = !reminders.iter().find(|reminder| reminder.id == id)?.completed;
    set_completed(reminders, id, completed, now)
}

/// Drops every reminder with `id`. Unknown ids leave the collection as is.
pub fn delete_reminder(reminders: &[Reminder], id: &str) -> Vec<Reminder> {
    reminders
        .iter()
        .filter(|reminder| reminder.id != id)
        .cloned()
        .collect()
}

/// Keeps only the reminders that are still pending.
pub fn clear_completed(reminders: &[Reminder]) -> Vec<Reminder> {
    let remaining: Vec<Reminder> = reminders
        .iter()
        .filter(|reminder| reminder.is_pending())
        .cloned()
        .collect();
    debug!(
        "event=clear_completed module=lifecycle status=ok removed={}",
        reminders.len() - remaining.len()
    );
    remaining
}

#[cfg(test)]
mod tests {
    use super::{toggle_complete, update_reminder, ReminderUpdate};
    use crate::model::reminder::Reminder;
    use chrono::{TimeZone, Utc};

    #[test]
    fn toggle_stamps_completion_time_in_millis() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let reminders = vec![Reminder::with_id("1", "Leer capítulo")];

        let done = toggle_complete(&reminders, "1", now).expect("known id");
        assert!(done[0].completed);
        assert_eq!(done[0].completed_at.as_deref(), Some("2025-06-01T12:00:00.000Z"));

        let reopened = toggle_complete(&done, "1", now).expect("known id");
        assert!(!reopened[0].completed);
        assert_eq!(reopened[0].completed_at, None);
    }

    #[test]
    fn update_touches_only_the_first_match() {
        let reminders = vec![
            Reminder::with_id("dup", "Primero"),
            Reminder::with_id("dup", "Segundo"),
        ];
        let update = ReminderUpdate {
            title: Some("Cambiado".to_string()),
            ..ReminderUpdate::default()
        };

        let updated = update_reminder(&reminders, "dup", &update).expect("known id");
        assert_eq!(updated[0].title, "Cambiado");
        assert_eq!(updated[1].title, "Segundo");
        assert_eq!(update_reminder(&reminders, "missing", &update), None);
    }
}
