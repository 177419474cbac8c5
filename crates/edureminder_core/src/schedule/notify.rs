//! Reminder notification planning.
//!
//! Core does not own timers. It tells the host which notifications to post
//! for a reminder and how long from `now` each one should fire; the host
//! schedules and posts them.

use crate::config::{NOTIFICATION_AUTO_CLOSE_SECONDS, NOTIFICATION_PREVIEW_MINUTES};
use crate::model::reminder::Reminder;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Which of the two reminder notifications this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// One hour before due.
    Preview,
    /// At due time.
    Due,
}

/// One notification the host should schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedNotification {
    pub kind: NotificationKind,
    /// Delay from `now`, in milliseconds.
    pub fire_in_ms: i64,
    pub title: String,
    pub body: String,
    /// Replaces any earlier notification with the same tag.
    pub tag: String,
    pub require_interaction: bool,
    pub auto_close_seconds: u64,
}

/// Plans the notifications for one reminder, earliest first.
///
/// Past or undated reminders get none; reminders due within the preview
/// lead time only get the due notification.
pub fn plan_notifications(reminder: &Reminder, now: DateTime<Utc>) -> Vec<PlannedNotification> {
    let Some(due) = reminder.due_at() else {
        return Vec::new();
    };
    let until_due = due - now;
    let until_preview = until_due - Duration::minutes(NOTIFICATION_PREVIEW_MINUTES);

    let mut planned = Vec::with_capacity(2);
    if until_preview > Duration::zero() {
        planned.push(PlannedNotification {
            kind: NotificationKind::Preview,
            fire_in_ms: until_preview.num_milliseconds(),
            title: "⏰ Recordatorio próximo".to_string(),
            body: format!("{} en 1 hora", reminder.title),
            tag: format!("reminder-preview-{}", reminder.id),
            require_interaction: false,
            auto_close_seconds: NOTIFICATION_AUTO_CLOSE_SECONDS,
        });
    }
    if until_due > Duration::zero() {
        planned.push(PlannedNotification {
            kind: NotificationKind::Due,
            fire_in_ms: until_due.num_milliseconds(),
            title: format!("📚 {}", reminder.title),
            body: "Tu recordatorio programado para ahora".to_string(),
            tag: format!("reminder-{}", reminder.id),
            require_interaction: true,
            auto_close_seconds: NOTIFICATION_AUTO_CLOSE_SECONDS,
        });
    }
    planned
}

/// Plans notifications for every pending reminder, ordered by fire time.
pub fn plan_all(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<PlannedNotification> {
    let mut planned = reminders
        .iter()
        .filter(|reminder| reminder.is_pending())
        .flat_map(|reminder| plan_notifications(reminder, now))
        .collect::<Vec<_>>();
    planned.sort_by_key(|notification| notification.fire_in_ms);
    planned
}
