//! Date-based urgency and day bucketing.
//!
//! # Responsibility
//! - Classify how close a due date is to `now`, independent of priority.
//! - Group reminders into relative-day buckets for agenda views.
//! - Provide the agenda ordering and date-window filter used by queries.
//!
//! # Invariants
//! - Calendar days are UTC days; core has no local timezone.
//! - Reminders without a usable due date are `normal` and land in the
//!   `Undated` bucket.

use crate::config::{SOON_HOURS, URGENT_HOURS};
use crate::model::reminder::Reminder;
use crate::ranking::sorter::compare_due_dates;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

const WEEKDAYS_ES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];
const MONTHS_SHORT_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Urgency of a due date relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Overdue,
    Urgent,
    Soon,
    Normal,
}

impl UrgencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::Soon => "soon",
            Self::Normal => "normal",
        }
    }

    /// UI color token.
    pub fn color(self) -> &'static str {
        match self {
            Self::Overdue | Self::Urgent => "danger",
            Self::Soon => "warning",
            Self::Normal => "info",
        }
    }

    /// User-facing badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Vencido",
            Self::Urgent => "Urgente",
            Self::Soon => "Próximo",
            Self::Normal => "Pendiente",
        }
    }

    /// Hint shown while editing a reminder. Overdue has none.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            Self::Overdue => None,
            Self::Urgent => Some("Este recordatorio es urgente (menos de 24 horas)"),
            Self::Soon => Some("Este recordatorio es próximo (menos de 3 días)"),
            Self::Normal => Some("Tienes tiempo suficiente para prepararte"),
        }
    }
}

/// Classifies `due` against `now` by hours remaining.
pub fn urgency_level(due: DateTime<Utc>, now: DateTime<Utc>) -> UrgencyLevel {
    let hours = (due - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;
    if hours < 0.0 {
        UrgencyLevel::Overdue
    } else if hours <= URGENT_HOURS as f64 {
        UrgencyLevel::Urgent
    } else if hours <= SOON_HOURS as f64 {
        UrgencyLevel::Soon
    } else {
        UrgencyLevel::Normal
    }
}

/// Urgency of a reminder; `Normal` when it has no usable due date.
pub fn urgency_of(reminder: &Reminder, now: DateTime<Utc>) -> UrgencyLevel {
    reminder
        .due_at()
        .map(|due| urgency_level(due, now))
        .unwrap_or(UrgencyLevel::Normal)
}

/// Relative-day bucket for agenda grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayBucket {
    Today,
    Tomorrow,
    /// Before now and not today.
    Overdue,
    /// Any later calendar day.
    Day(NaiveDate),
    Undated,
}

impl DayBucket {
    /// Group heading.
    pub fn label(self) -> String {
        match self {
            Self::Today => "Hoy".to_string(),
            Self::Tomorrow => "Mañana".to_string(),
            Self::Overdue => "Vencidos".to_string(),
            Self::Undated => "Sin fecha".to_string(),
            Self::Day(date) => format!(
                "{}, {} {}",
                WEEKDAYS_ES[date.weekday().num_days_from_monday() as usize],
                date.day(),
                MONTHS_SHORT_ES[date.month0() as usize]
            ),
        }
    }

    fn classify(due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(due) = due else {
            return Self::Undated;
        };
        let today = now.date_naive();
        let day = due.date_naive();
        if day == today {
            Self::Today
        } else if Some(day) == today.succ_opt() {
            Self::Tomorrow
        } else if due < now {
            Self::Overdue
        } else {
            Self::Day(day)
        }
    }
}

/// One agenda group.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub bucket: DayBucket,
    pub reminders: Vec<Reminder>,
}

/// Groups reminders by relative day.
///
/// Groups appear in the order their first member appears in the input, and
/// members keep input order.
pub fn group_by_day(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for reminder in reminders {
        let bucket = DayBucket::classify(reminder.due_at(), now);
        match groups.iter_mut().find(|group| group.bucket == bucket) {
            Some(group) => group.reminders.push(reminder.clone()),
            None => groups.push(DayGroup {
                bucket,
                reminders: vec![reminder.clone()],
            }),
        }
    }
    groups
}

/// Keeps reminders due within `[now, now + days]`. Undated are dropped.
///
/// A window that overflows the representable time range selects nothing.
pub fn filter_by_date_range(
    reminders: &[Reminder],
    days: i64,
    now: DateTime<Utc>,
) -> Vec<Reminder> {
    let Some(until) = TimeDelta::try_days(days).and_then(|span| now.checked_add_signed(span))
    else {
        return Vec::new();
    };
    reminders
        .iter()
        .filter(|reminder| {
            reminder
                .due_at()
                .is_some_and(|due| due >= now && due <= until)
        })
        .cloned()
        .collect()
}

/// Agenda ordering: pending first, then nearest due date, undated last.
pub fn sort_for_agenda(reminders: &[Reminder]) -> Vec<Reminder> {
    let mut keyed = reminders
        .iter()
        .map(|reminder| (reminder.completed, reminder.due_at(), reminder))
        .collect::<Vec<_>>();
    keyed.sort_by(|(done_a, due_a, _), (done_b, due_b, _)| {
        done_a
            .cmp(done_b)
            .then_with(|| compare_due_dates(*due_a, *due_b, true))
    });
    keyed
        .into_iter()
        .map(|(_, _, reminder)| reminder.clone())
        .collect()
}
