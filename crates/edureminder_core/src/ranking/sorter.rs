//! Reminder sorter.
//!
//! # Responsibility
//! - Order reminder collections by date, priority, status or category.
//! - Combine criteria lexicographically with first-difference-wins semantics.
//!
//! # Invariants
//! - Every function returns a new `Vec`; the input slice is never reordered.
//! - All sorts are stable: ties keep their input order.
//! - Reminders without a usable due date sort after dated ones in both
//!   directions.

use crate::model::reminder::{PriorityLevel, Reminder};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One key of a multi-criterion sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortCriterion {
    /// Nearest due date first, undated last.
    Date,
    /// Highest priority first, unknown last.
    Priority,
    /// Pending before completed.
    Status,
    /// Case- and accent-insensitive category name, absent as empty.
    Category,
}

impl SortCriterion {
    /// Parses a criterion key. Unknown keys return `None`.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "date" => Some(Self::Date),
            "priority" => Some(Self::Priority),
            "status" => Some(Self::Status),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Priority => "priority",
            Self::Status => "status",
            Self::Category => "category",
        }
    }

    fn compare(self, a: &Reminder, b: &Reminder) -> Ordering {
        match self {
            Self::Date => compare_due_dates(a.due_at(), b.due_at(), true),
            Self::Priority => compare_priorities(a, b),
            Self::Status => compare_status(a, b),
            Self::Category => compare_categories(a, b),
        }
    }
}

/// Parses criterion keys, silently skipping unknown ones.
pub fn parse_criteria<S: AsRef<str>>(keys: &[S]) -> Vec<SortCriterion> {
    keys.iter()
        .filter_map(|key| SortCriterion::parse(key.as_ref()))
        .collect()
}

/// Sorts by due date, ascending or descending; undated always last.
pub fn sort_by_date(reminders: &[Reminder], ascending: bool) -> Vec<Reminder> {
    let mut keyed = reminders
        .iter()
        .map(|reminder| (reminder.due_at(), reminder))
        .collect::<Vec<_>>();
    keyed.sort_by(|(a, _), (b, _)| compare_due_dates(*a, *b, ascending));
    keyed.into_iter().map(|(_, reminder)| reminder.clone()).collect()
}

/// Sorts by stored priority, highest first; missing priority last.
pub fn sort_by_priority(reminders: &[Reminder]) -> Vec<Reminder> {
    let mut sorted = reminders.to_vec();
    sorted.sort_by(compare_priorities);
    sorted
}

/// Multi-criterion sort. The first criterion that tells two reminders apart
/// decides their order; full ties keep input order.
pub fn sort_by(reminders: &[Reminder], criteria: &[SortCriterion]) -> Vec<Reminder> {
    let mut sorted = reminders.to_vec();
    sorted.sort_by(|a, b| compare_by_criteria(a, b, criteria));
    sorted
}

/// Multi-criterion sort from raw keys; unknown keys are ignored.
pub fn sort_by_keys<S: AsRef<str>>(reminders: &[Reminder], keys: &[S]) -> Vec<Reminder> {
    sort_by(reminders, &parse_criteria(keys))
}

/// Sorts with a caller-supplied comparator. Stable.
pub fn custom_sort<F>(reminders: &[Reminder], mut compare: F) -> Vec<Reminder>
where
    F: FnMut(&Reminder, &Reminder) -> Ordering,
{
    let mut sorted = reminders.to_vec();
    sorted.sort_by(|a, b| compare(a, b));
    sorted
}

pub(crate) fn compare_by_criteria(
    a: &Reminder,
    b: &Reminder,
    criteria: &[SortCriterion],
) -> Ordering {
    criteria
        .iter()
        .map(|criterion| criterion.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

pub(crate) fn compare_due_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    ascending: bool,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) if ascending => a.cmp(&b),
        (Some(a), Some(b)) => b.cmp(&a),
    }
}

fn priority_rank(priority: Option<PriorityLevel>) -> u8 {
    priority.map(PriorityLevel::score).unwrap_or(0)
}

pub(crate) fn compare_priorities(a: &Reminder, b: &Reminder) -> Ordering {
    priority_rank(b.priority).cmp(&priority_rank(a.priority))
}

fn compare_status(a: &Reminder, b: &Reminder) -> Ordering {
    a.completed.cmp(&b.completed)
}

/// `(folded, lowered)`: accents stripped first so `Álgebra` sorts with the
/// `a` names, then the lowercase text breaks ties.
fn category_sort_key(category: Option<&str>) -> (String, String) {
    let lowered = category.unwrap_or_default().to_lowercase();
    let folded = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>();
    (folded, lowered)
}

fn compare_categories(a: &Reminder, b: &Reminder) -> Ordering {
    category_sort_key(a.category.as_deref()).cmp(&category_sort_key(b.category.as_deref()))
}
