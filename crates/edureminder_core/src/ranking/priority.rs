//! Priority calculator.
//!
//! # Responsibility
//! - Classify one reminder into a `PriorityLevel` from due-date proximity,
//!   category and title keywords.
//! - Annotate collections with derived `priority`/`priority_score` fields.
//!
//! # Invariants
//! - Inputs are never mutated; annotation returns shallow copies.
//! - Boosts are additive and never negative, so a reminder whose date alone
//!   is `urgent` always stays `urgent`.
//! - `priority_score` reports the table score of the final level, not the
//!   raw summed score (raw 5 or 6 still reports 4).

use crate::model::reminder::{PriorityLevel, Reminder};
use chrono::{DateTime, Utc};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

static CATEGORY_BOOSTS: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    HashMap::from([
        ("urgente", 2),
        ("examen", 1),
        ("fecha_limite", 2),
        ("importante", 1),
        ("trabajo", 0),
        ("estudios", 0),
        ("salud", 0),
        ("personal", 0),
        ("urgent", 2),
        ("exam", 1),
        ("deadline", 2),
        ("important", 1),
        ("work", 0),
        ("study", 0),
        ("health", 0),
    ])
});

const URGENT_KEYWORDS: &[&str] = &[
    "urgente",
    "crítico",
    "emergencia",
    "inmediato",
    "ahora",
    "ya",
    "urgent",
    "asap",
    "critical",
    "emergency",
];

const IMPORTANT_KEYWORDS: &[&str] = &[
    "importante",
    "prioridad",
    "crucial",
    "vital",
    "clave",
    "fundamental",
    "important",
    "priority",
    "crucial",
    "vital",
];

const URGENT_KEYWORD_BOOST: i32 = 2;
const IMPORTANT_KEYWORD_BOOST: i32 = 1;

/// Classifies a reminder against the system clock.
pub fn calculate_priority(reminder: &Reminder) -> PriorityLevel {
    calculate_priority_at(reminder, Utc::now())
}

/// Classifies a reminder against a caller-provided `now`.
pub fn calculate_priority_at(reminder: &Reminder, now: DateTime<Utc>) -> PriorityLevel {
    let base = date_based_priority(reminder, now);
    let score = i32::from(base.score())
        + category_boost(reminder.category.as_deref())
        + keyword_boost(&reminder.title);
    PriorityLevel::from_score(score)
}

/// Score of the final level for a reminder, against the system clock.
pub fn priority_score(reminder: &Reminder) -> u8 {
    priority_score_at(reminder, Utc::now())
}

/// Score of the final level for a reminder, against `now`.
pub fn priority_score_at(reminder: &Reminder, now: DateTime<Utc>) -> u8 {
    calculate_priority_at(reminder, now).score()
}

/// Returns annotated copies of `reminders` using the system clock.
pub fn update_priorities(reminders: &[Reminder]) -> Vec<Reminder> {
    update_priorities_at(reminders, Utc::now())
}

/// Returns annotated copies of `reminders`, evaluating every record
/// against the same `now`.
pub fn update_priorities_at(reminders: &[Reminder], now: DateTime<Utc>) -> Vec<Reminder> {
    let updated = reminders
        .iter()
        .map(|reminder| {
            let level = calculate_priority_at(reminder, now);
            let mut copy = reminder.clone();
            copy.priority = Some(level);
            copy.priority_score = Some(level.score());
            copy
        })
        .collect::<Vec<_>>();
    debug!(
        "event=priorities_updated module=ranking status=ok count={}",
        updated.len()
    );
    updated
}

/// Whole days until due, rounded up. `None` when there is no usable date.
pub fn days_until_due(reminder: &Reminder, now: DateTime<Utc>) -> Option<i64> {
    let due = reminder.due_at()?;
    let diff_ms = (due - now).num_milliseconds() as f64;
    Some((diff_ms / MILLIS_PER_DAY).ceil() as i64)
}

/// Base level from due-date proximity alone.
pub fn date_based_priority(reminder: &Reminder, now: DateTime<Utc>) -> PriorityLevel {
    match days_until_due(reminder, now) {
        None => PriorityLevel::Low,
        Some(days) if days <= 1 => PriorityLevel::Urgent,
        Some(days) if days <= 3 => PriorityLevel::High,
        Some(days) if days <= 7 => PriorityLevel::Medium,
        Some(_) => PriorityLevel::Low,
    }
}

/// Case-insensitive category boost; unknown or absent categories give 0.
pub fn category_boost(category: Option<&str>) -> i32 {
    category
        .filter(|value| !value.is_empty())
        .and_then(|value| CATEGORY_BOOSTS.get(value.to_lowercase().as_str()).copied())
        .unwrap_or(0)
}

/// Title keyword boost. The urgent tier wins outright; tiers never stack.
pub fn keyword_boost(title: &str) -> i32 {
    if title.is_empty() {
        return 0;
    }
    let lowered = title.to_lowercase();
    if URGENT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return URGENT_KEYWORD_BOOST;
    }
    if IMPORTANT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
    {
        return IMPORTANT_KEYWORD_BOOST;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::{category_boost, date_based_priority, days_until_due, keyword_boost};
    use crate::model::reminder::{PriorityLevel, Reminder};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn category_boost_is_case_insensitive_and_bilingual() {
        assert_eq!(category_boost(Some("URGENTE")), 2);
        assert_eq!(category_boost(Some("Deadline")), 2);
        assert_eq!(category_boost(Some("examen")), 1);
        assert_eq!(category_boost(Some("trabajo")), 0);
        assert_eq!(category_boost(Some("cocina")), 0);
        assert_eq!(category_boost(Some("")), 0);
        assert_eq!(category_boost(None), 0);
    }

    #[test]
    fn keyword_boost_prefers_urgent_tier() {
        assert_eq!(keyword_boost("Llamar AHORA al banco"), 2);
        assert_eq!(keyword_boost("Urgent and important"), 2);
        assert_eq!(keyword_boost("Tema CLAVE del parcial"), 1);
        assert_eq!(keyword_boost("Paseo por el parque"), 0);
        assert_eq!(keyword_boost(""), 0);
    }

    #[test]
    fn keyword_boost_matches_substrings() {
        // "ya" is an urgent keyword and matches inside longer words.
        assert_eq!(keyword_boost("Ir a la playa"), 2);
        assert_eq!(keyword_boost("Revisión CRÍTICO"), 2);
    }

    #[test]
    fn days_until_due_rounds_up() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        let reminder = Reminder::with_id("1", "x").due_on((now + Duration::hours(25)).to_rfc3339());
        assert_eq!(days_until_due(&reminder, now), Some(2));

        let past = Reminder::with_id("2", "x").due_on((now - Duration::hours(30)).to_rfc3339());
        assert_eq!(days_until_due(&past, now), Some(-1));

        let undated = Reminder::with_id("3", "x");
        assert_eq!(days_until_due(&undated, now), None);
    }

    #[test]
    fn date_based_priority_thresholds() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        let due_in = |days: i64| {
            Reminder::with_id("r", "plain").due_on((now + Duration::days(days)).to_rfc3339())
        };

        assert_eq!(date_based_priority(&due_in(-4), now), PriorityLevel::Urgent);
        assert_eq!(date_based_priority(&due_in(1), now), PriorityLevel::Urgent);
        assert_eq!(date_based_priority(&due_in(3), now), PriorityLevel::High);
        assert_eq!(date_based_priority(&due_in(7), now), PriorityLevel::Medium);
        assert_eq!(date_based_priority(&due_in(8), now), PriorityLevel::Low);
        assert_eq!(
            date_based_priority(&Reminder::with_id("u", "plain").due_on("nope"), now),
            PriorityLevel::Low
        );
    }
}
