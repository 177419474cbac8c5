//! JSON-value entry points that degrade instead of failing.
//!
//! # Responsibility
//! - Accept reminder collections of unknown shape (FFI payloads, imported
//!   files) and apply ranking without ever failing.
//! - Keep each operation's degraded result distinct: bulk priority update
//!   passes malformed input through, every sort returns an empty array.
//!
//! # Invariants
//! - A collection is malformed only when it is not an array. Array elements
//!   that are not objects read as records with every field absent.
//! - Sorts return the original element values reordered; no field of any
//!   element is rewritten.
//! - Priority update only inserts `priority` and `priorityScore` into shallow
//!   copies; every other key is kept verbatim. Non-object elements become
//!   objects holding just those two keys.

use crate::model::reminder::Reminder;
use crate::ranking::priority::calculate_priority_at;
use crate::ranking::sorter::{
    compare_by_criteria, compare_due_dates, compare_priorities, parse_criteria,
};
use chrono::{DateTime, Utc};
use log::warn;
use serde_json::Value;
use std::cmp::Ordering;

/// Decodes each element of a JSON array as a reminder, keeping the original
/// element alongside. `None` when the collection is not an array.
fn decode_collection(value: &Value) -> Option<Vec<(Reminder, &Value)>> {
    let items = value.as_array()?;
    Some(items.iter().map(|item| (decode_record(item), item)).collect())
}

fn decode_record(item: &Value) -> Reminder {
    if !item.is_object() {
        return Reminder::default();
    }
    serde_json::from_value(item.clone()).unwrap_or_default()
}

fn degraded_sort(operation: &str) -> Value {
    warn!(
        "event=malformed_collection module=ranking status=degraded operation={}",
        operation
    );
    Value::Array(Vec::new())
}

fn reorder(
    mut keyed: Vec<(Reminder, &Value)>,
    mut compare: impl FnMut(&Reminder, &Reminder) -> Ordering,
) -> Value {
    keyed.sort_by(|(a, _), (b, _)| compare(a, b));
    Value::Array(
        keyed
            .into_iter()
            .map(|(_, original)| original.clone())
            .collect(),
    )
}

/// Bulk priority update over a JSON collection.
///
/// Non-array input is returned unchanged.
pub fn update_priorities_value(value: Value, now: DateTime<Utc>) -> Value {
    let annotated = decode_collection(&value).map(|decoded| {
        decoded
            .into_iter()
            .map(|(reminder, original)| {
                let level = calculate_priority_at(&reminder, now);
                let mut fields = original.as_object().cloned().unwrap_or_default();
                fields.insert("priority".to_string(), Value::from(level.as_str()));
                fields.insert("priorityScore".to_string(), Value::from(level.score()));
                Value::Object(fields)
            })
            .collect::<Vec<_>>()
    });

    match annotated {
        Some(items) => Value::Array(items),
        None => {
            warn!("event=malformed_collection module=ranking status=passthrough operation=update_priorities");
            value
        }
    }
}

/// Date sort over a JSON collection; non-array input yields `[]`.
pub fn sort_by_date_value(value: &Value, ascending: bool) -> Value {
    match decode_collection(value) {
        Some(decoded) => {
            reorder(decoded, |a, b| compare_due_dates(a.due_at(), b.due_at(), ascending))
        }
        None => degraded_sort("sort_by_date"),
    }
}

/// Priority sort over a JSON collection; non-array input yields `[]`.
pub fn sort_by_priority_value(value: &Value) -> Value {
    match decode_collection(value) {
        Some(decoded) => reorder(decoded, compare_priorities),
        None => degraded_sort("sort_by_priority"),
    }
}

/// Multi-criterion sort over a JSON collection.
///
/// `criteria` must be an array; non-string entries and unknown keys are
/// ignored. Non-array reminders or criteria yield `[]`.
pub fn sort_by_value(value: &Value, criteria: &Value) -> Value {
    let Some(keys) = criteria.as_array() else {
        return degraded_sort("sort_by");
    };
    let keys = keys.iter().filter_map(Value::as_str).collect::<Vec<_>>();
    let parsed = parse_criteria(&keys);

    match decode_collection(value) {
        Some(decoded) => reorder(decoded, |a, b| compare_by_criteria(a, b, &parsed)),
        None => degraded_sort("sort_by"),
    }
}

/// Caller-ordered sort over a JSON collection.
///
/// A missing comparator or non-array collection yields `[]`.
pub fn custom_sort_value<F>(value: &Value, compare: Option<F>) -> Value
where
    F: FnMut(&Reminder, &Reminder) -> Ordering,
{
    let Some(compare) = compare else {
        return degraded_sort("custom_sort");
    };
    match decode_collection(value) {
        Some(decoded) => reorder(decoded, compare),
        None => degraded_sort("custom_sort"),
    }
}
