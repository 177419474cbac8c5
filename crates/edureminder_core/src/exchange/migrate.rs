//! One-time upgrade of records written by older app versions.
//!
//! Older records stored the category as a fixed `type` key and the due date
//! as `date`. Both are copied into the current fields when the current field
//! is empty; the legacy keys themselves are left in place.

use serde_json::{Map, Value};

/// Maps a legacy `type` key to its category name. Unknown keys pass through.
pub fn legacy_type_to_category(kind: &str) -> String {
    match kind {
        "exam" => "Exámenes",
        "task" => "Tareas",
        "presentation" => "Presentaciones",
        "meeting" => "Reuniones",
        other => other,
    }
    .to_string()
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Upgrades one record in place. Returns whether anything changed.
pub fn migrate_legacy_record(record: &mut Map<String, Value>) -> bool {
    let mut changed = false;

    if is_blank(record.get("category")) {
        let category = record
            .get("type")
            .and_then(Value::as_str)
            .filter(|kind| !kind.is_empty())
            .map(legacy_type_to_category);
        if let Some(category) = category {
            record.insert("category".to_string(), Value::String(category));
            changed = true;
        }
    }

    if is_blank(record.get("dueDate")) && !is_blank(record.get("date")) {
        if let Some(date) = record.get("date").cloned() {
            record.insert("dueDate".to_string(), date);
            changed = true;
        }
    }

    changed
}

/// Upgrades every object in a collection. Returns the number of records
/// changed; non-object entries are left alone.
pub fn migrate_legacy_records(items: &mut [Value]) -> usize {
    items
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .map(migrate_legacy_record)
        .filter(|changed| *changed)
        .count()
}
