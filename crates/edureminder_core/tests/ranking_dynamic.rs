use chrono::{DateTime, TimeZone, Utc};
use edureminder_core::ranking::dynamic::{
    custom_sort_value, sort_by_date_value, sort_by_priority_value, sort_by_value,
    update_priorities_value,
};
use edureminder_core::Reminder;
use serde_json::{json, Value};
use std::cmp::Ordering;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn by_title(a: &Reminder, b: &Reminder) -> Ordering {
    a.title.cmp(&b.title)
}

#[test]
fn update_passes_non_arrays_through() {
    let now = fixed_now();
    assert_eq!(update_priorities_value(Value::Null, now), Value::Null);
    assert_eq!(update_priorities_value(json!("x"), now), json!("x"));
    assert_eq!(
        update_priorities_value(json!({"id": "1"}), now),
        json!({"id": "1"})
    );
}

#[test]
fn update_treats_non_object_elements_as_blank_records() {
    let input = json!([{"id": "1", "title": "ok"}, 42, "two"]);
    let output = update_priorities_value(input, fixed_now());
    assert_eq!(
        output,
        json!([
            {"id": "1", "title": "ok", "priority": "low", "priorityScore": 1},
            {"priority": "low", "priorityScore": 1},
            {"priority": "low", "priorityScore": 1}
        ])
    );
}

#[test]
fn update_inserts_priority_fields_and_keeps_the_rest() {
    let input = json!([
        {
            "id": 7,
            "title": "Tarea urgente de química",
            "dueDate": "2025-12-31",
            "category": "urgent",
            "color": "#f00",
            "priority": "low"
        }
    ]);

    let output = update_priorities_value(input, fixed_now());
    let record = &output[0];
    assert_eq!(record["id"], json!(7));
    assert_eq!(record["color"], "#f00");
    assert_eq!(record["priority"], "urgent");
    assert_eq!(record["priorityScore"], 4);
    assert_eq!(record["dueDate"], "2025-12-31");
}

#[test]
fn sorts_degrade_to_empty_array_for_non_arrays() {
    let empty = json!([]);
    for bad in [Value::Null, json!("x"), json!({"a": 1}), json!(3)] {
        assert_eq!(sort_by_date_value(&bad, true), empty, "{bad}");
        assert_eq!(sort_by_priority_value(&bad), empty, "{bad}");
        assert_eq!(sort_by_value(&bad, &json!(["date"])), empty, "{bad}");
        assert_eq!(custom_sort_value(&bad, Some(by_title)), empty, "{bad}");
    }
}

#[test]
fn non_object_elements_sort_last_and_are_kept() {
    let input = json!([
        "two",
        {"id": "1", "dueDate": "2025-03-01", "priority": "medium"},
        null,
        {"id": "2", "dueDate": "2025-02-01", "priority": "high"}
    ]);

    assert_eq!(
        sort_by_date_value(&input, true),
        json!([input[3], input[1], "two", null])
    );
    assert_eq!(
        sort_by_priority_value(&input),
        json!([input[3], input[1], "two", null])
    );
    assert_eq!(
        sort_by_value(&input, &json!(["date"])),
        json!([input[3], input[1], "two", null])
    );
    assert_eq!(
        custom_sort_value(&input, Some(by_title)),
        input
    );
}

#[test]
fn empty_collections_stay_empty() {
    assert_eq!(sort_by_value(&json!([]), &json!(["date"])), json!([]));
    assert_eq!(custom_sort_value(&json!([]), Some(by_title)), json!([]));
    assert_eq!(update_priorities_value(json!([]), fixed_now()), json!([]));
}

#[test]
fn non_array_criteria_or_missing_comparator_yield_empty() {
    let input = json!([{"id": "1", "title": "b"}, {"id": "2", "title": "a"}]);
    assert_eq!(sort_by_value(&input, &json!("date")), json!([]));
    assert_eq!(sort_by_value(&input, &Value::Null), json!([]));
    assert_eq!(
        custom_sort_value::<fn(&Reminder, &Reminder) -> Ordering>(&input, None),
        json!([])
    );
}

#[test]
fn sorts_return_original_elements_reordered() {
    let input = json!([
        {"id": 1, "title": "tarde", "dueDate": "2025-03-01", "extra": {"nested": true}},
        {"id": "2", "title": "pronto", "dueDate": "2025-01-01", "completed": 1},
        {"id": "3", "title": "sin fecha"}
    ]);

    let sorted = sort_by_date_value(&input, true);
    assert_eq!(sorted, json!([input[1], input[0], input[2]]));

    let descending = sort_by_date_value(&input, false);
    assert_eq!(descending, json!([input[0], input[1], input[2]]));
}

#[test]
fn multi_criteria_ignores_unknown_and_non_string_keys() {
    let input = json!([
        {"id": "a", "completed": true, "dueDate": "2025-01-01"},
        {"id": "b", "dueDate": "2025-02-01"},
        {"id": "c", "dueDate": "2025-01-15"}
    ]);

    let sorted = sort_by_value(&input, &json!([1, "colour", "status", null, "date"]));
    let ids = sorted
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, ["c", "b", "a"]);
}

#[test]
fn priority_sort_reads_stored_priority_labels() {
    let input = json!([
        {"id": "1", "priority": "low"},
        {"id": "2", "priority": "someday"},
        {"id": "3", "priority": "urgent"}
    ]);

    assert_eq!(
        sort_by_priority_value(&input),
        json!([input[2], input[0], input[1]])
    );
}

#[test]
fn custom_sort_orders_by_comparator() {
    let input = json!([{"id": "1", "title": "b"}, {"id": "2", "title": "a"}]);
    assert_eq!(
        custom_sort_value(&input, Some(by_title)),
        json!([input[1], input[0]])
    );
}
