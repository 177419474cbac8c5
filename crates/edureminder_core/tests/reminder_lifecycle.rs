use chrono::{DateTime, TimeZone, Utc};
use edureminder_core::model::catalog::{
    add_category, by_usage, find_by_name, force_delete, rename_category, safe_delete,
    search_by_name, unused_categories, used_categories,
};
use edureminder_core::{
    clear_completed, default_categories, delete_reminder, set_completed, toggle_complete,
    update_reminder, Category, CategoryCatalogError, CategoryStats, CategoryUsage, Reminder,
    ReminderUpdate,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
}

fn ids(reminders: &[Reminder]) -> Vec<&str> {
    reminders.iter().map(|r| r.id.as_str()).collect()
}

fn names(categories: &[&Category]) -> Vec<String> {
    categories.iter().map(|c| c.name.clone()).collect()
}

fn reminders() -> Vec<Reminder> {
    let mut done = Reminder::with_id("2", "Entregar informe").in_category("Tarea");
    done.completed = true;
    done.completed_at = Some("2025-06-01T10:00:00.000Z".to_string());
    vec![
        Reminder::with_id("1", "Parcial de física").in_category("Examen"),
        done,
        Reminder::with_id("3", "Ensayo").in_category("Tarea"),
        Reminder::with_id("4", "Sin categoría"),
    ]
}

#[test]
fn update_merges_given_fields_and_keeps_the_rest() {
    let original = reminders();
    let update = ReminderUpdate {
        title: Some("Parcial final".to_string()),
        due_date: Some("2025-07-01".to_string()),
        ..ReminderUpdate::default()
    };

    let updated = update_reminder(&original, "1", &update).expect("known id");
    assert_eq!(updated[0].title, "Parcial final");
    assert_eq!(updated[0].due_date.as_deref(), Some("2025-07-01"));
    assert_eq!(updated[0].category.as_deref(), Some("Examen"));
    assert_eq!(updated[1..], original[1..]);
    assert_eq!(original[0].title, "Parcial de física");
}

#[test]
fn toggle_sets_and_clears_completion_time() {
    let now = fixed_now();
    let done = toggle_complete(&reminders(), "1", now).expect("known id");
    assert!(done[0].completed);
    assert_eq!(done[0].completed_at.as_deref(), Some("2025-06-02T09:00:00.000Z"));

    let reopened = toggle_complete(&done, "2", now).expect("known id");
    assert!(!reopened[1].completed);
    assert_eq!(reopened[1].completed_at, None);

    assert_eq!(toggle_complete(&reminders(), "missing", now), None);
}

#[test]
fn set_completed_is_idempotent_per_direction() {
    let now = fixed_now();
    let first = set_completed(&reminders(), "3", true, now).expect("known id");
    let again = set_completed(&first, "3", true, now).expect("known id");
    assert_eq!(first, again);
    assert!(again[2].completed);
}

#[test]
fn completion_time_survives_json_round_trip() {
    let done = toggle_complete(&reminders(), "1", fixed_now()).expect("known id");
    let text = serde_json::to_string(&done[0]).expect("encode");
    assert!(text.contains("\"completedAt\":\"2025-06-02T09:00:00.000Z\""));
    let decoded: Reminder = serde_json::from_str(&text).expect("decode");
    assert_eq!(decoded.completed_at, done[0].completed_at);
}

#[test]
fn delete_and_clear_completed_filter_the_collection() {
    let original = reminders();
    assert_eq!(ids(&delete_reminder(&original, "3")), ["1", "2", "4"]);
    assert_eq!(ids(&delete_reminder(&original, "missing")), ["1", "2", "3", "4"]);
    assert_eq!(ids(&clear_completed(&original)), ["1", "3", "4"]);
    assert!(clear_completed(&[]).is_empty());
}

#[test]
fn lookup_and_search_ignore_case() {
    let categories = default_categories();
    assert_eq!(
        find_by_name(&categories, "tArEa").map(|c| c.name.as_str()),
        Some("Tarea")
    );
    assert!(find_by_name(&categories, "").is_none());
    assert!(find_by_name(&categories, "Tare").is_none());

    assert_eq!(names(&search_by_name(&categories, "ión")), ["Presentación", "Reunión"]);
    assert_eq!(names(&search_by_name(&categories, " académicas")), ["Examen", "Reunión"]);
}

#[test]
fn used_and_unused_split_the_catalog() {
    let categories = default_categories();
    let reminders = reminders();
    assert_eq!(names(&used_categories(&categories, &reminders)), ["Examen", "Tarea"]);
    assert_eq!(
        names(&unused_categories(&categories, &reminders)),
        ["Presentación", "Reunión"]
    );
}

#[test]
fn add_rejects_duplicates_and_invalid_records() {
    let categories = default_categories();

    let added = add_category(&categories, Category::new("Laboratorio")).expect("new name");
    assert_eq!(added.len(), 5);
    assert_eq!(added[4].name, "Laboratorio");

    assert_eq!(
        add_category(&categories, Category::new("examen")),
        Err(CategoryCatalogError::DuplicateName("examen".to_string()))
    );
    assert!(matches!(
        add_category(&categories, Category::new("A")),
        Err(CategoryCatalogError::Invalid(_))
    ));
}

#[test]
fn rename_keeps_names_unique() {
    let categories = default_categories();
    let id = categories[1].id.clone();

    let renamed = rename_category(&categories, &id, "Deberes").expect("free name");
    assert_eq!(renamed[1].name, "Deberes");
    assert_eq!(renamed[1].id, id);

    assert!(rename_category(&categories, &id, "TAREA").is_ok());
    assert_eq!(
        rename_category(&categories, &id, "Reunión"),
        Err(CategoryCatalogError::DuplicateName("Reunión".to_string()))
    );
    assert_eq!(
        rename_category(&categories, "missing", "Otra"),
        Err(CategoryCatalogError::NotFound("missing".to_string()))
    );
}

#[test]
fn safe_delete_refuses_categories_in_use() {
    let categories = default_categories();
    let reminders = reminders();

    assert_eq!(
        safe_delete(&categories, &reminders, &categories[0].id),
        Err(CategoryCatalogError::InUse("Examen".to_string()))
    );
    let remaining = safe_delete(&categories, &reminders, &categories[3].id).expect("unused");
    assert_eq!(remaining.len(), 3);
    assert!(remaining.iter().all(|c| c.name != "Reunión"));
    assert!(matches!(
        safe_delete(&categories, &reminders, "missing"),
        Err(CategoryCatalogError::NotFound(_))
    ));
}

#[test]
fn force_delete_moves_reminders_to_replacement() {
    let categories = default_categories();
    let reminders = reminders();
    let tarea = categories[1].id.clone();

    let (remaining, moved) =
        force_delete(&categories, &reminders, &tarea, None).expect("known id");
    assert_eq!(remaining.len(), 3);
    assert_eq!(moved[1].category.as_deref(), Some("General"));
    assert_eq!(moved[2].category.as_deref(), Some("General"));
    assert_eq!(moved[0].category.as_deref(), Some("Examen"));
    assert_eq!(moved[3].category, None);

    let (_, moved) =
        force_delete(&categories, &reminders, &tarea, Some("Examen")).expect("known id");
    assert_eq!(moved[2].category.as_deref(), Some("Examen"));
}

#[test]
fn stats_report_usage_percentages() {
    let categories = default_categories();
    let stats = CategoryStats::collect(&categories, &reminders());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.used, 2);
    assert_eq!(stats.unused, 2);
    assert_eq!(
        stats.usage_by_category[..2],
        [
            CategoryUsage {
                name: "Examen".to_string(),
                count: 1,
                percentage: 25
            },
            CategoryUsage {
                name: "Tarea".to_string(),
                count: 2,
                percentage: 50
            },
        ]
    );

    let empty = CategoryStats::collect(&categories, &[]);
    assert!(empty.usage_by_category.iter().all(|u| u.percentage == 0));
    let json = serde_json::to_value(&empty).expect("encode");
    assert!(json.get("usageByCategory").is_some());
}

#[test]
fn by_usage_orders_by_reminder_count() {
    let categories = default_categories();
    let reminders = reminders();
    assert_eq!(
        names(&by_usage(&categories, &reminders, false)),
        ["Tarea", "Examen", "Presentación", "Reunión"]
    );
    assert_eq!(
        names(&by_usage(&categories, &reminders, true)),
        ["Presentación", "Reunión", "Examen", "Tarea"]
    );
}
