//! Core domain logic for EduReminder.
//! This crate is the single source of truth for reminder ranking rules.

pub mod config;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod query;
pub mod ranking;
pub mod schedule;

pub use config::RuntimeConfig;
pub use exchange::{ExchangeError, ExchangeResult};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::catalog::{CategoryCatalogError, CategoryStats, CategoryUsage};
pub use model::category::{default_categories, Category, CategoryValidationError};
pub use model::lifecycle::{
    clear_completed, delete_reminder, set_completed, toggle_complete, update_reminder,
    ReminderUpdate,
};
pub use model::reminder::{PriorityLevel, Reminder, ReminderId, ReminderValidationError};
pub use query::filters::{upcoming, DateRangePreset, ReminderFilter};
pub use query::stats::ReminderStats;
pub use ranking::priority::{
    calculate_priority, calculate_priority_at, priority_score, priority_score_at,
    update_priorities, update_priorities_at,
};
pub use ranking::sorter::{
    custom_sort, sort_by, sort_by_date, sort_by_keys, sort_by_priority, SortCriterion,
};
pub use schedule::notify::{plan_notifications, NotificationKind, PlannedNotification};
pub use schedule::urgency::{group_by_day, urgency_of, DayBucket, DayGroup, UrgencyLevel};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
