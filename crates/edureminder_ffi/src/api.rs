//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reminder ranking, stats and backup use cases to Dart via FRB.
//! - Move collections across the boundary as JSON text so the host keeps
//!   its own record shape.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ranking calls never fail: unparseable or non-array text is a malformed
//!   collection (priority update echoes the input, sorts return `[]`).
//! - Every other call reports failure through its response envelope.

use chrono::Utc;
use edureminder_core::exchange::backup::{export_json, import_collection, import_json};
use edureminder_core::ranking::dynamic::{
    sort_by_date_value, sort_by_priority_value, sort_by_value, update_priorities_value,
};
use edureminder_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    upcoming, ExchangeError, Reminder, ReminderStats,
};
use log::warn;
use serde_json::Value;

const EMPTY_ARRAY: &str = "[]";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Dashboard counters envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResponse {
    pub ok: bool,
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    /// Pending reminders due within the next 24 hours.
    pub urgent: u32,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl StatsResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            total: 0,
            completed: 0,
            pending: 0,
            urgent: 0,
            message: message.into(),
        }
    }
}

/// Generic JSON payload envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub ok: bool,
    /// JSON text; `[]` on failure for array-shaped calls, empty otherwise.
    pub payload: String,
    pub message: String,
}

impl JsonResponse {
    fn success(payload: String, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            payload,
            message: message.into(),
        }
    }

    fn failure(payload: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            payload: payload.to_string(),
            message: message.into(),
        }
    }
}

/// Recomputes `priority` and `priorityScore` for every reminder.
///
/// # FFI contract
/// - Returns the input text unchanged when it is not a reminder array.
#[flutter_rust_bridge::frb(sync)]
pub fn rank_update_priorities(reminders_json: String) -> String {
    match parse_collection(&reminders_json, "rank_update_priorities") {
        Some(value) => update_priorities_value(value, Utc::now()).to_string(),
        None => reminders_json,
    }
}

/// Sorts reminders by due date; undated last in both directions.
///
/// # FFI contract
/// - Returns `[]` when the input is not a reminder array.
#[flutter_rust_bridge::frb(sync)]
pub fn rank_sort_by_date(reminders_json: String, ascending: bool) -> String {
    match parse_collection(&reminders_json, "rank_sort_by_date") {
        Some(value) => sort_by_date_value(&value, ascending).to_string(),
        None => EMPTY_ARRAY.to_string(),
    }
}

/// Sorts reminders by stored priority, highest first.
///
/// # FFI contract
/// - Returns `[]` when the input is not a reminder array.
#[flutter_rust_bridge::frb(sync)]
pub fn rank_sort_by_priority(reminders_json: String) -> String {
    match parse_collection(&reminders_json, "rank_sort_by_priority") {
        Some(value) => sort_by_priority_value(&value).to_string(),
        None => EMPTY_ARRAY.to_string(),
    }
}

/// Sorts reminders by several criteria (`date|priority|status|category`).
///
/// # FFI contract
/// - Unknown criteria are ignored.
/// - Returns `[]` when the input is not a reminder array.
#[flutter_rust_bridge::frb(sync)]
pub fn rank_sort_by(reminders_json: String, criteria: Vec<String>) -> String {
    let criteria = Value::Array(criteria.into_iter().map(Value::String).collect());
    match parse_collection(&reminders_json, "rank_sort_by") {
        Some(value) => sort_by_value(&value, &criteria).to_string(),
        None => EMPTY_ARRAY.to_string(),
    }
}

/// Computes dashboard counters.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_stats(reminders_json: String) -> StatsResponse {
    let reminders = match decode_reminders(&reminders_json) {
        Ok(reminders) => reminders,
        Err(err) => return StatsResponse::failure(format!("reminder_stats failed: {err}")),
    };
    let stats = ReminderStats::collect(&reminders, Utc::now());
    StatsResponse {
        ok: true,
        total: to_u32(stats.total),
        completed: to_u32(stats.completed),
        pending: to_u32(stats.pending),
        urgent: to_u32(stats.urgent),
        message: format!("Counted {} reminder(s).", stats.total),
    }
}

/// Pending reminders due within the next week, at most five, as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_upcoming(reminders_json: String) -> JsonResponse {
    let reminders = match decode_reminders(&reminders_json) {
        Ok(reminders) => reminders,
        Err(err) => {
            return JsonResponse::failure(EMPTY_ARRAY, format!("reminder_upcoming failed: {err}"))
        }
    };
    let selected = upcoming(&reminders, Utc::now());
    match serde_json::to_string(&selected) {
        Ok(payload) => JsonResponse::success(
            payload,
            format!("Found {} upcoming reminder(s).", selected.len()),
        ),
        Err(err) => JsonResponse::failure(EMPTY_ARRAY, format!("reminder_upcoming failed: {err}")),
    }
}

/// Wraps a reminder array into a backup envelope.
///
/// # FFI contract
/// - `payload` is the pretty-printed backup text on success.
#[flutter_rust_bridge::frb(sync)]
pub fn export_backup(reminders_json: String) -> JsonResponse {
    let exported = decode_reminders(&reminders_json).and_then(|reminders| {
        export_json(&reminders, Utc::now()).map(|text| (reminders.len(), text))
    });
    match exported {
        Ok((count, text)) => JsonResponse::success(text, format!("Exported {count} reminder(s).")),
        Err(err) => JsonResponse::failure("", format!("export_backup failed: {err}")),
    }
}

/// Reads a backup envelope and returns its reminders as a JSON array.
///
/// # FFI contract
/// - Legacy records are upgraded on the way in.
/// - Envelopes without a `reminders` array are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn import_backup(backup_json: String) -> JsonResponse {
    let imported = import_json(&backup_json).and_then(|reminders| {
        serde_json::to_string(&reminders)
            .map(|payload| (reminders.len(), payload))
            .map_err(ExchangeError::from)
    });
    match imported {
        Ok((count, payload)) => {
            JsonResponse::success(payload, format!("Imported {count} reminder(s)."))
        }
        Err(err) => JsonResponse::failure(EMPTY_ARRAY, format!("import_backup failed: {err}")),
    }
}

fn parse_collection(text: &str, operation: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                "event=unparseable_payload module=ffi status=degraded operation={}",
                operation
            );
            None
        }
    }
}

fn decode_reminders(text: &str) -> Result<Vec<Reminder>, ExchangeError> {
    import_collection(text)
}

fn to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
