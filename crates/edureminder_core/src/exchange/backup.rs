//! JSON backup envelope.
//!
//! Wire shape:
//! ```json
//! { "exportDate": "2026-01-01T10:00:00+00:00", "reminders": [ ... ], "version": "1.0" }
//! ```

use crate::config::BACKUP_FORMAT_VERSION;
use crate::exchange::migrate::migrate_legacy_records;
use crate::exchange::{ExchangeError, ExchangeResult};
use crate::model::reminder::Reminder;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Backup file envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEnvelope {
    pub export_date: String,
    pub reminders: Vec<Reminder>,
    pub version: String,
}

impl BackupEnvelope {
    pub fn new(reminders: &[Reminder], now: DateTime<Utc>) -> Self {
        Self {
            export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            reminders: reminders.to_vec(),
            version: BACKUP_FORMAT_VERSION.to_string(),
        }
    }
}

/// Default download name, e.g. `edureminder-backup-2026-01-31.json`.
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("edureminder-backup-{}.json", now.format("%Y-%m-%d"))
}

/// Serializes reminders into a pretty-printed backup envelope.
pub fn export_json(reminders: &[Reminder], now: DateTime<Utc>) -> ExchangeResult<String> {
    let envelope = BackupEnvelope::new(reminders, now);
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parses a backup envelope and returns its reminders.
///
/// # Errors
/// - `Json` when the text is not JSON or a record cannot be decoded.
/// - `InvalidFormat` when there is no `reminders` array.
pub fn import_json(text: &str) -> ExchangeResult<Vec<Reminder>> {
    let mut root: Value = serde_json::from_str(text)?;
    let items = root
        .get_mut("reminders")
        .and_then(Value::as_array_mut)
        .ok_or(ExchangeError::InvalidFormat("missing `reminders` array"))?;
    decode_records(std::mem::take(items))
}

/// Parses either a backup envelope or a bare reminder array, which is the
/// shape the host app keeps in its own storage.
pub fn import_collection(text: &str) -> ExchangeResult<Vec<Reminder>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => decode_records(items),
        Value::Object(_) => import_json(text),
        _ => Err(ExchangeError::InvalidFormat(
            "expected a reminder array or backup object",
        )),
    }
}

fn decode_records(mut items: Vec<Value>) -> ExchangeResult<Vec<Reminder>> {
    let migrated = migrate_legacy_records(&mut items);
    if migrated > 0 {
        info!(
            "event=legacy_migration module=exchange status=ok migrated={} total={}",
            migrated,
            items.len()
        );
    }
    items
        .into_iter()
        .map(|item| serde_json::from_value::<Reminder>(item).map_err(ExchangeError::from))
        .collect()
}

/// Writes a backup into `dir` using [`backup_file_name`]. Returns the path.
pub fn write_backup(
    dir: &Path,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> ExchangeResult<PathBuf> {
    let path = dir.join(backup_file_name(now));
    save_collection(&path, reminders, now)?;
    Ok(path)
}

/// Writes reminders to `path` as a backup envelope, replacing the file.
pub fn save_collection(
    path: &Path,
    reminders: &[Reminder],
    now: DateTime<Utc>,
) -> ExchangeResult<()> {
    let text = export_json(reminders, now)?;
    std::fs::write(path, text)?;
    info!(
        "event=backup_written module=exchange status=ok count={}",
        reminders.len()
    );
    Ok(())
}

/// Reads reminders from a backup envelope or bare array file.
pub fn load_collection(path: &Path) -> ExchangeResult<Vec<Reminder>> {
    let text = std::fs::read_to_string(path)?;
    let reminders = import_collection(&text)?;
    info!(
        "event=backup_loaded module=exchange status=ok count={}",
        reminders.len()
    );
    Ok(reminders)
}

#[cfg(test)]
mod tests {
    use super::{backup_file_name, export_json, import_json};
    use crate::exchange::ExchangeError;
    use crate::model::reminder::Reminder;
    use chrono::{TimeZone, Utc};

    #[test]
    fn file_name_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 0).unwrap();
        assert_eq!(backup_file_name(now), "edureminder-backup-2026-01-31.json");
    }

    #[test]
    fn export_writes_envelope_fields() {
        let now = Utc.with_ymd_and_hms(2026, 1, 31, 10, 0, 0).unwrap();
        let text = export_json(&[Reminder::with_id("1", "Estudiar")], now).expect("export");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["exportDate"], "2026-01-31T10:00:00.000Z");
        assert_eq!(value["reminders"][0]["title"], "Estudiar");
        assert!(text.contains("\n  \"exportDate\""));
    }

    #[test]
    fn import_rejects_missing_reminders() {
        let err = import_json(r#"{"exportDate": "x", "version": "1.0"}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidFormat(_)));

        let err = import_json(r#"{"reminders": {"id": 1}}"#).unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidFormat(_)));

        let err = import_json("not json").unwrap_err();
        assert!(matches!(err, ExchangeError::Json(_)));
    }
}
