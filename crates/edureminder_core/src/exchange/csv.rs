//! CSV export for spreadsheet users.

use crate::exchange::ExchangeResult;
use crate::model::reminder::Reminder;
use chrono::{DateTime, Utc};
use log::info;
use std::path::{Path, PathBuf};

const CSV_HEADERS: [&str; 7] = [
    "ID",
    "Título",
    "Descripción",
    "Categoría",
    "Fecha",
    "Completado",
    "Fecha de creación",
];

/// Default download name, e.g. `edureminder-export-2026-01-31.csv`.
pub fn csv_file_name(now: DateTime<Utc>) -> String {
    format!("edureminder-export-{}.csv", now.format("%Y-%m-%d"))
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(reminder: &Reminder) -> String {
    [
        reminder.id.clone(),
        quoted(&reminder.title),
        quoted(reminder.description.as_deref().unwrap_or_default()),
        reminder.category.clone().unwrap_or_default(),
        reminder.due_date.clone().unwrap_or_default(),
        if reminder.completed { "Sí" } else { "No" }.to_string(),
        reminder.created_at.clone().unwrap_or_default(),
    ]
    .join(",")
}

/// Renders reminders as CSV. Title and description are always quoted;
/// rows are separated by `\n` with no trailing newline.
pub fn export_csv(reminders: &[Reminder]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(reminders.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes a CSV export into `dir` using [`csv_file_name`]. Returns the path.
pub fn write_csv(dir: &Path, reminders: &[Reminder], now: DateTime<Utc>) -> ExchangeResult<PathBuf> {
    let path = dir.join(csv_file_name(now));
    std::fs::write(&path, export_csv(reminders))?;
    info!(
        "event=csv_written module=exchange status=ok count={}",
        reminders.len()
    );
    Ok(path)
}
