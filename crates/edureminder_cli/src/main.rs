//! Command-line front end over a reminders backup file.
//!
//! # Responsibility
//! - Run the core ranking, agenda and export use cases against a JSON file.
//! - Keep output plain text (or JSON for notification plans) for scripting.
//!
//! # Invariants
//! - Only `add`, `complete`, `delete`, `clear-completed` and `rank --write`
//!   modify the data file.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use edureminder_core::config::DEFAULT_REMINDER_CATEGORY;
use edureminder_core::exchange::backup::{load_collection, save_collection};
use edureminder_core::exchange::csv::write_csv;
use edureminder_core::schedule::due_date::parse_due_date;
use edureminder_core::schedule::notify::plan_all;
use edureminder_core::{
    clear_completed, delete_reminder, group_by_day, init_logging_from_config, set_completed,
    sort_by_keys, update_priorities_at, upcoming, urgency_of, DateRangePreset, Reminder,
    ReminderFilter, ReminderStats, RuntimeConfig,
};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "edureminder",
    version,
    about = "Rank, review and export study reminders",
    after_help = "The data file is resolved from --file, then EDUREMINDER_DATA_PATH."
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Reminders file (backup envelope or bare array)"
    )]
    file: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "RFC3339",
        value_parser = parse_now_arg,
        help = "Evaluate against this instant instead of the system clock"
    )]
    now: Option<DateTime<Utc>>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recompute priorities and print reminders in ranked order.
    Rank {
        #[arg(
            long = "by",
            value_delimiter = ',',
            default_value = "priority,date",
            help = "Sort criteria: date, priority, status, category"
        )]
        criteria: Vec<String>,
        #[arg(long, help = "Save recomputed priorities back to the data file")]
        write: bool,
    },
    /// Print dashboard counters.
    Stats,
    /// Print pending reminders due within the next week.
    Upcoming,
    /// Print reminders grouped by day.
    Agenda(AgendaArgs),
    /// Validate and append a new reminder.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, value_name = "DATE", help = "Due date, e.g. 2026-03-01T09:00")]
        due: String,
        #[arg(long, default_value = DEFAULT_REMINDER_CATEGORY)]
        category: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a reminder done, or reopen it with --undo.
    Complete {
        id: String,
        #[arg(long, help = "Reopen instead of completing")]
        undo: bool,
    },
    /// Remove a reminder by id.
    Delete { id: String },
    /// Remove every completed reminder.
    ClearCompleted,
    /// Write a CSV export next to the data file or into --out-dir.
    ExportCsv {
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
    /// Print the notifications a host should schedule, as JSON.
    NotifyPlan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RangeArg {
    All,
    Today,
    Week,
    Month,
}

impl RangeArg {
    fn preset(self) -> Option<DateRangePreset> {
        match self {
            Self::All => None,
            Self::Today => Some(DateRangePreset::Today),
            Self::Week => Some(DateRangePreset::Week),
            Self::Month => Some(DateRangePreset::Month),
        }
    }
}

#[derive(Debug, Args)]
struct AgendaArgs {
    #[arg(long, value_enum, default_value = "all")]
    range: RangeArg,
    #[arg(long, help = "Case-insensitive text matched in title or description")]
    search: Option<String>,
    #[arg(long, help = "Exact category name")]
    category: Option<String>,
    #[arg(long, help = "Hide completed reminders")]
    pending: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("edureminder: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = RuntimeConfig::from_env();
    init_logging_from_config(&config)?;

    let now = cli.now.unwrap_or_else(Utc::now);
    let path = resolve_data_path(cli.file, &config)?;

    match cli.command {
        Command::Rank { criteria, write } => rank(&path, &criteria, write, now),
        Command::Stats => stats(&path, now),
        Command::Upcoming => print_upcoming(&path, now),
        Command::Agenda(args) => agenda(&path, &args, now),
        Command::Add {
            title,
            due,
            category,
            description,
        } => add(&path, title, due, category, description, now),
        Command::Complete { id, undo } => complete(&path, &id, !undo, now),
        Command::Delete { id } => delete(&path, &id, now),
        Command::ClearCompleted => clear(&path, now),
        Command::ExportCsv { out_dir } => export_csv(&path, out_dir, now),
        Command::NotifyPlan => notify_plan(&path, now),
    }
}

fn parse_now_arg(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_due_date(raw).ok_or_else(|| format!("invalid instant `{raw}`"))
}

fn resolve_data_path(file: Option<PathBuf>, config: &RuntimeConfig) -> CliResult<PathBuf> {
    file.or_else(|| config.data_path.clone())
        .ok_or_else(|| "no data file; pass --file or set EDUREMINDER_DATA_PATH".into())
}

fn rank(path: &Path, criteria: &[String], write: bool, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = update_priorities_at(&load_collection(path)?, now);
    if write {
        save_collection(path, &reminders, now)?;
    }
    for reminder in sort_by_keys(&reminders, criteria) {
        let priority = reminder.priority.map(|p| p.as_str()).unwrap_or("-");
        println!(
            "{:<7} {}  {}",
            priority,
            due_label(&reminder),
            summary_line(&reminder)
        );
    }
    Ok(())
}

fn stats(path: &Path, now: DateTime<Utc>) -> CliResult<()> {
    let stats = ReminderStats::collect(&load_collection(path)?, now);
    println!("total={}", stats.total);
    println!("completed={}", stats.completed);
    println!("pending={}", stats.pending);
    println!("urgent={}", stats.urgent);
    Ok(())
}

fn print_upcoming(path: &Path, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = load_collection(path)?;
    let selected = upcoming(&reminders, now);
    if selected.is_empty() {
        println!("No upcoming reminders.");
    }
    for reminder in &selected {
        println!(
            "{:<7} {}  {}",
            urgency_of(reminder, now).label(),
            due_label(reminder),
            summary_line(reminder)
        );
    }
    Ok(())
}

fn agenda(path: &Path, args: &AgendaArgs, now: DateTime<Utc>) -> CliResult<()> {
    let filter = ReminderFilter {
        search: args.search.clone(),
        category: args.category.clone(),
        only_pending: args.pending,
        range: args.range.preset(),
    };
    let filtered = filter.apply(&load_collection(path)?, now);
    for group in group_by_day(&filtered, now) {
        println!("{}", group.bucket.label());
        for reminder in &group.reminders {
            let mark = if reminder.completed { "x" } else { " " };
            println!("  [{mark}] {}", summary_line(reminder));
        }
    }
    Ok(())
}

fn add(
    path: &Path,
    title: String,
    due: String,
    category: String,
    description: Option<String>,
    now: DateTime<Utc>,
) -> CliResult<()> {
    let mut reminder = Reminder::new(title.trim()).due_on(due).in_category(category);
    reminder.description = description.filter(|text| !text.trim().is_empty());
    reminder.created_at = Some(now.to_rfc3339());
    reminder.validate_draft(now)?;

    let mut reminders = if path.exists() {
        load_collection(path)?
    } else {
        Vec::new()
    };
    let id = reminder.id.clone();
    reminders.push(reminder);
    save_collection(path, &update_priorities_at(&reminders, now), now)?;
    info!(
        "event=reminder_added module=cli status=ok total={}",
        reminders.len()
    );
    println!("{id}");
    Ok(())
}

fn complete(path: &Path, id: &str, done: bool, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = set_completed(&load_collection(path)?, id, done, now)
        .ok_or_else(|| format!("no reminder with id `{id}`"))?;
    save_collection(path, &reminders, now)?;
    info!(
        "event=reminder_completion module=cli status=ok completed={}",
        done
    );
    println!("{id}");
    Ok(())
}

fn delete(path: &Path, id: &str, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = load_collection(path)?;
    let remaining = delete_reminder(&reminders, id);
    if remaining.len() == reminders.len() {
        return Err(format!("no reminder with id `{id}`").into());
    }
    save_collection(path, &remaining, now)?;
    info!(
        "event=reminder_deleted module=cli status=ok total={}",
        remaining.len()
    );
    println!("{id}");
    Ok(())
}

fn clear(path: &Path, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = load_collection(path)?;
    let remaining = clear_completed(&reminders);
    save_collection(path, &remaining, now)?;
    println!("removed={}", reminders.len() - remaining.len());
    Ok(())
}

fn export_csv(path: &Path, out_dir: Option<PathBuf>, now: DateTime<Utc>) -> CliResult<()> {
    let reminders = load_collection(path)?;
    let dir = out_dir
        .or_else(|| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let written = write_csv(&dir, &reminders, now)?;
    println!("{}", written.display());
    Ok(())
}

fn notify_plan(path: &Path, now: DateTime<Utc>) -> CliResult<()> {
    let planned = plan_all(&load_collection(path)?, now);
    println!("{}", serde_json::to_string_pretty(&planned)?);
    Ok(())
}

fn due_label(reminder: &Reminder) -> String {
    reminder
        .due_at()
        .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "sin fecha       ".to_string())
}

fn summary_line(reminder: &Reminder) -> String {
    match reminder.category.as_deref() {
        Some(category) => format!("{} [{}] ({})", reminder.title, category, reminder.id),
        None => format!("{} ({})", reminder.title, reminder.id),
    }
}

#[cfg(test)]
mod tests {
    use super::{clear, complete, delete, parse_now_arg, resolve_data_path, Cli, Command};
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use edureminder_core::exchange::backup::{load_collection, save_collection};
    use edureminder_core::{Reminder, RuntimeConfig};
    use std::path::PathBuf;

    #[test]
    fn rank_criteria_split_on_commas() {
        let cli = Cli::try_parse_from(["edureminder", "rank", "--by", "status,date"])
            .expect("parse rank");
        match cli.command {
            Command::Rank { criteria, write } => {
                assert_eq!(criteria, ["status", "date"]);
                assert!(!write);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_file_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["edureminder", "stats", "--file", "/tmp/r.json"])
            .expect("parse stats");
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/r.json")));
    }

    #[test]
    fn data_path_falls_back_to_config() {
        let config = RuntimeConfig {
            data_path: Some(PathBuf::from("/data/reminders.json")),
            ..RuntimeConfig::default()
        };
        assert_eq!(
            resolve_data_path(None, &config).expect("fallback"),
            PathBuf::from("/data/reminders.json")
        );
        assert!(resolve_data_path(None, &RuntimeConfig::default()).is_err());
    }

    #[test]
    fn now_flag_accepts_dates_and_rejects_text() {
        assert!(parse_now_arg("2026-03-01T09:00:00Z").is_ok());
        assert!(parse_now_arg("2026-03-01").is_ok());
        assert!(parse_now_arg("soon").is_err());
    }

    #[test]
    fn lifecycle_subcommands_parse() {
        let cli = Cli::try_parse_from(["edureminder", "complete", "r-1", "--undo"])
            .expect("parse complete");
        match cli.command {
            Command::Complete { id, undo } => {
                assert_eq!(id, "r-1");
                assert!(undo);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["edureminder", "delete", "r-2"]).expect("parse delete");
        assert!(matches!(cli.command, Command::Delete { id } if id == "r-2"));

        let cli = Cli::try_parse_from(["edureminder", "clear-completed"]).expect("parse clear");
        assert!(matches!(cli.command, Command::ClearCompleted));
    }

    #[test]
    fn lifecycle_commands_rewrite_the_data_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("reminders.json");
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let seed = vec![
            Reminder::with_id("a", "Parcial"),
            Reminder::with_id("b", "Ensayo"),
            Reminder::with_id("c", "Lectura"),
        ];
        save_collection(&path, &seed, now).expect("seed file");

        complete(&path, "a", true, now).expect("complete a");
        complete(&path, "b", true, now).expect("complete b");
        complete(&path, "b", false, now).expect("reopen b");
        let stored = load_collection(&path).expect("reload");
        assert!(stored[0].completed);
        assert!(stored[0].completed_at.is_some());
        assert!(!stored[1].completed);
        assert_eq!(stored[1].completed_at, None);
        assert!(complete(&path, "missing", true, now).is_err());

        clear(&path, now).expect("clear completed");
        let ids: Vec<String> = load_collection(&path)
            .expect("reload")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["b", "c"]);

        delete(&path, "c", now).expect("delete c");
        assert!(delete(&path, "c", now).is_err());
        assert_eq!(load_collection(&path).expect("reload").len(), 1);
    }
}
