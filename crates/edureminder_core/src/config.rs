//! Fixed rule constants and environment-driven runtime configuration.
//!
//! # Responsibility
//! - Keep every threshold used by ranking, urgency and validation in one place.
//! - Resolve process-level settings (log level/dir, data file) from env vars.
//!
//! # Invariants
//! - Rule constants are compile-time values; nothing here is user-tunable at
//!   runtime except `RuntimeConfig`.
//! - `RuntimeConfig` resolution never panics; invalid values fall back to
//!   defaults.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Hours before due at which a reminder is classified `urgent`.
pub const URGENT_HOURS: i64 = 24;
/// Hours before due at which a reminder is classified `soon`.
pub const SOON_HOURS: i64 = 72;

/// Window used by the dashboard "upcoming" list.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;
/// Maximum items returned by the dashboard "upcoming" list.
pub const UPCOMING_LIMIT: usize = 5;

/// Lead time of the preview notification sent before a reminder is due.
pub const NOTIFICATION_PREVIEW_MINUTES: i64 = 60;
/// Auto-close delay for posted notifications.
pub const NOTIFICATION_AUTO_CLOSE_SECONDS: u64 = 5;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// New reminders must be due at least this far in the future.
pub const DUE_DATE_MIN_FUTURE_MINUTES: i64 = 1;
/// New reminders may not be due further out than this.
pub const DUE_DATE_MAX_FUTURE_YEARS: i32 = 5;

pub const CATEGORY_NAME_MIN_CHARS: usize = 2;
pub const CATEGORY_NAME_MAX_CHARS: usize = 50;
pub const CATEGORY_DESCRIPTION_MAX_CHARS: usize = 200;

/// Category assigned when a caller does not pick one.
pub const DEFAULT_REMINDER_CATEGORY: &str = "Tarea";

/// Category reminders move to when their category is force-deleted.
pub const FALLBACK_CATEGORY: &str = "General";

/// Version tag written into JSON backup envelopes.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

pub const ENV_LOG_LEVEL: &str = "EDUREMINDER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "EDUREMINDER_LOG_DIR";
pub const ENV_DATA_PATH: &str = "EDUREMINDER_DATA_PATH";

/// Process-level settings shared by the CLI and FFI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Log level string accepted by `init_logging`.
    pub log_level: String,
    /// Absolute log directory. File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    /// Default reminders backup file.
    pub data_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            data_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. A relative `EDUREMINDER_LOG_DIR` is
    /// ignored because the logger only accepts absolute directories.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .filter(|path| path.is_absolute());
        config.data_path = read(ENV_DATA_PATH).map(PathBuf::from);
        config
    }
}
