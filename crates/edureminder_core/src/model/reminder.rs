//! Reminder domain model.
//!
//! # Responsibility
//! - Define the reminder record exchanged with storage, FFI and CLI callers.
//! - Define the priority level scale shared by ranking and sorting.
//! - Validate reminder drafts before they are handed to storage.
//!
//! # Invariants
//! - `id` is stable across updates and never reinterpreted by core.
//! - `priority`/`priority_score` are derived values; core never treats them
//!   as authoritative input except for ordering.
//! - Unknown JSON fields survive a decode/encode cycle through `extra`.
//! - Decoding is lenient: missing or oddly typed optional fields degrade to
//!   their empty value instead of failing the whole record.

use crate::config::{
    DESCRIPTION_MAX_CHARS, DUE_DATE_MAX_FUTURE_YEARS, DUE_DATE_MIN_FUTURE_MINUTES,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use crate::schedule::due_date::parse_optional_due_date;
use chrono::{DateTime, Duration, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static TITLE_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9]").expect("valid title regex"));

/// Opaque reminder identifier. Numeric ids from older exports are carried as
/// their decimal text.
pub type ReminderId = String;

/// Priority classification, ordered `Urgent > High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Urgent,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Fixed numeric encoding: `urgent=4, high=3, medium=2, low=1`.
    pub fn score(self) -> u8 {
        match self {
            Self::Urgent => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Maps a summed ranking score back onto the level scale.
    ///
    /// Thresholds: `>=4 urgent`, `>=3 high`, `>=2 medium`, otherwise `low`.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 4 => Self::Urgent,
            3 => Self::High,
            2 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Stable wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses an exact wire label. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "urgent" => Some(Self::Urgent),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Display for PriorityLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reminder record as stored by the host application.
///
/// `Default` is the record with every field absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: ReminderId,
    /// Display text; scanned for urgency/importance keywords.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub description: Option<String>,
    /// Raw due-date text. See [`Reminder::due_at`] for the parsed instant.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub due_date: Option<String>,
    /// Free-text category label.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub completed: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub created_at: Option<String>,
    /// Set when the reminder is marked done, cleared when reopened.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_text"
    )]
    pub completed_at: Option<String>,
    /// Derived by ranking. Unknown labels decode as `None`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_priority"
    )]
    pub priority: Option<PriorityLevel>,
    /// Derived by ranking.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_priority_score"
    )]
    pub priority_score: Option<u8>,
    /// Fields core does not interpret, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reminder {
    /// Creates a pending reminder with a generated id and creation timestamp.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Creates a pending reminder with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<ReminderId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            due_date: None,
            category: None,
            completed: false,
            created_at: Some(Utc::now().to_rfc3339()),
            completed_at: None,
            priority: None,
            priority_score: None,
            extra: Map::new(),
        }
    }

    pub fn due_on(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Parsed due instant; `None` when absent or unparseable.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        parse_optional_due_date(self.due_date.as_deref())
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Validates a reminder before it is created or edited.
    ///
    /// # Errors
    /// - Title blank, shorter than 3 or longer than 100 chars, or without any
    ///   ASCII letter/digit.
    /// - Description longer than 500 chars.
    /// - Due date absent, unparseable, less than a minute ahead of `now`, or
    ///   more than five years ahead.
    pub fn validate_draft(&self, now: DateTime<Utc>) -> Result<(), ReminderValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ReminderValidationError::TitleRequired);
        }
        let title_chars = title.chars().count();
        if title_chars < TITLE_MIN_CHARS {
            return Err(ReminderValidationError::TitleTooShort {
                min: TITLE_MIN_CHARS,
            });
        }
        if title_chars > TITLE_MAX_CHARS {
            return Err(ReminderValidationError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }
        if !TITLE_ALNUM_RE.is_match(title) {
            return Err(ReminderValidationError::TitleWithoutAlphanumeric);
        }

        if let Some(description) = self.description.as_deref() {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                return Err(ReminderValidationError::DescriptionTooLong {
                    max: DESCRIPTION_MAX_CHARS,
                });
            }
        }

        let raw_due = self
            .due_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ReminderValidationError::DueDateRequired)?;
        let due = parse_optional_due_date(Some(raw_due))
            .ok_or_else(|| ReminderValidationError::DueDateInvalid(raw_due.to_string()))?;
        if due < now + Duration::minutes(DUE_DATE_MIN_FUTURE_MINUTES) {
            return Err(ReminderValidationError::DueDateTooSoon);
        }
        let latest = now
            .checked_add_months(Months::new(12 * DUE_DATE_MAX_FUTURE_YEARS as u32))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if due > latest {
            return Err(ReminderValidationError::DueDateTooFar);
        }

        Ok(())
    }
}

/// Draft validation failures for reminder create/edit flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderValidationError {
    TitleRequired,
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    TitleWithoutAlphanumeric,
    DescriptionTooLong { max: usize },
    DueDateRequired,
    DueDateInvalid(String),
    DueDateTooSoon,
    DueDateTooFar,
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required and cannot be blank"),
            Self::TitleTooShort { min } => write!(f, "title must have at least {min} characters"),
            Self::TitleTooLong { max } => write!(f, "title cannot exceed {max} characters"),
            Self::TitleWithoutAlphanumeric => {
                write!(f, "title must contain at least one letter or digit")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "description cannot exceed {max} characters")
            }
            Self::DueDateRequired => write!(f, "due date is required"),
            Self::DueDateInvalid(raw) => write!(f, "due date is not a valid date: `{raw}`"),
            Self::DueDateTooSoon => write!(
                f,
                "due date must be at least {DUE_DATE_MIN_FUTURE_MINUTES} minute in the future"
            ),
            Self::DueDateTooFar => write!(
                f,
                "due date cannot be more than {DUE_DATE_MAX_FUTURE_YEARS} years in the future"
            ),
        }
    }
}

impl Error for ReminderValidationError {}

fn scalar_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<ReminderId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_text(Value::deserialize(deserializer)?))
}

// Truthiness follows what the host app stored: `1`, `"yes"` and `true` all
// mean completed; `0`, `""`, `null` mean pending.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Null => false,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<PriorityLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(PriorityLevel::parse))
}

fn deserialize_priority_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|score| u8::try_from(score).ok()))
}
