//! Reminder category model.
//!
//! # Responsibility
//! - Define the user-managed category record and its validation rules.
//! - Provide the seed set used when a profile has no categories yet.
//!
//! # Invariants
//! - `name` is the join key reminders use in their `category` field.
//! - `color` is a `#RGB` or `#RRGGBB` hex string.

use crate::config::{
    CATEGORY_DESCRIPTION_MAX_CHARS, CATEGORY_NAME_MAX_CHARS, CATEGORY_NAME_MIN_CHARS,
};
use crate::model::reminder::Reminder;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid hex color regex")
});

pub const DEFAULT_CATEGORY_ICON: &str = "📁";
pub const DEFAULT_CATEGORY_COLOR: &str = "#95a5a6";

/// User-defined reminder category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    /// Creates a category with default icon/color and a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            icon: DEFAULT_CATEGORY_ICON.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            description: String::new(),
        }
    }

    /// Validates name, color and description limits.
    ///
    /// # Errors
    /// Returns the first rule violated, checked in name, color, description
    /// order.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::NameRequired);
        }
        if name.chars().count() < CATEGORY_NAME_MIN_CHARS {
            return Err(CategoryValidationError::NameTooShort);
        }
        if self.name.chars().count() > CATEGORY_NAME_MAX_CHARS {
            return Err(CategoryValidationError::NameTooLong);
        }
        if !self.color.is_empty() && !HEX_COLOR_RE.is_match(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }
        if self.description.chars().count() > CATEGORY_DESCRIPTION_MAX_CHARS {
            return Err(CategoryValidationError::DescriptionTooLong);
        }
        Ok(())
    }

    /// Number of reminders whose `category` equals this category name.
    pub fn reminder_count(&self, reminders: &[Reminder]) -> usize {
        reminders
            .iter()
            .filter(|reminder| reminder.category.as_deref() == Some(self.name.as_str()))
            .count()
    }

    pub fn is_used(&self, reminders: &[Reminder]) -> bool {
        self.reminder_count(reminders) > 0
    }
}

/// Seed categories for an empty profile.
pub fn default_categories() -> Vec<Category> {
    [
        ("Examen", "📚", "#3498db", "Exámenes y evaluaciones académicas"),
        ("Tarea", "📝", "#2ecc71", "Tareas y asignaciones"),
        ("Presentación", "🎤", "#e74c3c", "Presentaciones y exposiciones"),
        ("Reunión", "👥", "#f39c12", "Reuniones y citas académicas"),
    ]
    .into_iter()
    .map(|(name, icon, color, description)| Category {
        icon: icon.to_string(),
        color: color.to_string(),
        description: description.to_string(),
        ..Category::new(name)
    })
    .collect()
}

/// Category validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    NameRequired,
    NameTooShort,
    NameTooLong,
    InvalidColor(String),
    DescriptionTooLong,
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "category name is required"),
            Self::NameTooShort => write!(
                f,
                "category name must have at least {CATEGORY_NAME_MIN_CHARS} characters"
            ),
            Self::NameTooLong => write!(
                f,
                "category name cannot exceed {CATEGORY_NAME_MAX_CHARS} characters"
            ),
            Self::InvalidColor(value) => write!(f, "category color is not a hex code: `{value}`"),
            Self::DescriptionTooLong => write!(
                f,
                "category description cannot exceed {CATEGORY_DESCRIPTION_MAX_CHARS} characters"
            ),
        }
    }
}

impl Error for CategoryValidationError {}
