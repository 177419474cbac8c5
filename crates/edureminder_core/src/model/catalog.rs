//! Category catalog management over caller-owned collections.
//!
//! # Responsibility
//! - Look up, search, add, rename and delete categories held by the host.
//! - Report how reminders are spread across categories.
//!
//! # Invariants
//! - Names are unique case-insensitively within a catalog.
//! - Usage is counted by exact `category == name` match, as in
//!   [`Category::reminder_count`].
//! - Inputs are never mutated; every change returns fresh collections.

use crate::config::FALLBACK_CATEGORY;
use crate::model::category::{Category, CategoryValidationError};
use crate::model::reminder::Reminder;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Case-insensitive exact name lookup. Blank names never match.
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    if name.is_empty() {
        return None;
    }
    let wanted = name.to_lowercase();
    categories
        .iter()
        .find(|category| category.name.to_lowercase() == wanted)
}

/// Categories whose name or description contains `query`, ignoring case.
///
/// The query is lowercased and trimmed. An empty query matches nothing.
pub fn search_by_name<'a>(categories: &'a [Category], query: &str) -> Vec<&'a Category> {
    if query.is_empty() {
        return Vec::new();
    }
    let term = query.to_lowercase();
    let term = term.trim();
    categories
        .iter()
        .filter(|category| {
            category.name.to_lowercase().contains(term)
                || category.description.to_lowercase().contains(term)
        })
        .collect()
}

pub fn used_categories<'a>(
    categories: &'a [Category],
    reminders: &[Reminder],
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|category| category.is_used(reminders))
        .collect()
}

pub fn unused_categories<'a>(
    categories: &'a [Category],
    reminders: &[Reminder],
) -> Vec<&'a Category> {
    categories
        .iter()
        .filter(|category| !category.is_used(reminders))
        .collect()
}

/// Appends a validated category whose name is not taken yet.
///
/// # Errors
/// - [`CategoryCatalogError::Invalid`] when the record fails validation.
/// - [`CategoryCatalogError::DuplicateName`] when the name already exists.
pub fn add_category(
    categories: &[Category],
    category: Category,
) -> Result<Vec<Category>, CategoryCatalogError> {
    category.validate()?;
    if find_by_name(categories, &category.name).is_some() {
        return Err(CategoryCatalogError::DuplicateName(category.name));
    }
    let mut updated = categories.to_vec();
    updated.push(category);
    Ok(updated)
}

/// Renames the category with `id`, keeping names unique.
///
/// Reminders keep their old category text; use [`force_delete`] or a host
/// migration to move them.
pub fn rename_category(
    categories: &[Category],
    id: &str,
    name: &str,
) -> Result<Vec<Category>, CategoryCatalogError> {
    let index = position_of(categories, id)?;
    if let Some(existing) = find_by_name(categories, name) {
        if existing.id != id {
            return Err(CategoryCatalogError::DuplicateName(name.to_string()));
        }
    }
    let mut renamed = categories[index].clone();
    renamed.name = name.to_string();
    renamed.validate()?;

    let mut updated = categories.to_vec();
    updated[index] = renamed;
    Ok(updated)
}

/// Removes the category with `id` only when no reminder uses it.
///
/// # Errors
/// - [`CategoryCatalogError::NotFound`] for unknown ids.
/// - [`CategoryCatalogError::InUse`] when a reminder still references it.
pub fn safe_delete(
    categories: &[Category],
    reminders: &[Reminder],
    id: &str,
) -> Result<Vec<Category>, CategoryCatalogError> {
    let index = position_of(categories, id)?;
    let category = &categories[index];
    if category.is_used(reminders) {
        return Err(CategoryCatalogError::InUse(category.name.clone()));
    }
    Ok(without_index(categories, index))
}

/// Removes the category with `id` and moves its reminders to `replacement`
/// (`"General"` when `None`).
///
/// Returns the remaining categories and the updated reminders.
pub fn force_delete(
    categories: &[Category],
    reminders: &[Reminder],
    id: &str,
    replacement: Option<&str>,
) -> Result<(Vec<Category>, Vec<Reminder>), CategoryCatalogError> {
    let index = position_of(categories, id)?;
    let old_name = categories[index].name.as_str();
    let replacement = replacement.unwrap_or(FALLBACK_CATEGORY);

    let mut moved = 0usize;
    let reminders = reminders
        .iter()
        .map(|reminder| {
            let mut reminder = reminder.clone();
            if reminder.category.as_deref() == Some(old_name) {
                reminder.category = Some(replacement.to_string());
                moved += 1;
            }
            reminder
        })
        .collect();
    info!(
        "event=category_force_delete module=catalog status=ok moved={} replacement={}",
        moved, replacement
    );
    Ok((without_index(categories, index), reminders))
}

/// Categories ordered by reminder count; descending unless `ascending`.
/// Ties keep catalog order.
pub fn by_usage<'a>(
    categories: &'a [Category],
    reminders: &[Reminder],
    ascending: bool,
) -> Vec<&'a Category> {
    let mut counted: Vec<(usize, &Category)> = categories
        .iter()
        .map(|category| (category.reminder_count(reminders), category))
        .collect();
    counted.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });
    counted.into_iter().map(|(_, category)| category).collect()
}

/// Per-category usage line of [`CategoryStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryUsage {
    pub name: String,
    pub count: usize,
    /// Share of all reminders, rounded to a whole percent; 0 with no reminders.
    pub percentage: u32,
}

/// Catalog usage summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total: usize,
    pub used: usize,
    pub unused: usize,
    pub usage_by_category: Vec<CategoryUsage>,
}

impl CategoryStats {
    pub fn collect(categories: &[Category], reminders: &[Reminder]) -> Self {
        let usage_by_category: Vec<CategoryUsage> = categories
            .iter()
            .map(|category| {
                let count = category.reminder_count(reminders);
                CategoryUsage {
                    name: category.name.clone(),
                    count,
                    percentage: usage_percentage(count, reminders.len()),
                }
            })
            .collect();
        let used = usage_by_category.iter().filter(|usage| usage.count > 0).count();
        Self {
            total: categories.len(),
            used,
            unused: categories.len() - used,
            usage_by_category,
        }
    }
}

fn usage_percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

fn position_of(categories: &[Category], id: &str) -> Result<usize, CategoryCatalogError> {
    categories
        .iter()
        .position(|category| category.id == id)
        .ok_or_else(|| CategoryCatalogError::NotFound(id.to_string()))
}

fn without_index(categories: &[Category], index: usize) -> Vec<Category> {
    categories
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, category)| category.clone())
        .collect()
}

/// Catalog operation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCatalogError {
    NotFound(String),
    DuplicateName(String),
    InUse(String),
    Invalid(CategoryValidationError),
}

impl Display for CategoryCatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "category not found: {id}"),
            Self::DuplicateName(name) => write!(f, "a category named `{name}` already exists"),
            Self::InUse(name) => write!(f, "category `{name}` is still used by reminders"),
            Self::Invalid(err) => write!(f, "invalid category: {err}"),
        }
    }
}

impl Error for CategoryCatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryValidationError> for CategoryCatalogError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Invalid(value)
    }
}
