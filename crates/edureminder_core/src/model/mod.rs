//! Domain model for reminders and their categories.
//!
//! # Responsibility
//! - Define the records exchanged with the external storage layer.
//! - Keep field naming aligned with the stored JSON shape (camelCase).
//! - Apply lifecycle and catalog changes as pure transitions over slices.
//!
//! # Invariants
//! - Core never owns storage; records are values passed in and out.

pub mod catalog;
pub mod category;
pub mod lifecycle;
pub mod reminder;
