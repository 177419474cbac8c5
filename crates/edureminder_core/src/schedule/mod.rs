//! Time-related reminder logic.
//!
//! # Responsibility
//! - Parse stored due-date text.
//! - Classify urgency, bucket reminders by day, plan notifications.

pub mod due_date;
pub mod notify;
pub mod urgency;
