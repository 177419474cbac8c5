//! Read-side views over reminder collections.
//!
//! # Responsibility
//! - Filter reminder lists for display.
//! - Summarize collections into dashboard counters.

pub mod filters;
pub mod stats;
