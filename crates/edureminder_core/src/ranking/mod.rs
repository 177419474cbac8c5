//! Reminder ranking engine.
//!
//! # Responsibility
//! - Compute per-reminder priority from date proximity, category and title.
//! - Order reminder collections by one or several criteria.
//! - Offer JSON-value variants that degrade instead of failing.
//!
//! # Invariants
//! - Pure functions over caller-owned data; the only ambient input is the
//!   system clock, and every clock-reading function has an explicit-`now`
//!   variant.

pub mod dynamic;
pub mod priority;
pub mod sorter;
