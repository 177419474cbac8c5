//! Flutter bridge surface for EduReminder core.

pub mod api;
