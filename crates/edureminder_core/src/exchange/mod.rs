//! Import/export formats for reminder collections.
//!
//! # Responsibility
//! - Encode/decode the JSON backup envelope and the CSV export.
//! - Upgrade records written by older app versions on the way in.
//!
//! # Invariants
//! - Import never partially succeeds: any invalid record fails the whole file.
//! - Export output is deterministic for a given input and `now`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod backup;
pub mod csv;
pub mod migrate;

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Errors raised by import/export paths.
#[derive(Debug)]
pub enum ExchangeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Parsed fine but does not have the expected shape.
    InvalidFormat(&'static str),
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "reminder file I/O failed: {err}"),
            Self::Json(err) => write!(f, "reminder file is not valid JSON: {err}"),
            Self::InvalidFormat(details) => write!(f, "invalid reminder file format: {details}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
