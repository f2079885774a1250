//! Error types for time handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation or timestamp parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is out of range (month 13, minute 61, ...).
    InvalidDate(String),
    /// Timestamp text could not be parsed.
    Parse(String),
    /// UTC offset outside [-14, +14] hours or not finite.
    InvalidOffset(f64),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::InvalidOffset(hours) => write!(f, "invalid UTC offset: {hours} h"),
        }
    }
}

impl Error for TimeError {}
