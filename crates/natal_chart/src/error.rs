//! Error types for chart computation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use natal_ephem::EphemerisError;
use natal_time::TimeError;

/// Errors from chart assembly.
///
/// Per-body ephemeris failures never surface here: those bodies are
/// skipped and logged. Only request-level problems are errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// Error from the ephemeris provider.
    Ephemeris(EphemerisError),
    /// Error from date/time handling.
    Time(TimeError),
    /// User-supplied input is missing or out of range.
    InvalidInput(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl Error for ChartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ephemeris(e) => Some(e),
            Self::Time(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<EphemerisError> for ChartError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
