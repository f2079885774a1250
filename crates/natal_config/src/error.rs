//! Error types for configuration loading.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors from reading or resolving a configuration file.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, message: String },
    /// The file is not valid TOML or has unexpected keys/types.
    Parse { path: PathBuf, message: String },
    /// The file parsed but a value is out of range.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse { path, message } => {
                write!(f, "cannot parse {}: {message}", path.display())
            }
            Self::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for ConfigError {}
