//! # Errors
//!
//! Error taxonomy for loading and saving configuration files. Each variant
//! maps to a different remediation for the user: a missing file is never an
//! error, an empty file, a malformed file and a malformed entry all are.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;
use crate::format::FormatVersion;

/// Errors that can occur while loading or saving a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{format} configuration file is empty: {}", path.display())]
  EmptyConfigFile { path: PathBuf, format: FormatVersion },
  #[error("The Auth config file is empty")]
  EmptyAuthConfig,
  #[error("Invalid Auth config file")]
  InvalidAuthConfig,
  #[error("\"{0}\" holds the credentials and cannot be used as a preference")]
  ReservedPreference(String),
  #[error(transparent)]
  Decode(#[from] DecodeError),
  #[error("Failed to parse configuration file: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Failed to read {}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("Failed to write {}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("Failed to create directory {}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("Could not determine the home directory")]
  NoHomeDirectory,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConfigError>;
