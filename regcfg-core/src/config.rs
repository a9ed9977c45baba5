//! # Configuration Directory
//!
//! Resolves where configuration files live. An explicit directory always
//! wins; otherwise `DOCKER_CONFIG`; otherwise `~/.docker`. The resolved
//! value is passed around explicitly so callers and tests can point the
//! loader anywhere without touching process state.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use directories::BaseDirs;
use tracing::debug;

use crate::config_file::ConfigFile;
use crate::consts::{CONFIG_DIR_NAME, ENV_CONFIG_DIR};
use crate::error::{ConfigError, Result};
use crate::format::FormatVersion;
use crate::loader;

/// The configuration directory in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDirs {
  config_dir: PathBuf,
}

impl ConfigDirs {
  /// Use `config_dir` as-is
  pub fn new(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Resolve the directory from an environment override and a home directory.
  ///
  /// An empty override is treated as unset.
  ///
  /// # Examples
  ///
  /// ```
  /// use std::path::Path;
  /// use regcfg_core::ConfigDirs;
  ///
  /// let dirs = ConfigDirs::resolve(None, Some(Path::new("/home/user"))).unwrap();
  /// assert_eq!(dirs.config_dir(), Path::new("/home/user/.docker"));
  ///
  /// let dirs = ConfigDirs::resolve(Some("/etc/regcfg".into()), Some(Path::new("/home/user"))).unwrap();
  /// assert_eq!(dirs.config_dir(), Path::new("/etc/regcfg"));
  /// ```
  pub fn resolve(env_override: Option<OsString>, home: Option<&Path>) -> Result<Self> {
    if let Some(dir) = env_override.filter(|dir| !dir.is_empty()) {
      return Ok(Self::new(dir));
    }

    home
      .map(|home| Self::new(home.join(CONFIG_DIR_NAME)))
      .ok_or(ConfigError::NoHomeDirectory)
  }

  /// Resolve the directory from `DOCKER_CONFIG` and the user's home directory
  pub fn from_env() -> Result<Self> {
    let base_dirs = BaseDirs::new();
    let dirs = Self::resolve(env::var_os(ENV_CONFIG_DIR), base_dirs.as_ref().map(BaseDirs::home_dir))?;
    debug!("Resolved configuration directory: {}", dirs.config_dir.display());
    Ok(dirs)
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the path to the current-format file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(FormatVersion::Current.file_name())
  }

  /// Load whichever configuration file exists in this directory
  pub fn load(&self) -> Result<ConfigFile> {
    loader::load_dir(&self.config_dir)
  }
}

static DEFAULT_CONFIG_DIRS: LazyLock<Option<ConfigDirs>> = LazyLock::new(|| ConfigDirs::from_env().ok());

/// The process-wide default directory, resolved once and cached
pub fn default_config_dirs() -> Result<ConfigDirs> {
  DEFAULT_CONFIG_DIRS.as_ref().cloned().ok_or(ConfigError::NoHomeDirectory)
}
