//! Environment variable management for testing
//!
//! This module overrides `DOCKER_CONFIG` and `HOME` for the duration of a
//! test and restores the original values afterwards.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment pointing `HOME` at a temporary directory and
/// optionally setting `DOCKER_CONFIG`
pub struct EnvTestGuard {
  /// The temporary directory used as `HOME`
  pub temp_dir: TempDir,
  /// The original DOCKER_CONFIG value, if any
  original_config_dir: Option<String>,
  /// The original HOME value, if any
  original_home: Option<String>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  pub const DOCKER_CONFIG: &'static str = "DOCKER_CONFIG";
  pub const HOME: &'static str = "HOME";

  /// Point `HOME` at a fresh temp dir and clear `DOCKER_CONFIG`
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let original_config_dir = env::var(Self::DOCKER_CONFIG).ok();
    let original_home = env::var(Self::HOME).ok();

    unsafe {
      env::set_var(Self::HOME, temp_dir.path());
      env::remove_var(Self::DOCKER_CONFIG);
    }

    Self {
      temp_dir,
      original_config_dir,
      original_home,
    }
  }

  /// Like [`new`](Self::new), but also set `DOCKER_CONFIG` to `relative`
  /// inside the temp dir
  pub fn with_config_dir(relative: &str) -> Self {
    let guard = Self::new();
    unsafe {
      env::set_var(Self::DOCKER_CONFIG, guard.temp_dir.path().join(relative));
    }
    guard
  }

  /// Get the temporary HOME directory
  pub fn home_dir(&self) -> PathBuf {
    self.temp_dir.path().to_path_buf()
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    match &self.original_config_dir {
      Some(val) => unsafe {
        env::set_var(EnvTestGuard::DOCKER_CONFIG, val);
      },
      None => unsafe {
        env::remove_var(EnvTestGuard::DOCKER_CONFIG);
      },
    }

    match &self.original_home {
      Some(val) => unsafe {
        env::set_var(EnvTestGuard::HOME, val);
      },
      None => unsafe {
        env::remove_var(EnvTestGuard::HOME);
      },
    }
  }
}
