//! Configuration directory management for testing
//!
//! This module provides a temporary configuration directory with helpers for
//! seeding and inspecting both configuration file names.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

/// File name of the current-format configuration
pub const CURRENT_FILE: &str = "config.json";

/// File name of the legacy-format configuration
pub const LEGACY_FILE: &str = ".dockercfg";

/// A temporary configuration directory, removed when dropped
pub struct ConfigDirTestGuard {
  /// The temporary directory backing the guard
  pub temp_dir: TempDir,
  config_dir: PathBuf,
}

impl ConfigDirTestGuard {
  /// Create a guard whose configuration directory is the temp dir itself
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_dir = temp_dir.path().to_path_buf();
    Self { temp_dir, config_dir }
  }

  /// Create a guard whose configuration directory is a not-yet-existing
  /// subdirectory of the temp dir
  pub fn nested(relative: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_dir = temp_dir.path().join(relative);
    Self { temp_dir, config_dir }
  }

  /// Get the configuration directory
  pub fn path(&self) -> &Path {
    &self.config_dir
  }

  /// Write `content` to `config.json`
  pub fn write_current(&self, content: &str) -> PathBuf {
    self.write(CURRENT_FILE, content)
  }

  /// Write `content` to `.dockercfg`
  pub fn write_legacy(&self, content: &str) -> PathBuf {
    self.write(LEGACY_FILE, content)
  }

  /// Write `content` to `file_name` inside the configuration directory
  pub fn write(&self, file_name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(&self.config_dir).expect("Failed to create config directory");
    let path = self.config_dir.join(file_name);
    fs::write(&path, content).expect("Failed to write test config file");
    path
  }

  /// Read `file_name` back from the configuration directory
  pub fn read(&self, file_name: &str) -> anyhow::Result<String> {
    let path = self.config_dir.join(file_name);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
  }

  /// Whether `file_name` exists in the configuration directory
  pub fn exists(&self, file_name: &str) -> bool {
    self.config_dir.join(file_name).exists()
  }
}

impl Default for ConfigDirTestGuard {
  fn default() -> Self {
    Self::new()
  }
}
