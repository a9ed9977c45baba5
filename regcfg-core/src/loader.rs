//! # Loader
//!
//! Finds the configuration file in a directory and decodes it with the
//! adapter that matches the file name. The current-format file is preferred;
//! the legacy file is only consulted when the current one is absent. A
//! directory with neither file yields an empty configuration.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument};

use crate::config::default_config_dirs;
use crate::config_file::ConfigFile;
use crate::error::{ConfigError, Result};
use crate::format::FormatVersion;

/// Versions in lookup order
const LOOKUP_ORDER: [FormatVersion; 2] = [FormatVersion::Current, FormatVersion::Legacy];

/// Load the configuration from the process-wide default directory
pub fn load_default() -> Result<ConfigFile> {
  default_config_dirs()?.load()
}

/// Load from a configuration directory or directly from a file.
///
/// `path` is a file when it names an existing file, or when nothing exists
/// there yet and it looks like a file name (one of the known names, or any
/// name with an extension). A file's format is chosen by file name:
/// `.dockercfg` is legacy, anything else is current. Otherwise `path` is
/// treated as a directory.
pub fn load(path: &Path) -> Result<ConfigFile> {
  if path.is_file() || (!path.exists() && looks_like_file(path)) {
    load_file(path)
  } else {
    load_dir(path)
  }
}

fn looks_like_file(path: &Path) -> bool {
  path.extension().is_some()
    || path
      .file_name()
      .is_some_and(|name| LOOKUP_ORDER.iter().any(|version| name == version.file_name()))
}

/// Load whichever configuration file exists in `dir`
#[instrument(level = "debug")]
pub fn load_dir(dir: &Path) -> Result<ConfigFile> {
  for version in LOOKUP_ORDER {
    let path = dir.join(version.file_name());
    if let Some(data) = read_if_exists(&path)? {
      debug!("Found {version} configuration at {}", path.display());
      return decode(dir, version, &path, &data);
    }
  }

  debug!("No configuration file in {}, starting empty", dir.display());
  Ok(ConfigFile::new(dir))
}

/// Load a specific configuration file.
///
/// A missing file yields an empty configuration that saves to `path`.
#[instrument(level = "debug")]
pub fn load_file(path: &Path) -> Result<ConfigFile> {
  let dir = path.parent().unwrap_or(Path::new(""));
  let file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
  let version = match file_name.as_deref() {
    Some(name) if name == FormatVersion::Legacy.file_name() => FormatVersion::Legacy,
    _ => FormatVersion::Current,
  };

  let config = match read_if_exists(path)? {
    Some(data) => decode(dir, version, path, &data)?,
    None => {
      debug!("{} does not exist, starting empty", path.display());
      let mut config = ConfigFile::new(dir);
      config.set_version(version);
      config
    }
  };

  Ok(match file_name {
    Some(name) if name != version.file_name() => config.with_file_name(name),
    _ => config,
  })
}

fn decode(dir: &Path, version: FormatVersion, path: &Path, data: &[u8]) -> Result<ConfigFile> {
  if data.is_empty() {
    return Err(ConfigError::EmptyConfigFile {
      path: path.to_path_buf(),
      format: version,
    });
  }

  let parsed = version.format().parse(data)?;
  Ok(ConfigFile::from_parsed(dir, version, parsed))
}

/// Read `path`, treating a missing file as `None`
fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
  match fs::read(path) {
    Ok(data) => Ok(Some(data)),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(source) => Err(ConfigError::Read {
      path: path.to_path_buf(),
      source,
    }),
  }
}
