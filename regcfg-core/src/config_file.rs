//! # Configuration File
//!
//! The in-memory configuration: decoded credentials keyed by server address,
//! auxiliary preferences, the format version to write, and where the file
//! lives. Saving always goes through the adapter named by the version tag.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::AuthConfig;
use crate::consts::{AUTHS_KEY, DETACH_KEYS_KEY, HTTP_HEADERS_KEY, IMAGES_FORMAT_KEY, PS_FORMAT_KEY};
use crate::error::{ConfigError, Result};
use crate::format::{FormatVersion, ParsedConfig};

/// Auxiliary preference fields, carried through without interpretation
pub type Preferences = BTreeMap<String, Value>;

/// A loaded (or freshly created) configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
  auths: BTreeMap<String, AuthConfig>,
  preferences: Preferences,
  version: FormatVersion,
  config_dir: PathBuf,
  file_name: Option<String>,
}

impl ConfigFile {
  /// Create an empty configuration rooted at `config_dir`
  pub fn new(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      auths: BTreeMap::new(),
      preferences: Preferences::new(),
      version: FormatVersion::default(),
      config_dir: config_dir.into(),
      file_name: None,
    }
  }

  /// Use an explicit file name instead of the version's default
  pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
    self.file_name = Some(file_name.into());
    self
  }

  pub(crate) fn from_parsed(config_dir: impl Into<PathBuf>, version: FormatVersion, parsed: ParsedConfig) -> Self {
    Self {
      auths: parsed.auths,
      preferences: parsed.preferences,
      version,
      config_dir: config_dir.into(),
      file_name: None,
    }
  }

  /// Parse configuration content from `reader` using the given format.
  ///
  /// Nothing on disk is touched; `config_dir` only determines where a later
  /// [`save`](Self::save) writes.
  pub fn from_reader<R: Read>(config_dir: impl Into<PathBuf>, version: FormatVersion, mut reader: R) -> Result<Self> {
    let config_dir = config_dir.into();
    let mut data = Vec::new();
    reader
      .read_to_end(&mut data)
      .map_err(|source| ConfigError::Read {
        path: config_dir.join(version.file_name()),
        source,
      })?;

    let parsed = version.format().parse(&data)?;
    Ok(Self::from_parsed(config_dir, version, parsed))
  }

  /// The directory the configuration belongs to
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Full path of the file this configuration saves to
  pub fn filename(&self) -> PathBuf {
    let file_name = self.file_name.as_deref().unwrap_or(self.version.file_name());
    self.config_dir.join(file_name)
  }

  /// The format used on the next save
  pub const fn version(&self) -> FormatVersion {
    self.version
  }

  /// Change the format used on the next save
  pub const fn set_version(&mut self, version: FormatVersion) {
    self.version = version;
  }

  /// All credential entries, keyed by server address
  pub const fn auths(&self) -> &BTreeMap<String, AuthConfig> {
    &self.auths
  }

  /// Credentials stored for `server_address`, if any
  pub fn auth(&self, server_address: &str) -> Option<&AuthConfig> {
    self.auths.get(server_address)
  }

  /// Store an entry under its server address, returning any replaced entry
  pub fn set_auth(&mut self, entry: AuthConfig) -> Option<AuthConfig> {
    self.auths.insert(entry.server_address.clone(), entry)
  }

  /// Remove the entry for `server_address`
  pub fn remove_auth(&mut self, server_address: &str) -> Option<AuthConfig> {
    self.auths.remove(server_address)
  }

  /// All auxiliary preferences
  pub const fn preferences(&self) -> &Preferences {
    &self.preferences
  }

  /// The raw value of preference `key`, if set
  pub fn preference(&self, key: &str) -> Option<&Value> {
    self.preferences.get(key)
  }

  /// Set preference `key`, returning any replaced value.
  ///
  /// `auths` names the credential section of the current format and is
  /// rejected with [`ConfigError::ReservedPreference`].
  pub fn set_preference(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
    let key = key.into();
    if key == AUTHS_KEY {
      return Err(ConfigError::ReservedPreference(key));
    }
    Ok(self.preferences.insert(key, value))
  }

  /// Remove preference `key`, returning its value
  pub fn remove_preference(&mut self, key: &str) -> Option<Value> {
    self.preferences.remove(key)
  }

  /// Template for `ps` output
  pub fn ps_format(&self) -> Option<&str> {
    self.string_preference(PS_FORMAT_KEY)
  }

  /// Template for `images` output
  pub fn images_format(&self) -> Option<&str> {
    self.string_preference(IMAGES_FORMAT_KEY)
  }

  /// Key sequence for detaching from a container
  pub fn detach_keys(&self) -> Option<&str> {
    self.string_preference(DETACH_KEYS_KEY)
  }

  /// Extra HTTP headers; non-string values are skipped
  pub fn http_headers(&self) -> HashMap<&str, &str> {
    self
      .preferences
      .get(HTTP_HEADERS_KEY)
      .and_then(Value::as_object)
      .map(|headers| {
        headers
          .iter()
          .filter_map(|(name, value)| value.as_str().map(|value| (name.as_str(), value)))
          .collect()
      })
      .unwrap_or_default()
  }

  fn string_preference(&self, key: &str) -> Option<&str> {
    self.preferences.get(key).and_then(Value::as_str)
  }

  /// Serialize with the adapter selected by [`version`](Self::version)
  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    self.version.format().serialize(self)
  }

  /// Serialize into `writer` without touching the filesystem
  pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
    let data = self.to_bytes()?;
    writer.write_all(&data).map_err(|source| ConfigError::Write {
      path: self.filename(),
      source,
    })
  }

  /// Write the configuration to [`filename`](Self::filename).
  ///
  /// Missing parent directories are created. On Unix the directory is
  /// created with mode `700` and the file is restricted to `600`.
  #[instrument(skip(self), fields(version = %self.version), level = "debug")]
  pub fn save(&self) -> Result<()> {
    let path = self.filename();
    let data = self.to_bytes()?;

    if let Some(parent) = path.parent() {
      ensure_dir(parent)?;
    }

    fs::write(&path, data).map_err(|source| ConfigError::Write {
      path: path.clone(),
      source,
    })?;
    set_secure_permissions(&path)?;

    debug!("Saved {} configuration to {}", self.version, path.display());
    Ok(())
  }
}

/// Create `dir` and any missing parents
fn ensure_dir(dir: &Path) -> Result<()> {
  let mut builder = fs::DirBuilder::new();
  builder.recursive(true);

  #[cfg(unix)]
  {
    use std::os::unix::fs::DirBuilderExt;
    builder.mode(0o700);
  }

  builder.create(dir).map_err(|source| ConfigError::CreateDir {
    path: dir.to_path_buf(),
    source,
  })
}

#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| ConfigError::Write {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(not(unix))]
fn set_secure_permissions(_path: &Path) -> Result<()> {
  Ok(())
}
