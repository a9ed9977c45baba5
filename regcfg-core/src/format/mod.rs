//! # Configuration File Formats
//!
//! The two on-disk schemas the configuration can be read from and written
//! to. Each schema is a [`ConfigFormat`] implementation; which one is used is
//! decided by an explicit [`FormatVersion`] tag, never by sniffing content.

mod current;
mod legacy;

use std::collections::BTreeMap;
use std::fmt;

pub use current::CurrentFormat;
pub use legacy::LegacyFormat;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::auth::AuthConfig;
use crate::codec::{DecodeError, decode_auth, encode_auth};
use crate::config_file::{ConfigFile, Preferences};
use crate::consts::{CONFIG_FILE_NAME, LEGACY_CONFIG_FILE_NAME};
use crate::error::Result;

/// Schema version of a configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatVersion {
  /// Flat server map, or the plain-text fallback, stored in `.dockercfg`
  Legacy,
  /// Nested `auths` object plus preferences, stored in `config.json`
  #[default]
  Current,
}

impl FormatVersion {
  /// Default file name for this version
  pub const fn file_name(self) -> &'static str {
    match self {
      Self::Legacy => LEGACY_CONFIG_FILE_NAME,
      Self::Current => CONFIG_FILE_NAME,
    }
  }

  /// The adapter that reads and writes this version
  pub fn format(self) -> &'static dyn ConfigFormat {
    match self {
      Self::Legacy => &LegacyFormat,
      Self::Current => &CurrentFormat,
    }
  }
}

impl fmt::Display for FormatVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Legacy => f.write_str("legacy"),
      Self::Current => f.write_str("current"),
    }
  }
}

/// Credentials and preferences decoded from a file
#[derive(Debug, Default)]
pub struct ParsedConfig {
  pub auths: BTreeMap<String, AuthConfig>,
  pub preferences: Preferences,
}

/// A configuration file schema
pub trait ConfigFormat {
  /// The version tag this adapter handles
  fn version(&self) -> FormatVersion;

  /// Decode file content into plaintext credentials and preferences.
  ///
  /// Either every entry decodes or an error is returned; partial results are
  /// never produced.
  fn parse(&self, data: &[u8]) -> Result<ParsedConfig>;

  /// Encode a configuration into file content.
  ///
  /// Works from a shared borrow, so the caller's configuration is never
  /// modified by serialization.
  fn serialize(&self, config: &ConfigFile) -> Result<Vec<u8>>;
}

/// Wire form of a single credential entry
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RawAuth {
  #[serde(default, deserialize_with = "null_as_empty")]
  pub auth: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub email: String,
}

/// Read an absent or `null` string field as empty
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
  Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode a single wire entry keyed by `server_address`
pub(crate) fn decode_entry(server_address: &str, raw: RawAuth) -> std::result::Result<AuthConfig, DecodeError> {
  let (username, password) = decode_auth(&raw.auth)?;
  Ok(AuthConfig {
    server_address: server_address.to_string(),
    username,
    password,
    email: raw.email,
  })
}

/// Build the wire view of the credential map without touching the original
pub(crate) fn encode_entries(auths: &BTreeMap<String, AuthConfig>) -> BTreeMap<&str, RawAuth> {
  auths
    .iter()
    .map(|(server, entry)| {
      let auth = if entry.is_anonymous() {
        String::new()
      } else {
        encode_auth(&entry.username, &entry.password)
      };
      let raw = RawAuth {
        auth,
        email: entry.email.clone(),
      };
      (server.as_str(), raw)
    })
    .collect()
}

/// Serialize `value` as JSON indented with tabs
pub(crate) fn to_tab_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
  value.serialize(&mut serializer)?;
  Ok(buf)
}
