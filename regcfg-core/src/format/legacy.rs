//! Legacy `.dockercfg` format.
//!
//! The file is either a flat JSON object mapping server address to
//! `{"auth", "email"}`, or a two-line plain-text file:
//!
//! ```text
//! username = <auth>
//! email = <email>
//! ```
//!
//! JSON is always tried first; the plain-text form is only a fallback.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::{ConfigFormat, FormatVersion, ParsedConfig, RawAuth, decode_entry, encode_entries, to_tab_indented_json};
use crate::auth::AuthConfig;
use crate::codec::decode_auth;
use crate::config_file::ConfigFile;
use crate::consts::DEFAULT_INDEX_SERVER;
use crate::error::{ConfigError, Result};

/// Separator between key and value in the plain-text form
const KEY_VALUE_SEPARATOR: &str = " = ";

/// Adapter for the legacy format
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyFormat;

impl ConfigFormat for LegacyFormat {
  fn version(&self) -> FormatVersion {
    FormatVersion::Legacy
  }

  fn parse(&self, data: &[u8]) -> Result<ParsedConfig> {
    let raw = match serde_json::from_slice::<BTreeMap<String, RawAuth>>(data) {
      Ok(raw) => raw,
      Err(e) => {
        trace!("Legacy content is not a JSON server map ({e}), trying plain text");
        return parse_plain_text(&String::from_utf8_lossy(data));
      }
    };

    let mut auths = BTreeMap::new();
    for (server, entry) in raw {
      let decoded = decode_entry(&server, entry).map_err(|e| {
        debug!("Failed to decode auth for {server}: {e}");
        ConfigError::InvalidAuthConfig
      })?;
      auths.insert(server, decoded);
    }

    Ok(ParsedConfig {
      auths,
      preferences: Default::default(),
    })
  }

  fn serialize(&self, config: &ConfigFile) -> Result<Vec<u8>> {
    to_tab_indented_json(&encode_entries(config.auths()))
  }
}

/// Parse the two-line `key = value` fallback.
///
/// The first line carries the encoded credentials and the second the email;
/// the key names themselves are not interpreted. The single entry is stored
/// under [`DEFAULT_INDEX_SERVER`].
fn parse_plain_text(content: &str) -> Result<ParsedConfig> {
  let lines: Vec<&str> = content.split('\n').map(|line| line.trim_end_matches('\r')).collect();
  if lines.len() < 2 {
    return Err(ConfigError::EmptyAuthConfig);
  }

  let auth = value_of(lines[0])?;
  let (username, password) = decode_auth(auth)?;
  let email = value_of(lines[1])?;

  let entry = AuthConfig::new(DEFAULT_INDEX_SERVER, username, password).with_email(email);
  let mut auths = BTreeMap::new();
  auths.insert(DEFAULT_INDEX_SERVER.to_string(), entry);

  Ok(ParsedConfig {
    auths,
    preferences: Default::default(),
  })
}

/// Value of a `key = value` line
fn value_of(line: &str) -> Result<&str> {
  let parts: Vec<&str> = line.split(KEY_VALUE_SEPARATOR).collect();
  match parts.as_slice() {
    [_, value] => Ok(*value),
    _ => Err(ConfigError::InvalidAuthConfig),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::codec::DecodeError;

  #[test]
  fn test_parse_flat_json() {
    let js = r#"{"https://index.docker.io/v1/":{"auth":"am9lam9lOmhlbGxv","email":"user@example.com"}}"#;
    let parsed = LegacyFormat.parse(js.as_bytes()).unwrap();

    let entry = &parsed.auths["https://index.docker.io/v1/"];
    assert_eq!(entry.username, "joejoe");
    assert_eq!(entry.password, "hello");
    assert_eq!(entry.email, "user@example.com");
    assert_eq!(entry.server_address, "https://index.docker.io/v1/");
    assert!(parsed.preferences.is_empty());
  }

  #[test]
  fn test_parse_flat_json_with_bad_auth() {
    let js = r#"{"https://index.docker.io/v1/":{"auth":"test","email":"user@example.com"}}"#;
    let err = LegacyFormat.parse(js.as_bytes()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAuthConfig));
  }

  #[test]
  fn test_parse_flat_json_with_null_email() {
    let js = r#"{"https://r.example.test/":{"auth":"am9lam9lOmhlbGxv","email":null}}"#;
    let parsed = LegacyFormat.parse(js.as_bytes()).unwrap();

    let entry = &parsed.auths["https://r.example.test/"];
    assert_eq!(entry.username, "joejoe");
    assert_eq!(entry.password, "hello");
    assert_eq!(entry.email, "");
  }

  #[test]
  fn test_parse_flat_json_with_null_auth() {
    let parsed = LegacyFormat.parse(br#"{"anon.example.test":{"auth":null,"email":"a@example.test"}}"#).unwrap();
    let entry = &parsed.auths["anon.example.test"];
    assert!(entry.is_anonymous());
    assert_eq!(entry.email, "a@example.test");
  }

  #[test]
  fn test_parse_empty_json_object() {
    let parsed = LegacyFormat.parse(b"{}").unwrap();
    assert!(parsed.auths.is_empty());
  }

  #[test]
  fn test_parse_plain_text() {
    let content = "username = am9lam9lOmhlbGxv\nemail = user@example.com";
    let parsed = LegacyFormat.parse(content.as_bytes()).unwrap();

    let entry = &parsed.auths[DEFAULT_INDEX_SERVER];
    assert_eq!(entry.username, "joejoe");
    assert_eq!(entry.password, "hello");
    assert_eq!(entry.email, "user@example.com");
  }

  #[test]
  fn test_parse_plain_text_with_crlf() {
    let content = "auth = am9lam9lOmhlbGxv\r\nemail = user@example.com\r\n";
    let parsed = LegacyFormat.parse(content.as_bytes()).unwrap();
    assert_eq!(parsed.auths[DEFAULT_INDEX_SERVER].email, "user@example.com");
  }

  #[test]
  fn test_single_line_is_empty_auth_config() {
    let err = LegacyFormat.parse(b"username = test").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAuthConfig));
    assert_eq!(err.to_string(), "The Auth config file is empty");
  }

  #[test]
  fn test_no_content_is_empty_auth_config() {
    let err = LegacyFormat.parse(b"").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAuthConfig));
  }

  #[test]
  fn test_lines_without_separator_are_invalid() {
    let err = LegacyFormat.parse(b"username\npassword\nemail").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAuthConfig));
    assert_eq!(err.to_string(), "Invalid Auth config file");
  }

  #[test]
  fn test_undecodable_auth_line() {
    let err = LegacyFormat.parse(b"username = test\nemail").unwrap_err();
    assert!(matches!(err, ConfigError::Decode(DecodeError::MissingSeparator)));
    assert_eq!(err.to_string(), "Invalid auth configuration file");
  }

  #[test]
  fn test_missing_email_value() {
    let err = LegacyFormat.parse(b"username = am9lam9lOmhlbGxv\nemail").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAuthConfig));
  }

  #[test]
  fn test_serialize_has_no_auths_wrapper() {
    let mut config = ConfigFile::new("/nonexistent");
    config.set_version(FormatVersion::Legacy);
    config.set_auth(AuthConfig::new("https://registry.example.test/", "joejoe", "hello").with_email("u@example.test"));

    let out = String::from_utf8(LegacyFormat.serialize(&config).unwrap()).unwrap();
    assert!(!out.contains("\"auths\""));
    assert!(out.contains("\"auth\": \"am9lam9lOmhlbGxv\""));
    assert!(!out.contains("hello"));
    assert!(!out.contains("joejoe"));
  }
}
