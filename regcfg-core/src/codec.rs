//! # Credential Codec
//!
//! Reversible encoding between a username/password pair and the single
//! `auth` string stored on disk. The encoding is basic-auth style base64 of
//! `username:password`; it obfuscates, it does not encrypt.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

/// Errors produced while decoding an `auth` string
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("Invalid base64 in auth configuration: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("Auth configuration is not valid UTF-8 text")]
  NotUtf8,
  #[error("Invalid auth configuration file")]
  MissingSeparator,
}

/// Encodes a username and password into an `auth` string.
///
/// # Examples
///
/// ```
/// use regcfg_core::codec::encode_auth;
///
/// assert_eq!(encode_auth("joejoe", "hello"), "am9lam9lOmhlbGxv");
/// ```
pub fn encode_auth(username: &str, password: &str) -> String {
  BASE64.encode(format!("{username}:{password}"))
}

/// Decodes an `auth` string back into `(username, password)`.
///
/// An empty string decodes to two empty strings, which is how "no credentials"
/// is represented on disk. The decoded text is split at the first colon only,
/// so passwords may contain colons. NUL padding around the password is
/// stripped.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the input is not valid base64, does not decode
/// to UTF-8 text, or contains no `:` separator.
pub fn decode_auth(auth: &str) -> Result<(String, String), DecodeError> {
  if auth.is_empty() {
    return Ok((String::new(), String::new()));
  }

  let bytes = BASE64.decode(auth)?;
  let separator = bytes
    .iter()
    .position(|&b| b == b':')
    .ok_or(DecodeError::MissingSeparator)?;
  let text = String::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;

  let (username, password) = (&text[..separator], &text[separator + 1..]);
  Ok((username.to_string(), password.trim_matches('\0').to_string()))
}
