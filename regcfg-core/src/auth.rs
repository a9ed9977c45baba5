//! In-memory credential entries.

use std::fmt;

/// Decoded credentials for one registry.
///
/// Entries always hold plaintext in memory; the obfuscated `auth` form only
/// exists in serialized output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
  pub server_address: String,
  pub username: String,
  pub password: String,
  pub email: String,
}

impl AuthConfig {
  /// Create an entry for `server_address` with the given credentials
  pub fn new(server_address: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      server_address: server_address.into(),
      username: username.into(),
      password: password.into(),
      email: String::new(),
    }
  }

  /// Set the email associated with the entry
  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = email.into();
    self
  }

  /// Whether the entry carries neither a username nor a password
  pub fn is_anonymous(&self) -> bool {
    self.username.is_empty() && self.password.is_empty()
  }
}

impl fmt::Debug for AuthConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let password = if self.password.is_empty() { "" } else { "<redacted>" };
    f.debug_struct("AuthConfig")
      .field("server_address", &self.server_address)
      .field("username", &self.username)
      .field("password", &password)
      .field("email", &self.email)
      .finish()
  }
}
