//! # regcfg Core Library
//!
//! Reads and writes the registry credential configuration file used by
//! container tooling. Two on-disk schemas are supported: the legacy
//! `.dockercfg` flat map (with a plain-text fallback) and the current
//! `config.json` with a nested `auths` section and auxiliary preferences.
//! Credentials are held in plaintext in memory and written back in their
//! base64 `auth` form.
//!
//! ```no_run
//! use regcfg_core::{AuthConfig, FormatVersion, loader};
//!
//! let mut config = loader::load_default()?;
//! config.set_auth(AuthConfig::new("registry.example.test", "joe", "s3cret"));
//! config.set_version(FormatVersion::Current);
//! config.save()?;
//! # Ok::<(), regcfg_core::ConfigError>(())
//! ```

pub mod auth;
pub mod codec;
pub mod config;
pub mod config_file;
pub mod consts;
pub mod error;
pub mod format;
pub mod loader;

// Re-export main types
pub use auth::AuthConfig;
pub use codec::{DecodeError, decode_auth, encode_auth};
pub use config::{ConfigDirs, default_config_dirs};
pub use config_file::{ConfigFile, Preferences};
pub use error::{ConfigError, Result};
pub use format::{ConfigFormat, CurrentFormat, FormatVersion, LegacyFormat, ParsedConfig};
pub use loader::{load, load_default, load_dir, load_file};
