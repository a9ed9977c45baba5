//! Test utilities shared across the regcfg workspace
//!
//! This crate provides common testing infrastructure including:
//! - Throwaway configuration directories ([`ConfigDirTestGuard`])
//! - `DOCKER_CONFIG` and `HOME` isolation ([`EnvTestGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;

// Re-export commonly used items
pub use config::{CURRENT_FILE, ConfigDirTestGuard, LEGACY_FILE};
pub use env::EnvTestGuard;
