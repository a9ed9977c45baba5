//! # regcfg CLI Library
//!
//! Command definitions and handlers for the regcfg command-line tool.

pub mod cli;
pub mod utils;
