//! # Preference Commands
//!
//! Read and edit the auxiliary preference fields of the current format.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use regcfg_core::FormatVersion;
use serde_json::Value;

use super::{load_config, save_config};
use crate::utils::output::{format_command, print_info, print_success, print_warning};

/// Arguments for `pref`
#[derive(Args)]
pub struct PrefArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: PrefSubcommands,
}

/// Subcommands for `pref`
#[derive(Subcommand)]
pub enum PrefSubcommands {
  /// List all preference keys and values
  #[command(alias = "ls")]
  List,

  /// Print one preference
  Get {
    /// Preference key, e.g. psFormat
    key: String,
  },

  /// Set a preference
  Set {
    /// Preference key, e.g. psFormat
    key: String,

    /// Value to store; a string unless --json is given
    value: String,

    /// Parse the value as JSON instead of storing it as a string
    #[arg(long)]
    json: bool,
  },

  /// Remove a preference
  Unset {
    /// Preference key, e.g. psFormat
    key: String,
  },
}

pub(crate) fn handle_pref_command(location: &Path, args: PrefArgs) -> Result<()> {
  match args.subcommand {
    PrefSubcommands::List => handle_list(location),
    PrefSubcommands::Get { key } => handle_get(location, &key),
    PrefSubcommands::Set { key, value, json } => handle_set(location, key, &value, json),
    PrefSubcommands::Unset { key } => handle_unset(location, &key),
  }
}

fn handle_list(location: &Path) -> Result<()> {
  let config = load_config(location)?;
  if config.preferences().is_empty() {
    print_info("No preferences set.");
  }
  for (key, value) in config.preferences() {
    println!("{key} = {}", render(value));
  }
  Ok(())
}

fn handle_get(location: &Path, key: &str) -> Result<()> {
  let config = load_config(location)?;
  match config.preference(key) {
    Some(value) => {
      println!("{}", render(value));
      Ok(())
    }
    None => bail!("Preference {key} is not set"),
  }
}

fn handle_set(location: &Path, key: String, raw: &str, json: bool) -> Result<()> {
  let mut config = load_config(location)?;

  let value = if json {
    serde_json::from_str(raw).with_context(|| format!("Invalid JSON value for {key}"))?
  } else {
    Value::String(raw.to_string())
  };

  config.set_preference(key.clone(), value)?;
  warn_if_legacy(config.version());
  save_config(&config)?;

  print_success(&format!("Set {key}"));
  Ok(())
}

fn handle_unset(location: &Path, key: &str) -> Result<()> {
  let mut config = load_config(location)?;

  if config.remove_preference(key).is_none() {
    print_warning(&format!("Preference {key} is not set"));
    return Ok(());
  }

  save_config(&config)?;
  print_success(&format!("Removed {key}"));
  Ok(())
}

fn warn_if_legacy(version: FormatVersion) {
  if version == FormatVersion::Legacy {
    print_warning(&format!(
      "The legacy format does not store preferences; run {} first.",
      format_command("regcfg migrate --to current")
    ));
  }
}

/// Strings print bare, everything else as compact JSON
fn render(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}
