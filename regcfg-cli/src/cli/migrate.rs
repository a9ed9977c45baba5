//! # Migrate Command
//!
//! Rewrites the loaded configuration in a chosen format.

use std::path::Path;

use anyhow::Result;
use clap::{Args, ValueEnum};
use regcfg_core::{ConfigDirs, FormatVersion};

use super::{load_config, save_config};
use crate::utils::output::{format_path, print_info, print_success, print_warning};

/// Target format for `migrate`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
  /// `config.json` with a nested `auths` section
  Current,
  /// `.dockercfg` flat server map
  Legacy,
}

impl From<FormatArg> for FormatVersion {
  fn from(arg: FormatArg) -> Self {
    match arg {
      FormatArg::Current => Self::Current,
      FormatArg::Legacy => Self::Legacy,
    }
  }
}

/// Arguments for `migrate`
#[derive(Args)]
pub struct MigrateArgs {
  /// Format to write
  #[arg(long, value_enum, default_value_t = FormatArg::Current)]
  pub to: FormatArg,
}

pub(crate) fn handle_migrate_command(location: &Path, args: MigrateArgs) -> Result<()> {
  let mut config = load_config(location)?;
  let target = FormatVersion::from(args.to);

  if config.version() == target && config.filename().exists() {
    print_info(&format!("Configuration is already in the {target} format."));
    return Ok(());
  }

  let dropped_preferences = target == FormatVersion::Legacy && !config.preferences().is_empty();

  config.set_version(target);
  save_config(&config)?;

  print_success(&format!(
    "Wrote {target} configuration to {}",
    format_path(&config.filename().display().to_string())
  ));

  if dropped_preferences {
    print_warning("The legacy format cannot store preferences; they were not written.");
  }
  if target == FormatVersion::Legacy && ConfigDirs::new(config.config_dir()).config_path().exists() {
    print_warning("config.json still exists and takes precedence over .dockercfg when loading.");
  }

  Ok(())
}
