//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the regcfg tool.

mod auth;
mod migrate;
mod pref;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use regcfg_core::{ConfigFile, default_config_dirs};

use crate::utils::output::{
  ColorMode, apply_color_mode, format_path, format_server, print_header, print_info,
};

/// Top-level CLI command for the regcfg tool
#[derive(Parser)]
#[command(name = "regcfg")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Inspect and edit the registry credential configuration file")]
#[command(
  long_about = "regcfg reads and writes the configuration file container tooling uses to\n\
        store registry credentials and display preferences. Both the legacy\n\
        .dockercfg format and the current config.json format are supported."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Configuration directory or file to use
  #[arg(
    long = "config",
    value_name = "PATH",
    global = true,
    long_help = "Configuration directory or file to use.\n\n\
             Takes precedence over the DOCKER_CONFIG environment variable, which in\n\
             turn takes precedence over ~/.docker."
  )]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the regcfg tool
#[derive(Subcommand)]
pub enum Commands {
  /// Show which configuration file is in use
  Path,

  /// List stored registries and preferences
  #[command(long_about = "Lists every registry with stored credentials, along with the\n\
            username and email for each. Passwords are never printed.")]
  #[command(alias = "ls")]
  Show,

  /// Show the credentials stored for one registry
  Get(auth::GetArgs),

  /// Store credentials for a registry
  #[command(long_about = "Stores credentials for a registry in the configuration file.\n\n\
            The password can be passed with --password, piped with --password-stdin,\n\
            or entered at an interactive prompt.")]
  Set(auth::SetArgs),

  /// Remove the credentials stored for a registry
  #[command(alias = "rm")]
  Remove(auth::RemoveArgs),

  /// Rewrite the configuration in another format
  #[command(long_about = "Rewrites the loaded configuration in the chosen format.\n\n\
            Migrating to the current format writes config.json next to the legacy\n\
            .dockercfg; config.json takes precedence from then on.")]
  Migrate(migrate::MigrateArgs),

  /// Manage auxiliary preferences such as psFormat
  Pref(pref::PrefArgs),
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  apply_color_mode(cli.colors);

  let location = match cli.config {
    Some(path) => path,
    None => default_config_dirs()
      .context("Failed to determine the configuration directory")?
      .config_dir()
      .to_path_buf(),
  };
  tracing::debug!("Using configuration location {}", location.display());

  match cli.command {
    Commands::Path => handle_path_command(&location),
    Commands::Show => handle_show_command(&location),
    Commands::Get(args) => auth::handle_get_command(&location, args),
    Commands::Set(args) => auth::handle_set_command(&location, args),
    Commands::Remove(args) => auth::handle_remove_command(&location, args),
    Commands::Migrate(args) => migrate::handle_migrate_command(&location, args),
    Commands::Pref(args) => pref::handle_pref_command(&location, args),
  }
}

/// Load the configuration at `location`, which may be a directory or a file
pub(crate) fn load_config(location: &Path) -> Result<ConfigFile> {
  regcfg_core::load(location).with_context(|| format!("Failed to load configuration from {}", location.display()))
}

/// Save `config`, attaching the destination to any error
pub(crate) fn save_config(config: &ConfigFile) -> Result<()> {
  config
    .save()
    .with_context(|| format!("Failed to save configuration to {}", config.filename().display()))
}

fn handle_path_command(location: &Path) -> Result<()> {
  let config = load_config(location)?;
  let filename = config.filename();

  println!("{}", format_path(&filename.display().to_string()));
  if filename.exists() {
    print_info(&format!("Format: {}", config.version()));
  } else {
    print_info("File does not exist yet; it will be created on the first save.");
  }

  Ok(())
}

fn handle_show_command(location: &Path) -> Result<()> {
  let config = load_config(location)?;

  print_header("Configuration");
  println!("  File:   {}", format_path(&config.filename().display().to_string()));
  println!("  Format: {}", config.version());

  print_header("Registries");
  if config.auths().is_empty() {
    print_info("No credentials stored.");
  }
  for (server, entry) in config.auths() {
    let username = if entry.username.is_empty() {
      "(anonymous)"
    } else {
      entry.username.as_str()
    };
    if entry.email.is_empty() {
      println!("  {}  {}", format_server(server), username);
    } else {
      println!("  {}  {} <{}>", format_server(server), username, entry.email);
    }
  }

  if !config.preferences().is_empty() {
    print_header("Preferences");
    for key in config.preferences().keys() {
      println!("  {key}");
    }
  }

  Ok(())
}
