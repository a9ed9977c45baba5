//! # Credential Commands
//!
//! `get`, `set` and `remove` for individual registry entries.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use dialoguer::Password;
use regcfg_core::AuthConfig;

use super::{load_config, save_config};
use crate::utils::output::{format_server, print_success, print_warning};

/// Arguments for `get`
#[derive(Args)]
pub struct GetArgs {
  /// Registry server address
  pub server: String,
}

/// Arguments for `set`
#[derive(Args)]
pub struct SetArgs {
  /// Registry server address
  pub server: String,

  /// Username to store
  #[arg(short, long)]
  pub username: String,

  /// Password to store
  #[arg(short, long, conflicts_with = "password_stdin")]
  pub password: Option<String>,

  /// Read the password from standard input
  #[arg(long)]
  pub password_stdin: bool,

  /// Email to store; keeps the existing email when omitted
  #[arg(short, long)]
  pub email: Option<String>,
}

/// Arguments for `remove`
#[derive(Args)]
pub struct RemoveArgs {
  /// Registry server address
  pub server: String,
}

pub(crate) fn handle_get_command(location: &Path, args: GetArgs) -> Result<()> {
  let config = load_config(location)?;

  let Some(entry) = config.auth(&args.server) else {
    bail!("No credentials stored for {}", args.server);
  };

  println!("Server:   {}", format_server(&entry.server_address));
  println!("Username: {}", entry.username);
  if !entry.email.is_empty() {
    println!("Email:    {}", entry.email);
  }

  Ok(())
}

pub(crate) fn handle_set_command(location: &Path, args: SetArgs) -> Result<()> {
  let mut config = load_config(location)?;

  let password = match (args.password, args.password_stdin) {
    (Some(password), _) => password,
    (None, true) => read_password_from_stdin()?,
    (None, false) => Password::new()
      .with_prompt(format!("Password for {}", args.server))
      .interact()
      .context("Failed to read password")?,
  };

  let email = match args.email {
    Some(email) => email,
    None => config
      .auth(&args.server)
      .map(|existing| existing.email.clone())
      .unwrap_or_default(),
  };

  let entry = AuthConfig::new(&args.server, args.username, password).with_email(email);
  let replaced = config.set_auth(entry).is_some();
  save_config(&config)?;

  if replaced {
    print_success(&format!("Updated credentials for {}", format_server(&args.server)));
  } else {
    print_success(&format!("Stored credentials for {}", format_server(&args.server)));
  }

  Ok(())
}

pub(crate) fn handle_remove_command(location: &Path, args: RemoveArgs) -> Result<()> {
  let mut config = load_config(location)?;

  if config.remove_auth(&args.server).is_none() {
    print_warning(&format!("No credentials stored for {}", format_server(&args.server)));
    return Ok(());
  }

  save_config(&config)?;
  print_success(&format!("Removed credentials for {}", format_server(&args.server)));
  Ok(())
}

fn read_password_from_stdin() -> Result<String> {
  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("Failed to read password from stdin")?;

  let password = input.trim_end_matches(['\r', '\n']);
  if password.is_empty() {
    bail!("No password provided on stdin");
  }
  Ok(password.to_string())
}
