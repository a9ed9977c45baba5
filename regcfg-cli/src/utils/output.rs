//! # Output Formatting
//!
//! Colored, emoji-prefixed output helpers for user-facing messages. Colors
//! follow the `--colors` flag; in `auto` mode they are only emitted when the
//! stream is a terminal.

use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

/// Apply the color mode to all subsequent output
pub fn apply_color_mode(mode: ColorMode) {
  match mode {
    ColorMode::Yes | ColorMode::Always => owo_colors::set_override(true),
    ColorMode::No | ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => owo_colors::unset_override(),
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

fn styled(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", styled(&check, Stream::Stdout, Style::new().green().bold()), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", styled(&cross, Stream::Stderr, Style::new().red().bold()), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", styled(&warning, Stream::Stdout, Style::new().yellow().bold()), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", styled(&info, Stream::Stdout, Style::new().blue().bold()), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", styled(header, Stream::Stdout, Style::new().blue().bold()));
}

/// Format a filesystem path
pub fn format_path(path: &str) -> String {
  styled(path, Stream::Stdout, Style::new().bright_green())
}

/// Format a registry server address
pub fn format_server(server: &str) -> String {
  styled(server, Stream::Stdout, Style::new().bright_cyan().bold())
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  styled(cmd, Stream::Stdout, Style::new().purple())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    // Test with a known emoji
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    // Test with unknown emoji
    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_functions_keep_text() {
    assert!(format_path("/home/user/.docker/config.json").contains("config.json"));
    assert!(format_server("registry.example.test").contains("registry.example.test"));
    assert!(format_command("regcfg show").contains("regcfg show"));
  }
}
