use regcfg_core::consts::DEFAULT_INDEX_SERVER;
use regcfg_core::{AuthConfig, ConfigDirs, ConfigError, ConfigFile, FormatVersion, load, load_dir};
use regcfg_test_utils::{CURRENT_FILE, ConfigDirTestGuard, LEGACY_FILE};

const OLD_JSON: &str = r#"{"https://index.docker.io/v1/":{"auth":"am9lam9lOmhlbGxv","email":"user@example.com"}}"#;
const NEW_JSON: &str =
  r#" { "auths": { "https://index.docker.io/v1/": { "auth": "am9lam9lOmhlbGxv", "email": "user@example.com" } } }"#;
const PS_FORMAT_JSON: &str = r#"{
		"auths": { "https://index.docker.io/v1/": { "auth": "am9lam9lOmhlbGxv", "email": "user@example.com" } },
		"psFormat": "table {{.ID}}\\t{{.Label \"com.docker.label.cpu\"}}"
}"#;

/// Save in the legacy format and make sure no `auths` wrapper is written
fn save_and_validate_old_format(config: &mut ConfigFile, guard: &ConfigDirTestGuard) -> String {
  config.set_version(FormatVersion::Legacy);
  config.save().expect("Failed to save");

  let content = guard.read(LEGACY_FILE).expect("Failed to read saved file");
  assert!(!content.contains(r#""auths":"#), "Should have saved in old form: {content}");
  content
}

/// Save in the current format and make sure the `auths` wrapper is written
fn save_and_validate_new_format(config: &mut ConfigFile, guard: &ConfigDirTestGuard) -> String {
  config.set_version(FormatVersion::Current);
  config.save().expect("Failed to save");

  let content = guard.read(CURRENT_FILE).expect("Failed to read saved file");
  assert!(content.contains(r#""auths":"#), "Should have saved in new form: {content}");
  content
}

fn assert_joejoe(config: &ConfigFile) {
  let entry = config.auth(DEFAULT_INDEX_SERVER).expect("Missing default registry entry");
  assert_eq!(entry.username, "joejoe");
  assert_eq!(entry.password, "hello");
  assert_eq!(entry.email, "user@example.com");
}

#[test]
fn test_empty_config_dir() {
  let guard = ConfigDirTestGuard::new();

  let mut config = ConfigDirs::new(guard.path()).load().unwrap();
  assert_eq!(config.filename(), guard.path().join(CURRENT_FILE));

  save_and_validate_new_format(&mut config, &guard);
}

#[test]
fn test_missing_dir_then_save_creates_it() {
  let guard = ConfigDirTestGuard::nested(".docker");

  let mut config = load(guard.path()).unwrap();
  assert!(config.auths().is_empty());

  save_and_validate_new_format(&mut config, &guard);
}

#[test]
fn test_empty_current_file() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current("");

  let err = load(guard.path()).unwrap_err();
  assert!(matches!(err, ConfigError::EmptyConfigFile { format: FormatVersion::Current, .. }));
}

#[test]
fn test_empty_legacy_file() {
  let guard = ConfigDirTestGuard::new();
  guard.write_legacy("");

  let err = load(guard.path()).unwrap_err();
  assert!(matches!(err, ConfigError::EmptyConfigFile { format: FormatVersion::Legacy, .. }));
  assert!(err.to_string().starts_with("legacy configuration file is empty"));
}

#[test]
fn test_empty_json() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current("{}");

  let mut config = load(guard.path()).unwrap();
  assert!(config.auths().is_empty());

  save_and_validate_new_format(&mut config, &guard);
}

#[test]
fn test_old_invalid_auth() {
  let invalids = [
    ("username = test", "The Auth config file is empty"),
    ("username\npassword\nemail", "Invalid Auth config file"),
    ("username = test\nemail", "Invalid auth configuration file"),
    ("username = am9lam9lOmhlbGxv\nemail", "Invalid Auth config file"),
  ];

  let guard = ConfigDirTestGuard::new();
  for (content, expected) in invalids {
    guard.write_legacy(content);

    let err = load(guard.path()).expect_err("Should have failed");
    assert_eq!(err.to_string(), expected, "content: {content:?}");
  }
}

#[test]
fn test_old_valid_auth() {
  let guard = ConfigDirTestGuard::new();
  guard.write_legacy("username = am9lam9lOmhlbGxv\nemail = user@example.com");

  let mut config = load(guard.path()).unwrap();
  assert_eq!(config.version(), FormatVersion::Legacy);
  assert_joejoe(&config);

  let content = save_and_validate_old_format(&mut config, &guard);
  assert!(content.contains("user@example.com"));

  let content = save_and_validate_new_format(&mut config, &guard);
  assert!(content.contains("user@example.com"));
}

#[test]
fn test_old_json_invalid() {
  let guard = ConfigDirTestGuard::new();
  guard.write_legacy(r#"{"https://index.docker.io/v1/":{"auth":"test","email":"user@example.com"}}"#);

  let err = load(guard.path()).unwrap_err();
  assert!(matches!(err, ConfigError::InvalidAuthConfig));
}

#[test]
fn test_old_json() {
  let guard = ConfigDirTestGuard::new();
  guard.write_legacy(OLD_JSON);

  let mut config = load(guard.path()).unwrap();
  assert_joejoe(&config);

  let content = save_and_validate_old_format(&mut config, &guard);
  assert!(content.contains("user@example.com"));

  let content = save_and_validate_new_format(&mut config, &guard);
  assert!(content.contains("user@example.com"));
}

#[test]
fn test_new_json() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current(NEW_JSON);

  let mut config = load(guard.path()).unwrap();
  assert_joejoe(&config);

  let content = save_and_validate_new_format(&mut config, &guard);
  assert!(content.contains("user@example.com"));
  assert!(!content.contains("hello"), "Plaintext password leaked: {content}");
}

#[test]
fn test_json_with_ps_format() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current(PS_FORMAT_JSON);

  let mut config = load(guard.path()).unwrap();
  assert_eq!(
    config.ps_format(),
    Some(r#"table {{.ID}}\t{{.Label "com.docker.label.cpu"}}"#)
  );

  let content = save_and_validate_new_format(&mut config, &guard);
  assert!(content.contains(r#""psFormat":"#));
  assert!(content.contains("{{.ID}}"));

  let reloaded = load(guard.path()).unwrap();
  assert_eq!(reloaded.ps_format(), config.ps_format());
}

#[test]
fn test_migration_preserves_credentials() {
  let guard = ConfigDirTestGuard::new();
  guard.write_legacy(OLD_JSON);

  let mut legacy = load(guard.path()).unwrap();
  legacy.set_auth(AuthConfig::new("registry.example.test", "second", "pa:ss").with_email("s@example.test"));
  let before = legacy.auths().clone();

  save_and_validate_new_format(&mut legacy, &guard);

  // config.json now exists and takes precedence over .dockercfg
  let migrated = load(guard.path()).unwrap();
  assert_eq!(migrated.version(), FormatVersion::Current);
  assert_eq!(migrated.auths(), &before);
}

#[test]
fn test_save_does_not_change_in_memory_credentials() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current(NEW_JSON);

  let mut config = load(guard.path()).unwrap();
  let before = config.clone();

  save_and_validate_new_format(&mut config, &guard);
  save_and_validate_old_format(&mut config, &guard);
  config.set_version(FormatVersion::Current);

  assert_eq!(config, before);
  assert_joejoe(&config);
}

#[test]
fn test_reader_without_file() {
  let config = ConfigFile::from_reader("", FormatVersion::Current, NEW_JSON.as_bytes()).unwrap();
  assert_joejoe(&config);

  let config = ConfigFile::from_reader("", FormatVersion::Legacy, OLD_JSON.as_bytes()).unwrap();
  assert_joejoe(&config);

  let config = ConfigFile::from_reader("", FormatVersion::Current, PS_FORMAT_JSON.as_bytes()).unwrap();
  assert!(config.ps_format().is_some());
}

#[test]
fn test_write_to_without_file() {
  let mut config = ConfigFile::from_reader("", FormatVersion::Current, PS_FORMAT_JSON.as_bytes()).unwrap();

  let mut buf = Vec::new();
  config.write_to(&mut buf).unwrap();
  let content = String::from_utf8(buf).unwrap();
  assert!(content.contains(r#""auths":"#));
  assert!(content.contains("user@example.com"));

  config.set_version(FormatVersion::Legacy);
  let mut buf = Vec::new();
  config.write_to(&mut buf).unwrap();
  let content = String::from_utf8(buf).unwrap();
  assert!(!content.contains(r#""auths":"#));
  assert!(!content.contains("psFormat"));
}

#[test]
fn test_load_dir_with_explicit_dirs() {
  let guard = ConfigDirTestGuard::new();
  guard.write_current(NEW_JSON);

  let dirs = ConfigDirs::new(guard.path());
  assert_eq!(dirs.load().unwrap(), load_dir(guard.path()).unwrap());
}
