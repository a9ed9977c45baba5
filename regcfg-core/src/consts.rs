//! Core constants shared across regcfg components.

/// File name of the current (nested `auths`) configuration format.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// File name of the legacy (flat map / plain-text) configuration format.
pub const LEGACY_CONFIG_FILE_NAME: &str = ".dockercfg";

/// Name of the configuration directory inside the user's home directory.
pub const CONFIG_DIR_NAME: &str = ".docker";

/// Environment variable that overrides the configuration directory.
pub const ENV_CONFIG_DIR: &str = "DOCKER_CONFIG";

/// Registry address used for single-entry legacy files that carry no address.
pub const DEFAULT_INDEX_SERVER: &str = "https://index.docker.io/v1/";

/// Top-level key holding the credential map in the current format.
pub const AUTHS_KEY: &str = "auths";

/// Preference key for the `ps` output template.
pub const PS_FORMAT_KEY: &str = "psFormat";

/// Preference key for the `images` output template.
pub const IMAGES_FORMAT_KEY: &str = "imagesFormat";

/// Preference key for the container detach key sequence.
pub const DETACH_KEYS_KEY: &str = "detachKeys";

/// Preference key for extra HTTP headers sent to registries.
pub const HTTP_HEADERS_KEY: &str = "HttpHeaders";
