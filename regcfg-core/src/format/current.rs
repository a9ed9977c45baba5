//! Current `config.json` format.
//!
//! A top-level object with an `auths` map plus any number of preference
//! fields. Preferences are carried through as opaque JSON values.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use super::{ConfigFormat, FormatVersion, ParsedConfig, RawAuth, decode_entry, encode_entries, to_tab_indented_json};
use crate::config_file::{ConfigFile, Preferences};
use crate::consts::AUTHS_KEY;
use crate::error::Result;

/// Adapter for the current format
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentFormat;

#[derive(Serialize)]
struct CurrentFileOut<'a> {
  auths: BTreeMap<&'a str, RawAuth>,
  #[serde(flatten)]
  preferences: &'a Preferences,
}

impl ConfigFormat for CurrentFormat {
  fn version(&self) -> FormatVersion {
    FormatVersion::Current
  }

  fn parse(&self, data: &[u8]) -> Result<ParsedConfig> {
    let mut fields: Map<String, Value> = serde_json::from_slice(data)?;
    let raw_auths: Option<BTreeMap<String, RawAuth>> = match fields.remove(AUTHS_KEY) {
      Some(value) => serde_json::from_value(value)?,
      None => None,
    };
    let preferences: Preferences = fields.into_iter().collect();

    let mut auths = BTreeMap::new();
    for (server, entry) in raw_auths.unwrap_or_default() {
      let decoded = decode_entry(&server, entry)?;
      auths.insert(server, decoded);
    }
    trace!(
      "Decoded {} auth entries and {} preferences",
      auths.len(),
      preferences.len()
    );

    Ok(ParsedConfig { auths, preferences })
  }

  fn serialize(&self, config: &ConfigFile) -> Result<Vec<u8>> {
    let out = CurrentFileOut {
      auths: encode_entries(config.auths()),
      preferences: config.preferences(),
    };
    to_tab_indented_json(&out)
  }
}
