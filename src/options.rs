//! Resolver configuration: bootstrap loader and combo batching policy.

use std::fs;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_OPTIONS_FILE: &str = "resolver.config.json";

/// Default client-side loader injected ahead of asynchronous resources.
pub const DEFAULT_BOOTSTRAP_LOADER: &str = "static/loader.js";

/// Top-level resolver configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
  /// URL of the client loader script prepended to `headJs` whenever a
  /// non-pagelet resource carries asynchronous modules.
  pub bootstrap_loader: String,
  /// Combo batching policy; `None` disables batching entirely.
  pub combo: Option<ComboOptions>,
}

impl Default for ResolverOptions {
  fn default() -> Self {
    Self {
      bootstrap_loader: DEFAULT_BOOTSTRAP_LOADER.to_string(),
      combo: None,
    }
  }
}

impl ResolverOptions {
  /// Load options from `resolver.config.json` in the given directory,
  /// falling back to defaults when the file is absent or malformed.
  pub fn discover(dir: &Path) -> Self {
    Self::from_path(&dir.join(DEFAULT_OPTIONS_FILE)).unwrap_or_default()
  }

  /// Read options from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }
}

/// Policy for folding eligible URLs into combined-request URLs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComboOptions {
  /// When set, package wrapper URLs are never folded into combo groups.
  #[serde(rename = "onlyUnPackFile")]
  pub only_unpack_file: bool,
  /// Budget on the accumulated file-name length of one combo group.
  pub max_url_length: usize,
  /// Open token and separator token, in that order. Rendered as
  /// `<base><open><name><separator><name>...`.
  pub syntax: (String, String),
}

impl Default for ComboOptions {
  fn default() -> Self {
    Self {
      only_unpack_file: false,
      max_url_length: 2000,
      syntax: ("??".to_string(), ",".to_string()),
    }
  }
}
