//! Resource map lookup and loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ResourceEntry;

/// Immutable mapping from resource id to its declared entry.
///
/// Built once before any resolution and never mutated afterwards, so it can
/// be shared freely across concurrent resolution calls.
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
  entries: BTreeMap<String, ResourceEntry>,
}

/// Errors that can occur while loading a resource map from disk.
#[derive(Debug)]
pub enum ResourceMapError {
  /// Failed to read the map file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON map file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl ResourceMap {
  /// Build a map from already-parsed entries.
  pub fn new(entries: BTreeMap<String, ResourceEntry>) -> Self {
    Self { entries }
  }

  /// Parse a map from its JSON wire form: one object keyed by resource id.
  pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
    Ok(Self::new(serde_json::from_str(json)?))
  }

  /// Read a map from a JSON file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResourceMapError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| ResourceMapError::Io {
      path: path.to_path_buf(),
      source: err,
    })?;

    let entries: BTreeMap<String, ResourceEntry> =
      serde_json::from_str(&contents).map_err(|err| ResourceMapError::Parse {
        path: path.to_path_buf(),
        source: err,
      })?;
    tracing::debug!(
      path = %path.display(),
      entries = entries.len(),
      "loaded resource map"
    );
    Ok(Self::new(entries))
  }

  /// Look up the entry declared for `id`.
  pub fn get(&self, id: &str) -> Option<&ResourceEntry> {
    self.entries.get(id)
  }

  /// Whether the map declares an entry for `id`.
  pub fn contains(&self, id: &str) -> bool {
    self.entries.contains_key(id)
  }

  /// Number of declared entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Whether the map declares no entries at all.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<(String, ResourceEntry)> for ResourceMap {
  fn from_iter<I: IntoIterator<Item = (String, ResourceEntry)>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl std::fmt::Display for ResourceMapError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ResourceMapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}
