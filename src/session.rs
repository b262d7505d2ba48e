//! Per-call scratch state threaded through one resolution.

use std::collections::{BTreeMap, BTreeSet};

/// What the resolver learned about a produced URL.
///
/// The batcher reads these records to decide whether a URL is a stylesheet
/// smuggled through a script list and whether it may join a combo group.
#[derive(Debug, Clone)]
pub struct UrlSource {
  /// Id whose resolution materialized this URL. When several member ids
  /// share a package URL, the first materializer's id sticks.
  pub id: String,
  /// The entry's `type` tag, e.g. `"css"`.
  pub kind: Option<String>,
  /// Whether the entry behind this URL is a package wrapper.
  pub is_pkg: bool,
}

/// Transient state for one top-level resolution call.
///
/// Allocated fresh in `resource_info` and dropped at return; nothing here
/// survives across calls, so the resource map stays safely shareable.
#[derive(Debug, Default)]
pub struct ResolveSession {
  url_cache: BTreeMap<String, UrlSource>,
  fallback_ids: BTreeSet<String>,
}

impl ResolveSession {
  /// Fresh session with empty caches.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record the entry attributes behind a produced URL.
  pub fn cache_url(&mut self, url: &str, source: UrlSource) {
    self.url_cache.insert(url.to_string(), source);
  }

  /// Attributes recorded for `url`, if the resolver produced it from a map
  /// entry. Raw-id fallbacks and unknown URLs have no record.
  pub fn cached(&self, url: &str) -> Option<&UrlSource> {
    self.url_cache.get(url)
  }

  /// Note that `id` stood in as its own URL.
  pub fn record_fallback(&mut self, id: &str) {
    self.fallback_ids.insert(id.to_string());
  }

  /// Ids that fell back to raw-id URLs, in sorted order.
  pub fn fallback_ids(&self) -> Vec<String> {
    self.fallback_ids.iter().cloned().collect()
  }
}
