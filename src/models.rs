//! Data structures describing resource entries and resolved page assets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One declarable unit of script, stylesheet, or package in the resource map.
///
/// Entries come straight from the map JSON; every field is optional there and
/// defaults to empty here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceEntry {
  /// Concrete asset location. Absent for entries that resolve through a
  /// package or that only group other entries.
  pub url: Option<String>,
  /// Resource tag such as `"css"`, used to spot stylesheets that arrive
  /// through script dependency lists.
  #[serde(rename = "type")]
  pub kind: Option<String>,
  /// Entries whose script/style/dependency/async lists this entry inherits,
  /// in declaration order.
  pub refs: Vec<String>,
  /// Package entry whose URL supersedes this entry's own `url`.
  pub pkg: Option<String>,
  /// Ids resolved and loaded synchronously ahead of this entry.
  pub deps: Vec<String>,
  /// Ids resolved lazily at runtime through the client loader.
  pub asyncs: Vec<String>,
  /// Script ids injected into the document head.
  pub head_js: Vec<String>,
  /// Script ids injected at the bottom of the document.
  pub bottom_js: Vec<String>,
  /// Stylesheet ids injected into the document head.
  pub css: Vec<String>,
  /// Marks a package wrapper entry.
  pub is_pkg: bool,
  /// Marks a pagelet whose eager assets defer to asynchronous loading.
  pub is_pagelet: bool,
  /// Wrapped packages re-surface members that were already required on their
  /// own. Upstream map data spells the key `useJsWraper`; accept it verbatim.
  #[serde(rename = "useJsWraper")]
  pub use_js_wrapper: bool,
  /// Member ids bundled inside this package entry.
  pub has: Vec<String>,
}

/// View of an entry after folding in its `refs` chain.
///
/// Only the five concatenable list attributes survive inheritance; `is_pagelet`
/// always reflects the entry's own flag.
#[derive(Debug, Clone, Default)]
pub struct FlattenedEntry {
  /// Head script ids, inherited lists ahead of the entry's own.
  pub head_js: Vec<String>,
  /// Bottom script ids, inherited lists ahead of the entry's own.
  pub bottom_js: Vec<String>,
  /// Stylesheet ids, inherited lists ahead of the entry's own.
  pub css: Vec<String>,
  /// Asynchronous module ids, inherited lists ahead of the entry's own.
  pub asyncs: Vec<String>,
  /// Synchronous dependency ids, inherited lists ahead of the entry's own.
  pub deps: Vec<String>,
  /// Pagelet flag from the entry's own attributes.
  pub is_pagelet: bool,
}

/// Final URL lists for the three injected resource kinds.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUrls {
  /// URLs (bare or combo) for the document head scripts.
  pub head_js: Vec<String>,
  /// URLs for the bottom-of-document scripts.
  pub bottom_js: Vec<String>,
  /// Stylesheet URLs, including stylesheets lifted out of script lists.
  pub css: Vec<String>,
}

/// Manifest the client loader consumes to fetch asynchronous modules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequireManifest {
  /// Resolved URL to the module ids that become available once it loads.
  pub map: BTreeMap<String, Vec<String>>,
  /// Module id to the dependency ids it still requires at load time.
  pub deps: BTreeMap<String, Vec<String>>,
}

/// Complete resolution result for one resource id.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceInfo {
  /// URL lists for the three injected resource kinds.
  #[serde(rename = "threeUrls")]
  pub urls: PageUrls,
  /// Async-module manifest for the client loader.
  pub requires: RequireManifest,
  /// Ids whose assets were deferred to asynchronous loading; present only
  /// when the resolved resource is a pagelet.
  #[serde(rename = "pageletAsyncs", skip_serializing_if = "Option::is_none")]
  pub pagelet_asyncs: Option<Vec<String>>,
  /// Ids that stood in as their own URL because the map has no entry (or no
  /// usable URL) for them.
  #[serde(rename = "fallbackIds", skip_serializing_if = "Vec::is_empty")]
  pub fallback_ids: Vec<String>,
}
