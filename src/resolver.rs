//! Top-level entry point assembling a full resolution result.

use crate::combo::batch_page_urls;
use crate::error::ResolveError;
use crate::flatten::flatten_entry;
use crate::manifest::build_require_manifest;
use crate::map::ResourceMap;
use crate::models::ResourceInfo;
use crate::options::ResolverOptions;
use crate::session::ResolveSession;

/// Resolves resource ids against an immutable map.
///
/// Constructed once and shared freely; every `resource_info` call allocates
/// its own session, so concurrent calls never observe each other's state.
#[derive(Debug)]
pub struct AssetResolver {
  map: ResourceMap,
  options: ResolverOptions,
}

impl AssetResolver {
  /// Build a resolver over a finished map and configuration.
  pub fn new(map: ResourceMap, options: ResolverOptions) -> Self {
    Self { map, options }
  }

  /// The resource map this resolver reads from.
  pub fn map(&self) -> &ResourceMap {
    &self.map
  }

  /// Resolve one resource id into its injectable URL lists and loader
  /// manifest.
  ///
  /// Pagelets defer their entire eager payload to asynchronous loading and
  /// report the deferred ids; every other resource with async modules gets
  /// the bootstrap loader prepended to its head scripts.
  pub fn resource_info(&self, id: &str) -> Result<ResourceInfo, ResolveError> {
    let mut view = flatten_entry(&self.map, id)?;

    let mut pagelet_asyncs = None;
    if view.is_pagelet {
      let mut staged = std::mem::take(&mut view.head_js);
      staged.append(&mut view.bottom_js);
      staged.append(&mut view.css);
      view.asyncs.extend(staged.iter().cloned());
      pagelet_asyncs = Some(staged);
    } else if !view.asyncs.is_empty() {
      view
        .head_js
        .insert(0, self.options.bootstrap_loader.clone());
    }

    let mut session = ResolveSession::new();
    let urls = batch_page_urls(&self.map, &view, self.options.combo.as_ref(), &mut session)?;
    let requires = build_require_manifest(&self.map, &view, &mut session)?;
    let fallback_ids = session.fallback_ids();

    tracing::debug!(
      id,
      head = urls.head_js.len(),
      bottom = urls.bottom_js.len(),
      css = urls.css.len(),
      asyncs = requires.map.len(),
      fallbacks = fallback_ids.len(),
      "resolved resource"
    );

    Ok(ResourceInfo {
      urls,
      requires,
      pagelet_asyncs,
      fallback_ids,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::AssetResolver;
  use crate::map::ResourceMap;
  use crate::options::{ComboOptions, ResolverOptions, DEFAULT_BOOTSTRAP_LOADER};

  fn resolver_from(json: &str, options: ResolverOptions) -> AssetResolver {
    let map = ResourceMap::from_json_str(json).expect("test map should parse");
    AssetResolver::new(map, options)
  }

  #[test]
  fn pagelets_defer_their_entire_payload() {
    let resolver = resolver_from(
      r#"{
        "cart": {
          "isPagelet": true,
          "headJs": ["cart/js"],
          "css": ["cart/css"]
        },
        "cart/js": {"url": "/cart.js"},
        "cart/css": {"url": "/cart.css", "type": "css"}
      }"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("cart").unwrap();
    assert!(info.urls.head_js.is_empty());
    assert!(info.urls.css.is_empty());
    assert_eq!(info.pagelet_asyncs.as_deref(), Some(&[
      "cart/js".to_string(),
      "cart/css".to_string()
    ] as &[_]));
    assert!(info.requires.map.contains_key("/cart.js"));
    assert!(info.requires.map.contains_key("/cart.css"));
  }

  #[test]
  fn async_resources_inject_the_bootstrap_loader() {
    let resolver = resolver_from(
      r#"{
        "page": {"asyncs": ["lazy"]},
        "lazy": {"url": "/lazy.js"}
      }"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("page").unwrap();
    assert_eq!(info.urls.head_js, vec![DEFAULT_BOOTSTRAP_LOADER]);
    assert!(info.pagelet_asyncs.is_none());
  }

  #[test]
  fn loader_appears_once_even_when_declared_explicitly() {
    let resolver = resolver_from(
      r#"{
        "page": {"headJs": ["loader"], "asyncs": ["lazy"]},
        "loader": {"url": "static/loader.js"},
        "lazy": {"url": "/lazy.js"}
      }"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("page").unwrap();
    assert_eq!(info.urls.head_js, vec![DEFAULT_BOOTSTRAP_LOADER]);
  }

  #[test]
  fn pagelets_skip_loader_injection() {
    let resolver = resolver_from(
      r#"{
        "panel": {"isPagelet": true, "headJs": ["panel/js"]},
        "panel/js": {"url": "/panel.js"}
      }"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("panel").unwrap();
    assert!(info.urls.head_js.is_empty());
  }

  #[test]
  fn end_to_end_resolution_with_combo_batching() {
    let options = ResolverOptions {
      combo: Some(ComboOptions::default()),
      ..ResolverOptions::default()
    };
    let resolver = resolver_from(
      r#"{
        "pages/home": {
          "refs": ["common"],
          "headJs": ["home/main"],
          "css": ["home/skin"]
        },
        "common": {"headJs": ["lib/base"], "css": ["lib/reset"]},
        "lib/base": {"url": "/lib/base.js"},
        "home/main": {"url": "/lib/main.js", "deps": ["lib/base"]},
        "lib/reset": {"url": "/css/reset.css", "type": "css"},
        "home/skin": {"url": "/css/skin.css", "type": "css"}
      }"#,
      options,
    );

    let info = resolver.resource_info("pages/home").unwrap();
    assert_eq!(info.urls.head_js, vec!["/lib??base.js,main.js"]);
    assert_eq!(info.urls.css, vec!["/css??reset.css,skin.css"]);
    assert!(info.fallback_ids.is_empty());
  }

  #[test]
  fn fallback_ids_surface_on_the_result() {
    let resolver = resolver_from(
      r#"{"page": {"headJs": ["ghost"]}}"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("page").unwrap();
    assert_eq!(info.urls.head_js, vec!["ghost"]);
    assert_eq!(info.fallback_ids, vec!["ghost"]);
  }

  #[test]
  fn results_serialize_with_wire_field_names() {
    let resolver = resolver_from(
      r#"{
        "panel": {"isPagelet": true, "headJs": ["panel/js"]},
        "panel/js": {"url": "/panel.js"}
      }"#,
      ResolverOptions::default(),
    );

    let info = resolver.resource_info("panel").unwrap();
    let json = serde_json::to_value(&info).expect("result should serialize");
    assert!(json.get("threeUrls").is_some());
    assert!(json["threeUrls"].get("headJs").is_some());
    assert!(json["threeUrls"].get("bottomJs").is_some());
    assert_eq!(json["pageletAsyncs"], serde_json::json!(["panel/js"]));
    assert!(json.get("fallbackIds").is_none(), "empty fallback list is omitted");
  }

  #[test]
  fn missing_root_id_degrades_to_an_empty_result() {
    let resolver = resolver_from(r#"{}"#, ResolverOptions::default());

    let info = resolver.resource_info("nowhere").unwrap();
    assert!(info.urls.head_js.is_empty());
    assert!(info.requires.map.is_empty());
    assert!(info.pagelet_asyncs.is_none());
  }
}
