//! The `requires` manifest consumed by the client-side loader.

use crate::error::ResolveError;
use crate::map::ResourceMap;
use crate::models::{FlattenedEntry, RequireManifest};
use crate::resolve::resolve_url_map;
use crate::session::ResolveSession;

/// Build the async-module manifest for a flattened view.
///
/// `map` tells the loader which logical ids become available once a URL has
/// loaded (several ids can share one physical module URL). `deps` carries
/// each async id's declared dependency ids verbatim; the loader resolves
/// those further at load time. Unknown async ids drop out of the manifest.
pub fn build_require_manifest(
  map: &ResourceMap,
  view: &FlattenedEntry,
  session: &mut ResolveSession,
) -> Result<RequireManifest, ResolveError> {
  let resolved = resolve_url_map(map, &view.asyncs, false, session)?;
  let mut manifest = RequireManifest::default();

  for (id, url) in resolved {
    if let Some(entry) = map.get(&id) {
      if !entry.deps.is_empty() {
        manifest.deps.insert(id.clone(), entry.deps.clone());
      }
    }
    manifest.map.entry(url).or_default().push(id);
  }

  Ok(manifest)
}

#[cfg(test)]
mod tests {
  use super::build_require_manifest;
  use crate::flatten::flatten_entry;
  use crate::map::ResourceMap;
  use crate::session::ResolveSession;

  fn map_from(json: &str) -> ResourceMap {
    ResourceMap::from_json_str(json).expect("test map should parse")
  }

  #[test]
  fn ids_group_by_resolved_url() {
    let map = map_from(
      r#"{
        "page": {"asyncs": ["widgets/nav", "widgets/tab", "charts"]},
        "widgets/nav": {"pkg": "pkg/widgets"},
        "widgets/tab": {"pkg": "pkg/widgets"},
        "pkg/widgets": {"url": "/pkg/widgets.js", "isPkg": true},
        "charts": {"url": "/charts.js"}
      }"#,
    );
    let view = flatten_entry(&map, "page").unwrap();
    let mut session = ResolveSession::new();

    let manifest = build_require_manifest(&map, &view, &mut session).unwrap();
    assert_eq!(manifest.map.get("/pkg/widgets.js").unwrap(), &vec![
      "widgets/nav".to_string(),
      "widgets/tab".to_string()
    ]);
    assert_eq!(manifest.map.get("/charts.js").unwrap(), &vec![
      "charts".to_string()
    ]);
  }

  #[test]
  fn declared_deps_are_recorded_unresolved() {
    let map = map_from(
      r#"{
        "page": {"asyncs": ["editor"]},
        "editor": {"url": "/editor.js", "deps": ["lib/dom", "lib/event"]},
        "lib/dom": {"url": "/lib/dom.js"},
        "lib/event": {"url": "/lib/event.js"}
      }"#,
    );
    let view = flatten_entry(&map, "page").unwrap();
    let mut session = ResolveSession::new();

    let manifest = build_require_manifest(&map, &view, &mut session).unwrap();
    assert_eq!(manifest.deps.get("editor").unwrap(), &vec![
      "lib/dom".to_string(),
      "lib/event".to_string()
    ]);
    assert!(
      manifest.deps.get("lib/dom").is_none(),
      "only ids with declared deps get a deps record"
    );
  }

  #[test]
  fn unknown_async_ids_stay_out_of_the_manifest() {
    let map = map_from(r#"{"page": {"asyncs": ["ghost", "real"]}, "real": {"url": "/real.js"}}"#);
    let view = flatten_entry(&map, "page").unwrap();
    let mut session = ResolveSession::new();

    let manifest = build_require_manifest(&map, &view, &mut session).unwrap();
    assert!(!manifest.map.contains_key("ghost"));
    assert_eq!(session.fallback_ids(), vec!["ghost"]);
  }
}
