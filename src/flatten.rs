//! Inheritance flattening over an entry's `refs` chain.

use crate::error::ResolveError;
use crate::map::ResourceMap;
use crate::models::FlattenedEntry;

/// Fold an entry together with the entries its `refs` chain names.
///
/// Refs resolve depth-first in declaration order; each recursive view is
/// restricted to the five concatenable list attributes before folding, so
/// scalar flags never travel through inheritance. The entry's own lists
/// append after the inherited ones, and its own `is_pagelet` flag is taken
/// verbatim. A missing id yields an empty view rather than an error.
pub fn flatten_entry(map: &ResourceMap, id: &str) -> Result<FlattenedEntry, ResolveError> {
  let mut flattening = Vec::new();
  flatten_inner(map, id, &mut flattening)
}

fn flatten_inner(
  map: &ResourceMap,
  id: &str,
  flattening: &mut Vec<String>,
) -> Result<FlattenedEntry, ResolveError> {
  if flattening.iter().any(|seen| seen == id) {
    let mut chain = flattening.clone();
    chain.push(id.to_string());
    return Err(ResolveError::RefsCycle { chain });
  }

  let Some(entry) = map.get(id) else {
    return Ok(FlattenedEntry::default());
  };

  flattening.push(id.to_string());
  let mut view = FlattenedEntry::default();
  for ref_id in &entry.refs {
    let inherited = flatten_inner(map, ref_id, flattening)?;
    view.head_js.extend(inherited.head_js);
    view.bottom_js.extend(inherited.bottom_js);
    view.css.extend(inherited.css);
    view.asyncs.extend(inherited.asyncs);
    view.deps.extend(inherited.deps);
  }
  flattening.pop();

  view.head_js.extend(entry.head_js.iter().cloned());
  view.bottom_js.extend(entry.bottom_js.iter().cloned());
  view.css.extend(entry.css.iter().cloned());
  view.asyncs.extend(entry.asyncs.iter().cloned());
  view.deps.extend(entry.deps.iter().cloned());
  view.is_pagelet = entry.is_pagelet;

  Ok(view)
}

#[cfg(test)]
mod tests {
  use super::flatten_entry;
  use crate::map::ResourceMap;

  fn map_from(json: &str) -> ResourceMap {
    ResourceMap::from_json_str(json).expect("test map should parse")
  }

  #[test]
  fn own_lists_append_after_inherited_lists() {
    let map = map_from(
      r#"{
        "a": {"headJs": ["a/one", "a/two"]},
        "b": {"headJs": ["b/one"]},
        "page": {"refs": ["a", "b"], "headJs": ["page/own"]}
      }"#,
    );

    let view = flatten_entry(&map, "page").unwrap();
    assert_eq!(view.head_js, vec!["a/one", "a/two", "b/one", "page/own"]);
  }

  #[test]
  fn refs_resolve_transitively() {
    let map = map_from(
      r#"{
        "base": {"css": ["base/reset"]},
        "theme": {"refs": ["base"], "css": ["theme/dark"]},
        "page": {"refs": ["theme"], "css": ["page/layout"]}
      }"#,
    );

    let view = flatten_entry(&map, "page").unwrap();
    assert_eq!(view.css, vec!["base/reset", "theme/dark", "page/layout"]);
  }

  #[test]
  fn pagelet_flag_never_inherits() {
    let map = map_from(
      r#"{
        "widget": {"isPagelet": true, "headJs": ["widget/js"]},
        "page": {"refs": ["widget"]}
      }"#,
    );

    let view = flatten_entry(&map, "page").unwrap();
    assert!(!view.is_pagelet);
    assert_eq!(view.head_js, vec!["widget/js"]);
  }

  #[test]
  fn missing_id_yields_empty_view() {
    let map = map_from(r#"{"a": {"refs": ["ghost"], "deps": ["lib"]}}"#);

    let view = flatten_entry(&map, "a").unwrap();
    assert_eq!(view.deps, vec!["lib"]);
    assert!(view.head_js.is_empty());
  }

  #[test]
  fn refs_cycle_fails_with_chain() {
    let map = map_from(r#"{"a": {"refs": ["b"]}, "b": {"refs": ["a"]}}"#);

    let err = flatten_entry(&map, "a").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("refs cycle"), "unexpected error: {message}");
    assert!(message.contains("a -> b -> a"), "unexpected chain: {message}");
  }
}
