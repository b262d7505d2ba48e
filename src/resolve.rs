//! Recursive, memoized resolution of resource ids into URLs.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::map::ResourceMap;
use crate::session::{ResolveSession, UrlSource};

/// Resolve `ids` into an ordered URL list.
///
/// Dependencies resolve ahead of their dependents, shared ids expand once per
/// invocation, and the returned list keeps the first occurrence of each URL.
/// Unknown ids stand in as their own URL; `include_unknown` controls whether
/// that fallback is memoized like a real resolution.
pub fn resolve_urls(
  map: &ResourceMap,
  ids: &[String],
  include_unknown: bool,
  session: &mut ResolveSession,
) -> Result<Vec<String>, ResolveError> {
  let mut walk = UrlWalk::new(map, include_unknown, session);
  let urls = walk.resolve_list(ids)?;
  Ok(dedup_first(urls))
}

/// Resolve `ids` into an id → URL map instead of an ordered list.
///
/// Unknown ids only appear in the map when `include_unknown` is set; they are
/// still recorded as fallbacks on the session either way.
pub fn resolve_url_map(
  map: &ResourceMap,
  ids: &[String],
  include_unknown: bool,
  session: &mut ResolveSession,
) -> Result<BTreeMap<String, String>, ResolveError> {
  let mut walk = UrlWalk::new(map, include_unknown, session);
  walk.resolve_list(ids)?;
  Ok(walk.founds)
}

/// Drop later duplicates, keeping each URL's first occurrence.
pub(crate) fn dedup_first(urls: Vec<String>) -> Vec<String> {
  let mut seen = std::collections::BTreeSet::new();
  urls
    .into_iter()
    .filter(|url| seen.insert(url.clone()))
    .collect()
}

/// One resolver invocation: fresh visitation maps, shared session caches.
struct UrlWalk<'a> {
  map: &'a ResourceMap,
  include_unknown: bool,
  session: &'a mut ResolveSession,
  founds: BTreeMap<String, String>,
  pkg_founds: BTreeMap<String, String>,
  resolving: Vec<String>,
}

impl<'a> UrlWalk<'a> {
  fn new(map: &'a ResourceMap, include_unknown: bool, session: &'a mut ResolveSession) -> Self {
    Self {
      map,
      include_unknown,
      session,
      founds: BTreeMap::new(),
      pkg_founds: BTreeMap::new(),
      resolving: Vec::new(),
    }
  }

  fn resolve_list(&mut self, ids: &[String]) -> Result<Vec<String>, ResolveError> {
    let map = self.map;
    let mut urls: Vec<String> = Vec::new();

    for id in ids {
      if self.resolving.iter().any(|seen| seen == id) {
        let mut chain = self.resolving.clone();
        chain.push(id.clone());
        return Err(ResolveError::DepsCycle { chain });
      }

      if let Some(url) = self.founds.get(id) {
        // Already resolved this invocation; reuse without re-expanding.
        urls.push(url.clone());
        continue;
      }

      let Some(entry) = map.get(id) else {
        if self.include_unknown {
          self.founds.insert(id.clone(), id.clone());
        }
        self.session.record_fallback(id);
        tracing::debug!(id = %id, "no map entry, raw id stands in as its own url");
        urls.push(id.clone());
        continue;
      };

      let mut materialized_pkg = None;
      let url = if let Some(pkg) = &entry.pkg {
        match self.pkg_founds.get(pkg) {
          Some(found) => found.clone(),
          None => {
            let pkg_entry = map.get(pkg).ok_or_else(|| ResolveError::UnknownPackage {
              id: id.clone(),
              pkg: pkg.clone(),
            })?;
            let pkg_url =
              pkg_entry
                .url
                .clone()
                .ok_or_else(|| ResolveError::PackageUrlMissing {
                  id: id.clone(),
                  pkg: pkg.clone(),
                })?;
            self.pkg_founds.insert(pkg.clone(), pkg_url.clone());
            self.session.cache_url(&pkg_url, UrlSource {
              id: id.clone(),
              kind: pkg_entry.kind.clone(),
              is_pkg: pkg_entry.is_pkg,
            });
            materialized_pkg = Some(pkg_entry);
            pkg_url
          }
        }
      } else if let Some(own) = &entry.url {
        self.session.cache_url(own, UrlSource {
          id: id.clone(),
          kind: entry.kind.clone(),
          is_pkg: entry.is_pkg,
        });
        own.clone()
      } else {
        self.session.record_fallback(id);
        tracing::debug!(id = %id, "entry declares neither url nor pkg, raw id stands in");
        id.clone()
      };

      self.founds.insert(id.clone(), url.clone());
      self.resolving.push(id.clone());

      if !entry.deps.is_empty() {
        urls = self.splice_ahead(&entry.deps, urls)?;
      }
      if !entry.asyncs.is_empty() {
        urls = self.splice_ahead(&entry.asyncs, urls)?;
      }

      if let Some(pkg_entry) = materialized_pkg {
        if pkg_entry.use_js_wrapper {
          // Members already required on their own before the wrapper
          // materialized get their URLs re-surfaced ahead of it. Their URLs
          // sit in `founds` already, so they splice in without re-expansion;
          // `has` routinely lists the id being resolved, which is still on
          // the resolving stack.
          let mut unwrapped: Vec<String> = pkg_entry
            .has
            .iter()
            .filter_map(|member| self.founds.get(member).cloned())
            .collect();
          if !unwrapped.is_empty() {
            unwrapped.append(&mut urls);
            urls = unwrapped;
          }
        }
      }

      self.resolving.pop();
      urls.push(url);
    }

    Ok(urls)
  }

  /// Resolve `ids` and place the result ahead of everything accumulated so
  /// far, so dependencies land before their dependents.
  fn splice_ahead(
    &mut self,
    ids: &[String],
    mut accumulated: Vec<String>,
  ) -> Result<Vec<String>, ResolveError> {
    let mut ahead = self.resolve_list(ids)?;
    ahead.append(&mut accumulated);
    Ok(ahead)
  }
}
