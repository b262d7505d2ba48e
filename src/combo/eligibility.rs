//! Which URLs may join a combined-request group.

use regex::Regex;

use crate::options::ComboOptions;
use crate::session::ResolveSession;

fn vendored_segment() -> &'static Regex {
  use std::sync::OnceLock;

  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?:^|/)third(?:/|$)").expect("invalid vendored-id regex"))
}

/// Decide whether a URL may be folded into a combo group.
///
/// Only URLs the resolver produced from a map entry qualify. Vendored code
/// (any id with a path segment named `third`) stays out so already-optimized
/// bundles keep their own cache entries, and the `onlyUnPackFile` policy
/// additionally keeps package wrappers out.
pub fn is_combinable(url: &str, combo: &ComboOptions, session: &ResolveSession) -> bool {
  let Some(source) = session.cached(url) else {
    return false;
  };

  if vendored_segment().is_match(&source.id) {
    return false;
  }

  !combo.only_unpack_file || !source.is_pkg
}
