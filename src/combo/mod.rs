//! Batching of resolved URL lists into combined-request URLs.

mod eligibility;
mod grouping;

pub use eligibility::is_combinable;
pub use grouping::combine_list;

use crate::error::ResolveError;
use crate::map::ResourceMap;
use crate::models::{FlattenedEntry, PageUrls};
use crate::options::ComboOptions;
use crate::resolve::{dedup_first, resolve_urls};
use crate::session::ResolveSession;

/// Resolve the three resource kinds of a flattened view into final URL lists.
///
/// Stylesheets that arrived through a script list (for example bundled inside
/// a script package) are lifted over to the css list first. Each list is then
/// deduplicated by first occurrence and, when combo options are present,
/// folded into combined-request URLs.
pub fn batch_page_urls(
  map: &ResourceMap,
  view: &FlattenedEntry,
  combo: Option<&ComboOptions>,
  session: &mut ResolveSession,
) -> Result<PageUrls, ResolveError> {
  let head_js = resolve_urls(map, &view.head_js, true, session)?;
  let bottom_js = resolve_urls(map, &view.bottom_js, true, session)?;
  let css = resolve_urls(map, &view.css, true, session)?;

  let mut staged_css = Vec::new();
  let head_js = extract_stylesheets(head_js, &mut staged_css, session);
  let bottom_js = extract_stylesheets(bottom_js, &mut staged_css, session);
  let mut css = css;
  css.extend(staged_css);

  let head_js = dedup_first(head_js);
  let bottom_js = dedup_first(bottom_js);
  let css = dedup_first(css);

  let Some(combo) = combo else {
    return Ok(PageUrls {
      head_js,
      bottom_js,
      css,
    });
  };

  Ok(PageUrls {
    head_js: combine_list(head_js, combo, session),
    bottom_js: combine_list(bottom_js, combo, session),
    css: combine_list(css, combo, session),
  })
}

/// Keep script URLs in place but move css-typed ones onto the staging list.
fn extract_stylesheets(
  urls: Vec<String>,
  staged: &mut Vec<String>,
  session: &ResolveSession,
) -> Vec<String> {
  urls
    .into_iter()
    .filter(|url| {
      let is_css = session
        .cached(url)
        .is_some_and(|source| source.kind.as_deref() == Some("css"));
      if is_css {
        staged.push(url.clone());
      }
      !is_css
    })
    .collect()
}
