//! Contiguous grouping of combinable URLs under a length budget.

use crate::options::ComboOptions;
use crate::session::ResolveSession;

use super::eligibility::is_combinable;

/// Fold a URL list into bare and combined-request URLs, preserving order.
///
/// Combinable URLs group contiguously while they share a base path (the URL
/// up to its last slash) and their accumulated file-name length stays under
/// the budget. Everything else is emitted verbatim and closes the current
/// group. Groups of one member render as the bare URL.
pub fn combine_list(
  urls: Vec<String>,
  combo: &ComboOptions,
  session: &ResolveSession,
) -> Vec<String> {
  let mut packer = GroupPacker::new(combo);

  for url in urls {
    if is_combinable(&url, combo, session) {
      packer.push_member(url);
    } else {
      packer.push_bare(url);
    }
  }

  packer.finish()
}

/// Streaming packer holding at most one open group at a time.
struct GroupPacker<'a> {
  combo: &'a ComboOptions,
  out: Vec<String>,
  base: String,
  members: Vec<String>,
  names: Vec<String>,
  name_len: usize,
}

impl<'a> GroupPacker<'a> {
  fn new(combo: &'a ComboOptions) -> Self {
    Self {
      combo,
      out: Vec::new(),
      base: String::new(),
      members: Vec::new(),
      names: Vec::new(),
      name_len: 0,
    }
  }

  fn push_bare(&mut self, url: String) {
    self.flush();
    self.out.push(url);
  }

  fn push_member(&mut self, url: String) {
    let Some((base, name)) = split_base(&url) else {
      self.push_bare(url);
      return;
    };

    if !self.members.is_empty()
      && (base != self.base || self.name_len + name.len() >= self.combo.max_url_length)
    {
      self.flush();
    }

    if self.members.is_empty() {
      self.base = base.to_string();
    }
    self.name_len += name.len();
    self.names.push(name.to_string());
    self.members.push(url);
  }

  fn flush(&mut self) {
    match self.members.len() {
      0 => {}
      1 => self.out.push(self.members.remove(0)),
      _ => {
        let (open, separator) = (&self.combo.syntax.0, &self.combo.syntax.1);
        let url = format!("{}{open}{}", self.base, self.names.join(separator));
        tracing::trace!(members = self.members.len(), url = %url, "flushed combo group");
        self.out.push(url);
        self.members.clear();
      }
    }
    self.names.clear();
    self.name_len = 0;
  }

  fn finish(mut self) -> Vec<String> {
    self.flush();
    self.out
  }
}

/// Split a URL into its base path and trailing file name.
///
/// Files at the origin root keep `/` as their base so they can still group.
/// URLs without a slash or with an empty trailing name cannot be grouped.
fn split_base(url: &str) -> Option<(&str, &str)> {
  let idx = url.rfind('/')?;
  let name = &url[idx + 1..];
  if name.is_empty() {
    return None;
  }
  let base = if idx == 0 { "/" } else { &url[..idx] };
  Some((base, name))
}
