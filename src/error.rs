//! Typed failures raised while resolving a resource graph.

/// Errors that can occur while flattening or resolving resources.
///
/// The engine otherwise degrades to best-effort output; these variants cover
/// the cases where continuing would loop forever or emit garbage URLs.
#[derive(Debug, Clone)]
pub enum ResolveError {
  /// An entry's `refs` chain loops back on itself.
  RefsCycle {
    /// Ids along the chain, ending with the id that re-entered it.
    chain: Vec<String>,
  },
  /// A `deps`/`asyncs` chain loops back on an id still being resolved.
  DepsCycle {
    /// Ids along the chain, ending with the id that re-entered it.
    chain: Vec<String>,
  },
  /// An entry points at a package id with no entry in the map.
  UnknownPackage {
    /// Id of the entry naming the package.
    id: String,
    /// The missing package id.
    pkg: String,
  },
  /// A package entry declares no URL, so its members cannot resolve.
  PackageUrlMissing {
    /// Id of the member that required the package.
    id: String,
    /// The package id lacking a URL.
    pkg: String,
  },
}

impl std::fmt::Display for ResolveError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::RefsCycle { chain } => {
        write!(f, "refs cycle detected: {}", chain.join(" -> "))
      }
      Self::DepsCycle { chain } => {
        write!(f, "dependency cycle detected: {}", chain.join(" -> "))
      }
      Self::UnknownPackage { id, pkg } => {
        write!(f, "entry {id} names package {pkg}, which is not in the map")
      }
      Self::PackageUrlMissing { id, pkg } => {
        write!(f, "package {pkg} required by {id} declares no url")
      }
    }
  }
}

impl std::error::Error for ResolveError {}
