#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod combo;
pub mod error;
pub mod flatten;
pub mod manifest;
pub mod map;
pub mod models;
pub mod options;
pub mod resolve;
pub mod resolver;
pub mod session;

pub use error::ResolveError;
pub use map::{ResourceMap, ResourceMapError};
pub use models::{FlattenedEntry, PageUrls, RequireManifest, ResourceEntry, ResourceInfo};
pub use options::{ComboOptions, ResolverOptions};
pub use resolver::AssetResolver;
