//! Shell inspection tool: resolve one resource id and print the result.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use page_asset_resolver::{AssetResolver, ResolverOptions, ResourceMap};

/// Resolve a resource id against a map file and print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "resolve_assets", version, about)]
struct Cli {
  /// Path to the resource map JSON file.
  map: PathBuf,
  /// Resource id to resolve.
  id: String,
  /// Optional resolver options JSON file (bootstrap loader, combo policy).
  #[arg(long)]
  options: Option<PathBuf>,
  /// Print compact JSON instead of pretty-printed output.
  #[arg(long)]
  compact: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();

  let map = ResourceMap::from_path(&cli.map)
    .with_context(|| format!("failed to load resource map from {}", cli.map.display()))?;
  let options = match &cli.options {
    Some(path) => ResolverOptions::from_path(path)
      .ok_or_else(|| anyhow!("failed to load resolver options from {}", path.display()))?,
    None => ResolverOptions::default(),
  };

  let resolver = AssetResolver::new(map, options);
  let info = resolver
    .resource_info(&cli.id)
    .with_context(|| format!("failed to resolve {}", cli.id))?;

  let json = if cli.compact {
    serde_json::to_string(&info)?
  } else {
    serde_json::to_string_pretty(&info)?
  };
  println!("{json}");

  Ok(())
}
