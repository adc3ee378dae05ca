/* crates/graft-cli/src/config.rs */

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GraftConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub pages: PagesSection,
  #[serde(default)]
  pub compat: CompatSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesSection {
  #[serde(default = "default_pages_dir")]
  pub dir: String,
  #[serde(default = "default_data_suffix")]
  pub data_suffix: String,
}

impl Default for PagesSection {
  fn default() -> Self {
    Self { dir: default_pages_dir(), data_suffix: default_data_suffix() }
  }
}

impl PagesSection {
  pub fn validate(&self) -> Result<()> {
    if self.dir.is_empty() {
      bail!("pages.dir must not be empty");
    }
    if self.data_suffix.is_empty() {
      bail!("pages.data_suffix must not be empty");
    }
    Ok(())
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompatSection {
  /// Import alias page code uses for the shim's runtime.
  #[serde(default = "default_alias")]
  pub alias: String,
  /// Directory the alias resolves to; omitted when the host wires it.
  pub runtime_dir: Option<String>,
}

impl Default for CompatSection {
  fn default() -> Self {
    Self { alias: default_alias(), runtime_dir: None }
  }
}

fn default_pages_dir() -> String {
  "src/next-pages".to_string()
}

fn default_data_suffix() -> String {
  ".data.js".to_string()
}

fn default_alias() -> String {
  graft_build::DEFAULT_COMPAT_ALIAS.to_string()
}

/// Walk upward from `start` to find `graft.toml`, like Cargo.toml discovery
pub fn find_graft_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join("graft.toml");
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("graft.toml not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_graft_config(path: &Path) -> Result<GraftConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let config: GraftConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.pages.validate()?;
  Ok(config)
}
