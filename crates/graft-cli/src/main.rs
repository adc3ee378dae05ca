/* crates/graft-cli/src/main.rs */

mod check;
mod config;
mod routes;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{find_graft_config, load_graft_config, GraftConfig, PagesSection, ProjectConfig};

#[derive(Parser)]
#[command(name = "graft", about = "Graft CLI")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List routes discovered under the page-source directory
  Routes {
    /// Path to graft.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Page-source directory, overriding the configured one
    #[arg(short, long)]
    dir: Option<PathBuf>,
  },
  /// Validate the page-source tree: missing data files, malformed
  /// placeholders, orphaned data files
  Check {
    /// Path to graft.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Page-source directory, overriding the configured one
    #[arg(short, long)]
    dir: Option<PathBuf>,
  },
}

/// Resolve config and the effective page-source directory. A `--dir`
/// override works without any graft.toml; otherwise the config is required.
fn resolve(explicit: Option<PathBuf>, dir: Option<PathBuf>) -> Result<(GraftConfig, PathBuf)> {
  let config_path = match explicit {
    Some(path) => Some(path),
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_graft_config(&cwd).ok()
    }
  };

  match (config_path, dir) {
    (Some(path), dir) => {
      let config = load_graft_config(&path)?;
      let base = path.parent().unwrap_or_else(|| std::path::Path::new(".")).to_path_buf();
      let pages_dir = dir.unwrap_or_else(|| base.join(&config.pages.dir));
      Ok((config, pages_dir))
    }
    (None, Some(dir)) => {
      // No project file: run with defaults against the given directory.
      let config = GraftConfig {
        project: ProjectConfig { name: "(no project)".to_string() },
        pages: PagesSection::default(),
        compat: config::CompatSection::default(),
      };
      Ok((config, dir))
    }
    (None, None) => anyhow::bail!("graft.toml not found (pass --config or --dir)"),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Routes { config, dir } => {
      let (config, pages_dir) = resolve(config, dir)?;
      routes::run_routes(&config, &pages_dir)?;
    }
    Command::Check { config, dir } => {
      let (config, pages_dir) = resolve(config, dir)?;
      check::run_check(&config, &pages_dir)?;
    }
  }

  Ok(())
}
