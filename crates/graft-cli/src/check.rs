/* crates/graft-cli/src/check.rs */

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use graft_build::{find_routes, pattern, Route};

use crate::config::GraftConfig;
use crate::ui;

pub fn run_check(config: &GraftConfig, pages_dir: &Path) -> Result<()> {
  ui::banner("check");

  if !pages_dir.is_dir() {
    ui::warn(&format!("{} does not exist -- nothing to check", pages_dir.display()));
    return Ok(());
  }

  let suffix = &config.pages.data_suffix;
  let routes = find_routes(pages_dir, suffix)?;
  let mut problems = 0usize;

  for route in &routes {
    if let Err(err) = pattern::validate_pattern(&route.pattern) {
      ui::fail(err.message());
      problems += 1;
    }
    if !route.data_path.is_file() {
      ui::fail(&format!(
        "{}  missing data file {}",
        route.pattern,
        route.data_path.display()
      ));
      problems += 1;
    }
  }

  // Data files that pair with no page are dead weight and usually a typo.
  for orphan in orphan_data_files(pages_dir, suffix, &routes)? {
    ui::fail(&format!("orphaned data file {}", orphan.display()));
    problems += 1;
  }

  ui::blank();
  if problems > 0 {
    bail!("check failed: {problems} problem(s) in {}", pages_dir.display());
  }
  ui::ok(&format!("{} routes, no problems", routes.len()));
  Ok(())
}

fn orphan_data_files(
  pages_dir: &Path,
  suffix: &str,
  routes: &[Route],
) -> Result<Vec<PathBuf>> {
  let mut data_files = Vec::new();
  collect_data_files(pages_dir, suffix, &mut data_files)?;

  let mut orphans = Vec::new();
  for file in data_files {
    if !routes.iter().any(|r| r.data_path == file) {
      orphans.push(file);
    }
  }
  Ok(orphans)
}

fn collect_data_files(dir: &Path, suffix: &str, out: &mut Vec<PathBuf>) -> Result<()> {
  for entry in std::fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if entry.file_type()?.is_dir() {
      collect_data_files(&path, suffix, out)?;
    } else if entry.file_name().to_string_lossy().ends_with(suffix) {
      out.push(path);
    }
  }
  Ok(())
}
