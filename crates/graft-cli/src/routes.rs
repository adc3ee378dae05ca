/* crates/graft-cli/src/routes.rs */

use std::path::Path;

use anyhow::Result;

use graft_build::{find_routes, pattern};

use crate::config::GraftConfig;
use crate::ui::{self, DIM, RESET};

pub fn run_routes(config: &GraftConfig, pages_dir: &Path) -> Result<()> {
  ui::banner("routes");

  if !pages_dir.is_dir() {
    ui::warn(&format!("{} does not exist -- no pages from this source", pages_dir.display()));
    return Ok(());
  }

  let routes = find_routes(pages_dir, &config.pages.data_suffix)?;
  let mut dynamic = 0usize;

  for route in &routes {
    let mut line = route.pattern.clone();
    if pattern::has_params(&route.pattern) {
      dynamic += 1;
      line.push_str(&format!("  {DIM}dynamic: {}{RESET}", pattern::param_names(&route.pattern).join(", ")));
    }
    if !route.data_path.is_file() {
      line.push_str(&format!("  {DIM}(no data file){RESET}"));
    }
    ui::arrow(&line);
  }

  ui::blank();
  ui::ok(&format!("{} routes ({dynamic} dynamic)", routes.len()));
  Ok(())
}
