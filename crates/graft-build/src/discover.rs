/* crates/graft-build/src/discover.rs */

use std::path::{Path, PathBuf};

use crate::errors::BuildError;

/// One page file paired with its co-located data file and the URL pattern
/// derived from its position in the tree. Discarded once the page has been
/// registered with the host.
#[derive(Debug, Clone)]
pub struct Route {
  /// Page component file, handed verbatim to the host's page-creation call.
  pub page_path: PathBuf,
  /// Co-located data file: page base name plus the data suffix. Not required
  /// to exist on disk; the data registry is keyed by its base-relative path.
  pub data_path: PathBuf,
  /// URL path template, `/`-separated, possibly with `[param]` placeholders.
  pub pattern: String,
}

/// Recursively enumerate page files under `base`, skipping data files.
/// A file named `index` maps to its parent directory's path. Entries are
/// visited in name order so the output is deterministic, though only the
/// output set is contracted.
pub fn find_routes(base: &Path, data_suffix: &str) -> Result<Vec<Route>, BuildError> {
  let mut routes = Vec::new();
  walk(base, "/", data_suffix, &mut routes)?;
  Ok(routes)
}

fn walk(
  dir: &Path,
  pathname: &str,
  data_suffix: &str,
  routes: &mut Vec<Route>,
) -> Result<(), BuildError> {
  let entries = std::fs::read_dir(dir)
    .map_err(|e| BuildError::filesystem(format!("failed to read {}: {e}", dir.display())))?;

  let mut names: Vec<String> = Vec::new();
  for entry in entries {
    let entry = entry
      .map_err(|e| BuildError::filesystem(format!("failed to read {}: {e}", dir.display())))?;
    names.push(entry.file_name().to_string_lossy().into_owned());
  }
  names.sort();

  for name in names {
    let full = dir.join(&name);
    let meta = std::fs::metadata(&full)
      .map_err(|e| BuildError::filesystem(format!("failed to stat {}: {e}", full.display())))?;

    if meta.is_dir() {
      walk(&full, &join_url(pathname, &name), data_suffix, routes)?;
      continue;
    }

    if name.ends_with(data_suffix) {
      continue;
    }

    let stem = Path::new(&name)
      .file_stem()
      .map(|s| s.to_string_lossy().into_owned())
      .unwrap_or_else(|| name.clone());

    let pattern =
      if stem == "index" { pathname.to_string() } else { join_url(pathname, &stem) };

    routes.push(Route {
      data_path: dir.join(format!("{stem}{data_suffix}")),
      page_path: full,
      pattern,
    });
  }

  Ok(())
}

fn join_url(base: &str, segment: &str) -> String {
  if base.ends_with('/') {
    format!("{base}{segment}")
  } else {
    format!("{base}/{segment}")
  }
}
