/* crates/graft-build/src/hooks.rs */

// Extension points the embedding build tool implements and invokes. The
// bundler, renderer, and page serving stay on the host's side of this
// boundary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data::DataRegistry;
use crate::discover::find_routes;
use crate::errors::BuildError;
use crate::resolve::{bind_route, resolve_route};

/// Default name under which page code imports the shim's runtime, matching
/// the emulated framework's package name.
pub const DEFAULT_COMPAT_ALIAS: &str = "next";

/// One concrete page handed to the host's page-creation call.
#[derive(Debug, Clone)]
pub struct NewPage {
  /// The page component file.
  pub component: PathBuf,
  /// Concrete URL path, placeholders substituted.
  pub path: String,
  /// Props returned by the route's props function, passed through opaquely.
  pub context: serde_json::Value,
}

/// The host build tool's side of page generation: a page-creation call and a
/// non-fatal warning channel.
pub trait BuildHost {
  fn create_page(&mut self, page: NewPage) -> Result<(), BuildError>;
  fn warn(&mut self, message: &str);
}

/// Build-time entry point: discover routes under `base_dir`, bind each to
/// its registered data module, and register every concrete page with the
/// host.
///
/// A missing base directory is a soft skip: the host gets a warning and zero
/// pages, and the build continues. All other failures abort with the error
/// of the step that produced them; there are no retries.
pub async fn create_pages(
  base_dir: &Path,
  data_suffix: &str,
  registry: &DataRegistry,
  host: &mut dyn BuildHost,
) -> Result<(), BuildError> {
  if !base_dir.is_dir() {
    host.warn(&format!(
      "pages directory {} does not exist -- no pages generated from this source",
      base_dir.display()
    ));
    return Ok(());
  }

  let routes = find_routes(base_dir, data_suffix)?;

  // Bind everything first so wiring mistakes surface before any data
  // function runs.
  let mut bound = Vec::with_capacity(routes.len());
  for route in &routes {
    bound.push(bind_route(route, base_dir, registry)?);
  }

  for route in &bound {
    resolve_route(route, host).await?;
  }

  Ok(())
}

/// Host bundler configuration touched by the shim: module-resolution
/// aliases.
#[derive(Debug, Default)]
pub struct BundlerConfig {
  pub aliases: BTreeMap<String, PathBuf>,
}

/// Alias the compatibility import path to the shim's runtime directory so
/// page code can import the shim's API under the emulated framework's
/// package name.
pub fn configure_bundler(config: &mut BundlerConfig, alias: &str, runtime_dir: &Path) {
  config.aliases.insert(alias.to_string(), runtime_dir.to_path_buf());
}
