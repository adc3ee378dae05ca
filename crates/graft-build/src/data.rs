/* crates/graft-build/src/data.rs */

// Data modules are the Rust-side stand-in for a page's co-located data file:
// the embedding application registers, per data path, the async functions
// that the build pipeline would otherwise load from the file's exports.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::BuildError;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// One parameter set for a dynamic route: placeholder name -> value.
pub type Params = BTreeMap<String, String>;

/// Per-page props function: `(params) -> props`. Required for every route;
/// invoked once per concrete page. Props are passed opaquely to the host.
pub type StaticPropsFn =
  Arc<dyn Fn(Params) -> BoxFuture<Result<serde_json::Value, BuildError>> + Send + Sync>;

/// Path-enumeration function for a dynamic route: `() -> parameter sets`.
pub type StaticPathsFn =
  Arc<dyn Fn() -> BoxFuture<Result<Vec<Params>, BuildError>> + Send + Sync>;

/// Wrap a plain async closure as a [`StaticPropsFn`].
pub fn props_fn<F, Fut>(f: F) -> StaticPropsFn
where
  F: Fn(Params) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<serde_json::Value, BuildError>> + Send + 'static,
{
  Arc::new(move |params| Box::pin(f(params)))
}

/// Wrap a plain async closure as a [`StaticPathsFn`].
pub fn paths_fn<F, Fut>(f: F) -> StaticPathsFn
where
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Vec<Params>, BuildError>> + Send + 'static,
{
  Arc::new(move || Box::pin(f()))
}

/// The exported surface of one data file: a required props function and an
/// optional paths function.
#[derive(Clone)]
pub struct DataModule {
  props: StaticPropsFn,
  paths: Option<StaticPathsFn>,
}

impl DataModule {
  pub fn new(props: StaticPropsFn) -> Self {
    Self { props, paths: None }
  }

  pub fn with_paths(mut self, paths: StaticPathsFn) -> Self {
    self.paths = Some(paths);
    self
  }

  pub fn props(&self) -> &StaticPropsFn {
    &self.props
  }

  pub fn paths(&self) -> Option<&StaticPathsFn> {
    self.paths.as_ref()
  }
}

/// Registry of data modules keyed by the data file's path relative to the
/// page-source base directory, e.g. `posts/[id].data.js`.
#[derive(Default)]
pub struct DataRegistry {
  modules: HashMap<PathBuf, DataModule>,
}

impl DataRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, data_path: impl Into<PathBuf>, module: DataModule) -> &mut Self {
    self.modules.insert(data_path.into(), module);
    self
  }

  pub fn get(&self, data_path: &Path) -> Option<&DataModule> {
    self.modules.get(data_path)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn registry_lookup_by_relative_path() {
    let mut registry = DataRegistry::new();
    registry.register("about.data.js", DataModule::new(props_fn(|_| async { Ok(json!({})) })));
    assert!(registry.get(Path::new("about.data.js")).is_some());
    assert!(registry.get(Path::new("missing.data.js")).is_none());
    assert_eq!(registry.len(), 1);
  }

  #[tokio::test]
  async fn props_fn_receives_params() {
    let f = props_fn(|params: Params| async move {
      Ok(json!({ "id": params.get("id").cloned().unwrap_or_default() }))
    });
    let mut params = Params::new();
    params.insert("id".into(), "7".into());
    let props = f(params).await.unwrap();
    assert_eq!(props, json!({ "id": "7" }));
  }

  #[tokio::test]
  async fn paths_fn_enumerates_sets() {
    let f = paths_fn(|| async {
      Ok(vec![Params::from([("id".to_string(), "1".to_string())])])
    });
    let sets = f().await.unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].get("id").map(String::as_str), Some("1"));
  }

  #[test]
  fn module_paths_default_absent() {
    let module = DataModule::new(props_fn(|_| async { Ok(json!({})) }));
    assert!(module.paths().is_none());
    let module = module.with_paths(paths_fn(|| async { Ok(Vec::new()) }));
    assert!(module.paths().is_some());
  }
}
