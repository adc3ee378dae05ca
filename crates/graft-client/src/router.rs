/* crates/graft-client/src/router.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::query::parse_query;
use crate::url::UrlTarget;

/// Snapshot of the browser's current location. `search` carries its leading
/// `?` and `hash` its leading `#` when non-empty, as the DOM reports them.
#[derive(Debug, Clone, Default)]
pub struct Location {
  pub origin: String,
  pub pathname: String,
  pub search: String,
  pub hash: String,
}

/// The host's client-side navigation primitive. Implemented by the
/// embedding runtime; everything in this crate stays on the logic side of
/// this trait.
pub trait Navigator {
  fn location(&self) -> Location;
  /// Client-side navigation; `replace` swaps the current history entry
  /// instead of pushing a new one.
  fn navigate(&self, url: &str, replace: bool);
  /// Browser history back.
  fn back(&self);
  /// Full page reload.
  fn reload(&self);
}

/// Data about the current page plus navigation methods, backed by the host
/// navigator. Cheap to clone; hand one to anything that wants it.
#[derive(Clone)]
pub struct Router {
  navigator: Arc<dyn Navigator>,
}

impl Router {
  pub fn new(navigator: Arc<dyn Navigator>) -> Self {
    Self { navigator }
  }

  /// The path shown in the browser, including query and fragment.
  pub fn as_path(&self) -> String {
    let location = self.navigator.location();
    format!("{}{}{}", location.pathname, location.search, location.hash)
  }

  /// The current query string parsed into a multimap.
  pub fn query(&self) -> BTreeMap<String, Vec<String>> {
    parse_query(&self.navigator.location().search)
  }

  pub fn push(&self, target: impl Into<UrlTarget>) {
    self.navigator.navigate(&target.into().format(), false);
  }

  pub fn replace(&self, target: impl Into<UrlTarget>) {
    self.navigator.navigate(&target.into().format(), true);
  }

  pub fn back(&self) {
    self.navigator.back();
  }

  pub fn reload(&self) {
    self.navigator.reload();
  }
}

/// Accessor returning a router bound to the host navigator.
pub fn use_router(navigator: Arc<dyn Navigator>) -> Router {
  Router::new(navigator)
}
