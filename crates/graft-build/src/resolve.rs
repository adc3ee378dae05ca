/* crates/graft-build/src/resolve.rs */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::data::{DataRegistry, Params, StaticPathsFn, StaticPropsFn};
use crate::discover::Route;
use crate::errors::BuildError;
use crate::hooks::{BuildHost, NewPage};
use crate::pattern;

/// Cap on simultaneously in-flight props calls while expanding one dynamic
/// route, so a route with thousands of parameter sets cannot fan out
/// unboundedly during a static build.
pub const MAX_IN_FLIGHT_PROPS: usize = 50;

/// A route with its data functions resolved against the registry. The
/// static/dynamic split is decided here, once, instead of being probed again
/// during resolution.
pub enum RouteKind {
  Static { props: StaticPropsFn },
  Dynamic { props: StaticPropsFn, paths: StaticPathsFn },
}

pub struct BoundRoute {
  pub component: PathBuf,
  pub pattern: String,
  pub kind: RouteKind,
}

impl BoundRoute {
  pub fn is_dynamic(&self) -> bool {
    matches!(self.kind, RouteKind::Dynamic { .. })
  }
}

impl std::fmt::Debug for BoundRoute {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoundRoute")
      .field("component", &self.component)
      .field("pattern", &self.pattern)
      .field("dynamic", &self.is_dynamic())
      .finish()
  }
}

/// Pair a discovered route with its registered data module.
///
/// Configuration errors surface here, before any data function runs: an
/// unregistered data path, a malformed pattern, or a dynamic pattern whose
/// module exports no paths function.
pub fn bind_route(
  route: &Route,
  base: &Path,
  registry: &DataRegistry,
) -> Result<BoundRoute, BuildError> {
  pattern::validate_pattern(&route.pattern)?;

  let key = route.data_path.strip_prefix(base).unwrap_or(&route.data_path);
  let module = registry.get(key).ok_or_else(|| {
    BuildError::configuration(format!(
      "route \"{}\" has no data module registered for {}",
      route.pattern,
      key.display()
    ))
  })?;

  let kind = if pattern::has_params(&route.pattern) {
    let paths = module.paths().cloned().ok_or_else(|| {
      BuildError::configuration(format!(
        "dynamic route \"{}\" is missing a paths function",
        route.pattern
      ))
    })?;
    RouteKind::Dynamic { props: module.props().clone(), paths }
  } else {
    // A paths function on a static route is ignored.
    RouteKind::Static { props: module.props().clone() }
  };

  Ok(BoundRoute { component: route.page_path.clone(), pattern: route.pattern.clone(), kind })
}

/// Resolve one bound route into concrete pages and register each with the
/// host exactly once.
///
/// Static routes register a single page from one props call with empty
/// parameters. Dynamic routes enumerate parameter sets once, then fetch
/// props per set with at most [`MAX_IN_FLIGHT_PROPS`] calls in flight;
/// registration happens as results complete, in no guaranteed order.
pub async fn resolve_route(
  route: &BoundRoute,
  host: &mut dyn BuildHost,
) -> Result<(), BuildError> {
  match &route.kind {
    RouteKind::Static { props } => {
      let context = props(Params::new()).await?;
      host.create_page(NewPage {
        component: route.component.clone(),
        path: route.pattern.clone(),
        context,
      })
    }
    RouteKind::Dynamic { props, paths } => {
      let sets = paths().await?;

      let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT_PROPS));
      let mut in_flight = JoinSet::new();
      for params in sets {
        let props = props.clone();
        let pattern = route.pattern.clone();
        let semaphore = Arc::clone(&semaphore);
        in_flight.spawn(async move {
          let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|e| BuildError::data(format!("props pool closed: {e}")))?;
          let context = props(params.clone()).await?;
          let path = pattern::fill_params(&pattern, &params)?;
          Ok::<(String, serde_json::Value), BuildError>((path, context))
        });
      }

      while let Some(result) = in_flight.join_next().await {
        let (path, context) = result
          .map_err(|e| BuildError::data(format!("props task panicked: {e}")))? // JoinError
          ?; // BuildError propagates unchanged
        host.create_page(NewPage { component: route.component.clone(), path, context })?;
      }
      Ok(())
    }
  }
}
