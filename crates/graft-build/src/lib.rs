/* crates/graft-build/src/lib.rs */

//! Build-time half of the Graft compatibility shim: walk a page-source
//! tree authored with file-based routing conventions, resolve each route's
//! data functions, and register every concrete page with the host build
//! tool through the [`hooks::BuildHost`] extension point.

pub mod data;
pub mod discover;
pub mod errors;
pub mod hooks;
pub mod pattern;
pub mod resolve;

// Re-exports for ergonomic use
pub use data::{paths_fn, props_fn, BoxFuture, DataModule, DataRegistry, Params};
pub use discover::{find_routes, Route};
pub use errors::{BuildError, ErrorKind};
pub use hooks::{
  configure_bundler, create_pages, BuildHost, BundlerConfig, NewPage, DEFAULT_COMPAT_ALIAS,
};
pub use resolve::{bind_route, resolve_route, BoundRoute, RouteKind, MAX_IN_FLIGHT_PROPS};
