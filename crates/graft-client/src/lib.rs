/* crates/graft-client/src/lib.rs */

//! Client-runtime half of the Graft compatibility shim: `Link` activation,
//! the router accessor, and the script-loading state machine. Everything is
//! pure logic behind the [`router::Navigator`] and [`loader::Dom`] traits;
//! the embedding runtime supplies the browser bindings.

pub mod link;
pub mod loader;
pub mod query;
pub mod router;
pub mod url;

// Re-exports for ergonomic use
pub use graft_render::{ScriptCallback, ScriptDescriptor, Strategy};
pub use link::{ActivateHandler, Activation, ActivationOutcome, Link};
pub use loader::{
  is_present, render_script, resolve_src, Deferral, Dom, ExistingScript, LoadState,
  MountOutcome, ScriptInit, ScriptLoad,
};
pub use query::{parse_query, serialize_query};
pub use router::{use_router, Location, Navigator, Router};
pub use url::{UrlParts, UrlTarget};
