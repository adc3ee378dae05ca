/* crates/graft-render/src/lib.rs */

//! Server-render support for the Graft compatibility shim. Pure logic: the
//! typed head sink, the script descriptor model, and the per-page render
//! context the host's head-emission hook flushes into literal markup.

pub mod context;
pub mod escape;
pub mod head;
pub mod script;

// Re-exports for ergonomic use
pub use context::{emit_head, HeadOutput, RenderContext};
pub use escape::escape_html;
pub use head::{Attributes, HeadElement, HeadSink};
pub use script::{render_script_tag, ScriptCallback, ScriptDescriptor, Strategy};
