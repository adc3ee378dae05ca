/* crates/graft-render/src/context.rs */

use crate::head::{Attributes, HeadSink};
use crate::script::{render_script_tag, ScriptDescriptor};

/// Per-page render-pass state: the list of server-collected
/// `BeforeInteractive` scripts and the head sink. The host creates one
/// context at the start of a page's server render, threads it through the
/// render, hands it to [`emit_head`] once, and drops it -- it is never
/// shared across pages or render passes.
pub struct RenderContext {
  page_path: String,
  scripts: Vec<ScriptDescriptor>,
  head: HeadSink,
}

impl RenderContext {
  pub fn new(page_path: impl Into<String>) -> Self {
    Self { page_path: page_path.into(), scripts: Vec::new(), head: HeadSink::new() }
  }

  pub fn page_path(&self) -> &str {
    &self.page_path
  }

  /// Append a server-collected script. Only `BeforeInteractive` descriptors
  /// belong here; the component render path does the strategy check.
  pub fn collect_script(&mut self, descriptor: ScriptDescriptor) {
    self.scripts.push(descriptor);
  }

  pub fn scripts(&self) -> &[ScriptDescriptor] {
    &self.scripts
  }

  pub fn head(&self) -> &HeadSink {
    &self.head
  }

  pub fn head_mut(&mut self) -> &mut HeadSink {
    &mut self.head
  }
}

/// What the host's head/body-render hooks consume for one page.
#[derive(Debug, Clone)]
pub struct HeadOutput {
  pub head_html: String,
  pub html_attributes: Attributes,
  pub body_attributes: Attributes,
}

/// Flush a page's render context into literal head markup and root-element
/// attributes. Collected scripts come first, then the head fragments in
/// their fixed category order.
pub fn emit_head(ctx: &RenderContext) -> HeadOutput {
  let mut head_html = String::new();
  for descriptor in ctx.scripts() {
    head_html.push_str(&render_script_tag(descriptor));
  }
  head_html.push_str(&ctx.head().render());

  HeadOutput {
    head_html,
    html_attributes: ctx.head().html_attributes().clone(),
    body_attributes: ctx.head().body_attributes().clone(),
  }
}
