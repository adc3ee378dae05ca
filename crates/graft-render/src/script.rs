/* crates/graft-render/src/script.rs */

use std::sync::Arc;

use crate::escape::escape_html;

/// Timing policy governing when a script tag is inserted into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
  /// Emitted into the document head during server rendering; injected
  /// client-side only when the page was never server-rendered with it.
  BeforeInteractive,
  /// Injected as soon as the owning component mounts.
  #[default]
  AfterInteractive,
  /// Injected during browser idle time, after the document finishes loading.
  LazyOnload,
}

/// Load/error callback carried by a descriptor. Never wired for
/// `BeforeInteractive` scripts, which have no meaning before the document
/// exists.
pub type ScriptCallback = Arc<dyn Fn() + Send + Sync>;

/// Everything one `Script` component declares. Created when the component
/// renders, consumed once by the loader or the head emitter.
#[derive(Clone, Default)]
pub struct ScriptDescriptor {
  pub src: Option<String>,
  /// Inline source text, used when `src` is absent.
  pub inline: Option<String>,
  /// Whether the inline source was marked pre-sanitized and must be
  /// assigned raw rather than as plain text.
  pub raw_inline: bool,
  pub strategy: Strategy,
  /// Remaining declared attributes, copied verbatim onto the element.
  pub attributes: Vec<(String, String)>,
  pub on_load: Option<ScriptCallback>,
  pub on_error: Option<ScriptCallback>,
}

impl ScriptDescriptor {
  pub fn external(src: impl Into<String>) -> Self {
    Self { src: Some(src.into()), ..Self::default() }
  }

  pub fn inline(text: impl Into<String>) -> Self {
    Self { inline: Some(text.into()), ..Self::default() }
  }

  /// Inline source that was already sanitized by the caller.
  pub fn inline_raw(text: impl Into<String>) -> Self {
    Self { inline: Some(text.into()), raw_inline: true, ..Self::default() }
  }

  pub fn strategy(mut self, strategy: Strategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.attributes.push((name.into(), value.into()));
    self
  }

  pub fn on_load(mut self, callback: ScriptCallback) -> Self {
    self.on_load = Some(callback);
    self
  }

  pub fn on_error(mut self, callback: ScriptCallback) -> Self {
    self.on_error = Some(callback);
    self
  }
}

/// Render a descriptor as a literal `<script>` tag for server-generated head
/// markup. Callbacks are ignored here.
pub fn render_script_tag(descriptor: &ScriptDescriptor) -> String {
  let mut tag = String::from("<script");
  if let Some(ref src) = descriptor.src {
    tag.push_str(&format!(" src=\"{}\"", escape_html(src)));
  }
  for (name, value) in &descriptor.attributes {
    tag.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
  }
  tag.push('>');
  if descriptor.src.is_none() {
    if let Some(ref inline) = descriptor.inline {
      // Script bodies are emitted verbatim; escaping would corrupt them.
      tag.push_str(inline);
    }
  }
  tag.push_str("</script>");
  tag
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_strategy_is_after_interactive() {
    assert_eq!(ScriptDescriptor::external("/app.js").strategy, Strategy::AfterInteractive);
  }

  #[test]
  fn external_tag() {
    let tag = render_script_tag(
      &ScriptDescriptor::external("/analytics.js").attribute("defer", ""),
    );
    assert_eq!(tag, "<script src=\"/analytics.js\" defer=\"\"></script>");
  }

  #[test]
  fn inline_tag_is_verbatim() {
    let tag = render_script_tag(&ScriptDescriptor::inline("window.x = 1 < 2;"));
    assert_eq!(tag, "<script>window.x = 1 < 2;</script>");
  }

  #[test]
  fn src_wins_over_inline() {
    let mut descriptor = ScriptDescriptor::external("/a.js");
    descriptor.inline = Some("ignored".into());
    assert_eq!(render_script_tag(&descriptor), "<script src=\"/a.js\"></script>");
  }

  #[test]
  fn attribute_values_are_escaped() {
    let tag = render_script_tag(
      &ScriptDescriptor::external("/a.js").attribute("data-msg", "say \"hi\""),
    );
    assert!(tag.contains("data-msg=\"say &quot;hi&quot;\""));
  }
}
