/* crates/graft-render/src/head.rs */

// The per-page head sink. Head-related child components append typed
// fragments during server rendering; the host's head-emission hook converts
// the accumulated state into literal markup once the page's render pass
// completes.

use crate::escape::escape_html;

pub type Attributes = Vec<(String, String)>;

/// A fragment that carries both attributes and a raw text body
/// (style/script/noscript).
#[derive(Debug, Clone, Default)]
pub struct HeadElement {
  pub attributes: Attributes,
  pub content: String,
}

impl HeadElement {
  pub fn new(attributes: Attributes, content: impl Into<String>) -> Self {
    Self { attributes, content: content.into() }
  }
}

#[derive(Debug, Clone, Default)]
pub struct HeadSink {
  base: Option<Attributes>,
  title: Option<String>,
  metas: Vec<Attributes>,
  links: Vec<Attributes>,
  styles: Vec<HeadElement>,
  scripts: Vec<HeadElement>,
  noscripts: Vec<HeadElement>,
  html_attributes: Attributes,
  body_attributes: Attributes,
}

impl HeadSink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Last base wins; a page has at most one.
  pub fn set_base(&mut self, attributes: Attributes) {
    self.base = Some(attributes);
  }

  /// Last title wins.
  pub fn set_title(&mut self, title: impl Into<String>) {
    self.title = Some(title.into());
  }

  pub fn push_meta(&mut self, attributes: Attributes) {
    self.metas.push(attributes);
  }

  pub fn push_link(&mut self, attributes: Attributes) {
    self.links.push(attributes);
  }

  pub fn push_style(&mut self, element: HeadElement) {
    self.styles.push(element);
  }

  pub fn push_script(&mut self, element: HeadElement) {
    self.scripts.push(element);
  }

  pub fn push_noscript(&mut self, element: HeadElement) {
    self.noscripts.push(element);
  }

  /// Attributes applied to the `<html>` element; last value per name wins.
  pub fn set_html_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
    merge_attribute(&mut self.html_attributes, name.into(), value.into());
  }

  /// Attributes applied to the `<body>` element; last value per name wins.
  pub fn set_body_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
    merge_attribute(&mut self.body_attributes, name.into(), value.into());
  }

  pub fn html_attributes(&self) -> &Attributes {
    &self.html_attributes
  }

  pub fn body_attributes(&self) -> &Attributes {
    &self.body_attributes
  }

  pub fn is_empty(&self) -> bool {
    self.base.is_none()
      && self.title.is_none()
      && self.metas.is_empty()
      && self.links.is_empty()
      && self.styles.is_empty()
      && self.scripts.is_empty()
      && self.noscripts.is_empty()
  }

  /// Convert every fragment category into literal head markup, in fixed
  /// category order: base, title, meta, link, style, script, noscript.
  pub fn render(&self) -> String {
    let mut out = String::new();
    if let Some(ref base) = self.base {
      out.push_str(&void_tag("base", base));
    }
    if let Some(ref title) = self.title {
      out.push_str(&format!("<title>{}</title>", escape_html(title)));
    }
    for meta in &self.metas {
      out.push_str(&void_tag("meta", meta));
    }
    for link in &self.links {
      out.push_str(&void_tag("link", link));
    }
    for style in &self.styles {
      out.push_str(&body_tag("style", style));
    }
    for script in &self.scripts {
      out.push_str(&body_tag("script", script));
    }
    for noscript in &self.noscripts {
      out.push_str(&body_tag("noscript", noscript));
    }
    out
  }
}

fn merge_attribute(attributes: &mut Attributes, name: String, value: String) {
  if let Some(existing) = attributes.iter_mut().find(|(n, _)| *n == name) {
    existing.1 = value;
  } else {
    attributes.push((name, value));
  }
}

fn render_attributes(attributes: &Attributes) -> String {
  let mut out = String::new();
  for (name, value) in attributes {
    out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
  }
  out
}

fn void_tag(tag: &str, attributes: &Attributes) -> String {
  format!("<{tag}{}>", render_attributes(attributes))
}

fn body_tag(tag: &str, element: &HeadElement) -> String {
  // Style/script bodies are emitted verbatim.
  format!("<{tag}{}>{}</{tag}>", render_attributes(&element.attributes), element.content)
}
