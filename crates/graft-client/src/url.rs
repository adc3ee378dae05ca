/* crates/graft-client/src/url.rs */

use crate::query::serialize_query;

/// Structured navigation target, assembled with standard URL formatting
/// rules. Every field is optional; a bare `pathname` formats to a plain
/// path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
  /// Scheme, with or without the trailing `:`.
  pub protocol: Option<String>,
  /// Full host (may include a port). Wins over `hostname`/`port`.
  pub host: Option<String>,
  pub hostname: Option<String>,
  pub port: Option<u16>,
  pub pathname: Option<String>,
  /// Raw query string, with or without the leading `?`. Wins over `query`.
  pub search: Option<String>,
  /// Query pairs, percent-encoded during formatting.
  pub query: Option<Vec<(String, String)>>,
  /// Fragment, with or without the leading `#`.
  pub hash: Option<String>,
}

impl UrlParts {
  pub fn format(&self) -> String {
    let mut out = String::new();

    let host = self.host.clone().or_else(|| {
      self.hostname.as_ref().map(|h| match self.port {
        Some(port) => format!("{h}:{port}"),
        None => h.clone(),
      })
    });

    if let Some(ref protocol) = self.protocol {
      out.push_str(protocol.trim_end_matches(':'));
      out.push(':');
    }
    if let Some(ref host) = host {
      out.push_str("//");
      out.push_str(host);
    }
    if let Some(ref pathname) = self.pathname {
      if host.is_some() && !pathname.starts_with('/') {
        out.push('/');
      }
      out.push_str(pathname);
    }
    if let Some(ref search) = self.search {
      if !search.is_empty() {
        if !search.starts_with('?') {
          out.push('?');
        }
        out.push_str(search);
      }
    } else if let Some(ref query) = self.query {
      if !query.is_empty() {
        out.push('?');
        out.push_str(&serialize_query(query));
      }
    }
    if let Some(ref hash) = self.hash {
      if !hash.is_empty() {
        if !hash.starts_with('#') {
          out.push('#');
        }
        out.push_str(hash);
      }
    }
    out
  }
}

/// A navigation target: either a ready-made URL string or structured parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTarget {
  Path(String),
  Parts(UrlParts),
}

impl UrlTarget {
  pub fn format(&self) -> String {
    match self {
      UrlTarget::Path(path) => path.clone(),
      UrlTarget::Parts(parts) => parts.format(),
    }
  }
}

impl From<&str> for UrlTarget {
  fn from(path: &str) -> Self {
    UrlTarget::Path(path.to_string())
  }
}

impl From<String> for UrlTarget {
  fn from(path: String) -> Self {
    UrlTarget::Path(path)
  }
}

impl From<UrlParts> for UrlTarget {
  fn from(parts: UrlParts) -> Self {
    UrlTarget::Parts(parts)
  }
}
