/* crates/graft-build/src/errors.rs */

use std::fmt;

/// Failure class for build-time errors. The embedding build tool decides
/// presentation; the kind decides whether the failure was the filesystem,
/// the project's wiring, or a page data function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The page-source tree could not be read.
  Filesystem,
  /// A route or its data module is wired up incorrectly.
  Configuration,
  /// A page data function failed or panicked.
  Data,
}

impl ErrorKind {
  fn label(self) -> &'static str {
    match self {
      ErrorKind::Filesystem => "filesystem error",
      ErrorKind::Configuration => "configuration error",
      ErrorKind::Data => "data error",
    }
  }
}

#[derive(Debug)]
pub struct BuildError {
  kind: ErrorKind,
  message: String,
}

impl BuildError {
  pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }

  pub fn filesystem(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Filesystem, message)
  }

  pub fn configuration(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Configuration, message)
  }

  pub fn data(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Data, message)
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.kind.label(), self.message)
  }
}

impl std::error::Error for BuildError {}
