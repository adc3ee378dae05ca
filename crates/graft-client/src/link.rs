/* crates/graft-client/src/link.rs */

use std::sync::Arc;

use crate::router::Navigator;
use crate::url::UrlTarget;

/// Mutable view of an activation event handed to the caller-supplied
/// handler, mirroring the event's default-prevention flag.
#[derive(Debug, Default)]
pub struct Activation {
  default_prevented: bool,
}

impl Activation {
  pub fn prevent_default(&mut self) {
    self.default_prevented = true;
  }

  pub fn default_prevented(&self) -> bool {
    self.default_prevented
  }
}

pub type ActivateHandler = Arc<dyn Fn(&mut Activation)>;

/// What the activation sequence decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
  /// The event was intercepted and handled with client-side navigation.
  ClientNavigation,
  /// The event proceeds under the browser's default handling (external
  /// target, or the caller's handler suppressed the default).
  BrowserDefault,
}

/// Wraps a single child element and overrides its activation handler so
/// internal targets navigate client-side instead of triggering a full page
/// load.
pub struct Link {
  href: UrlTarget,
  replace: bool,
  on_activate: Option<ActivateHandler>,
}

impl Link {
  pub fn new(href: impl Into<UrlTarget>) -> Self {
    Self { href: href.into(), replace: false, on_activate: None }
  }

  /// Replace the current history entry instead of pushing a new one.
  pub fn replace(mut self, replace: bool) -> Self {
    self.replace = replace;
    self
  }

  pub fn on_activate(mut self, handler: ActivateHandler) -> Self {
    self.on_activate = Some(handler);
    self
  }

  /// The resolved URL applied to the wrapped child's `href` attribute.
  pub fn href(&self) -> String {
    self.href.format()
  }

  /// Internal targets (leading `/`) are the ones worth intercepting.
  pub fn is_internal(&self) -> bool {
    self.href().starts_with('/')
  }

  /// Run the activation sequence: the caller-supplied handler first; if it
  /// did not suppress the default and the target is internal, intercept and
  /// navigate client-side.
  pub fn activate(&self, navigator: &dyn Navigator) -> ActivationOutcome {
    let mut activation = Activation::default();
    if let Some(ref handler) = self.on_activate {
      handler(&mut activation);
    }

    if !activation.default_prevented() && self.is_internal() {
      navigator.navigate(&self.href(), self.replace);
      ActivationOutcome::ClientNavigation
    } else {
      ActivationOutcome::BrowserDefault
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;

  use crate::router::Location;
  use crate::url::UrlParts;

  #[derive(Default)]
  struct MockNavigator {
    navigations: RefCell<Vec<(String, bool)>>,
  }

  impl Navigator for MockNavigator {
    fn location(&self) -> Location {
      Location::default()
    }

    fn navigate(&self, url: &str, replace: bool) {
      self.navigations.borrow_mut().push((url.to_string(), replace));
    }

    fn back(&self) {}

    fn reload(&self) {}
  }

  #[test]
  fn internal_target_is_intercepted() {
    let nav = MockNavigator::default();
    let link = Link::new("/about");
    assert_eq!(link.activate(&nav), ActivationOutcome::ClientNavigation);
    assert_eq!(nav.navigations.borrow().as_slice(), [("/about".to_string(), false)]);
  }

  #[test]
  fn replace_flag_is_forwarded() {
    let nav = MockNavigator::default();
    let link = Link::new("/login").replace(true);
    link.activate(&nav);
    assert_eq!(nav.navigations.borrow().as_slice(), [("/login".to_string(), true)]);
  }

  #[test]
  fn external_target_keeps_browser_default() {
    let nav = MockNavigator::default();
    let link = Link::new("https://example.com/docs");
    assert_eq!(link.activate(&nav), ActivationOutcome::BrowserDefault);
    assert!(nav.navigations.borrow().is_empty());
  }

  #[test]
  fn handler_runs_before_interception() {
    let nav = MockNavigator::default();
    let seen = Arc::new(RefCell::new(false));
    let seen_in_handler = Arc::clone(&seen);
    let link = Link::new("/about").on_activate(Arc::new(move |_| {
      *seen_in_handler.borrow_mut() = true;
    }));
    assert_eq!(link.activate(&nav), ActivationOutcome::ClientNavigation);
    assert!(*seen.borrow());
  }

  #[test]
  fn prevented_default_suppresses_navigation() {
    let nav = MockNavigator::default();
    let link = Link::new("/about").on_activate(Arc::new(Activation::prevent_default));
    assert_eq!(link.activate(&nav), ActivationOutcome::BrowserDefault);
    assert!(nav.navigations.borrow().is_empty());
  }

  #[test]
  fn structured_href_is_formatted() {
    let link = Link::new(UrlParts {
      pathname: Some("/posts".into()),
      query: Some(vec![("page".into(), "2".into())]),
      ..UrlParts::default()
    });
    assert_eq!(link.href(), "/posts?page=2");
    assert!(link.is_internal());
  }
}
