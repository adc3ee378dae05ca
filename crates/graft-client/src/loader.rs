/* crates/graft-client/src/loader.rs */

// Per-descriptor script loading. Each descriptor owns one explicit machine:
//
//   Pending -> Injected              (strategy wants the script now)
//   Pending -> Skipped               (an equivalent script is already in head)
//   Pending -> Scheduled -> Injected | Skipped   (lazyOnload deferral)
//
// `Injected` and `Skipped` are terminal. A machine holds at most one pending
// deferral; re-mounting while scheduled or terminal is a no-op.

use graft_render::{RenderContext, ScriptCallback, ScriptDescriptor, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
  Pending,
  Scheduled,
  Injected,
  Skipped,
}

/// How a `lazyOnload` injection was deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
  /// Document already loaded: next idle period.
  Idle,
  /// Wait for the document's load event, then the next idle period.
  LoadThenIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
  Injected,
  Skipped,
  Scheduled(Deferral),
}

/// A `<script>` element already present in the document head, as the DOM
/// reports it: `src` resolved absolute, `text` the element's text content.
#[derive(Debug, Clone, Default)]
pub struct ExistingScript {
  pub src: Option<String>,
  pub text: Option<String>,
}

/// Element-creation recipe handed to the DOM binding. The binding must
/// attach the listeners before assigning `src`, so a cached script cannot
/// fire `load` while no listener exists.
pub struct ScriptInit {
  pub src: Option<String>,
  /// Inline content; set only when `src` is absent.
  pub text: Option<String>,
  /// Assign the text raw (pre-sanitized source) instead of as plain text.
  pub raw: bool,
  pub attributes: Vec<(String, String)>,
  pub on_load: Option<ScriptCallback>,
  pub on_error: Option<ScriptCallback>,
}

/// The loader's view of the document, implemented by the embedding runtime.
pub trait Dom {
  /// `window.location.origin`, used to absolutize root-relative `src`
  /// values before comparing against DOM-reported ones.
  fn origin(&self) -> String;
  /// Every `<script>` currently in the document head.
  fn head_scripts(&self) -> Vec<ExistingScript>;
  /// Build a script element from the recipe and append it to the head.
  fn append_script(&mut self, init: ScriptInit);
  /// Whether the document has already finished loading.
  fn ready(&self) -> bool;
}

/// The browser resolves a script element's `src` to an absolute URL, so
/// root-relative descriptor values need the origin prefix before comparing.
pub fn resolve_src(origin: &str, src: &str) -> String {
  if src.starts_with('/') { format!("{origin}{src}") } else { src.to_string() }
}

/// Whether an equivalent script is already present in the document head,
/// matched by resolved `src` or by exact inline text.
pub fn is_present(dom: &dyn Dom, descriptor: &ScriptDescriptor) -> bool {
  let resolved = descriptor.src.as_ref().map(|src| resolve_src(&dom.origin(), src));
  for script in dom.head_scripts() {
    if let (Some(wanted), Some(existing)) = (&resolved, &script.src) {
      if wanted == existing {
        return true;
      }
    }
    if let (Some(inline), Some(text)) = (&descriptor.inline, &script.text) {
      if inline == text {
        return true;
      }
    }
  }
  false
}

/// Server-render path of the `Script` component: `beforeInteractive`
/// descriptors are collected into the page's render context so the host's
/// head hook emits them as literal markup. Other strategies only act
/// client-side.
pub fn render_script(ctx: &mut RenderContext, descriptor: ScriptDescriptor) {
  if descriptor.strategy == Strategy::BeforeInteractive {
    ctx.collect_script(descriptor);
  }
}

pub struct ScriptLoad {
  descriptor: ScriptDescriptor,
  state: LoadState,
  deferral: Option<Deferral>,
}

impl ScriptLoad {
  pub fn new(descriptor: ScriptDescriptor) -> Self {
    Self { descriptor, state: LoadState::Pending, deferral: None }
  }

  pub fn state(&self) -> LoadState {
    self.state
  }

  /// Drive the machine when the owning component mounts client-side.
  pub fn mount(&mut self, dom: &mut dyn Dom) -> MountOutcome {
    match self.state {
      LoadState::Injected => return MountOutcome::Injected,
      LoadState::Skipped => return MountOutcome::Skipped,
      LoadState::Scheduled => {
        return MountOutcome::Scheduled(self.deferral.unwrap_or(Deferral::Idle));
      }
      LoadState::Pending => {}
    }

    match self.descriptor.strategy {
      // A beforeInteractive script normally arrived with the server-rendered
      // head; inject() finds it there and skips. After client-side
      // navigation to a page that never went through server rendering, it
      // is missing and gets injected now.
      Strategy::BeforeInteractive | Strategy::AfterInteractive => self.inject(dom),
      Strategy::LazyOnload => {
        let deferral = if dom.ready() { Deferral::Idle } else { Deferral::LoadThenIdle };
        self.state = LoadState::Scheduled;
        self.deferral = Some(deferral);
        MountOutcome::Scheduled(deferral)
      }
    }
  }

  /// Host callback for when the scheduled deferral fires. No-op unless the
  /// machine is `Scheduled`; a fired deferral cannot be re-armed.
  pub fn run_scheduled(&mut self, dom: &mut dyn Dom) -> LoadState {
    if self.state == LoadState::Scheduled {
      self.deferral = None;
      self.inject(dom);
    }
    self.state
  }

  fn inject(&mut self, dom: &mut dyn Dom) -> MountOutcome {
    if is_present(dom, &self.descriptor) {
      self.state = LoadState::Skipped;
      return MountOutcome::Skipped;
    }

    // Load/error callbacks are never wired for beforeInteractive; they have
    // no meaning before the document exists, and the SSR-emitted variant
    // cannot carry them either.
    let wire_callbacks = self.descriptor.strategy != Strategy::BeforeInteractive;
    let text =
      if self.descriptor.src.is_some() { None } else { self.descriptor.inline.clone() };
    dom.append_script(ScriptInit {
      src: self.descriptor.src.clone(),
      text,
      raw: self.descriptor.raw_inline,
      attributes: self.descriptor.attributes.clone(),
      on_load: if wire_callbacks { self.descriptor.on_load.clone() } else { None },
      on_error: if wire_callbacks { self.descriptor.on_error.clone() } else { None },
    });
    self.state = LoadState::Injected;
    MountOutcome::Injected
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  struct MockDom {
    origin: String,
    head: Vec<ExistingScript>,
    ready: bool,
    wired_load: Vec<bool>,
  }

  impl MockDom {
    fn new() -> Self {
      Self { origin: "https://example.com".into(), head: Vec::new(), ready: true, wired_load: Vec::new() }
    }

    fn with_head_script(mut self, src: Option<&str>, text: Option<&str>) -> Self {
      self.head.push(ExistingScript {
        src: src.map(String::from),
        text: text.map(String::from),
      });
      self
    }
  }

  impl Dom for MockDom {
    fn origin(&self) -> String {
      self.origin.clone()
    }

    fn head_scripts(&self) -> Vec<ExistingScript> {
      self.head.clone()
    }

    fn append_script(&mut self, init: ScriptInit) {
      // Mirror the browser: store the resolved src and the text content.
      self.head.push(ExistingScript {
        src: init.src.as_deref().map(|s| resolve_src(&self.origin, s)),
        text: init.text.clone(),
      });
      self.wired_load.push(init.on_load.is_some());
    }

    fn ready(&self) -> bool {
      self.ready
    }
  }

  #[test]
  fn resolve_src_prefixes_root_relative() {
    assert_eq!(resolve_src("https://example.com", "/app.js"), "https://example.com/app.js");
    assert_eq!(resolve_src("https://example.com", "https://cdn.io/x.js"), "https://cdn.io/x.js");
  }

  #[test]
  fn after_interactive_injects_on_mount() {
    let mut dom = MockDom::new();
    let mut load = ScriptLoad::new(ScriptDescriptor::external("/app.js"));
    assert_eq!(load.state(), LoadState::Pending);
    assert_eq!(load.mount(&mut dom), MountOutcome::Injected);
    assert_eq!(load.state(), LoadState::Injected);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn duplicate_src_is_skipped() {
    let mut dom = MockDom::new();
    let mut first = ScriptLoad::new(ScriptDescriptor::external("/app.js"));
    let mut second = ScriptLoad::new(ScriptDescriptor::external("/app.js"));
    first.mount(&mut dom);
    assert_eq!(second.mount(&mut dom), MountOutcome::Skipped);
    assert_eq!(second.state(), LoadState::Skipped);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn duplicate_inline_text_is_skipped() {
    let mut dom = MockDom::new();
    let mut first = ScriptLoad::new(ScriptDescriptor::inline("console.log(1)"));
    let mut second = ScriptLoad::new(ScriptDescriptor::inline("console.log(1)"));
    first.mount(&mut dom);
    assert_eq!(second.mount(&mut dom), MountOutcome::Skipped);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn before_interactive_skips_when_server_rendered() {
    // The head already carries the tag from server-generated markup, with
    // the src the browser resolved to an absolute URL.
    let mut dom =
      MockDom::new().with_head_script(Some("https://example.com/polyfill.js"), None);
    let mut load = ScriptLoad::new(
      ScriptDescriptor::external("/polyfill.js").strategy(Strategy::BeforeInteractive),
    );
    assert_eq!(load.mount(&mut dom), MountOutcome::Skipped);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn before_interactive_injects_after_client_navigation() {
    // Client-side navigation to a page that never went through server
    // rendering: the head does not carry the script yet.
    let mut dom = MockDom::new();
    let mut load = ScriptLoad::new(
      ScriptDescriptor::external("/polyfill.js").strategy(Strategy::BeforeInteractive),
    );
    assert_eq!(load.mount(&mut dom), MountOutcome::Injected);
    assert_eq!(dom.head.len(), 1);
    // And never wires callbacks.
    assert_eq!(dom.wired_load, vec![false]);
  }

  #[test]
  fn after_interactive_wires_callbacks() {
    let mut dom = MockDom::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_cb = Arc::clone(&calls);
    let mut load = ScriptLoad::new(ScriptDescriptor::external("/app.js").on_load(Arc::new(
      move || {
        calls_in_cb.fetch_add(1, Ordering::SeqCst);
      },
    )));
    load.mount(&mut dom);
    assert_eq!(dom.wired_load, vec![true]);
  }

  #[test]
  fn lazy_defers_to_idle_when_document_loaded() {
    let mut dom = MockDom::new();
    let mut load =
      ScriptLoad::new(ScriptDescriptor::external("/lazy.js").strategy(Strategy::LazyOnload));
    assert_eq!(load.mount(&mut dom), MountOutcome::Scheduled(Deferral::Idle));
    assert_eq!(load.state(), LoadState::Scheduled);
    assert!(dom.head.is_empty());

    assert_eq!(load.run_scheduled(&mut dom), LoadState::Injected);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn lazy_waits_for_load_event_when_document_still_loading() {
    let mut dom = MockDom::new();
    dom.ready = false;
    let mut load =
      ScriptLoad::new(ScriptDescriptor::external("/lazy.js").strategy(Strategy::LazyOnload));
    assert_eq!(load.mount(&mut dom), MountOutcome::Scheduled(Deferral::LoadThenIdle));
  }

  #[test]
  fn scheduled_machine_holds_one_deferral_slot() {
    let mut dom = MockDom::new();
    let mut load =
      ScriptLoad::new(ScriptDescriptor::external("/lazy.js").strategy(Strategy::LazyOnload));
    load.mount(&mut dom);
    // Re-mounting while scheduled neither injects nor re-arms.
    assert_eq!(load.mount(&mut dom), MountOutcome::Scheduled(Deferral::Idle));
    assert!(dom.head.is_empty());
  }

  #[test]
  fn run_scheduled_is_noop_when_not_scheduled() {
    let mut dom = MockDom::new();
    let mut load = ScriptLoad::new(ScriptDescriptor::external("/app.js"));
    assert_eq!(load.run_scheduled(&mut dom), LoadState::Pending);
    assert!(dom.head.is_empty());
  }

  #[test]
  fn terminal_states_ignore_remounts() {
    let mut dom = MockDom::new();
    let mut load = ScriptLoad::new(ScriptDescriptor::external("/app.js"));
    load.mount(&mut dom);
    assert_eq!(load.mount(&mut dom), MountOutcome::Injected);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn lazy_script_skips_if_equivalent_appeared_before_deferral_fired() {
    let mut dom = MockDom::new();
    let mut lazy =
      ScriptLoad::new(ScriptDescriptor::external("/w.js").strategy(Strategy::LazyOnload));
    lazy.mount(&mut dom);

    // Something else injects the same script while the deferral is pending.
    let mut eager = ScriptLoad::new(ScriptDescriptor::external("/w.js"));
    eager.mount(&mut dom);

    assert_eq!(lazy.run_scheduled(&mut dom), LoadState::Skipped);
    assert_eq!(dom.head.len(), 1);
  }

  #[test]
  fn ssr_render_collects_only_before_interactive() {
    let mut ctx = RenderContext::new("/about");
    render_script(
      &mut ctx,
      ScriptDescriptor::external("/polyfill.js").strategy(Strategy::BeforeInteractive),
    );
    render_script(&mut ctx, ScriptDescriptor::external("/app.js"));
    render_script(
      &mut ctx,
      ScriptDescriptor::external("/lazy.js").strategy(Strategy::LazyOnload),
    );
    assert_eq!(ctx.scripts().len(), 1);
    assert_eq!(ctx.scripts()[0].src.as_deref(), Some("/polyfill.js"));
  }

  #[test]
  fn raw_inline_flag_reaches_the_init() {
    struct RawProbe {
      raw_seen: Option<bool>,
    }
    impl Dom for RawProbe {
      fn origin(&self) -> String {
        String::new()
      }
      fn head_scripts(&self) -> Vec<ExistingScript> {
        Vec::new()
      }
      fn append_script(&mut self, init: ScriptInit) {
        self.raw_seen = Some(init.raw);
      }
      fn ready(&self) -> bool {
        true
      }
    }

    let mut dom = RawProbe { raw_seen: None };
    ScriptLoad::new(ScriptDescriptor::inline_raw("x()")).mount(&mut dom);
    assert_eq!(dom.raw_seen, Some(true));
  }
}
