/* demos/site/src/main.rs */

// Smallest possible embedding: a build host that just prints what the shim
// registers, driven over the bundled pages/ tree.

#![allow(clippy::print_stdout)]

use std::path::Path;

use serde_json::json;

use graft_build::{
  configure_bundler, create_pages, paths_fn, props_fn, BuildError, BuildHost, BundlerConfig,
  DataModule, DataRegistry, NewPage, Params, DEFAULT_COMPAT_ALIAS,
};

struct PrintingHost {
  created: usize,
}

impl BuildHost for PrintingHost {
  fn create_page(&mut self, page: NewPage) -> Result<(), BuildError> {
    println!("create_page {}  component={}  context={}", page.path, page.component.display(), page.context);
    self.created += 1;
    Ok(())
  }

  fn warn(&mut self, message: &str) {
    println!("warning: {message}");
  }
}

#[tokio::main]
async fn main() -> Result<(), BuildError> {
  let pages = Path::new(env!("CARGO_MANIFEST_DIR")).join("pages");

  let mut registry = DataRegistry::new();
  registry.register(
    "a.data.js",
    DataModule::new(props_fn(|_| async { Ok(json!({ "title": "Page A" })) })),
  );
  registry.register(
    "b/[id].data.js",
    DataModule::new(props_fn(|params: Params| async move {
      Ok(json!({ "id": params["id"] }))
    }))
    .with_paths(paths_fn(|| async {
      Ok(vec![
        Params::from([("id".to_string(), "1".to_string())]),
        Params::from([("id".to_string(), "2".to_string())]),
      ])
    })),
  );

  let mut host = PrintingHost { created: 0 };
  create_pages(&pages, ".data.js", &registry, &mut host).await?;
  println!("{} pages registered", host.created);

  let mut bundler = BundlerConfig::default();
  configure_bundler(&mut bundler, DEFAULT_COMPAT_ALIAS, Path::new("runtime"));
  println!("bundler aliases: {:?}", bundler.aliases);

  Ok(())
}
