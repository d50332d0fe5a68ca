//! A screen that loads a gist off the main thread and renders a summary.
//!
//! The HTTP call is simulated. Run with `--offline` to see the error path:
//!
//! ```text
//! RUST_LOG=debug cargo run --example gist_viewer -- --offline
//! ```

use std::{collections::BTreeMap, env, io, thread, time::Duration};

use rxkata::prelude::*;
use tracing_subscriber::EnvFilter;

struct GistFile {
  size: u64,
}

struct Gist {
  owner: BTreeMap<String, String>,
  files: BTreeMap<String, GistFile>,
}

fn get_gist(offline: bool) -> io::Result<Gist> {
  // Network latency.
  thread::sleep(Duration::from_millis(50));
  if offline {
    return Err(io::Error::new(io::ErrorKind::NotConnected, "no route to api.github.com"));
  }
  let owner = BTreeMap::from([
    ("id".to_owned(), "1234".to_owned()),
    ("login".to_owned(), "donnfelker".to_owned()),
  ]);
  let files = BTreeMap::from([
    ("fetch.rs".to_owned(), GistFile { size: 2412 }),
    ("Cargo.toml".to_owned(), GistFile { size: 845 }),
  ]);
  Ok(Gist { owner, files })
}

fn output_to_display(gist: Gist) -> String {
  let mut text = String::new();
  if let Some(login) = gist.owner.get("login") {
    text.push_str(&format!("login : {login}"));
  }
  text.push_str("\n\n\n");
  for (name, file) in &gist.files {
    text.push_str(&format!("{name} - Length of file {}\n", file.size));
  }
  text
}

struct GistScreen {
  subscriptions: SubscriptionRegistry,
  main: EventLoop,
}

impl GistScreen {
  fn on_create(&mut self, offline: bool) -> io::Result<()> {
    let handle = observable::fetch(move || get_gist(offline))
      .subscribe_on(worker_pool(2)?)
      .observe_on(self.main.handle())
      .lift(|gist| Ok::<_, RxError>(output_to_display(gist)))
      .subscribe_all(
        |text| println!("{text}"),
        |err| tracing::error!(error = %err, "could not load the gist"),
        || tracing::info!("gist rendered"),
      );
    self.subscriptions.add(handle);
    Ok(())
  }

  fn run(&self) { self.main.run_until_idle(Duration::from_millis(500)); }

  fn on_destroy(&mut self) { self.subscriptions.clear(); }
}

fn main() -> io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let offline = env::args().any(|arg| arg == "--offline");
  let mut screen = GistScreen { subscriptions: SubscriptionRegistry::new(), main: EventLoop::new() };
  screen.on_create(offline)?;
  screen.run();
  screen.on_destroy();

  // The log observer template on a plain sequence.
  observable::from_iter(["Hello", "World"])
    .lift(|word: &str| Ok::<_, RxError>(word.len()))
    .subscribe_with(log_observer("intro"));
  Ok(())
}
