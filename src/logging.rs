//! Subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the configured filter applies.
//! Installing is best-effort so a host that already set a global
//! subscriber keeps it.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(default_filter: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  let installed = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().with_target(true))
    .try_init()
    .is_ok();

  if installed {
    tracing::debug!(filter = default_filter, "Logging initialized");
  }
}
