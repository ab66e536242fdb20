//! Interactive SIPK console.
//!
//! Menus go to stdout. Diagnostics go to stderr, filtered by `RUST_LOG`
//! (default `warn`).

use anyhow::Context;
use sipk::{run_session, AppEnvironment, AppReducer, AppState};
use sipk_core::environment::SystemClock;
use sipk_runtime::console::StdConsole;
use sipk_runtime::Store;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let env = AppEnvironment::new(Arc::new(SystemClock));
    let store = Store::new(AppState::new(), AppReducer::new(), env);

    let state = run_session(StdConsole::new(), store).context("SIPK session failed")?;
    tracing::debug!(accounts = state.account_count(), "Session finished");

    Ok(())
}
