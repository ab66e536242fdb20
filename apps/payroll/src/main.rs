//! Prints the payroll report to stdout.
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`); set
//! `RUST_LOG=payroll_stream=debug` to watch the iterators make each decision.

use anyhow::Context;
use payroll_stream::{dataset, run};
use std::io::{self, Write};
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
                .with_writer(io::stderr),
        )
        .init();

    let employees = dataset();
    let mut out = io::BufWriter::new(io::stdout().lock());

    let summary = run(&mut out, &employees).context("payroll report failed")?;
    out.flush().context("failed to flush report")?;

    tracing::debug!(
        total = summary.total,
        top = %summary.top_name,
        "Report complete"
    );
    Ok(())
}
