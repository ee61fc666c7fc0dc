//! Policy Cache - command driver
//!
//! Reads JSON Lines commands from stdin, applies them to one cache and
//! writes `DISCARD: <key>` notices and command output to stdout.

use std::io::{self, BufWriter};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{Config, Session};

/// Main entry point for the cache driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Build the configured cache
/// 4. Execute stdin commands until EOF
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Policy Cache driver");

    let config = Config::from_env().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: max_items={}, policy={}",
        config.max_items, config.mode
    );

    let mut session = Session::new(config).context("failed to build cache")?;

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let summary = session
        .run(stdin.lock(), &mut stdout)
        .context("failed to process commands")?;

    info!(
        "Input exhausted: executed={}, rejected={}",
        summary.executed, summary.rejected
    );
    Ok(())
}
