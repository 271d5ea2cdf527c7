//! tele — headless live telemetry: synthetic vehicle metrics rendered as
//! log sparklines or JSON lines.
//!
//! Run with:  `RUST_LOG=info tele`  (config: `$TELE_CONFIG` or
//! `~/.config/tele/tele.toml`)

mod sinks;

use anyhow::Result;
use sinks::{JsonSink, LogSink};
use tele_config::{config_path, load as load_config, OutputMode};
use tele_core::RenderSink;
use tele_series::Scheduler;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    // Logs go to stderr so JSON output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("tele v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(config_path())?;
    let mut scheduler = Scheduler::from_config(&config)?;

    match config.dashboard.output {
        OutputMode::Log => run_until_interrupted(&mut scheduler, &mut LogSink).await,
        OutputMode::Json => {
            let mut sink = JsonSink::new(std::io::stdout().lock());
            run_until_interrupted(&mut scheduler, &mut sink).await?;
            match sink.take_error() {
                Some(e) => Err(tele_core::TeleError::from(e).into()),
                None    => Ok(()),
            }
        }
    }
}

/// Run the scheduler until Ctrl-C, a closed sink, or an error.
async fn run_until_interrupted<S: RenderSink>(
    scheduler: &mut Scheduler,
    sink: &mut S,
) -> Result<()> {
    tokio::select! {
        res = scheduler.run(sink) => res?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted; shutting down"),
    }
    info!("Stopped after {} ticks", scheduler.ticks());
    Ok(())
}
