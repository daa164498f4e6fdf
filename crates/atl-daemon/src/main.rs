//! ATL Daemon - Audio request dispatch service.
//!
//! Runs the request dispatcher against a backend that accepts every request,
//! replays a request script if one is configured, and reports completions
//! through a logging event listener until it is told to stop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod replay;
mod signals;

use atl_core::{EventListener, EventListenerRegistry, ListenerCallback, RequestInfo};
use atl_dispatch::{Dispatcher, NullBackend};

/// How often parked sync completions are delivered.
const SYNC_DRAIN_INTERVAL: Duration = Duration::from_millis(20);

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;

    let level = &config.daemon.log_level;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("atl_daemon={level}").parse()?)
                .add_directive(format!("atl_dispatch={level}").parse()?)
                .add_directive(format!("atl_core={level}").parse()?),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ATL daemon");

    let registry = Arc::new(EventListenerRegistry::new());
    registry.add(EventListener::new(completion_logger()));

    let (handle, mut sync_completions, dispatcher_task) =
        Dispatcher::spawn(NullBackend::new(), Arc::clone(&registry), config.dispatch);

    let mut shutdown_rx = signals::setup_signal_handlers()?;

    // A script given on the command line wins over the configured one.
    let script = std::env::args().nth(1).map(PathBuf::from).or(config.replay.script);
    if let Some(path) = script {
        match replay::replay_file(&handle, &path).await {
            Ok(stats) => {
                info!(submitted = stats.submitted, skipped = stats.skipped, "Replay finished");
            }
            Err(e) => error!(error = %e, "Replay failed"),
        }
    }

    info!("Daemon running");
    let mut drain_tick = tokio::time::interval(SYNC_DRAIN_INTERVAL);

    loop {
        tokio::select! {
            _ = drain_tick.tick() => {
                sync_completions.drain(&registry);
            }

            _ = shutdown_rx.recv() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    if let Err(e) = handle.shutdown().await {
        error!(error = %e, "Dispatcher already stopped");
    }
    dispatcher_task.await.context("Dispatcher task failed")?;
    sync_completions.drain(&registry);

    info!("ATL daemon stopped");
    Ok(())
}

/// Listener that logs every completion it hears about.
fn completion_logger() -> ListenerCallback {
    Arc::new(|info: &RequestInfo| {
        info!(
            result = ?info.result,
            category = ?info.category,
            kind_bit = info.kind_bit,
            object_id = %info.object_id,
            owner = info.owner.0,
            "Request completed"
        );
    })
}
