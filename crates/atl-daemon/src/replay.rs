//! Request script replay.
//!
//! A script is JSON lines, one `Request` per non-empty line.

use std::path::Path;

use anyhow::{Context, Result};
#[cfg(feature = "diagnostics")]
use atl_core::diagnostics::describe;
use atl_core::{Request, RequestFlags};
use atl_dispatch::DispatcherHandle;
use tracing::{debug, info, warn};

/// Counts from one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub submitted: usize,
    pub skipped: usize,
}

/// Parse a script, skipping lines that are not valid requests.
pub fn parse_script(script: &str) -> (Vec<Request>, usize) {
    let mut requests = Vec::new();
    let mut skipped = 0;

    for (index, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Request>(line) {
            Ok(request) => requests.push(request),
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed request");
                skipped += 1;
            }
        }
    }

    (requests, skipped)
}

/// Submit `requests` in order. Blocking requests are awaited.
pub async fn submit(handle: &DispatcherHandle, requests: Vec<Request>) -> Result<usize> {
    let mut submitted = 0;

    for request in requests {
        let flags = request.flags;
        if flags.contains(RequestFlags::EXECUTE_BLOCKING) {
            let envelope = handle.push_blocking(request).await.context("Blocking request failed")?;
            #[cfg(feature = "diagnostics")]
            info!(
                request = %describe(&envelope),
                status = ?envelope.status(),
                "Blocking request done"
            );
            #[cfg(not(feature = "diagnostics"))]
            info!(kind = ?envelope.kind(), status = ?envelope.status(), "Blocking request done");
        } else if flags.contains(RequestFlags::THREAD_SAFE_PUSH) {
            handle.push_thread_safe(request).context("Failed to queue request")?;
        } else {
            handle.push(request).await.context("Failed to queue request")?;
        }
        submitted += 1;
    }

    debug!(submitted, "Submitted requests");
    Ok(submitted)
}

/// Read and replay the script at `path`.
pub async fn replay_file(handle: &DispatcherHandle, path: &Path) -> Result<ReplayStats> {
    let script = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read replay script: {path:?}"))?;

    let (requests, skipped) = parse_script(&script);
    info!(?path, count = requests.len(), skipped, "Replaying request script");

    let submitted = submit(handle, requests).await?;
    Ok(ReplayStats { submitted, skipped })
}
