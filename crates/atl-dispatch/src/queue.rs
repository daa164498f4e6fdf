//! Two-lane request queue.

use std::collections::VecDeque;

use tokio::sync::oneshot;
use tracing::{debug, warn};

#[cfg(feature = "diagnostics")]
use atl_core::diagnostics::describe;
use atl_core::{RequestEnvelope, RequestFlags, RequestStatus};

use crate::backend::AudioBackend;

/// Sends a finished blocking request back to its caller.
pub type Reply = oneshot::Sender<RequestEnvelope>;

/// A processed envelope and, for blocking requests, where to send it.
#[derive(Debug)]
pub struct Completed {
    pub envelope: RequestEnvelope,
    pub reply: Option<Reply>,
}

#[derive(Debug)]
struct Entry {
    envelope: RequestEnvelope,
    reply: Option<Reply>,
}

/// Pending requests in two FIFO lanes.
///
/// `PRIORITY_HIGH` requests are all processed before any normal one. Order
/// within a lane is arrival order.
#[derive(Debug, Default)]
pub struct RequestQueue {
    high: VecDeque<Entry>,
    normal: VecDeque<Entry>,
}

impl RequestQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an envelope and mark it `Pending`.
    pub fn push(&mut self, envelope: RequestEnvelope) {
        self.enqueue(envelope, None);
    }

    /// Queue an envelope whose caller is waiting on `reply`.
    pub fn push_blocking(&mut self, envelope: RequestEnvelope, reply: Reply) {
        self.enqueue(envelope, Some(reply));
    }

    fn enqueue(&mut self, mut envelope: RequestEnvelope, reply: Option<Reply>) {
        if !envelope.set_status(RequestStatus::Pending) {
            warn!(status = ?envelope.status(), "Queued a request that was already processed");
        }
        let entry = Entry { envelope, reply };
        if entry.envelope.flags().contains(RequestFlags::PRIORITY_HIGH) {
            self.high.push_back(entry);
        } else {
            self.normal.push_back(entry);
        }
    }

    /// Run the next request through `backend` and return it completed.
    ///
    /// Envelopes without a payload fail without reaching the backend.
    pub fn process_next<B>(&mut self, backend: &mut B) -> Option<Completed>
    where
        B: AudioBackend + ?Sized,
    {
        let Entry { mut envelope, reply } =
            self.high.pop_front().or_else(|| self.normal.pop_front())?;

        let status = if envelope.payload().is_none() {
            debug!("Empty request, nothing to do");
            RequestStatus::Failure
        } else {
            match backend.process(&envelope) {
                Ok(()) => RequestStatus::Success,
                Err(e) => {
                    #[cfg(feature = "diagnostics")]
                    warn!(request = %describe(&envelope), error = %e, "Request failed");
                    #[cfg(not(feature = "diagnostics"))]
                    warn!(kind = ?envelope.kind(), error = %e, "Request failed");
                    RequestStatus::Failure
                }
            }
        };
        envelope.set_status(status);

        Some(Completed { envelope, reply })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.high.len() + self.normal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.normal.is_empty()
    }
}
