//! Async dispatcher task.
//!
//! Requests arrive on two channels: a bounded command channel used from
//! async code and an unbounded one that plain threads can push into without
//! blocking. The task queues them, runs them through the backend in batches,
//! and delivers each completion:
//!
//! - blocking callers get the finished envelope back on a oneshot;
//! - `SYNC_CALLBACK` / `SYNC_FINISHED_CALLBACK` requests are parked on the
//!   sync completion channel and delivered when the owner calls
//!   [`SyncCompletions::drain`] on its own thread;
//! - everything else is reported to listeners on the dispatcher task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

#[cfg(feature = "diagnostics")]
use atl_core::diagnostics::describe;
use atl_core::{EventListenerRegistry, Request, RequestEnvelope, RequestFlags, RequestInfo};

use crate::backend::AudioBackend;
use crate::error::{DispatchError, DispatchResult};
use crate::queue::{Completed, RequestQueue};

/// Dispatcher tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Capacity of the async request channel
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Requests processed before yielding to the runtime
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_channel_capacity() -> usize {
    64
}

fn default_batch_size() -> usize {
    32
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { channel_capacity: default_channel_capacity(), batch_size: default_batch_size() }
    }
}

enum Command {
    Push(RequestEnvelope),
    PushBlocking(RequestEnvelope, oneshot::Sender<RequestEnvelope>),
    Shutdown,
}

/// Cloneable handle for submitting requests.
#[derive(Clone)]
pub struct DispatcherHandle {
    command_tx: mpsc::Sender<Command>,
    thread_safe_tx: mpsc::UnboundedSender<RequestEnvelope>,
}

impl DispatcherHandle {
    /// Queue a request without waiting for it.
    ///
    /// # Errors
    /// Returns `DispatchError::ChannelClosed` if the dispatcher has stopped.
    pub async fn push(&self, request: Request) -> DispatchResult<()> {
        self.command_tx
            .send(Command::Push(RequestEnvelope::from(request)))
            .await
            .map_err(|_| DispatchError::ChannelClosed)
    }

    /// Queue a request and wait until the backend has processed it.
    ///
    /// `EXECUTE_BLOCKING` is added to the request's flags.
    ///
    /// # Errors
    /// Returns `DispatchError::ChannelClosed` if the dispatcher has stopped,
    /// or `DispatchError::ReplyDropped` if it stopped before replying.
    pub async fn push_blocking(&self, request: Request) -> DispatchResult<RequestEnvelope> {
        let flags = request.flags | RequestFlags::EXECUTE_BLOCKING;
        let envelope = RequestEnvelope::from(request.with_flags(flags));
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::PushBlocking(envelope, reply_tx))
            .await
            .map_err(|_| DispatchError::ChannelClosed)?;

        reply_rx.await.map_err(|_| DispatchError::ReplyDropped)
    }

    /// Queue a request from any thread, async or not. Never blocks.
    ///
    /// `THREAD_SAFE_PUSH` is added to the request's flags.
    ///
    /// # Errors
    /// Returns `DispatchError::ChannelClosed` if the dispatcher has stopped.
    pub fn push_thread_safe(&self, request: Request) -> DispatchResult<()> {
        let flags = request.flags | RequestFlags::THREAD_SAFE_PUSH;
        self.thread_safe_tx
            .send(RequestEnvelope::from(request.with_flags(flags)))
            .map_err(|_| DispatchError::ChannelClosed)
    }

    /// Ask the dispatcher to finish queued work and stop.
    ///
    /// # Errors
    /// Returns `DispatchError::ChannelClosed` if the dispatcher already stopped.
    pub async fn shutdown(&self) -> DispatchResult<()> {
        self.command_tx.send(Command::Shutdown).await.map_err(|_| DispatchError::ChannelClosed)
    }
}

/// Completions parked for delivery on the owner's thread.
pub struct SyncCompletions {
    rx: mpsc::UnboundedReceiver<RequestEnvelope>,
}

impl SyncCompletions {
    /// Notify listeners about every parked completion. Returns how many were
    /// delivered.
    pub fn drain(&mut self, registry: &EventListenerRegistry) -> usize {
        let mut delivered = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            registry.notify(&RequestInfo::from_envelope(&envelope));
            delivered += 1;
        }
        if delivered > 0 {
            debug!(delivered, "Delivered sync completions");
        }
        delivered
    }

    /// Wait for the next parked completion.
    ///
    /// Returns `None` once the dispatcher has stopped and nothing is left.
    pub async fn recv(&mut self) -> Option<RequestEnvelope> {
        self.rx.recv().await
    }
}

/// The dispatcher task state.
pub struct Dispatcher<B> {
    backend: B,
    registry: Arc<EventListenerRegistry>,
    config: DispatcherConfig,
    queue: RequestQueue,
    command_rx: mpsc::Receiver<Command>,
    thread_safe_rx: mpsc::UnboundedReceiver<RequestEnvelope>,
    sync_tx: mpsc::UnboundedSender<RequestEnvelope>,
}

impl<B: AudioBackend + 'static> Dispatcher<B> {
    /// Spawn the dispatcher on the current tokio runtime.
    pub fn spawn(
        backend: B,
        registry: Arc<EventListenerRegistry>,
        config: DispatcherConfig,
    ) -> (DispatcherHandle, SyncCompletions, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(config.channel_capacity.max(1));
        let (thread_safe_tx, thread_safe_rx) = mpsc::unbounded_channel();
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();

        let dispatcher = Self {
            backend,
            registry,
            config,
            queue: RequestQueue::new(),
            command_rx,
            thread_safe_rx,
            sync_tx,
        };
        let task = tokio::spawn(dispatcher.run());

        (
            DispatcherHandle { command_tx, thread_safe_tx },
            SyncCompletions { rx: sync_rx },
            task,
        )
    }

    async fn run(mut self) {
        info!(
            channel_capacity = self.config.channel_capacity,
            batch_size = self.config.batch_size,
            "Dispatcher started"
        );
        let mut running = true;

        while running {
            if self.queue.is_empty() {
                tokio::select! {
                    command = self.command_rx.recv() => match command {
                        Some(command) => running = self.accept(command),
                        None => running = false,
                    },
                    Some(envelope) = self.thread_safe_rx.recv() => self.queue.push(envelope),
                }
            }

            while running {
                match self.command_rx.try_recv() {
                    Ok(command) => running = self.accept(command),
                    Err(_) => break,
                }
            }
            while let Ok(envelope) = self.thread_safe_rx.try_recv() {
                self.queue.push(envelope);
            }

            self.process_batch(self.config.batch_size.max(1));
            tokio::task::yield_now().await;
        }

        // Refuse new work, then complete everything already accepted.
        self.command_rx.close();
        self.thread_safe_rx.close();
        while let Ok(command) = self.command_rx.try_recv() {
            self.accept(command);
        }
        while let Ok(envelope) = self.thread_safe_rx.try_recv() {
            self.queue.push(envelope);
        }
        let remaining = self.queue.len();
        self.process_batch(remaining);
        info!(processed = remaining, "Dispatcher stopped");
    }

    /// Queue a command. Returns `false` on shutdown.
    fn accept(&mut self, command: Command) -> bool {
        match command {
            Command::Push(envelope) => self.queue.push(envelope),
            Command::PushBlocking(envelope, reply) => self.queue.push_blocking(envelope, reply),
            Command::Shutdown => {
                debug!("Shutdown requested");
                return false;
            }
        }
        true
    }

    fn process_batch(&mut self, limit: usize) {
        for _ in 0..limit {
            let Some(completed) = self.queue.process_next(&mut self.backend) else {
                break;
            };
            self.complete(completed);
        }
    }

    fn complete(&self, completed: Completed) {
        let Completed { mut envelope, reply } = completed;
        #[cfg(feature = "diagnostics")]
        trace!(request = %describe(&envelope), status = ?envelope.status(), "Request completed");
        #[cfg(not(feature = "diagnostics"))]
        trace!(kind = ?envelope.kind(), status = ?envelope.status(), "Request completed");

        let sync = envelope
            .flags()
            .intersects(RequestFlags::SYNC_CALLBACK | RequestFlags::SYNC_FINISHED_CALLBACK);

        if sync {
            envelope.mark_waiting_for_removal();
        } else {
            self.registry.notify(&RequestInfo::from_envelope(&envelope));
        }

        if let Some(reply) = reply {
            if reply.send(envelope.clone()).is_err() {
                warn!("Blocking caller stopped waiting");
            }
        }

        if sync && self.sync_tx.send(envelope).is_err() {
            warn!("Sync completion receiver dropped");
        }
    }
}
