//! Background checkpoint worker.
//!
//! Each session owns one [`CheckpointWorker`] fed through an unbounded
//! `mpsc` channel. Batches run one at a time in the order they were
//! submitted, so an older save can never land on top of a newer one.
//! A flush request travels through the same channel and is answered over a
//! `oneshot` once every batch queued before it has finished.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mine_core::{GameError, GameSnapshot, PersistRequest};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::error::Result;
use super::gateway::{PersistOutcome, PersistenceGateway, Standings};

/// Reports kept between flushes; the oldest are dropped past this.
const MAX_RETAINED_REPORTS: usize = 1024;

/// Outcome of one background persistence request.
#[derive(Debug)]
pub struct CheckpointReport {
    pub request: PersistRequest,
    pub outcome: Result<PersistOutcome>,
}

impl CheckpointReport {
    pub fn is_written(&self) -> bool {
        self.outcome.as_ref().is_ok_and(PersistOutcome::is_written)
    }
}

/// Work captured at dispatch time so later mutations do not leak into it.
pub(crate) enum Job {
    Save(Box<GameSnapshot>),
    Publish(Standings),
}

impl Job {
    fn request(&self) -> PersistRequest {
        match self {
            Job::Save(_) => PersistRequest::SaveGame,
            Job::Publish(_) => PersistRequest::UpdateLeaderboard,
        }
    }
}

enum Command {
    /// Requests of one transition, run in order.
    Run(Vec<Job>),
    /// Reply with every report collected since the previous flush.
    Flush {
        reply: oneshot::Sender<Vec<CheckpointReport>>,
    },
}

/// Session-side handle to a running [`CheckpointWorker`].
pub(crate) struct CheckpointQueue {
    command_tx: mpsc::UnboundedSender<Command>,
    queued: Arc<AtomicUsize>,
}

impl CheckpointQueue {
    /// Starts a worker on `handle`. It stops once the queue is dropped and
    /// everything already submitted has run.
    pub(crate) fn spawn(gateway: PersistenceGateway, handle: &Handle) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let queued = Arc::new(AtomicUsize::new(0));
        let worker = CheckpointWorker {
            gateway,
            command_rx,
            queued: Arc::clone(&queued),
            reports: VecDeque::new(),
        };
        handle.spawn(worker.run());
        Self { command_tx, queued }
    }

    /// Whether the worker has gone away, e.g. with the runtime it ran on.
    pub(crate) fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Queues one transition's jobs. Returns `false` when the worker is gone.
    pub(crate) fn submit(&self, jobs: Vec<Job>) -> bool {
        self.queued.fetch_add(1, Ordering::SeqCst);
        if self.command_tx.send(Command::Run(jobs)).is_err() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
            return false;
        }
        true
    }

    /// Batches submitted but not yet finished.
    pub(crate) fn pending(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }

    /// Waits for every batch submitted so far and returns their reports.
    pub(crate) async fn flush(&self) -> Vec<CheckpointReport> {
        let (reply, reply_rx) = oneshot::channel();
        if self.command_tx.send(Command::Flush { reply }).is_err() {
            warn!("Checkpoint worker stopped; nothing to flush");
            return Vec::new();
        }
        reply_rx.await.unwrap_or_else(|_| {
            warn!("Checkpoint worker dropped a flush request");
            Vec::new()
        })
    }
}

struct CheckpointWorker {
    gateway: PersistenceGateway,
    command_rx: mpsc::UnboundedReceiver<Command>,
    queued: Arc<AtomicUsize>,
    reports: VecDeque<CheckpointReport>,
}

impl CheckpointWorker {
    async fn run(mut self) {
        debug!("Checkpoint worker started");
        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Run(jobs) => {
                    self.run_jobs(jobs).await;
                    self.queued.fetch_sub(1, Ordering::SeqCst);
                }
                Command::Flush { reply } => {
                    let reports = self.reports.drain(..).collect();
                    if reply.send(reports).is_err() {
                        debug!("Flush requester went away");
                    }
                }
            }
        }
        debug!("Checkpoint worker stopped");
    }

    /// Runs one transition's requests in order, logging anything that did
    /// not get written.
    async fn run_jobs(&mut self, jobs: Vec<Job>) {
        for job in jobs {
            let request = job.request();
            let outcome = match job {
                Job::Save(snapshot) => self.gateway.save(&snapshot).await,
                Job::Publish(standings) => self.gateway.update_leaderboard(standings).await,
            };
            match &outcome {
                Ok(PersistOutcome::Written) => {}
                Ok(PersistOutcome::Skipped(reason)) => {
                    warn!(?request, "Checkpoint skipped: {}", reason)
                }
                Err(err) => warn!(?request, code = err.error_code(), "Checkpoint failed: {}", err),
            }
            if self.reports.len() == MAX_RETAINED_REPORTS {
                self.reports.pop_front();
            }
            self.reports.push_back(CheckpointReport { request, outcome });
        }
    }
}
