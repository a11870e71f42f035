//! Best-effort asynchronous writer for state snapshots.

use crate::kernel::persistence::write_snapshot;
use crate::kernel::services::ports::KeyValueStore;
use crate::kernel::state::PersistedState;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistMessage {
    Saved { generation: u64 },
    /// A newer snapshot had already settled.
    Skipped { generation: u64 },
    Failed { generation: u64, error: String },
}

pub struct PersistenceService {
    runtime: tokio::runtime::Runtime,
    store: Arc<dyn KeyValueStore>,
    settled: Arc<Mutex<u64>>,
    next_generation: u64,
    pending: Vec<JoinHandle<()>>,
    tx: Sender<PersistMessage>,
    rx: Receiver<PersistMessage>,
}

impl PersistenceService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            runtime,
            store,
            settled: Arc::new(Mutex::new(0)),
            next_generation: 0,
            pending: Vec::new(),
            tx,
            rx,
        })
    }

    /// Queues a snapshot write and returns its generation.
    pub fn persist(&mut self, snapshot: PersistedState) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        let store = Arc::clone(&self.store);
        let settled = Arc::clone(&self.settled);
        let tx = self.tx.clone();

        self.pending.retain(|handle| !handle.is_finished());
        let handle = self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                let Ok(mut last) = settled.lock() else {
                    return PersistMessage::Failed {
                        generation,
                        error: "settled generation lock poisoned".to_string(),
                    };
                };
                if *last > generation {
                    return PersistMessage::Skipped { generation };
                }
                match write_snapshot(store.as_ref(), &snapshot) {
                    Ok(()) => {
                        *last = generation;
                        PersistMessage::Saved { generation }
                    }
                    Err(e) => PersistMessage::Failed {
                        generation,
                        error: e.to_string(),
                    },
                }
            })
            .await;

            let msg = result.unwrap_or_else(|e| PersistMessage::Failed {
                generation,
                error: e.to_string(),
            });
            if let PersistMessage::Failed { error, .. } = &msg {
                tracing::warn!(generation, error = %error, "failed to persist projects");
            }
            let _ = tx.send(msg);
        });
        self.pending.push(handle);
        generation
    }

    /// Blocks until every queued write has settled.
    pub fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = self.runtime.block_on(handle) {
                tracing::warn!(error = %e, "persist task aborted");
            }
        }
    }

    pub fn try_recv(&mut self) -> Result<PersistMessage, TryRecvError> {
        self.rx.try_recv()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/persistence.rs"]
mod tests;
