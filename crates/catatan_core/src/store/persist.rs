//! Debounced persistence scheduler.
//!
//! # Responsibility
//! - Coalesce rapid state snapshots into one durable write after a quiet
//!   interval.
//! - Keep storage writes off the caller's thread (fire-and-forget).
//!
//! # Invariants
//! - Each scheduled snapshot resets the quiet timer; only the last snapshot
//!   in a burst is written.
//! - A write lands within the quiet interval of the last schedule call.
//! - Pending state is drained on flush and on drop; save failures are
//!   logged and swallowed.

use crate::storage::StorageAdapter;
use log::{debug, error};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum Command {
    Schedule(String),
    Flush(Sender<()>),
}

/// Worker-thread handle owned by the note store.
pub(crate) struct PersistScheduler {
    tx: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl PersistScheduler {
    pub(crate) fn new(storage: Arc<dyn StorageAdapter>, key: String, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || run_worker(rx, storage, key, quiet));
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Replaces any pending snapshot and restarts the quiet timer.
    pub(crate) fn schedule(&self, snapshot: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Command::Schedule(snapshot));
        }
    }

    /// Writes any pending snapshot now and waits for the write to finish.
    pub(crate) fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for PersistScheduler {
    fn drop(&mut self) {
        // Disconnecting the channel wakes the worker, which drains any
        // pending snapshot before exiting.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run_worker(
    rx: Receiver<Command>,
    storage: Arc<dyn StorageAdapter>,
    key: String,
    quiet: Duration,
) {
    let mut pending: Option<String> = None;
    loop {
        let message = if pending.is_some() {
            match rx.recv_timeout(quiet) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => {
                    write_snapshot(storage.as_ref(), &key, pending.take());
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => None,
            }
        } else {
            rx.recv().ok()
        };

        match message {
            Some(Command::Schedule(snapshot)) => pending = Some(snapshot),
            Some(Command::Flush(ack)) => {
                write_snapshot(storage.as_ref(), &key, pending.take());
                let _ = ack.send(());
            }
            None => {
                write_snapshot(storage.as_ref(), &key, pending.take());
                break;
            }
        }
    }
}

fn write_snapshot(storage: &dyn StorageAdapter, key: &str, snapshot: Option<String>) {
    let Some(snapshot) = snapshot else { return };
    match storage.save(key, &snapshot) {
        Ok(()) => debug!(
            "event=state_save module=persist status=ok bytes={}",
            snapshot.len()
        ),
        Err(err) => error!("event=state_save module=persist status=error error={err}"),
    }
}
