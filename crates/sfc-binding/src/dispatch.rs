//! Per-node serial dispatch of binding commands
//!
//! Bind/unbind side effects must never run on the notification thread, and
//! commands for the same node must execute in the order they were scheduled:
//! a later unbind must not be observed before an earlier bind completes.
//! Each node gets its own lazily spawned worker task draining an unbounded
//! channel; commands for different nodes proceed concurrently.

use crate::manager::ServiceManager;
use dashmap::DashMap;
use sfc_model::DpnId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// A scheduled binding side effect for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCommand {
    Bind(DpnId),
    Unbind(DpnId),
}

impl BindingCommand {
    /// The node this command targets
    pub fn dpn(&self) -> DpnId {
        match *self {
            BindingCommand::Bind(dpn) | BindingCommand::Unbind(dpn) => dpn,
        }
    }
}

/// Dispatch errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The command was rejected; its side effect will never run. Callers
    /// must surface this, not swallow it.
    #[error("binding command rejected for {0}: dispatcher is shut down")]
    Rejected(DpnId),
}

/// Dispatches binding commands to per-node worker tasks.
///
/// Must be created and used within a tokio runtime. Workers are spawned
/// lazily on the first command for a node and drain their queue in FIFO
/// order, so same-node commands are serialized while different nodes run
/// concurrently.
pub struct BindingDispatcher {
    manager: Arc<dyn ServiceManager>,
    senders: DashMap<DpnId, mpsc::UnboundedSender<BindingCommand>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    shutting_down: AtomicBool,
}

impl BindingDispatcher {
    pub fn new(manager: Arc<dyn ServiceManager>) -> Self {
        Self {
            manager,
            senders: DashMap::new(),
            workers: Mutex::new(Vec::new()),
            shutting_down: AtomicBool::new(false),
        }
    }

    /// Schedule a command for asynchronous execution.
    ///
    /// Never blocks on the downstream work; per-node FIFO ordering is
    /// preserved across calls.
    pub fn schedule(&self, command: BindingCommand) -> Result<(), DispatchError> {
        let dpn = command.dpn();
        if self.shutting_down.load(Ordering::Acquire) {
            return Err(DispatchError::Rejected(dpn));
        }

        let sender = self
            .senders
            .entry(dpn)
            .or_insert_with(|| self.spawn_worker(dpn))
            .clone();

        sender
            .send(command)
            .map_err(|_| DispatchError::Rejected(dpn))
    }

    fn spawn_worker(&self, dpn: DpnId) -> mpsc::UnboundedSender<BindingCommand> {
        debug!(dpn = %dpn, "spawning binding worker");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = Arc::clone(&self.manager);

        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    BindingCommand::Bind(dpn) => {
                        debug!(dpn = %dpn, "binding node");
                        manager.bind_node(dpn).await;
                    }
                    BindingCommand::Unbind(dpn) => {
                        debug!(dpn = %dpn, "unbinding node");
                        manager.unbind_node(dpn).await;
                    }
                }
            }
        });

        if let Ok(mut workers) = self.workers.lock() {
            workers.push(handle);
        }
        tx
    }

    /// Close all queues and wait for in-flight commands to drain.
    ///
    /// Scheduling attempts made after this point are rejected.
    pub async fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
        self.senders.clear();

        let handles: Vec<JoinHandle<()>> = match self.workers.lock() {
            Ok(mut workers) => workers.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                error!(error = %e, "binding worker exited abnormally");
            }
        }
    }
}
