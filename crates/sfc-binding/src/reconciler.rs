//! Binding state reconciler
//!
//! Derives a node's binding state from the emptiness of its attached path
//! set and schedules bind/unbind commands on state transitions. Binding
//! state is never stored: each notification re-derives it from the old and
//! new snapshots, so two snapshots with different non-zero path counts are
//! equivalent and never produce a command.

use crate::dispatch::{BindingCommand, BindingDispatcher, DispatchError};
use crate::feed::DpnStateHandler;
use sfc_model::{DpnId, PathSet};
use std::sync::Arc;
use tracing::debug;

/// Converts path-state notifications into exactly-once bind/unbind commands.
///
/// Runs on whatever thread delivers notifications and holds no mutable
/// state of its own; all side effects go through the dispatcher.
pub struct BindingReconciler {
    dispatcher: Arc<BindingDispatcher>,
}

impl BindingReconciler {
    pub fn new(dispatcher: Arc<BindingDispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl DpnStateHandler for BindingReconciler {
    fn on_dpn_added(&self, dpn: DpnId, paths: &PathSet) -> Result<(), DispatchError> {
        if paths.is_empty() {
            debug!(dpn = %dpn, "node added with no active paths, nothing to bind");
            return Ok(());
        }
        debug!(dpn = %dpn, "node added with active paths, scheduling bind");
        self.dispatcher.schedule(BindingCommand::Bind(dpn))
    }

    fn on_dpn_removed(&self, dpn: DpnId, paths: &PathSet) -> Result<(), DispatchError> {
        // A node removed while it had no active paths was never bound.
        if paths.is_empty() {
            debug!(dpn = %dpn, "node removed with no active paths, nothing to unbind");
            return Ok(());
        }
        debug!(dpn = %dpn, "node removed with active paths, scheduling unbind");
        self.dispatcher.schedule(BindingCommand::Unbind(dpn))
    }

    fn on_dpn_updated(
        &self,
        dpn: DpnId,
        old: &PathSet,
        new: &PathSet,
    ) -> Result<(), DispatchError> {
        match (old.is_empty(), new.is_empty()) {
            (true, false) => {
                debug!(dpn = %dpn, "first path routed through node, scheduling bind");
                self.dispatcher.schedule(BindingCommand::Bind(dpn))
            }
            (false, true) => {
                debug!(dpn = %dpn, "last path left node, scheduling unbind");
                self.dispatcher.schedule(BindingCommand::Unbind(dpn))
            }
            _ => {
                debug!(dpn = %dpn, "path update without binding transition");
                Ok(())
            }
        }
    }
}
