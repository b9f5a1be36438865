//! Change-feed seams
//!
//! The host owns subscription to the DPN path-state feed; the core only
//! consumes the three notification entry points and the start/stop
//! lifecycle of an injected feed.

use crate::dispatch::DispatchError;
use async_trait::async_trait;
use sfc_model::{DpnId, PathSet};
use std::sync::Arc;
use thiserror::Error;

/// Feed lifecycle errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed subscription failed: {0}")]
    Subscription(String),

    #[error("feed is not running")]
    NotRunning,
}

/// Receives DPN path-state notifications.
///
/// Each notification carries the old and/or new snapshot of the service
/// paths routed through the node. Implementations must not block the
/// delivering thread. A returned error means a scheduled side effect will
/// never run and must surface to the feed, not be swallowed.
pub trait DpnStateHandler: Send + Sync {
    fn on_dpn_added(&self, dpn: DpnId, paths: &PathSet) -> Result<(), DispatchError>;

    fn on_dpn_removed(&self, dpn: DpnId, paths: &PathSet) -> Result<(), DispatchError>;

    fn on_dpn_updated(
        &self,
        dpn: DpnId,
        old: &PathSet,
        new: &PathSet,
    ) -> Result<(), DispatchError>;
}

/// A host-provided subscription to the DPN path-state feed.
///
/// The feed delivers at most one notification per node at a time, but may
/// deliver notifications for different nodes concurrently.
#[async_trait]
pub trait StateFeed: Send + Sync {
    /// Begin delivering notifications to `handler`
    async fn start(&self, handler: Arc<dyn DpnStateHandler>) -> Result<(), FeedError>;

    /// Stop delivering notifications
    async fn stop(&self) -> Result<(), FeedError>;
}
