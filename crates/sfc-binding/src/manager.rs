//! Service manager seam
//!
//! The service manager owns the actual reprogramming of a forwarding node
//! when it joins or leaves the overlay. Commands are fire-and-forget and
//! idempotent downstream; the reconciler never consumes a return value.

use async_trait::async_trait;
use sfc_model::DpnId;

#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Wire the node into the service chaining overlay
    async fn bind_node(&self, dpn: DpnId);

    /// Remove the node from the service chaining overlay
    async fn unbind_node(&self, dpn: DpnId);
}
