//! Binding-state reconciliation for the SFC overlay
//!
//! Decides, per forwarding node, whether the node needs to be wired into the
//! service chaining overlay based on whether any service paths are routed
//! through it, and dispatches exactly-once bind/unbind commands on a
//! per-node serial queue so the notification thread is never blocked.

pub mod dispatch;
pub mod feed;
pub mod manager;
pub mod reconciler;

pub use dispatch::{BindingCommand, BindingDispatcher, DispatchError};
pub use feed::{DpnStateHandler, FeedError, StateFeed};
pub use manager::ServiceManager;
pub use reconciler::BindingReconciler;
