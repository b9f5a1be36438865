//! Topology resolution client for the SFC overlay
//!
//! Resolves the transport-layer details needed to steer chained traffic
//! between forwarding nodes: egress actions for an interface, the tunnel
//! interface between two nodes, the node hosting an interface, and a node's
//! tunnel endpoint IPs. All lookups are single-attempt remote calls against
//! two independent topology services; callers own any retry policy.

pub mod client;
pub mod error;
pub mod handle;
pub mod rpc;

pub use client::TopologyClient;
pub use error::TopologyError;
pub use handle::ServiceHandle;
pub use rpc::{EgressActionsRequest, InterfaceRpc, RpcCallError, RpcReply, TunnelRpc};
