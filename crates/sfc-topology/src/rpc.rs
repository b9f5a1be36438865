//! Remote service seams for topology resolution
//!
//! Two independent services answer topology queries: the interface service
//! (egress actions, interface-to-node mapping, endpoint IPs) and the tunnel
//! service (tunnel interface naming). Transport is host-provided; this
//! module only defines the call contracts.

use async_trait::async_trait;
use sfc_model::{DpnId, EgressAction, TunnelKind};
use std::net::IpAddr;
use thiserror::Error;

/// Transport-level failure while waiting on a remote call.
///
/// Distinct from an unsuccessful reply: the call itself never completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcCallError {
    #[error("remote call interrupted")]
    Interrupted,

    #[error("remote call failed: {0}")]
    Execution(String),
}

/// Outcome of a completed remote call.
///
/// `successful == false` is the normal "no answer" case, distinct from a
/// transport-level [`RpcCallError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcReply<T> {
    pub successful: bool,
    pub value: Option<T>,
}

impl<T> RpcReply<T> {
    /// A successful reply carrying a value
    pub fn success(value: T) -> Self {
        Self {
            successful: true,
            value: Some(value),
        }
    }

    /// An unsuccessful reply
    pub fn failure() -> Self {
        Self {
            successful: false,
            value: None,
        }
    }

    /// The reply value, if the call was successful and carried one
    pub fn into_value(self) -> Option<T> {
        if self.successful {
            self.value
        } else {
            None
        }
    }
}

/// Request for the egress actions of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EgressActionsRequest {
    /// Interface to resolve actions for
    pub interface_name: String,
    /// Offset applied to the order key of the returned actions
    pub action_offset: u32,
    /// Tunnel key, set for interfaces that are part of the transport zone
    pub tunnel_key: Option<u64>,
}

/// Interface service: per-interface topology queries.
#[async_trait]
pub trait InterfaceRpc: Send + Sync {
    /// Egress actions to use when sending traffic out through an interface
    async fn egress_actions_for_interface(
        &self,
        request: EgressActionsRequest,
    ) -> Result<RpcReply<Vec<EgressAction>>, RpcCallError>;

    /// The forwarding node hosting an interface
    async fn dpn_for_interface(
        &self,
        interface_name: &str,
    ) -> Result<RpcReply<DpnId>, RpcCallError>;

    /// The tunnel endpoint IPs of a forwarding node
    async fn endpoint_ips_for_dpn(&self, dpn: DpnId)
        -> Result<RpcReply<Vec<IpAddr>>, RpcCallError>;
}

/// Tunnel service: names the tunnel interface between two forwarding nodes
/// for a given encapsulation kind.
#[async_trait]
pub trait TunnelRpc: Send + Sync {
    async fn tunnel_interface_name(
        &self,
        src: DpnId,
        dst: DpnId,
        kind: TunnelKind,
    ) -> Result<RpcReply<String>, RpcCallError>;
}
