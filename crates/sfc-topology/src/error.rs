//! Topology client errors

use crate::rpc::RpcCallError;
use thiserror::Error;

/// Fatal topology resolution failure.
///
/// Only [`resolve_endpoint_ips`](crate::TopologyClient::resolve_endpoint_ips)
/// surfaces these; the other resolution operations degrade to an absent
/// result instead.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("interface service is not available")]
    ServiceUnavailable,

    #[error("remote call error: {0}")]
    Call(#[from] RpcCallError),
}
