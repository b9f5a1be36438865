//! Topology resolution client
//!
//! Centralizes the remote topology queries the chaining renderer needs when
//! steering traffic through the overlay. Each operation performs a single
//! remote call attempt (two for the tunnel-interface lookup, in fixed
//! priority order) and degrades to an absent result on failure, with one
//! deliberate exception: endpoint IP resolution treats a missing interface
//! service as fatal.

use crate::error::TopologyError;
use crate::handle::ServiceHandle;
use crate::rpc::{EgressActionsRequest, InterfaceRpc, TunnelRpc};
use sfc_model::{DpnId, EgressAction, TunnelKind, SFC_VNI};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Stateless façade over the interface and tunnel services.
///
/// Both service handles are resolved once at construction and reused
/// read-only; the client holds no other state, performs no retries and
/// supports no cancellation of in-flight calls.
pub struct TopologyClient {
    interface_rpc: ServiceHandle<dyn InterfaceRpc>,
    tunnel_rpc: ServiceHandle<dyn TunnelRpc>,
}

impl TopologyClient {
    /// Create a client from already-resolved service handles
    pub fn new(
        interface_rpc: ServiceHandle<dyn InterfaceRpc>,
        tunnel_rpc: ServiceHandle<dyn TunnelRpc>,
    ) -> Self {
        debug!(
            interface_rpc = ?interface_rpc,
            tunnel_rpc = ?tunnel_rpc,
            "creating topology client"
        );
        Self {
            interface_rpc,
            tunnel_rpc,
        }
    }

    /// Convenience constructor for the common case where both services are up
    pub fn with_services(
        interface_rpc: Arc<dyn InterfaceRpc>,
        tunnel_rpc: Arc<dyn TunnelRpc>,
    ) -> Self {
        Self::new(
            ServiceHandle::available(interface_rpc),
            ServiceHandle::available(tunnel_rpc),
        )
    }

    /// Resolve the egress actions to use for an interface.
    ///
    /// `part_of_transport_zone` is true for interfaces between forwarding
    /// nodes on different compute hosts; those requests carry the fabric-wide
    /// chaining tunnel key. `action_offset` shifts the order key of the
    /// returned actions.
    ///
    /// Returns `None` when the service is unavailable, the reply is
    /// unsuccessful, or the call itself errors; the three causes are only
    /// distinguished in the logs.
    pub async fn resolve_egress_actions(
        &self,
        interface_name: &str,
        part_of_transport_zone: bool,
        action_offset: u32,
    ) -> Option<Vec<EgressAction>> {
        debug!(
            interface = %interface_name,
            transport_zone = part_of_transport_zone,
            "resolving egress actions"
        );

        let Some(service) = self.interface_rpc.get() else {
            error!(
                interface = %interface_name,
                "egress action resolution failed: interface service not available"
            );
            return None;
        };

        let request = EgressActionsRequest {
            interface_name: interface_name.to_string(),
            action_offset,
            tunnel_key: part_of_transport_zone.then_some(SFC_VNI),
        };

        match service.egress_actions_for_interface(request).await {
            Ok(reply) if reply.successful => {
                debug!(interface = %interface_name, "egress action resolution succeeded");
                reply.value
            }
            Ok(_) => {
                error!(interface = %interface_name, "egress action resolution failed");
                None
            }
            Err(e) => {
                error!(
                    interface = %interface_name,
                    error = %e,
                    "egress action resolution call error"
                );
                None
            }
        }
    }

    /// Resolve the interface to use for sending traffic from `src` to `dst`.
    ///
    /// Assumes a transport zone already spans both nodes, so tunnels exist
    /// beforehand. The specialized VXLAN-GPE tunnel is tried first; a plain
    /// VXLAN tunnel may also have GPE enabled and serves as fallback. The
    /// first successful reply carrying a non-empty name wins.
    pub async fn resolve_target_interface(&self, src: DpnId, dst: DpnId) -> Option<String> {
        debug!(src = %src, dst = %dst, "resolving target interface");

        let Some(service) = self.tunnel_rpc.get() else {
            error!(
                src = %src,
                dst = %dst,
                "target interface resolution failed: tunnel service not available"
            );
            return None;
        };

        for kind in TunnelKind::RESOLUTION_ORDER {
            match service.tunnel_interface_name(src, dst, kind).await {
                Ok(reply) if reply.successful => {
                    match reply.value.filter(|name| !name.is_empty()) {
                        Some(name) => {
                            debug!(
                                src = %src,
                                dst = %dst,
                                kind = %kind,
                                interface = %name,
                                "found tunnel interface"
                            );
                            return Some(name);
                        }
                        None => {
                            debug!(src = %src, dst = %dst, kind = %kind, "no tunnel interface name");
                        }
                    }
                }
                Ok(_) => {
                    debug!(src = %src, dst = %dst, kind = %kind, "tunnel interface lookup failed");
                }
                Err(e) => {
                    error!(
                        src = %src,
                        dst = %dst,
                        kind = %kind,
                        error = %e,
                        "target interface lookup call error"
                    );
                    return None;
                }
            }
        }

        debug!(src = %src, dst = %dst, "did not find a tunnel interface");
        None
    }

    /// Resolve the forwarding node hosting an interface.
    ///
    /// Same failure collapsing as [`resolve_egress_actions`]: service
    /// unavailable, unsuccessful reply and call error all yield `None`.
    ///
    /// [`resolve_egress_actions`]: TopologyClient::resolve_egress_actions
    pub async fn resolve_dpn_for_interface(&self, interface_name: &str) -> Option<DpnId> {
        debug!(interface = %interface_name, "resolving node for interface");

        let Some(service) = self.interface_rpc.get() else {
            error!(
                interface = %interface_name,
                "node resolution failed: interface service not available"
            );
            return None;
        };

        match service.dpn_for_interface(interface_name).await {
            Ok(reply) if reply.successful => {
                debug!(interface = %interface_name, dpn = ?reply.value, "node resolution succeeded");
                reply.value
            }
            Ok(_) => {
                error!(interface = %interface_name, "node resolution failed");
                None
            }
            Err(e) => {
                error!(
                    interface = %interface_name,
                    error = %e,
                    "node resolution call error"
                );
                None
            }
        }
    }

    /// Resolve the tunnel endpoint IPs of a node.
    ///
    /// Unlike the other resolution operations, a missing interface service
    /// is fatal here and a transport-level call error is surfaced rather
    /// than collapsed; only an unsuccessful reply degrades to an empty list.
    pub async fn resolve_endpoint_ips(&self, dpn: DpnId) -> Result<Vec<IpAddr>, TopologyError> {
        let Some(service) = self.interface_rpc.get() else {
            error!(dpn = %dpn, "endpoint IP resolution failed: interface service not available");
            return Err(TopologyError::ServiceUnavailable);
        };

        match service.endpoint_ips_for_dpn(dpn).await {
            Ok(reply) if reply.successful => {
                trace!(dpn = %dpn, ips = ?reply.value, "endpoint IP resolution succeeded");
                Ok(reply.value.unwrap_or_default())
            }
            Ok(_) => {
                warn!(dpn = %dpn, "endpoint IP resolution failed");
                Ok(Vec::new())
            }
            Err(e) => {
                error!(dpn = %dpn, error = %e, "endpoint IP resolution call error");
                Err(TopologyError::Call(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::{RpcCallError, RpcReply};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted interface service recording the requests it receives
    #[derive(Default)]
    struct StubInterfaceRpc {
        egress_replies: Mutex<VecDeque<Result<RpcReply<Vec<EgressAction>>, RpcCallError>>>,
        dpn_replies: Mutex<VecDeque<Result<RpcReply<DpnId>, RpcCallError>>>,
        ip_replies: Mutex<VecDeque<Result<RpcReply<Vec<IpAddr>>, RpcCallError>>>,
        egress_requests: Mutex<Vec<EgressActionsRequest>>,
    }

    impl StubInterfaceRpc {
        fn on_egress(self, reply: Result<RpcReply<Vec<EgressAction>>, RpcCallError>) -> Self {
            self.egress_replies.lock().unwrap().push_back(reply);
            self
        }

        fn on_dpn(self, reply: Result<RpcReply<DpnId>, RpcCallError>) -> Self {
            self.dpn_replies.lock().unwrap().push_back(reply);
            self
        }

        fn on_ips(self, reply: Result<RpcReply<Vec<IpAddr>>, RpcCallError>) -> Self {
            self.ip_replies.lock().unwrap().push_back(reply);
            self
        }
    }

    #[async_trait]
    impl InterfaceRpc for StubInterfaceRpc {
        async fn egress_actions_for_interface(
            &self,
            request: EgressActionsRequest,
        ) -> Result<RpcReply<Vec<EgressAction>>, RpcCallError> {
            self.egress_requests.lock().unwrap().push(request);
            self.egress_replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected egress_actions_for_interface call")
        }

        async fn dpn_for_interface(
            &self,
            _interface_name: &str,
        ) -> Result<RpcReply<DpnId>, RpcCallError> {
            self.dpn_replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected dpn_for_interface call")
        }

        async fn endpoint_ips_for_dpn(
            &self,
            _dpn: DpnId,
        ) -> Result<RpcReply<Vec<IpAddr>>, RpcCallError> {
            self.ip_replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected endpoint_ips_for_dpn call")
        }
    }

    /// Scripted tunnel service recording the lookups it receives
    #[derive(Default)]
    struct StubTunnelRpc {
        replies: Mutex<VecDeque<Result<RpcReply<String>, RpcCallError>>>,
        lookups: Mutex<Vec<(DpnId, DpnId, TunnelKind)>>,
    }

    impl StubTunnelRpc {
        fn on_lookup(self, reply: Result<RpcReply<String>, RpcCallError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn lookups(&self) -> Vec<(DpnId, DpnId, TunnelKind)> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TunnelRpc for StubTunnelRpc {
        async fn tunnel_interface_name(
            &self,
            src: DpnId,
            dst: DpnId,
            kind: TunnelKind,
        ) -> Result<RpcReply<String>, RpcCallError> {
            self.lookups.lock().unwrap().push((src, dst, kind));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected tunnel_interface_name call")
        }
    }

    fn client_with_interface(stub: StubInterfaceRpc) -> (TopologyClient, Arc<StubInterfaceRpc>) {
        let stub = Arc::new(stub);
        let client = TopologyClient::new(
            ServiceHandle::available(stub.clone()),
            ServiceHandle::Unavailable,
        );
        (client, stub)
    }

    fn client_with_tunnel(stub: StubTunnelRpc) -> (TopologyClient, Arc<StubTunnelRpc>) {
        let stub = Arc::new(stub);
        let client = TopologyClient::new(
            ServiceHandle::Unavailable,
            ServiceHandle::available(stub.clone()),
        );
        (client, stub)
    }

    #[tokio::test]
    async fn test_egress_actions_success() {
        let actions = vec![
            EgressAction::new(0, "set-tunnel-id"),
            EgressAction::new(1, "output").with_param("port", "3"),
        ];
        let (client, stub) =
            client_with_interface(StubInterfaceRpc::default().on_egress(Ok(RpcReply::success(
                actions.clone(),
            ))));

        let resolved = client.resolve_egress_actions("tun-a1", true, 0).await;
        assert_eq!(resolved, Some(actions));

        // transport-zone requests carry the fabric-wide tunnel key
        let requests = stub.egress_requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].interface_name, "tun-a1");
        assert_eq!(requests[0].tunnel_key, Some(SFC_VNI));
    }

    #[tokio::test]
    async fn test_egress_actions_no_tunnel_key_outside_transport_zone() {
        let (client, stub) = client_with_interface(
            StubInterfaceRpc::default().on_egress(Ok(RpcReply::success(vec![]))),
        );

        client.resolve_egress_actions("veth-sf1", false, 2).await;

        let requests = stub.egress_requests.lock().unwrap().clone();
        assert_eq!(requests[0].tunnel_key, None);
        assert_eq!(requests[0].action_offset, 2);
    }

    #[tokio::test]
    async fn test_egress_actions_unsuccessful_reply_is_absent() {
        let (client, _stub) =
            client_with_interface(StubInterfaceRpc::default().on_egress(Ok(RpcReply::failure())));
        assert_eq!(client.resolve_egress_actions("tun-a1", true, 0).await, None);
    }

    #[tokio::test]
    async fn test_egress_actions_call_error_is_absent() {
        let (client, _stub) = client_with_interface(
            StubInterfaceRpc::default()
                .on_egress(Err(RpcCallError::Execution("connection reset".into()))),
        );
        assert_eq!(client.resolve_egress_actions("tun-a1", true, 0).await, None);
    }

    #[tokio::test]
    async fn test_egress_actions_service_unavailable_is_absent() {
        let client = TopologyClient::new(ServiceHandle::Unavailable, ServiceHandle::Unavailable);
        assert_eq!(client.resolve_egress_actions("tun-a1", true, 0).await, None);
    }

    #[tokio::test]
    async fn test_target_interface_gpe_short_circuits() {
        let (client, stub) = client_with_tunnel(
            StubTunnelRpc::default().on_lookup(Ok(RpcReply::success("tun-gpe-12".to_string()))),
        );

        let name = client
            .resolve_target_interface(DpnId(1), DpnId(2))
            .await;
        assert_eq!(name.as_deref(), Some("tun-gpe-12"));

        // fallback must not be attempted
        assert_eq!(
            stub.lookups(),
            vec![(DpnId(1), DpnId(2), TunnelKind::VxlanGpe)]
        );
    }

    #[tokio::test]
    async fn test_target_interface_falls_back_to_vxlan() {
        let (client, stub) = client_with_tunnel(
            StubTunnelRpc::default()
                .on_lookup(Ok(RpcReply::failure()))
                .on_lookup(Ok(RpcReply::success("tun-vxlan-12".to_string()))),
        );

        let name = client
            .resolve_target_interface(DpnId(1), DpnId(2))
            .await;
        assert_eq!(name.as_deref(), Some("tun-vxlan-12"));
        assert_eq!(
            stub.lookups(),
            vec![
                (DpnId(1), DpnId(2), TunnelKind::VxlanGpe),
                (DpnId(1), DpnId(2), TunnelKind::Vxlan),
            ]
        );
    }

    #[tokio::test]
    async fn test_target_interface_empty_name_falls_back() {
        let (client, stub) = client_with_tunnel(
            StubTunnelRpc::default()
                .on_lookup(Ok(RpcReply::success(String::new())))
                .on_lookup(Ok(RpcReply::success("tun-vxlan-12".to_string()))),
        );

        let name = client
            .resolve_target_interface(DpnId(1), DpnId(2))
            .await;
        assert_eq!(name.as_deref(), Some("tun-vxlan-12"));
        assert_eq!(stub.lookups().len(), 2);
    }

    #[tokio::test]
    async fn test_target_interface_call_error_aborts_lookup() {
        let (client, stub) = client_with_tunnel(
            StubTunnelRpc::default().on_lookup(Err(RpcCallError::Interrupted)),
        );

        assert_eq!(client.resolve_target_interface(DpnId(1), DpnId(2)).await, None);
        // the fallback attempt is skipped once the call itself errors
        assert_eq!(stub.lookups().len(), 1);
    }

    #[tokio::test]
    async fn test_target_interface_none_found() {
        let (client, stub) = client_with_tunnel(
            StubTunnelRpc::default()
                .on_lookup(Ok(RpcReply::failure()))
                .on_lookup(Ok(RpcReply::failure())),
        );

        assert_eq!(client.resolve_target_interface(DpnId(1), DpnId(2)).await, None);
        assert_eq!(stub.lookups().len(), 2);
    }

    #[tokio::test]
    async fn test_dpn_for_interface_success() {
        let (client, _stub) = client_with_interface(
            StubInterfaceRpc::default().on_dpn(Ok(RpcReply::success(DpnId(7)))),
        );
        assert_eq!(
            client.resolve_dpn_for_interface("veth-sf1").await,
            Some(DpnId(7))
        );
    }

    #[tokio::test]
    async fn test_dpn_for_interface_call_error_is_absent() {
        let (client, _stub) = client_with_interface(
            StubInterfaceRpc::default().on_dpn(Err(RpcCallError::Interrupted)),
        );
        assert_eq!(client.resolve_dpn_for_interface("veth-sf1").await, None);
    }

    #[tokio::test]
    async fn test_dpn_for_interface_unsuccessful_reply_is_absent() {
        let (client, _stub) =
            client_with_interface(StubInterfaceRpc::default().on_dpn(Ok(RpcReply::failure())));
        assert_eq!(client.resolve_dpn_for_interface("veth-sf1").await, None);
    }

    #[tokio::test]
    async fn test_endpoint_ips_service_unavailable_is_fatal() {
        let client = TopologyClient::new(ServiceHandle::Unavailable, ServiceHandle::Unavailable);
        let err = client.resolve_endpoint_ips(DpnId(1)).await.unwrap_err();
        assert!(matches!(err, TopologyError::ServiceUnavailable));
    }

    #[tokio::test]
    async fn test_endpoint_ips_call_error_is_fatal() {
        let (client, _stub) = client_with_interface(
            StubInterfaceRpc::default().on_ips(Err(RpcCallError::Execution("timed out".into()))),
        );
        let err = client.resolve_endpoint_ips(DpnId(1)).await.unwrap_err();
        assert!(matches!(err, TopologyError::Call(_)));
    }

    #[tokio::test]
    async fn test_endpoint_ips_unsuccessful_reply_is_empty() {
        let (client, _stub) =
            client_with_interface(StubInterfaceRpc::default().on_ips(Ok(RpcReply::failure())));
        let ips = client.resolve_endpoint_ips(DpnId(1)).await.unwrap();
        assert!(ips.is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_ips_success() {
        let ip: IpAddr = "10.0.0.7".parse().unwrap();
        let (client, _stub) = client_with_interface(
            StubInterfaceRpc::default().on_ips(Ok(RpcReply::success(vec![ip]))),
        );
        let ips = client.resolve_endpoint_ips(DpnId(1)).await.unwrap();
        assert_eq!(ips, vec![ip]);
    }

    #[tokio::test]
    async fn test_endpoint_ips_success_without_value_is_empty() {
        let (client, _stub) = client_with_interface(StubInterfaceRpc::default().on_ips(Ok(
            RpcReply {
                successful: true,
                value: None,
            },
        )));
        let ips = client.resolve_endpoint_ips(DpnId(1)).await.unwrap();
        assert!(ips.is_empty());
    }
}
