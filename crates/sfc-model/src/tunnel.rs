//! Tunnel encapsulation kinds and fabric-wide constants

use serde::{Deserialize, Serialize};

/// VNI reserved fabric-wide for service chaining traffic.
///
/// Set as the tunnel key on egress-action requests for interfaces that are
/// part of the transport zone.
pub const SFC_VNI: u64 = 0;

/// Tunnel encapsulation kind used to name the tunnel interface between two
/// forwarding nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TunnelKind {
    /// VXLAN-GPE: carries the chaining header natively
    VxlanGpe,
    /// Plain VXLAN: general-purpose tunnel, may also have GPE enabled
    Vxlan,
}

impl TunnelKind {
    /// Lookup order when resolving the tunnel interface between two nodes:
    /// the specialized encapsulation first, the generic one as fallback.
    pub const RESOLUTION_ORDER: [TunnelKind; 2] = [TunnelKind::VxlanGpe, TunnelKind::Vxlan];
}

impl std::fmt::Display for TunnelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TunnelKind::VxlanGpe => write!(f, "vxlan-gpe"),
            TunnelKind::Vxlan => write!(f, "vxlan"),
        }
    }
}
