//! Forwarding node identifiers

use serde::{Deserialize, Serialize};

/// Identifier of a forwarding node (DPN) in the data plane.
///
/// Externally assigned and opaque to the control plane; the overlay only
/// uses it to address bind/unbind commands and topology lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DpnId(pub u64);

impl DpnId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DpnId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DpnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dpn:{}", self.0)
    }
}
