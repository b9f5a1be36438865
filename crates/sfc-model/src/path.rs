//! Service path snapshots attached to a forwarding node

use serde::{Deserialize, Serialize};

/// Identifier of a realized service path (RSP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u64);

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rsp:{}", self.0)
    }
}

/// The service paths routed through a node, as delivered in one change-feed
/// snapshot.
///
/// Binding decisions only look at emptiness: two snapshots with different
/// non-zero path counts are equivalent for transition purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet(Vec<PathId>);

impl PathSet {
    /// Create an empty path set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a path set from a list of path references
    pub fn from_paths(paths: Vec<PathId>) -> Self {
        Self(paths)
    }

    /// Whether any service path is routed through the node
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathId> {
        self.0.iter()
    }
}

impl FromIterator<PathId> for PathSet {
    fn from_iter<I: IntoIterator<Item = PathId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
