//! Egress action instructions returned by the interface service

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single egress instruction used to steer traffic out of a node.
///
/// Actions are rendered positionally: `order` is the position key and the
/// sequence returned by the interface service must be applied in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EgressAction {
    /// Position of this action in the rendered action list
    pub order: u32,
    /// Action discriminator (e.g. "output", "set-tunnel-id")
    pub kind: String,
    /// Action parameters, keyed by parameter name
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl EgressAction {
    pub fn new(order: u32, kind: impl Into<String>) -> Self {
        Self {
            order,
            kind: kind.into(),
            params: HashMap::new(),
        }
    }

    /// Attach a parameter, builder-style
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}
