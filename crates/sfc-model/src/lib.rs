//! Core data model for the SFC overlay control plane
//!
//! This crate defines the identifiers and topology types shared by the
//! binding reconciler and the topology resolution client.

pub mod dpn;
pub mod egress;
pub mod path;
pub mod tunnel;

pub use dpn::DpnId;
pub use egress::EgressAction;
pub use path::{PathId, PathSet};
pub use tunnel::{TunnelKind, SFC_VNI};
