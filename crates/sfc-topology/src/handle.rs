//! Constructor-time resolved service handles

use std::sync::Arc;

/// A remote service handle resolved once when the control plane wires its
/// collaborators.
///
/// A missing service is an explicit variant rather than a null checked at
/// every call site; the handle is read-only after construction.
pub enum ServiceHandle<S: ?Sized> {
    Available(Arc<S>),
    Unavailable,
}

impl<S: ?Sized> ServiceHandle<S> {
    pub fn available(service: Arc<S>) -> Self {
        Self::Available(service)
    }

    /// The service, if it was resolved at construction
    pub fn get(&self) -> Option<&Arc<S>> {
        match self {
            Self::Available(service) => Some(service),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<S: ?Sized> Clone for ServiceHandle<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Available(service) => Self::Available(Arc::clone(service)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl<S: ?Sized> From<Arc<S>> for ServiceHandle<S> {
    fn from(service: Arc<S>) -> Self {
        Self::Available(service)
    }
}

impl<S: ?Sized> std::fmt::Debug for ServiceHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => write!(f, "ServiceHandle::Available"),
            Self::Unavailable => write!(f, "ServiceHandle::Unavailable"),
        }
    }
}
