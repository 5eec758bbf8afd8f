//! Node identity for the computation graph
//!
//! Represents a unique identifier for each node in a model.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A unique identifier for a node in a model.
///
/// `NodeId` is used to reference nodes within the computation graph. It is
/// assigned by the owning [`Model`](super::graph::Model) at insertion time,
/// is unique within that model, and stays stable for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId with the given value.
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }

    /// Returns the inner value of the node ID.
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Generator for creating unique node IDs.
///
/// Each [`Model`](super::graph::Model) owns one generator, so IDs are unique
/// per model rather than globally.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next_id: AtomicUsize,
}

impl NodeIdGenerator {
    /// Create a new node ID generator starting at zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(0),
        }
    }

    /// Generate a new unique node ID.
    #[inline]
    pub fn generate(&self) -> NodeId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        NodeId(id)
    }

    /// Number of IDs handed out so far.
    #[inline]
    pub fn issued(&self) -> usize {
        self.next_id.load(Ordering::SeqCst)
    }
}
