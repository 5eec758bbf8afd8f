//! Input and output ports
//!
//! An [`InputPort`] draws its values from an ordered list of source output
//! slots (fan-in); an empty list means the port carries no dependency. An
//! [`OutputPort`] names one typed output slot of one producing node and is
//! what callers hand to
//! [`Model::output_value`](super::graph::Model::output_value).

use std::fmt;
use std::marker::PhantomData;

use smallvec::SmallVec;

use super::node_id::NodeId;
use super::value::PortValue;

/// One source entry of an input port: an output slot of a producing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    /// The producing node.
    pub node: NodeId,
    /// Output slot index on the producing node.
    pub slot: usize,
}

impl PortRef {
    /// Reference `slot` of `node`.
    #[inline]
    pub fn new(node: NodeId, slot: usize) -> Self {
        Self { node, slot }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.node, self.slot)
    }
}

/// An input slot on a node, resolving to zero or more source slots in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputPort {
    sources: SmallVec<[PortRef; 2]>,
}

impl InputPort {
    /// An input port with no sources (no dependency through this port).
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// An input port fed by the given sources, in order.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = PortRef>,
    {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// An input port fed by a single source slot.
    #[inline]
    pub fn single(node: NodeId, slot: usize) -> Self {
        Self::from_sources([PortRef::new(node, slot)])
    }

    /// The ordered source slots feeding this port.
    #[inline]
    pub fn sources(&self) -> &[PortRef] {
        &self.sources
    }

    /// The nodes referenced by this port, in source order.
    #[inline]
    pub fn source_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.sources.iter().map(|s| s.node)
    }

    /// Number of source slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when the port carries no dependency.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl From<PortRef> for InputPort {
    fn from(source: PortRef) -> Self {
        Self::from_sources([source])
    }
}

impl FromIterator<PortRef> for InputPort {
    fn from_iter<I: IntoIterator<Item = PortRef>>(iter: I) -> Self {
        Self::from_sources(iter)
    }
}

/// A typed handle to one output slot of one producing node.
///
/// The type tag `T` is chosen by the caller and checked when the value is
/// materialized, not when the port is constructed.
pub struct OutputPort<T: PortValue> {
    node: NodeId,
    slot: usize,
    _value: PhantomData<fn() -> T>,
}

impl<T: PortValue> OutputPort<T> {
    /// Reference `slot` of `node` as a `T`-valued output.
    #[inline]
    pub fn new(node: NodeId, slot: usize) -> Self {
        Self {
            node,
            slot,
            _value: PhantomData,
        }
    }

    /// The producing node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Output slot index on the producing node.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl<T: PortValue> Clone for OutputPort<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: PortValue> Copy for OutputPort<T> {}

impl<T: PortValue> fmt::Debug for OutputPort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputPort")
            .field("node", &self.node)
            .field("slot", &self.slot)
            .field("type", &T::type_name())
            .finish()
    }
}
