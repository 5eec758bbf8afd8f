//! Graph nodes and the operation contract
//!
//! A [`Node`] is one computational unit in a model: an identity, an ordered
//! list of input ports, an ordered list of dependent back-references, and the
//! [`Operation`] it dispatches to. The operation catalog itself lives outside
//! this core (see [`crate::ops`] for the built-in one); the graph only ever
//! invokes it through the trait.

use std::any::Any;
use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use super::node_id::NodeId;
use super::port::InputPort;
use super::value::Value;

/// Error raised by an operation while computing its outputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComputeError {
    /// The node was wired with the wrong number of input ports
    #[error("operation '{op}' expected {expected} input ports, found {found}")]
    ArityMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },

    /// A numeric operation received a non-numeric value
    #[error("operation '{op}' requires numeric input, found {found}")]
    NonNumeric { op: &'static str, found: &'static str },

    /// A scale factor was NaN or infinite
    #[error("scale factor {0} is not finite")]
    NonFiniteFactor(f64),
}

/// Contract implemented by every node variant.
///
/// The graph core never defines concrete variants; it constructs nodes around
/// a caller-supplied `Operation` and invokes [`compute`](Operation::compute)
/// when an output value is materialized.
pub trait Operation: Any {
    /// Variant name, used in logs and debug output.
    fn name(&self) -> &'static str;

    /// Number of output slots this operation produces.
    fn output_arity(&self) -> usize;

    /// Produce one value vector per output slot, given one materialized value
    /// vector per input port (in port order).
    fn compute(&self, inputs: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, ComputeError>;

    /// Upcast for typed retrieval
    /// ([`Model::nodes_of_type`](super::graph::Model::nodes_of_type)).
    fn as_any(&self) -> &dyn Any;
}

/// A node in the computation graph.
///
/// Nodes are owned exclusively by their [`Model`](super::graph::Model); all
/// references handed out elsewhere are observation handles valid for the
/// model's lifetime.
pub struct Node {
    /// Unique identifier within the owning model
    id: NodeId,

    /// Ordered input ports
    inputs: Vec<InputPort>,

    /// Nodes that consume this node's output, in wiring order
    dependents: SmallVec<[NodeId; 4]>,

    /// The computation this node dispatches to
    op: Box<dyn Operation>,
}

impl Node {
    pub(crate) fn new(id: NodeId, inputs: Vec<InputPort>, op: Box<dyn Operation>) -> Self {
        Self {
            id,
            inputs,
            dependents: SmallVec::new(),
            op,
        }
    }

    /// The node's unique identifier.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's ordered input ports.
    #[inline]
    pub fn inputs(&self) -> &[InputPort] {
        &self.inputs
    }

    /// Nodes that consume this node's output.
    ///
    /// This list mirrors the input-port source links: if node B has an input
    /// sourced from node A, then A's dependent list contains B. The model
    /// factory maintains the back-link at insertion time.
    #[inline]
    pub fn dependents(&self) -> &[NodeId] {
        &self.dependents
    }

    /// The operation this node dispatches to.
    #[inline]
    pub fn operation(&self) -> &dyn Operation {
        self.op.as_ref()
    }

    /// Variant name of the node's operation.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// Number of output slots this node produces.
    #[inline]
    pub fn output_arity(&self) -> usize {
        self.op.output_arity()
    }

    /// Check if any input port draws from the given node.
    pub fn depends_on(&self, node_id: NodeId) -> bool {
        self.inputs
            .iter()
            .any(|port| port.source_nodes().any(|n| n == node_id))
    }

    /// Check if the given node consumes this node's output.
    #[inline]
    pub fn has_dependent(&self, node_id: NodeId) -> bool {
        self.dependents.contains(&node_id)
    }

    /// Check if this node is a sink (no dependents).
    #[inline]
    pub fn is_sink(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Check if this node is a source (no input dependencies).
    #[inline]
    pub fn is_source(&self) -> bool {
        self.inputs.iter().all(|port| port.is_empty())
    }

    /// All nodes referenced by this node's input ports, in port order.
    /// A node feeding several ports appears once per edge.
    #[inline]
    pub fn input_source_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().flat_map(|port| port.source_nodes())
    }

    pub(crate) fn add_dependent(&mut self, dependent: NodeId) {
        self.dependents.push(dependent);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("op", &self.op.name())
            .field("inputs", &self.inputs)
            .field("dependents", &self.dependents)
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}: {})", self.id, self.op.name())
    }
}
