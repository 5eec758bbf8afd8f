//! The owning graph container
//!
//! [`Model`] owns every node, assigns identity, supports lookup and typed
//! enumeration, materializes output values, and constructs traversal cursors.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, trace};

use super::iterator::NodeIterator;
use super::node::{ComputeError, Node, Operation};
use super::node_id::{NodeId, NodeIdGenerator};
use super::port::{InputPort, OutputPort};
use super::value::{PortValue, Value};

/// Errors raised by graph operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Lookup (or a port reference) named a node the model does not contain
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A port referenced an output slot past the producing node's arity
    #[error("output slot {slot} out of range for node {node} (arity {arity})")]
    SlotOutOfRange {
        node: NodeId,
        slot: usize,
        arity: usize,
    },

    /// A typed output port was materialized with the wrong value type
    #[error("output slot {slot} of node {node} holds {found} values, not {requested}")]
    TypeMismatch {
        node: NodeId,
        slot: usize,
        requested: &'static str,
        found: &'static str,
    },

    /// An operation failed while computing its outputs
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// A computation graph: the exclusive owner of its nodes.
///
/// The id-to-node map is both the owning container and the lookup index.
/// It preserves insertion order, so [`nodes`](Model::nodes) and
/// [`nodes_of_type`](Model::nodes_of_type) enumerate in creation order.
///
/// Acyclicity is a caller-supplied precondition: the model performs no cycle
/// detection, and traversing a cyclic graph does not terminate.
#[derive(Default)]
pub struct Model {
    nodes: IndexMap<NodeId, Node>,
    ids: NodeIdGenerator,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(capacity),
            ids: NodeIdGenerator::new(),
        }
    }

    /// Factory method: create a node around `op`, wire it to its inputs, and
    /// add it to the graph.
    ///
    /// Every source reference is validated before the graph is touched, so a
    /// failed call leaves the model unchanged. On success the new node's id is
    /// appended to the dependent list of every source node (once per edge) and
    /// the fresh id is returned.
    pub fn add_node<O: Operation>(
        &mut self,
        op: O,
        inputs: Vec<InputPort>,
    ) -> Result<NodeId, ModelError> {
        // Validate all wiring first: no partial insertion on failure.
        for port in &inputs {
            for source in port.sources() {
                let node = self
                    .nodes
                    .get(&source.node)
                    .ok_or(ModelError::NodeNotFound(source.node))?;
                let arity = node.output_arity();
                if source.slot >= arity {
                    return Err(ModelError::SlotOutOfRange {
                        node: source.node,
                        slot: source.slot,
                        arity,
                    });
                }
            }
        }

        let id = self.ids.generate();
        debug!(node = %id, op = op.name(), inputs = inputs.len(), "node added");

        // Maintain the dependent back-links, one entry per consumer edge.
        for port in &inputs {
            for source in port.sources() {
                if let Some(source_node) = self.nodes.get_mut(&source.node) {
                    source_node.add_dependent(id);
                }
            }
        }

        self.nodes.insert(id, Node::new(id, inputs, Box::new(op)));
        Ok(id)
    }

    /// Look up a node by id.
    pub fn get_node(&self, id: NodeId) -> Result<&Node, ModelError> {
        self.nodes.get(&id).ok_or(ModelError::NodeNotFound(id))
    }

    /// Number of nodes in the model.
    #[inline]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// True when the model holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check if a node with the given id exists.
    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All nodes whose operation is of type `O`, in insertion order.
    pub fn nodes_of_type<O: Operation>(&self) -> Vec<&Node> {
        self.nodes
            .values()
            .filter(|node| node.operation().as_any().is::<O>())
            .collect()
    }

    // Narrow internal accessor for the whole-graph entry-point search.
    pub(crate) fn first_node(&self) -> Option<&Node> {
        self.nodes.values().next()
    }

    /// Materialize the value produced at `port`.
    ///
    /// Walks the producing node's active subgraph in dependency order,
    /// computing each node exactly once, then extracts the requested slot
    /// with type checking.
    pub fn output_value<T: PortValue>(&self, port: &OutputPort<T>) -> Result<Vec<T>, ModelError> {
        trace!(node = %port.node(), slot = port.slot(), "materializing output");
        let mut computed: HashMap<NodeId, Vec<Vec<Value>>> = HashMap::new();

        let mut iter = self.node_iterator_for(port.node())?;
        while let Some(node) = iter.next() {
            let mut inputs = Vec::with_capacity(node.inputs().len());
            for input in node.inputs() {
                let mut values = Vec::new();
                for source in input.sources() {
                    // Dependency order guarantees the source is already computed.
                    let outputs = computed
                        .get(&source.node)
                        .ok_or(ModelError::NodeNotFound(source.node))?;
                    let slot = outputs.get(source.slot).ok_or(ModelError::SlotOutOfRange {
                        node: source.node,
                        slot: source.slot,
                        arity: outputs.len(),
                    })?;
                    values.extend_from_slice(slot);
                }
                inputs.push(values);
            }
            let outputs = node.operation().compute(&inputs)?;
            computed.insert(node.id(), outputs);
        }

        let outputs = computed
            .get(&port.node())
            .ok_or(ModelError::NodeNotFound(port.node()))?;
        let slot = outputs.get(port.slot()).ok_or(ModelError::SlotOutOfRange {
            node: port.node(),
            slot: port.slot(),
            arity: outputs.len(),
        })?;
        slot.iter()
            .map(|value| {
                T::from_value(value).ok_or(ModelError::TypeMismatch {
                    node: port.node(),
                    slot: port.slot(),
                    requested: T::type_name(),
                    found: value.type_name(),
                })
            })
            .collect()
    }

    /// Visit all nodes in dependency order: no node is visited before every
    /// node it directly depends on.
    ///
    /// Full coverage is only guaranteed when every node is connected to the
    /// designated sink; see [`NodeIterator`].
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&Node),
    {
        for node in self.node_iterator() {
            visitor(node);
        }
    }

    /// Visit the nodes needed to compute `target`'s output, in dependency
    /// order.
    pub fn visit_output<F>(&self, mut visitor: F, target: NodeId) -> Result<(), ModelError>
    where
        F: FnMut(&Node),
    {
        for node in self.node_iterator_for(target)? {
            visitor(node);
        }
        Ok(())
    }

    /// Visit the nodes needed to compute the outputs of `targets`, in
    /// dependency order.
    pub fn visit_outputs<F>(&self, mut visitor: F, targets: &[NodeId]) -> Result<(), ModelError>
    where
        F: FnMut(&Node),
    {
        for node in self.node_iterator_for_all(targets)? {
            visitor(node);
        }
        Ok(())
    }

    /// Cursor over the whole graph in dependency order.
    pub fn node_iterator(&self) -> NodeIterator<'_> {
        NodeIterator::new(self, &[])
    }

    /// Cursor over the active subgraph of one target node.
    ///
    /// An unknown target is rejected with
    /// [`ModelError::NodeNotFound`] before any traversal work is done.
    pub fn node_iterator_for(&self, target: NodeId) -> Result<NodeIterator<'_>, ModelError> {
        self.get_node(target)?;
        Ok(NodeIterator::new(self, &[target]))
    }

    /// Cursor over the active subgraph of a set of target nodes.
    ///
    /// An empty target set falls back to whole-graph mode, matching
    /// [`node_iterator`](Model::node_iterator). Unknown targets are rejected
    /// with [`ModelError::NodeNotFound`].
    pub fn node_iterator_for_all(&self, targets: &[NodeId]) -> Result<NodeIterator<'_>, ModelError> {
        for &target in targets {
            self.get_node(target)?;
        }
        Ok(NodeIterator::new(self, targets))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model(nodes: {})", self.nodes.len())
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model").field("nodes", &self.nodes).finish()
    }
}
