//! Dependency-order traversal engine
//!
//! [`NodeIterator`] is a lazy, restartable cursor over a model. It guarantees
//! that every emitted node comes after all nodes referenced by its input
//! ports, and that no node is emitted twice. The algorithm is an explicit
//! stack walk (no recursion), so graph depth is bounded by memory rather than
//! the call stack.
//!
//! Two modes share the engine:
//!
//! - **Active-subgraph**: constructed with target nodes, visits exactly the
//!   targets plus their transitive dependency closure.
//! - **Whole-graph**: constructed with no targets. An arbitrary node is picked
//!   and its dependent chain followed to a sink (the *designated sink*);
//!   traversal expands backward through dependencies and forward through the
//!   sink's dependents, with the sink itself deferred until everything else
//!   reachable has been emitted. Full coverage is only guaranteed when every
//!   node is connected to the designated sink - true for a graph with a
//!   single terminal output, and a documented limitation otherwise.

use std::collections::HashSet;

use tracing::trace;

use super::graph::Model;
use super::node::Node;
use super::node_id::NodeId;

/// Whole-graph sink bookkeeping, kept apart from the current node so the
/// "explore, then emit the sink once" phases are explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkPhase {
    /// Active-subgraph mode: no sink handling.
    Inactive,
    /// Whole-graph mode: the designated sink, held back until the stack drains.
    Deferred(NodeId),
    /// The sink has been handed out.
    Emitted,
}

/// A lazy cursor yielding a model's nodes in dependency order.
///
/// Holds private traversal state only, so independently constructed cursors
/// over the same model do not interfere. A cursor must not be used across a
/// mutation of its model.
pub struct NodeIterator<'a> {
    model: &'a Model,
    stack: Vec<NodeId>,
    visited: HashSet<NodeId>,
    sink: SinkPhase,
    current: Option<NodeId>,
}

impl<'a> NodeIterator<'a> {
    /// Build a cursor over `model`. An empty target slice selects whole-graph
    /// mode; otherwise the targets' dependency closure is traversed.
    pub(crate) fn new(model: &'a Model, targets: &[NodeId]) -> Self {
        let mut iter = Self {
            model,
            stack: Vec::new(),
            visited: HashSet::new(),
            sink: SinkPhase::Inactive,
            current: None,
        };
        if model.is_empty() {
            return iter;
        }

        iter.stack.extend_from_slice(targets);

        if iter.stack.is_empty() {
            // Whole-graph mode: follow dependents from an arbitrary node
            // until reaching a sink, and start there.
            let Some(mut node) = model.first_node() else {
                return iter;
            };
            while let Some(&dependent) = node.dependents().first() {
                match model.get_node(dependent) {
                    Ok(next) => node = next,
                    Err(_) => break,
                }
            }
            trace!(sink = %node.id(), "designated sink selected");
            iter.stack.push(node.id());
            iter.sink = SinkPhase::Deferred(node.id());
        }

        iter.advance();
        iter
    }

    /// True iff a current node is available.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// The current node, or `None` once the cursor is exhausted.
    pub fn current(&self) -> Option<&'a Node> {
        let id = self.current?;
        self.model.get_node(id).ok()
    }

    /// Compute the next node in dependency order, or mark the cursor invalid
    /// when the traversal is exhausted. Runs to completion before returning.
    pub fn advance(&mut self) {
        self.current = None;
        while let Some(&top) = self.stack.last() {
            // A node lands on the stack once per consumer edge; duplicates
            // are filtered here, at pop time.
            if self.visited.contains(&top) {
                self.stack.pop();
                continue;
            }
            let Ok(node) = self.model.get_node(top) else {
                // Unknown id on the stack: a stale reference. Skip it.
                self.stack.pop();
                continue;
            };

            // Ready iff every node referenced by the input ports is visited.
            let ready = node.inputs().iter().all(|port| {
                port.sources()
                    .iter()
                    .all(|source| self.visited.contains(&source.node))
            });

            if ready {
                self.stack.pop();
                self.visited.insert(top);

                if self.sink != SinkPhase::Deferred(top) {
                    self.current = Some(top);
                    return;
                }

                // Whole-graph mode: hold the designated sink back and keep
                // exploring through its dependents. Reverse order retains the
                // original left-to-right wiring order of multi-input nodes.
                for &dependent in node.dependents().iter().rev() {
                    self.stack.push(dependent);
                }
            } else {
                // Not ready: expand backward through the input ports, leaving
                // the node on the stack for a later pass.
                for port in node.inputs().iter().rev() {
                    for source in port.sources() {
                        self.stack.push(source.node);
                    }
                }
            }
        }

        // Stack drained: in whole-graph mode the designated sink is emitted
        // last, exactly once.
        if let SinkPhase::Deferred(sink) = self.sink {
            self.sink = SinkPhase::Emitted;
            self.current = Some(sink);
        }
    }
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current()?;
        self.advance();
        Some(node)
    }
}

impl std::fmt::Debug for NodeIterator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeIterator")
            .field("current", &self.current)
            .field("stack_depth", &self.stack.len())
            .field("visited", &self.visited.len())
            .field("sink", &self.sink)
            .finish()
    }
}
