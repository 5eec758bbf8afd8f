//! Computation graph container and traversal
//!
//! This module provides the core data structures for representing a model as
//! a directed acyclic graph and for walking it in dependency order.
//!
//! # Architecture
//!
//! - [`NodeId`](node_id::NodeId) - Unique identifier for a graph node
//! - [`NodeIdGenerator`](node_id::NodeIdGenerator) - Thread-safe ID generator
//! - [`Value`](value::Value) / [`PortValue`](value::PortValue) - Scalars flowing through ports
//! - [`InputPort`](port::InputPort) / [`OutputPort`](port::OutputPort) - Typed node ports
//! - [`Node`](node::Node) / [`Operation`](node::Operation) - A node and its variant contract
//! - [`Model`](graph::Model) - The owning graph container
//! - [`NodeIterator`](iterator::NodeIterator) - Lazy dependency-order cursor
//! - [`ModelError`](graph::ModelError) - Errors raised by graph operations

pub mod graph;
pub mod iterator;
pub mod node;
pub mod node_id;
pub mod port;
pub mod value;

pub use graph::{Model, ModelError};
pub use iterator::NodeIterator;
pub use node::{ComputeError, Node, Operation};
pub use node_id::{NodeId, NodeIdGenerator};
pub use port::{InputPort, OutputPort, PortRef};
pub use value::{PortValue, Value};
