//! Computation-graph core for model compilation
//!
//! A [`Model`](model::Model) is a directed acyclic graph of computational
//! nodes joined by typed input/output ports. Code generators, optimizers and
//! evaluators consume it by asking for a dependency-ordered visitation of some
//! or all nodes, or by materializing the value produced at one output port.
//!
//! # Example
//!
//! ```
//! use modelgraph::model::{InputPort, Model, OutputPort, PortRef};
//! use modelgraph::ops::{ConstantOp, SumOp};
//!
//! let mut model = Model::new();
//! let a = model.add_node(ConstantOp::scalar(1.0), vec![]).unwrap();
//! let b = model.add_node(ConstantOp::scalar(2.0), vec![]).unwrap();
//! let sum = model
//!     .add_node(
//!         SumOp,
//!         vec![InputPort::from_sources([PortRef::new(a, 0), PortRef::new(b, 0)])],
//!     )
//!     .unwrap();
//!
//! let port: OutputPort<f64> = OutputPort::new(sum, 0);
//! assert_eq!(model.output_value(&port).unwrap(), vec![3.0]);
//! ```

#![doc(html_root_url = "https://docs.rs/modelgraph")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod model;
pub mod ops;

// Utility modules
pub mod util;

// Re-exports
pub use model::{
    ComputeError, InputPort, Model, ModelError, Node, NodeId, NodeIterator, Operation,
    OutputPort, PortRef, Value,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
