//! hp-graph: topology layer for the heat pump network.
//!
//! Provides:
//! - Core topology data structures (Component, Port, Connection, Graph)
//! - Incremental graph builder with validation
//! - Lookup of connections by label and by component port
//!
//! Components own numbered ports (`in1`, `in2`, `out1`, ...). A connection joins
//! exactly one outlet port to exactly one inlet port and carries a unique label.
//!
//! # Example
//!
//! ```
//! use hp_graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let source = builder.add_component("source", 0, 1);
//! let sink = builder.add_component("sink", 1, 0);
//! builder.connect("11", source, "out1", sink, "in1").unwrap();
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.components().len(), 2);
//! assert_eq!(graph.connections().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Connection, Graph, Port, PortKind};
