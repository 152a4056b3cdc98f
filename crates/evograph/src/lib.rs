// Allow minor clippy style warnings at crate level
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

//! Evolving graph primitives.
//!
//! An evolving graph is a graph whose edge set is indexed by discrete time:
//! every edge exists at exactly one timestamp, and timestamps are totally
//! ordered. This crate provides:
//!
//! - [`EvolvingGraph`] - nodes, timestamps and time-stamped edges
//! - [`AttributeEvolvingGraph`] - the same graph with named numeric edge attributes
//! - [`matrix`] - per-timestamp adjacency matrices (`ndarray`)
//! - [`algo`] - time-respecting shortest paths and reachability
//! - [`formats`] - CSV edge-list ingestion
//!
//! # Time-respecting paths
//!
//! Paths are searched on an implicit time-expanded graph over `(node, timestamp)`
//! states. A *hop* follows an edge at the current timestamp, a *wait* stays at
//! the node and moves to the next timestamp. Both cost one step.
//!
//! # Example
//!
//! ```rust
//! use evograph::EvolvingGraph;
//!
//! let mut g = EvolvingGraph::new(true);
//! g.add_edge(1, 2, 1).unwrap();
//! g.add_edge(2, 3, 1).unwrap();
//! g.add_edge(2, 3, 2).unwrap();
//! g.add_edge(2, 4, 2).unwrap();
//!
//! assert_eq!(g.node_count(), 4);
//! assert_eq!(g.edge_count(), 4);
//! assert_eq!(g.timestamp_count(), 2);
//!
//! // 1 -> 2 at t=1, wait at 2 until t=2, then 2 -> 4.
//! let d = g.shortest_temporal_distance((&1, &1), (&4, &2)).unwrap();
//! assert_eq!(d, Some(3));
//! ```

pub mod algo;
mod edge;
mod error;
pub mod formats;
mod graph;
mod index;
mod label;
pub mod matrix;
mod query;
mod store;

pub use algo::{State, TemporalBfsConfig};
pub use edge::{Attributes, TimeEdge};
pub use error::{Error, Result};
pub use graph::{AttributeEvolvingGraph, EvolvingGraph, GraphStats};
pub use index::{NodeIndex, TimestampIndex};
pub use label::{NodeId, NodeLabel, TimeId, TimeLabel};
pub use query::TimeWindow;
pub use store::EdgeStore;

// Re-export the matrix and graph crates used in the public API
pub use ndarray;
pub use petgraph;
