// src/dag/mod.rs

//! DAG representation and ordering.
//!
//! - [`graph`] builds the task/artifact graph and enforces the shared
//!   namespace.
//! - [`sort`] orders the graph with Kahn's algorithm and reports anything a
//!   cycle kept from being scheduled.

pub mod graph;
pub mod sort;

pub use graph::{DagGraph, NodeKind};
pub use sort::{sort, topological_sort, TopoOrder};
