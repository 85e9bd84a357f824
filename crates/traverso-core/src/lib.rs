//! # traverso-core
//!
//! Core layer for Traverso: the graph model and the exchange transforms.
//!
//! This crate owns the vertex/arc/graph value types, the builders that
//! realize the loader contract (edge lists and obstacle grids), and the two
//! transforms used to move a graph across a process boundary: the dense
//! adjacency matrix and the id-based acyclic serialization form. It depends
//! only on `traverso-common`.
//!
//! The graph is read-only to every algorithm; all algorithmic behavior
//! lives in `traverso-algorithms`.
//!
//! ## Modules
//!
//! - [`graph`] - Graph model ([`Graph`], [`Vertex`], [`Arc`]) and builders
//! - [`exchange`] - Adjacency matrix and acyclic transfer form

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod exchange;
pub mod graph;

pub use exchange::{AcyclicArc, AcyclicGraph, AcyclicVertex, NO_EDGE};
pub use graph::{Arc, EdgeRecord, Graph, GridSpec, Vertex, VertexRecord};
