//! Exchange transforms.
//!
//! Two projections of the graph model used to move a graph across a process
//! boundary:
//!
//! - [`AcyclicGraph`] - a cyclic-reference-free serialization form where
//!   every vertex lists its outgoing edges by destination id, together with
//!   the [`to_graph`](AcyclicGraph::to_graph) reconstruction.
//! - The dense adjacency matrix, exposed as
//!   [`Graph::adjacency_matrix`](crate::Graph::adjacency_matrix).

mod acyclic;
mod matrix;

pub use acyclic::{AcyclicArc, AcyclicGraph, AcyclicVertex};
pub use matrix::NO_EDGE;
