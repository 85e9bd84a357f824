//! The acyclic transfer form.
//!
//! A serialization-safe projection of [`Graph`]: every vertex lists its
//! outgoing edges by destination id instead of by reference, which breaks
//! the vertex/arc ownership cycle and lets the structure cross a process or
//! transport boundary. This is the canonical wire shape; the live graph is
//! rebuilt on the other side with [`AcyclicGraph::to_graph`].

use crate::graph::{Arc, Graph, Vertex};
use serde::{Deserialize, Serialize};
use traverso_common::types::{Point, VertexId};
use traverso_common::utils::error::Result;

/// One outgoing edge of an [`AcyclicVertex`], by destination id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcyclicArc {
    /// Id of the vertex the edge points at.
    pub destination: VertexId,
    /// Edge weight.
    pub weight: f64,
}

/// A vertex of the transfer form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcyclicVertex {
    /// Unique vertex id.
    pub id: VertexId,
    /// Display label.
    pub name: String,
    /// Horizontal schematic position.
    pub x: f64,
    /// Vertical schematic position.
    pub y: f64,
    /// Outgoing edges by destination id.
    pub arcs: Vec<AcyclicArc>,
}

/// The reference-free projection of a whole graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcyclicGraph {
    /// All vertices with their outgoing edges.
    pub vertices: Vec<AcyclicVertex>,
    /// Whether arc weights are meaningful.
    pub weighted: bool,
    /// Whether arcs are one-way.
    pub directed: bool,
}

impl AcyclicGraph {
    /// Projects a live graph into the transfer form.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            vertices: graph.vertices().iter().map(AcyclicVertex::from).collect(),
            weighted: graph.weighted(),
            directed: graph.directed(),
        }
    }

    /// Rebuilds a live graph from the transfer form.
    ///
    /// Arcs are inserted exactly as listed - for undirected graphs both
    /// directions are already present in the projection, so nothing is
    /// mirrored here. Reverse adjacency is restored for directed graphs.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVertex`](traverso_common::Error::UnknownVertex) if an
    /// edge references an id with no vertex entry.
    pub fn to_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new(self.directed, self.weighted);
        for vertex in &self.vertices {
            let position = Point::new(vertex.x, vertex.y);
            graph.insert_vertex(vertex.id, vertex.name.as_str(), position, position);
        }
        for vertex in &self.vertices {
            for arc in &vertex.arcs {
                graph.insert_arc_with_inverse(Arc::new(vertex.id, arc.destination, arc.weight))?;
            }
        }
        Ok(graph)
    }
}

impl From<&Graph> for AcyclicGraph {
    fn from(graph: &Graph) -> Self {
        Self::from_graph(graph)
    }
}

impl From<&Vertex> for AcyclicVertex {
    fn from(vertex: &Vertex) -> Self {
        Self {
            id: vertex.id(),
            name: vertex.name().to_string(),
            x: vertex.pos_screen().x,
            y: vertex.pos_screen().y,
            arcs: vertex.arcs().iter().map(AcyclicArc::from).collect(),
        }
    }
}

impl From<&Arc> for AcyclicArc {
    fn from(arc: &Arc) -> Self {
        Self {
            destination: arc.destination,
            weight: arc.weight,
        }
    }
}
