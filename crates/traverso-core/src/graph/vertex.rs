//! Vertex and arc value types.

use arcstr::ArcStr;
use std::cmp::Ordering;
use traverso_common::types::{Point, VertexId};

/// A directed weighted edge between two vertices.
///
/// Endpoints are referenced by id, never by pointer. An undirected edge is
/// represented as a pair of arcs, one per direction, created together with
/// equal weight and never independently mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// The vertex this arc leaves from.
    pub origin: VertexId,
    /// The vertex this arc points at.
    pub destination: VertexId,
    /// Edge weight. Defaults to 1 for unweighted graphs.
    pub weight: f64,
}

impl Arc {
    /// Creates a new arc.
    #[inline]
    #[must_use]
    pub const fn new(origin: VertexId, destination: VertexId, weight: f64) -> Self {
        Self {
            origin,
            destination,
            weight,
        }
    }

    /// Creates an arc with the default weight of 1.
    #[inline]
    #[must_use]
    pub const fn unweighted(origin: VertexId, destination: VertexId) -> Self {
        Self::new(origin, destination, 1.0)
    }
}

/// A vertex of the graph.
///
/// Owns its outgoing arcs. For directed graphs the graph also records the
/// arcs pointing *at* this vertex in `arcs_inverse`, so total-degree queries
/// never have to scan the whole arc list; undirected graphs leave it empty
/// because the mirrored arc already counts each edge once per endpoint.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    name: ArcStr,
    arcs: Vec<Arc>,
    arcs_inverse: Vec<Arc>,
    pos_screen: Point,
    pos_real: Point,
}

impl Vertex {
    /// Creates a new vertex with no arcs.
    #[must_use]
    pub fn new(id: VertexId, name: impl Into<ArcStr>, pos_screen: Point, pos_real: Point) -> Self {
        Self {
            id,
            name: name.into(),
            arcs: Vec::new(),
            arcs_inverse: Vec::new(),
            pos_screen,
            pos_real,
        }
    }

    /// The unique id of this vertex.
    #[inline]
    #[must_use]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The display label of this vertex.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Outgoing arcs, in insertion order.
    #[inline]
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Arcs from other vertices that point here (directed graphs only).
    #[inline]
    #[must_use]
    pub fn arcs_inverse(&self) -> &[Arc] {
        &self.arcs_inverse
    }

    /// Schematic position used for drawing.
    #[inline]
    #[must_use]
    pub fn pos_screen(&self) -> Point {
        self.pos_screen
    }

    /// Metric position used by the Euclidean search heuristic.
    #[inline]
    #[must_use]
    pub fn pos_real(&self) -> Point {
        self.pos_real
    }

    /// Total number of edges touching this vertex (outgoing plus incoming).
    #[inline]
    #[must_use]
    pub fn total_degree(&self) -> usize {
        self.arcs.len() + self.arcs_inverse.len()
    }

    /// Precedence order: shorter name first, then lexicographic.
    ///
    /// This ordering drives deterministic adjacency enumeration and is
    /// load-bearing for reproducible traversal order.
    #[must_use]
    pub fn precedence_cmp(&self, other: &Vertex) -> Ordering {
        self.name
            .len()
            .cmp(&other.name.len())
            .then_with(|| self.name.cmp(&other.name))
    }

    pub(crate) fn push_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    pub(crate) fn push_arc_inverse(&mut self, arc: Arc) {
        self.arcs_inverse.push(arc);
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}
