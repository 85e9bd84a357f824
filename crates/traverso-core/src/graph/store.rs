//! The graph container.

use super::vertex::{Arc, Vertex};
use arcstr::ArcStr;
use traverso_common::collections::TraversoMap;
use traverso_common::types::{Point, VertexId};
use traverso_common::utils::error::{Error, Result};

/// An in-memory graph: a vertex arena plus a global arc list.
///
/// The graph is handed to the algorithms fully constructed and is read-only
/// from then on. Structural soundness (unique ids, resolvable endpoints) is
/// the loader's responsibility; the builders in this crate uphold it, and
/// behavior on a hand-assembled malformed graph is unspecified.
///
/// # Example
///
/// ```
/// use traverso_core::Graph;
/// use traverso_common::Point;
///
/// let mut graph = Graph::new(false, true);
/// let a = graph.add_vertex("A", Point::ZERO, Point::ZERO);
/// let b = graph.add_vertex("B", Point::new(1.0, 0.0), Point::new(1.0, 0.0));
/// graph.add_edge(a, b, 2.5).unwrap();
///
/// // Undirected graphs store the mirrored arc as well.
/// assert_eq!(graph.arcs().len(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    /// id -> arena slot. Rebuilt whenever the arena is reordered.
    slots: TraversoMap<VertexId, usize>,
    arcs: Vec<Arc>,
    weighted: bool,
    directed: bool,
    grid_map: bool,
    start: Option<VertexId>,
    end: Option<VertexId>,
    next_id: u64,
}

impl Graph {
    /// Creates an empty graph with the given edge semantics.
    #[must_use]
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            ..Self::default()
        }
    }

    /// Whether arcs are one-way.
    #[inline]
    #[must_use]
    pub fn directed(&self) -> bool {
        self.directed
    }

    /// Whether arc weights are meaningful (vs. the uniform default of 1).
    #[inline]
    #[must_use]
    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// Whether the vertices carry metric positions from a grid/maze import,
    /// enabling the Euclidean-heuristic search.
    #[inline]
    #[must_use]
    pub fn is_grid_map(&self) -> bool {
        self.grid_map
    }

    /// Marks the graph as metric-equipped (see [`Graph::is_grid_map`]).
    pub fn set_grid_map(&mut self, grid_map: bool) {
        self.grid_map = grid_map;
    }

    /// Suggested search origin (grid imports only).
    #[inline]
    #[must_use]
    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    /// Suggested search target (grid imports only).
    #[inline]
    #[must_use]
    pub fn end(&self) -> Option<VertexId> {
        self.end
    }

    /// Records the suggested search endpoints.
    pub fn set_endpoints(&mut self, start: Option<VertexId>, end: Option<VertexId>) {
        self.start = start;
        self.end = end;
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of *edges*: arcs for directed graphs, arc pairs otherwise.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        if self.directed {
            self.arcs.len()
        } else {
            self.arcs.len() / 2
        }
    }

    /// All vertices, in arena order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Ids of all vertices, in arena order.
    #[must_use]
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.iter().map(Vertex::id).collect()
    }

    /// Every arc in the graph, in insertion order.
    #[inline]
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Looks a vertex up by id.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(&id).map(|&slot| &self.vertices[slot])
    }

    /// Looks a vertex up by display name (first match).
    #[must_use]
    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.name() == name)
    }

    /// Adds a vertex with a sequentially assigned id.
    pub fn add_vertex(
        &mut self,
        name: impl Into<ArcStr>,
        pos_screen: Point,
        pos_real: Point,
    ) -> VertexId {
        let id = VertexId::new(self.next_id);
        self.insert_vertex(id, name, pos_screen, pos_real);
        id
    }

    /// Adds a vertex under an explicit id taken from an imported description.
    ///
    /// Ids must be unique within the graph; duplicates are not detected here.
    pub fn insert_vertex(
        &mut self,
        id: VertexId,
        name: impl Into<ArcStr>,
        pos_screen: Point,
        pos_real: Point,
    ) -> VertexId {
        self.slots.insert(id, self.vertices.len());
        self.vertices
            .push(Vertex::new(id, name, pos_screen, pos_real));
        self.next_id = self.next_id.max(id.as_u64() + 1);
        id
    }

    /// Adds an edge between two existing vertices.
    ///
    /// For undirected graphs this materializes the mirrored arc as well; for
    /// directed graphs the reverse adjacency of the destination is updated
    /// instead, so total-degree queries stay cheap.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVertex`] if either endpoint is not in the graph.
    pub fn add_edge(&mut self, origin: VertexId, destination: VertexId, weight: f64) -> Result<()> {
        self.insert_arc_with_inverse(Arc::new(origin, destination, weight))?;
        if !self.directed {
            self.insert_arc(Arc::new(destination, origin, weight))?;
        }
        Ok(())
    }

    /// Inserts exactly one arc, maintaining reverse adjacency for directed
    /// graphs. Used by [`add_edge`](Graph::add_edge) and by reconstruction
    /// paths that already carry both directions of an undirected edge.
    pub(crate) fn insert_arc(&mut self, arc: Arc) -> Result<()> {
        let origin = self.slot(arc.origin)?;
        // Probe the destination up front so a dangling arc is rejected whole.
        self.slot(arc.destination)?;
        self.vertices[origin].push_arc(arc);
        self.arcs.push(arc);
        Ok(())
    }

    pub(crate) fn insert_arc_with_inverse(&mut self, arc: Arc) -> Result<()> {
        self.insert_arc(arc)?;
        if self.directed {
            let slot = self.slot(arc.destination)?;
            self.vertices[slot].push_arc_inverse(arc);
        }
        Ok(())
    }

    /// Directly adjacent vertices, in precedence order.
    #[must_use]
    pub fn adjacent(&self, id: VertexId) -> Vec<VertexId> {
        self.adjacent_weighted(id)
            .into_iter()
            .map(|(v, _)| v)
            .collect()
    }

    /// Directly adjacent vertices and the arc weights reaching them, in
    /// precedence order.
    #[must_use]
    pub fn adjacent_weighted(&self, id: VertexId) -> Vec<(VertexId, f64)> {
        let Some(vertex) = self.vertex(id) else {
            return Vec::new();
        };
        let mut adjacent: Vec<(&Vertex, f64)> = vertex
            .arcs()
            .iter()
            .filter_map(|arc| self.vertex(arc.destination).map(|v| (v, arc.weight)))
            .collect();
        adjacent.sort_by(|(a, _), (b, _)| a.precedence_cmp(b));
        adjacent.into_iter().map(|(v, w)| (v.id(), w)).collect()
    }

    /// Every vertex linked to this one, forward or inverse, in precedence
    /// order. This is the undirected-sense neighborhood used by the coloring
    /// analysis; duplicates are kept when both directions exist.
    #[must_use]
    pub fn linked(&self, id: VertexId) -> Vec<VertexId> {
        let Some(vertex) = self.vertex(id) else {
            return Vec::new();
        };
        let mut linked: Vec<&Vertex> = vertex
            .arcs()
            .iter()
            .filter_map(|arc| self.vertex(arc.destination))
            .chain(
                vertex
                    .arcs_inverse()
                    .iter()
                    .filter_map(|arc| self.vertex(arc.origin)),
            )
            .collect();
        linked.sort_by(|a, b| a.precedence_cmp(b));
        linked.into_iter().map(Vertex::id).collect()
    }

    /// Total degree (outgoing plus incoming edges) of a vertex.
    #[must_use]
    pub fn total_degree(&self, id: VertexId) -> usize {
        self.vertex(id).map_or(0, Vertex::total_degree)
    }

    /// Sorts the vertex arena into precedence order and rebuilds the id
    /// lookup. Loaders call this once after construction so arena order and
    /// enumeration order agree.
    pub fn sort_vertices(&mut self) {
        self.vertices.sort_by(Vertex::precedence_cmp);
        self.slots = self
            .vertices
            .iter()
            .enumerate()
            .map(|(slot, v)| (v.id(), slot))
            .collect();
    }

    fn slot(&self, id: VertexId) -> Result<usize> {
        self.slots.get(&id).copied().ok_or(Error::UnknownVertex(id))
    }
}
