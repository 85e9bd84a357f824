//! Cheapest-insertion travelling-salesman heuristic, step-wise.

use crate::result::{SearchResult, SearchStep};
use crate::structure::is_connected;
use traverso_common::collections::TraversoIndexSet;
use traverso_common::types::VertexId;
use traverso_common::utils::error::{Error, Result};
use traverso_common::utils::hash::FxHashSet;
use traverso_core::{Arc, Graph};

const TOUR: &str = "Travelling Salesman";

/// A chosen splice: put `vertex` into the cycle at `index`.
#[derive(Debug)]
struct Insertion {
    vertex: VertexId,
    index: usize,
    cost: f64,
}

/// Step-wise cheapest-insertion tour construction.
///
/// Preconditions, checked up front: the graph must be connected, undirected,
/// and weighted. The heuristic starts from the globally minimum-weight edge
/// as a two-vertex round trip and then repeatedly splices in the uninserted
/// vertex with the cheapest insertion cost over all adjacent cycle pairs.
/// When no admissible vertex exists anywhere, a zero-cost *virtual* arc from
/// a cycle vertex to one of its real uninserted neighbors forces progress;
/// if that was ever necessary the final cycle is reported with
/// `found = false` (a partial/invalid result, not a hard failure).
///
/// Every candidate-set computation, candidate evaluation, virtual-arc
/// synthesis, and insertion is one suspension point. The virtual arcs live
/// on this state object, are visible to the renderer through
/// [`virtual_arcs`](TourSearch::virtual_arcs) while stepping, and are
/// cleared on completion - the graph itself is never touched.
///
/// # Example
///
/// ```
/// use traverso_algorithms::TourSearch;
/// use traverso_core::Graph;
/// use traverso_common::Point;
///
/// let mut graph = Graph::new(false, true);
/// let a = graph.add_vertex("A", Point::ZERO, Point::ZERO);
/// let b = graph.add_vertex("B", Point::ZERO, Point::ZERO);
/// let c = graph.add_vertex("C", Point::ZERO, Point::ZERO);
/// graph.add_edge(a, b, 1.0).unwrap();
/// graph.add_edge(b, c, 2.0).unwrap();
/// graph.add_edge(a, c, 5.0).unwrap();
///
/// let result = TourSearch::new(&graph, a).unwrap().run().unwrap();
/// assert!(result.found);
/// ```
#[derive(Debug)]
pub struct TourSearch<'g> {
    graph: &'g Graph,
    initial: VertexId,
    /// The cycle under construction, closed (first vertex repeated last).
    cycle: Vec<VertexId>,
    inserted: FxHashSet<VertexId>,
    /// Virtual arcs currently shown to the renderer.
    extra_arcs: Vec<Arc>,
    /// Whether a virtual arc was ever needed; makes the result partial.
    used_virtual: bool,
    /// Best insertion found in the current round.
    best: Option<Insertion>,
    state: State,
}

#[derive(Debug)]
enum State {
    Start,
    ScanPair {
        pair: usize,
    },
    Evaluate {
        pair: usize,
        candidates: Vec<(VertexId, f64)>,
        next: usize,
    },
    Decide,
    Insert,
    Done,
}

impl<'g> TourSearch<'g> {
    /// Prepares a tour construction over `graph`.
    ///
    /// # Errors
    ///
    /// [`Error::DirectedUnsupported`], [`Error::UnweightedUnsupported`], or
    /// [`Error::Disconnected`] when the respective precondition fails;
    /// [`Error::UnknownVertex`] if `initial` is not in the graph.
    pub fn new(graph: &'g Graph, initial: VertexId) -> Result<Self> {
        if graph.directed() {
            return Err(Error::DirectedUnsupported);
        }
        if !graph.weighted() {
            return Err(Error::UnweightedUnsupported);
        }
        graph.vertex(initial).ok_or(Error::UnknownVertex(initial))?;
        if !is_connected(graph) {
            return Err(Error::Disconnected);
        }
        Ok(Self {
            graph,
            initial,
            cycle: Vec::new(),
            inserted: FxHashSet::default(),
            extra_arcs: Vec::new(),
            used_virtual: false,
            best: None,
            state: State::Start,
        })
    }

    /// Performs one unit of progress and returns its snapshot, or `None`
    /// once the construction has completed.
    pub fn advance(&mut self) -> Option<SearchStep> {
        loop {
            match &mut self.state {
                State::Done => return None,
                State::Start => {
                    // The seed is the globally cheapest edge, as a
                    // two-vertex round trip. First minimal arc wins.
                    let Some(seed) = self
                        .graph
                        .arcs()
                        .iter()
                        .copied()
                        .reduce(|best, arc| if arc.weight < best.weight { arc } else { best })
                    else {
                        // A connected graph without arcs is a lone vertex;
                        // there is no cycle to build.
                        self.state = State::Done;
                        return Some(SearchStep::Complete(SearchResult {
                            visited: vec![self.initial],
                            ..SearchResult::blank(TOUR, self.initial, None)
                        }));
                    };
                    self.cycle = vec![seed.origin, seed.destination, seed.origin];
                    self.inserted = FxHashSet::from_iter([seed.origin, seed.destination]);
                    let frame = self.frame();
                    self.state = State::ScanPair { pair: 0 };
                    return Some(SearchStep::Progress(frame));
                }
                State::ScanPair { pair } => {
                    let pair = *pair;
                    if pair + 2 >= self.cycle.len() {
                        self.state = State::Decide;
                        continue;
                    }
                    let (v1, v2) = (self.cycle[pair], self.cycle[pair + 1]);
                    // Uninserted neighbors of v1 that also reach v2.
                    let candidates: Vec<(VertexId, f64)> = self
                        .graph
                        .adjacent_weighted(v1)
                        .into_iter()
                        .filter(|&(w, _)| {
                            !self.inserted.contains(&w) && self.arc_weight(w, v2).is_some()
                        })
                        .collect();
                    let frame = SearchResult {
                        open_set: Some(candidates.iter().map(|&(w, _)| w).collect()),
                        current: Some(vec![v1, v2]),
                        ..self.frame()
                    };
                    self.state = State::Evaluate {
                        pair,
                        candidates,
                        next: 0,
                    };
                    return Some(SearchStep::Progress(frame));
                }
                State::Evaluate {
                    pair,
                    candidates,
                    next,
                } => {
                    if *next >= candidates.len() {
                        let pair = *pair;
                        self.state = State::ScanPair { pair: pair + 1 };
                        continue;
                    }
                    let pair = *pair;
                    let (candidate, to_candidate) = candidates[*next];
                    *next += 1;
                    let open: Vec<VertexId> = candidates.iter().map(|&(w, _)| w).collect();

                    let (v1, v2) = (self.cycle[pair], self.cycle[pair + 1]);
                    let Some(to_v2) = self.arc_weight(candidate, v2) else {
                        // Candidates were filtered on this arc's existence.
                        continue;
                    };
                    let frame = SearchResult {
                        open_set: Some(open),
                        current: Some(vec![v1, v2]),
                        checked: Some(candidate),
                        ..self.frame()
                    };
                    let cost = to_candidate + to_v2;
                    if self.best.as_ref().is_none_or(|best| cost < best.cost) {
                        self.best = Some(Insertion {
                            vertex: candidate,
                            index: pair + 1,
                            cost,
                        });
                        // A real insertion supersedes any pending virtual
                        // arc in the rendered overlay.
                        self.extra_arcs.clear();
                    }
                    return Some(SearchStep::Progress(frame));
                }
                State::Decide => {
                    if self.best.is_some() {
                        self.state = State::Insert;
                        continue;
                    }
                    if self
                        .graph
                        .vertices()
                        .iter()
                        .all(|v| self.inserted.contains(&v.id()))
                    {
                        return Some(self.complete(true));
                    }
                    // No admissible vertex anywhere: force progress over a
                    // zero-cost virtual arc to a real uninserted neighbor.
                    let Some((v2, index, neighbor)) = self.virtual_candidate() else {
                        // Not even a virtual arc can extend the cycle.
                        return Some(self.complete(false));
                    };
                    let v1 = self.cycle[index - 1];
                    let frame = SearchResult {
                        open_set: Some(Vec::new()),
                        current: Some(vec![v1, v2]),
                        checked: Some(neighbor),
                        ..self.frame()
                    };
                    tracing::warn!(
                        from = %v2,
                        to = %neighbor,
                        "tour progress requires a virtual edge"
                    );
                    self.extra_arcs = vec![Arc::new(v2, neighbor, 0.0)];
                    self.used_virtual = true;
                    self.best = Some(Insertion {
                        vertex: neighbor,
                        index,
                        cost: f64::INFINITY,
                    });
                    self.state = State::Insert;
                    return Some(SearchStep::Progress(frame));
                }
                State::Insert => {
                    let insertion = self.best.take().expect("Insert is only entered with a choice");
                    self.cycle.insert(insertion.index, insertion.vertex);
                    self.inserted.insert(insertion.vertex);
                    let frame = self.frame();
                    self.state = State::ScanPair { pair: 0 };
                    return Some(SearchStep::Progress(frame));
                }
            }
        }
    }

    /// Drains every remaining step and returns the final result, or `None`
    /// if the sequence was already exhausted.
    #[must_use]
    pub fn run(mut self) -> Option<SearchResult> {
        let mut last = None;
        while let Some(step) = self.advance() {
            last = Some(step.into_result());
        }
        last
    }

    /// The virtual arcs the renderer should overlay while stepping.
    #[must_use]
    pub fn virtual_arcs(&self) -> &[Arc] {
        &self.extra_arcs
    }

    /// Weight of the arc `from -> to`, if it exists.
    fn arc_weight(&self, from: VertexId, to: VertexId) -> Option<f64> {
        self.graph.vertex(from).and_then(|vertex| {
            vertex
                .arcs()
                .iter()
                .find(|arc| arc.destination == to)
                .map(|arc| arc.weight)
        })
    }

    /// The first cycle pair whose leading vertex still has a real
    /// uninserted neighbor: `(pair head v2, insertion index, neighbor)`.
    fn virtual_candidate(&self) -> Option<(VertexId, usize, VertexId)> {
        for pair in 0..self.cycle.len().saturating_sub(2) {
            let v1 = self.cycle[pair];
            if let Some(neighbor) = self
                .graph
                .adjacent(v1)
                .into_iter()
                .find(|w| !self.inserted.contains(w))
            {
                return Some((self.cycle[pair + 1], pair + 1, neighbor));
            }
        }
        None
    }

    /// An intermediate frame showing the cycle as the current path.
    fn frame(&self) -> SearchResult {
        SearchResult {
            path: self.cycle.clone(),
            found: true,
            ..SearchResult::blank(TOUR, self.initial, None)
        }
    }

    /// The final snapshot. `closed` is false when the cycle could not be
    /// extended at all; a cycle built over virtual arcs is complete but
    /// still reported as not found.
    fn complete(&mut self, closed: bool) -> SearchStep {
        self.state = State::Done;
        self.extra_arcs.clear();
        let visited: TraversoIndexSet<VertexId> = self.cycle.iter().copied().collect();
        let found = closed && !self.used_virtual;
        SearchStep::Complete(SearchResult {
            visited: visited.into_iter().collect(),
            path: if closed { self.cycle.clone() } else { Vec::new() },
            found,
            ..SearchResult::blank(TOUR, self.initial, None)
        })
    }
}

impl Iterator for TourSearch<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traverso_common::types::Point;

    fn complete_graph(n: usize) -> (Graph, Vec<VertexId>) {
        let mut g = Graph::new(false, true);
        let ids: Vec<VertexId> = (0..n)
            .map(|i| g.add_vertex(format!("v{i}"), Point::ZERO, Point::ZERO))
            .collect();
        for i in 0..n {
            for j in (i + 1)..n {
                #[allow(clippy::cast_precision_loss)]
                g.add_edge(ids[i], ids[j], (i + j) as f64 + 1.0).unwrap();
            }
        }
        (g, ids)
    }

    #[test]
    fn test_rejects_directed_graph() {
        let mut g = Graph::new(true, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, a, 1.0).unwrap();
        assert_eq!(
            TourSearch::new(&g, a).unwrap_err(),
            Error::DirectedUnsupported
        );
    }

    #[test]
    fn test_rejects_unweighted_graph() {
        let mut g = Graph::new(false, false);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();
        assert_eq!(
            TourSearch::new(&g, a).unwrap_err(),
            Error::UnweightedUnsupported
        );
    }

    #[test]
    fn test_rejects_disconnected_graph() {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_vertex("C", Point::ZERO, Point::ZERO);
        assert_eq!(TourSearch::new(&g, a).unwrap_err(), Error::Disconnected);
    }

    #[test]
    fn test_complete_graph_tour_needs_no_virtual_edge() {
        let (g, ids) = complete_graph(5);
        let search = TourSearch::new(&g, ids[0]).unwrap();
        let result = search.run().unwrap();
        assert!(result.found);
        // Closed Hamiltonian cycle: every vertex once, first repeated last.
        assert_eq!(result.path.len(), 6);
        assert_eq!(result.path.first(), result.path.last());
        assert_eq!(result.visited.len(), 5);
    }

    #[test]
    fn test_tour_starts_from_cheapest_edge() {
        let (g, ids) = complete_graph(4);
        let mut search = TourSearch::new(&g, ids[3]).unwrap();
        let first = search.advance().unwrap().into_result();
        // Cheapest edge is v0-v1 with weight 2.
        assert_eq!(first.path, vec![ids[0], ids[1], ids[0]]);
    }

    #[test]
    fn test_triangle_tour() {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        let c = g.add_vertex("C", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, c, 2.0).unwrap();
        g.add_edge(a, c, 5.0).unwrap();

        let result = TourSearch::new(&g, a).unwrap().run().unwrap();
        assert!(result.found);
        assert_eq!(result.path, vec![a, c, b, a]);
        assert_eq!(result.visited.len(), 3);
    }

    #[test]
    fn test_star_graph_falls_back_to_virtual_edges() {
        // A star has no Hamiltonian cycle over real edges: the hub is the
        // only connection between the leaves.
        let mut g = Graph::new(false, true);
        let hub = g.add_vertex("hub", Point::ZERO, Point::ZERO);
        let leaves: Vec<VertexId> = (0..3)
            .map(|i| g.add_vertex(format!("l{i}"), Point::ZERO, Point::ZERO))
            .collect();
        for (i, &leaf) in leaves.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            g.add_edge(hub, leaf, i as f64 + 1.0).unwrap();
        }

        let mut search = TourSearch::new(&g, hub).unwrap();
        let mut saw_virtual = false;
        let mut last = None;
        while let Some(step) = search.advance() {
            saw_virtual |= !search.virtual_arcs().is_empty();
            last = Some(step);
        }
        let result = last.unwrap().into_result();
        assert!(saw_virtual);
        assert!(!result.found);
        // The virtual arcs do not outlive the run.
        assert!(search.virtual_arcs().is_empty());
    }

    #[test]
    fn test_steps_expose_candidate_evaluation() {
        let (g, ids) = complete_graph(4);
        let steps: Vec<SearchStep> = TourSearch::new(&g, ids[0]).unwrap().collect();
        assert!(steps.last().unwrap().is_complete());
        assert!(
            steps
                .iter()
                .any(|s| s.result().checked.is_some() && s.result().open_set.is_some())
        );
        // Every intermediate frame displays the cycle under construction.
        assert!(
            steps
                .iter()
                .filter(|s| !s.is_complete())
                .all(|s| !s.result().path.is_empty())
        );
    }

    #[test]
    fn test_single_vertex_graph() {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let result = TourSearch::new(&g, a).unwrap().run().unwrap();
        assert!(!result.found);
        assert_eq!(result.visited, vec![a]);
    }
}
