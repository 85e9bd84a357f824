//! Shortest-path search: Dijkstra and the step-wise A*.

use crate::result::{CostDetails, SearchResult, SearchStep};
use std::collections::VecDeque;
use traverso_common::collections::TraversoIndexSet;
use traverso_common::types::{Point, VertexId};
use traverso_common::utils::error::{Error, Result};
use traverso_common::utils::hash::{FxHashMap, FxHashSet};
use traverso_core::Graph;

const DIJKSTRA: &str = "Dijkstra";
const A_STAR: &str = "A*";

// ============================================================================
// Dijkstra
// ============================================================================

/// One label record of the Dijkstra table.
struct Label {
    vertex: VertexId,
    distance: f64,
    /// Table slot of the predecessor on the best path so far.
    predecessor: Option<usize>,
}

/// Single-source shortest path, label-correcting variant.
///
/// Keeps a table of `(vertex, tentative distance, predecessor)` records and
/// a FIFO work queue: the front record is popped, every outgoing weighted
/// edge is relaxed, and an improved-or-equal tentative distance rewrites the
/// record and re-enqueues it. The `<=` acceptance deterministically prefers
/// later-processed equal-cost paths. Runs until the queue drains, then
/// reconstructs the path by walking predecessor links back from the target.
///
/// `distances` in the result parallels the label *table* (discovery order),
/// not the path; the caller matches entries by vertex identity. Negative
/// weights are unsupported and the behavior with them is undefined.
///
/// # Errors
///
/// [`Error::UnknownVertex`] if `start` is not in the graph.
pub fn dijkstra(graph: &Graph, start: VertexId, target: Option<VertexId>) -> Result<SearchResult> {
    graph.vertex(start).ok_or(Error::UnknownVertex(start))?;

    if Some(start) == target {
        return Ok(SearchResult {
            visited: vec![start],
            path: vec![start],
            found: true,
            distances: vec![0.0],
            ..SearchResult::blank(DIJKSTRA, start, target)
        });
    }

    let mut visited = vec![start];
    let mut seen: FxHashSet<VertexId> = FxHashSet::from_iter([start]);

    let mut table: Vec<Label> = vec![Label {
        vertex: start,
        distance: 0.0,
        predecessor: None,
    }];
    let mut slot_of: FxHashMap<VertexId, usize> = FxHashMap::from_iter([(start, 0)]);
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    while let Some(current) = queue.pop_front() {
        let from = table[current].distance;
        for (adjacent, weight) in graph.adjacent_weighted(table[current].vertex) {
            if seen.insert(adjacent) {
                visited.push(adjacent);
            }
            let distance = from + weight;
            let slot = *slot_of.entry(adjacent).or_insert_with(|| {
                table.push(Label {
                    vertex: adjacent,
                    distance,
                    predecessor: None,
                });
                table.len() - 1
            });
            if distance <= table[slot].distance {
                table[slot].distance = distance;
                table[slot].predecessor = Some(current);
                queue.push_back(slot);
            }
        }
    }

    let target_slot = target.and_then(|t| slot_of.get(&t).copied());
    let path = target_slot.map_or_else(Vec::new, |slot| {
        let mut path = Vec::new();
        let mut walk = Some(slot);
        while let Some(slot) = walk {
            path.push(table[slot].vertex);
            walk = table[slot].predecessor;
        }
        path.reverse();
        path
    });

    Ok(SearchResult {
        found: target_slot.is_some(),
        distances: table.iter().map(|label| label.distance).collect(),
        visited,
        path,
        ..SearchResult::blank(DIJKSTRA, start, target)
    })
}

// ============================================================================
// A*
// ============================================================================

/// Step-wise heuristic search over a metric-equipped graph.
///
/// Only valid when the graph carries metric vertex positions
/// (`is_grid_map()`); the heuristic is the Euclidean distance between
/// `pos_real` coordinates. Selection picks the open vertex *closest to the
/// goal* by pure heuristic distance - g/h/f are still computed and exposed
/// per expansion for display.
///
/// Each [`advance`](AStarSearch::advance) performs one unit of progress
/// (one selection, or one neighbor-edge expansion) and returns the snapshot
/// for it; the sequence is finite and non-restartable. The search succeeds
/// when the selected closest vertex *is* the target and fails when the open
/// set drains first.
///
/// # Example
///
/// ```
/// use traverso_algorithms::AStarSearch;
/// use traverso_core::{Graph, GridSpec};
///
/// let graph = Graph::from_grid(&GridSpec {
///     rows: 3,
///     cols: 3,
///     blocked: vec![(1, 1)],
///     start: (0, 0),
///     end: (2, 2),
/// });
/// let search = AStarSearch::new(&graph, graph.start().unwrap(), graph.end().unwrap()).unwrap();
/// let result = search.run().unwrap();
/// assert!(result.found);
/// ```
#[derive(Debug)]
pub struct AStarSearch<'g> {
    graph: &'g Graph,
    initial: VertexId,
    target: VertexId,
    /// Path-reconstruction tree: vertex -> best known parent.
    tree: FxHashMap<VertexId, VertexId>,
    open: TraversoIndexSet<VertexId>,
    closed: TraversoIndexSet<VertexId>,
    dist_start: FxHashMap<VertexId, f64>,
    dist_total: FxHashMap<VertexId, f64>,
    state: State,
}

#[derive(Debug)]
enum State {
    Select,
    Expand {
        current: VertexId,
        /// Path at selection time, re-shown by every expansion frame.
        path: Vec<VertexId>,
        neighbors: Vec<VertexId>,
        next: usize,
    },
    Done,
}

impl<'g> AStarSearch<'g> {
    /// Prepares a search from `start` to `target`.
    ///
    /// # Errors
    ///
    /// [`Error::NotGridMap`] if the graph has no metric positions;
    /// [`Error::UnknownVertex`] if either endpoint is not in the graph.
    pub fn new(graph: &'g Graph, start: VertexId, target: VertexId) -> Result<Self> {
        if !graph.is_grid_map() {
            return Err(Error::NotGridMap);
        }
        graph.vertex(start).ok_or(Error::UnknownVertex(start))?;
        graph.vertex(target).ok_or(Error::UnknownVertex(target))?;

        let mut search = Self {
            graph,
            initial: start,
            target,
            tree: FxHashMap::default(),
            open: TraversoIndexSet::default(),
            closed: TraversoIndexSet::default(),
            dist_start: FxHashMap::default(),
            dist_total: FxHashMap::default(),
            state: State::Select,
        };
        search.closed.insert(start);
        search.dist_start.insert(start, 0.0);
        search
            .dist_total
            .insert(start, search.heuristic(start, target));
        search.open.insert(start);
        Ok(search)
    }

    /// Performs one unit of progress and returns its snapshot, or `None`
    /// once the search has completed.
    pub fn advance(&mut self) -> Option<SearchStep> {
        loop {
            match &mut self.state {
                State::Done => return None,
                State::Select => {
                    let Some(current) = self.closest_open() else {
                        self.state = State::Done;
                        let open = self.open_snapshot();
                        return Some(SearchStep::Complete(SearchResult {
                            distances: SearchResult::no_distances(self.closed.len()),
                            visited: self.closed.iter().copied().collect(),
                            open_set: Some(open),
                            ..SearchResult::blank(A_STAR, self.initial, Some(self.target))
                        }));
                    };
                    self.open.shift_remove(&current);
                    self.closed.insert(current);
                    let path = self.path_to(current);
                    if current == self.target {
                        self.state = State::Done;
                        return Some(SearchStep::Complete(SearchResult {
                            visited: self.closed.iter().copied().collect(),
                            distances: SearchResult::no_distances(self.closed.len()),
                            path,
                            found: true,
                            ..SearchResult::blank(A_STAR, self.initial, Some(self.target))
                        }));
                    }
                    let frame = SearchResult {
                        visited: self.closed.iter().copied().collect(),
                        distances: SearchResult::no_distances(self.closed.len()),
                        path: path.clone(),
                        found: true,
                        open_set: Some(self.open_snapshot()),
                        current: Some(vec![current]),
                        ..SearchResult::blank(A_STAR, self.initial, Some(self.target))
                    };
                    self.state = State::Expand {
                        current,
                        path,
                        neighbors: self.graph.adjacent(current),
                        next: 0,
                    };
                    return Some(SearchStep::Progress(frame));
                }
                State::Expand {
                    current,
                    path,
                    neighbors,
                    next,
                } => {
                    // Skip neighbors that are already settled.
                    while *next < neighbors.len() && self.closed.contains(&neighbors[*next]) {
                        *next += 1;
                    }
                    if *next >= neighbors.len() {
                        self.state = State::Select;
                        continue;
                    }
                    let current = *current;
                    let adjacent = neighbors[*next];
                    *next += 1;
                    let path = path.clone();

                    let g = self.dist_start[&current] + self.heuristic(current, adjacent);
                    let h = self.heuristic(adjacent, self.target);
                    let frame = SearchResult {
                        visited: self.closed.iter().copied().collect(),
                        distances: SearchResult::no_distances(self.closed.len()),
                        path,
                        found: true,
                        open_set: Some(self.open_snapshot()),
                        current: Some(vec![current]),
                        checked: Some(adjacent),
                        details: Some(CostDetails { g, h, f: g + h }),
                        ..SearchResult::blank(A_STAR, self.initial, Some(self.target))
                    };

                    self.open.insert(adjacent);
                    // A longer way to a vertex we already reached is shown
                    // but never recorded.
                    let improves = self
                        .dist_start
                        .get(&adjacent)
                        .is_none_or(|&known| g <= known);
                    if improves {
                        self.tree.insert(adjacent, current);
                        self.dist_start.insert(adjacent, g);
                        self.dist_total.insert(adjacent, g + h);
                    }
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

    /// The open vertex closest to the target by heuristic distance; first
    /// minimum wins.
    fn closest_open(&self) -> Option<VertexId> {
        self.open.iter().copied().reduce(|best, candidate| {
            if self.heuristic(candidate, self.target) < self.heuristic(best, self.target) {
                candidate
            } else {
                best
            }
        })
    }

    fn heuristic(&self, from: VertexId, to: VertexId) -> f64 {
        self.position(from).distance(self.position(to))
    }

    fn position(&self, id: VertexId) -> Point {
        self.graph
            .vertex(id)
            .expect("search only visits graph members")
            .pos_real()
    }

    /// Builds the path from the reconstruction tree, root first.
    fn path_to(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut path = vec![vertex];
        let mut walk = vertex;
        while let Some(&parent) = self.tree.get(&walk) {
            walk = parent;
            path.insert(0, parent);
        }
        path
    }

    fn open_snapshot(&self) -> Vec<VertexId> {
        self.open.iter().copied().collect()
    }
}

impl Iterator for AStarSearch<'_> {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traverso_core::GridSpec;

    fn triangle() -> (Graph, VertexId, VertexId, VertexId) {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        let c = g.add_vertex("C", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();
        g.add_edge(b, c, 2.0).unwrap();
        g.add_edge(a, c, 5.0).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_detour() {
        let (g, a, b, c) = triangle();
        let result = dijkstra(&g, a, Some(c)).unwrap();
        assert!(result.found);
        assert_eq!(result.path, vec![a, b, c]);

        // Distance to the target is 1 + 2, read out of the label table.
        let slot = result.visited.iter().position(|&v| v == c).unwrap();
        assert_eq!(result.distances[slot], 3.0);
    }

    #[test]
    fn test_dijkstra_self_loop() {
        let (g, a, _, _) = triangle();
        let result = dijkstra(&g, a, Some(a)).unwrap();
        assert!(result.found);
        assert_eq!(result.path, vec![a]);
        assert_eq!(result.distances, vec![0.0]);
    }

    #[test]
    fn test_dijkstra_unreachable_target() {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        let result = dijkstra(&g, a, Some(b)).unwrap();
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, vec![a]);
    }

    #[test]
    fn test_dijkstra_without_target_labels_everything() {
        let (g, a, _, _) = triangle();
        let result = dijkstra(&g, a, None).unwrap();
        assert!(!result.found);
        assert_eq!(result.visited.len(), 3);
        assert_eq!(result.distances.len(), 3);
    }

    #[test]
    fn test_dijkstra_deterministic_repeat() {
        let (g, a, _, c) = triangle();
        let first = dijkstra(&g, a, Some(c)).unwrap();
        let second = dijkstra(&g, a, Some(c)).unwrap();
        assert_eq!(first.visited, second.visited);
        assert_eq!(first.distances, second.distances);
    }

    fn open_grid() -> Graph {
        Graph::from_grid(&GridSpec {
            rows: 3,
            cols: 3,
            blocked: vec![],
            start: (0, 0),
            end: (2, 2),
        })
    }

    #[test]
    fn test_astar_requires_grid_map() {
        let (g, a, _, c) = triangle();
        assert_eq!(AStarSearch::new(&g, a, c).unwrap_err(), Error::NotGridMap);
    }

    #[test]
    fn test_astar_finds_target() {
        let g = open_grid();
        let (start, end) = (g.start().unwrap(), g.end().unwrap());
        let result = AStarSearch::new(&g, start, end).unwrap().run().unwrap();
        assert!(result.found);
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&end));
        // The diagonal is the shortest route across an open 3x3 grid.
        assert_eq!(result.path.len(), 3);
    }

    #[test]
    fn test_astar_self_loop_completes_immediately() {
        let g = open_grid();
        let start = g.start().unwrap();
        let mut search = AStarSearch::new(&g, start, start).unwrap();
        let step = search.advance().unwrap();
        assert!(step.is_complete());
        let result = step.into_result();
        assert!(result.found);
        assert_eq!(result.path, vec![start]);
        assert!(search.advance().is_none());
    }

    #[test]
    fn test_astar_expansion_frames_carry_costs() {
        let g = open_grid();
        let (start, end) = (g.start().unwrap(), g.end().unwrap());
        let mut search = AStarSearch::new(&g, start, end).unwrap();

        // First step selects the start vertex.
        let selection = search.advance().unwrap().into_result();
        assert_eq!(selection.current, Some(vec![start]));
        assert!(selection.checked.is_none());

        // Second step examines one neighbor edge.
        let expansion = search.advance().unwrap().into_result();
        assert_eq!(expansion.current, Some(vec![start]));
        let checked = expansion.checked.expect("expansion names a vertex");
        let details = expansion.details.expect("expansion carries g/h/f");
        assert!(g.adjacent(start).contains(&checked));
        assert!((details.f - (details.g + details.h)).abs() < 1e-9);
    }

    #[test]
    fn test_astar_unreachable_target_fails() {
        // The target cell is walled off in its corner.
        let g = Graph::from_grid(&GridSpec {
            rows: 3,
            cols: 3,
            blocked: vec![(1, 2), (2, 1), (1, 1)],
            start: (0, 0),
            end: (2, 2),
        });
        let (start, end) = (g.start().unwrap(), g.end().unwrap());
        let result = AStarSearch::new(&g, start, end).unwrap().run().unwrap();
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(result.open_set, Some(vec![]));
    }

    #[test]
    fn test_astar_is_an_iterator_of_steps() {
        let g = open_grid();
        let (start, end) = (g.start().unwrap(), g.end().unwrap());
        let steps: Vec<SearchStep> =
            AStarSearch::new(&g, start, end).unwrap().collect();
        assert!(steps.last().unwrap().is_complete());
        let progressions = steps.iter().filter(|s| !s.is_complete()).count();
        assert!(progressions > 0);
    }

    #[test]
    fn test_astar_unknown_endpoint() {
        let g = open_grid();
        let ghost = VertexId::new(404);
        assert_eq!(
            AStarSearch::new(&g, g.start().unwrap(), ghost).unwrap_err(),
            Error::UnknownVertex(ghost)
        );
    }
}
