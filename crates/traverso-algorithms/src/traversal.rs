//! Graph traversal: depth-first and breadth-first search.
//!
//! Both searches enumerate neighbors in the vertex precedence order, so
//! re-running either on an unmodified graph reproduces the same visit order.
//! They are also the correctness primitive the structural analyses build on:
//! a target-less run visits exactly the reachable component of its start.

use crate::result::SearchResult;
use std::collections::VecDeque;
use traverso_common::types::VertexId;
use traverso_common::utils::error::{Error, Result};
use traverso_common::utils::hash::FxHashSet;
use traverso_core::Graph;

const DFS: &str = "DFS";
const BFS: &str = "BFS";

/// Discovery-ordered visit list with a set alongside for O(1) membership.
struct VisitList {
    order: Vec<VertexId>,
    seen: FxHashSet<VertexId>,
}

impl VisitList {
    fn seeded(order: Vec<VertexId>) -> Self {
        let seen = order.iter().copied().collect();
        Self { order, seen }
    }

    /// Records a vertex; true if it was new.
    fn insert(&mut self, vertex: VertexId) -> bool {
        if self.seen.insert(vertex) {
            self.order.push(vertex);
            true
        } else {
            false
        }
    }
}

/// Depth-first search from `start`.
///
/// Recursive visit: at each vertex the unvisited neighbors are entered
/// immediately, one after the other, in precedence order. When the target is
/// found, success propagates back up the recursion and each level prepends
/// its vertex onto the path. With `target` omitted the whole reachable
/// component is visited and `found` stays false.
///
/// # Errors
///
/// [`Error::UnknownVertex`] if `start` is not in the graph.
pub fn dfs(graph: &Graph, start: VertexId, target: Option<VertexId>) -> Result<SearchResult> {
    dfs_with_visited(graph, start, target, vec![start])
}

/// [`dfs`] with a pre-seeded visited list.
///
/// The caller drives a whole-graph sweep across disconnected components by
/// re-invoking the search with the accumulated list; the list must already
/// contain `start`.
///
/// # Errors
///
/// [`Error::UnknownVertex`] if `start` is not in the graph.
pub fn dfs_with_visited(
    graph: &Graph,
    start: VertexId,
    target: Option<VertexId>,
    visited: Vec<VertexId>,
) -> Result<SearchResult> {
    graph.vertex(start).ok_or(Error::UnknownVertex(start))?;
    let mut visits = VisitList::seeded(visited);
    let mut path = Vec::new();
    let found = dfs_visit(graph, start, target, &mut visits, &mut path);
    Ok(SearchResult {
        found,
        distances: SearchResult::no_distances(visits.order.len()),
        visited: visits.order,
        path,
        ..SearchResult::blank(DFS, start, target)
    })
}

fn dfs_visit(
    graph: &Graph,
    current: VertexId,
    target: Option<VertexId>,
    visits: &mut VisitList,
    path: &mut Vec<VertexId>,
) -> bool {
    let mut found = Some(current) == target;
    if !found {
        for adjacent in graph.adjacent(current) {
            if visits.insert(adjacent) && dfs_visit(graph, adjacent, target, visits, path) {
                found = true;
                break;
            }
        }
    }
    if found {
        path.insert(0, current);
    }
    found
}

/// Breadth-first search from `start`.
///
/// Maintains a FIFO of parent-chain nodes so the realized path can be
/// reconstructed without a global per-vertex parent map. All unvisited
/// neighbors of the frontier vertex are enqueued (in precedence order)
/// before the next frontier vertex is dequeued - strict level order. The
/// search stops as soon as the target is first *enqueued*, not dequeued,
/// avoiding an extra level of exploration.
///
/// # Errors
///
/// [`Error::UnknownVertex`] if `start` is not in the graph.
pub fn bfs(graph: &Graph, start: VertexId, target: Option<VertexId>) -> Result<SearchResult> {
    bfs_with_visited(graph, start, target, vec![start])
}

/// [`bfs`] with a pre-seeded visited list; see [`dfs_with_visited`].
///
/// # Errors
///
/// [`Error::UnknownVertex`] if `start` is not in the graph.
pub fn bfs_with_visited(
    graph: &Graph,
    start: VertexId,
    target: Option<VertexId>,
    visited: Vec<VertexId>,
) -> Result<SearchResult> {
    graph.vertex(start).ok_or(Error::UnknownVertex(start))?;
    let mut visits = VisitList::seeded(visited);

    // Parent-chain arena: (vertex, parent slot). Slots index this arena.
    let mut chain: Vec<(VertexId, Option<usize>)> = vec![(start, None)];
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    let mut path = Vec::new();
    let mut found = Some(start) == target;
    if found {
        path.push(start);
    }

    'level: while !found {
        let Some(&head) = queue.front() else {
            break;
        };
        let (vertex, _) = chain[head];
        for adjacent in graph.adjacent(vertex) {
            if !visits.insert(adjacent) {
                continue;
            }
            if Some(adjacent) == target {
                found = true;
                path = chain_to_root(&chain, head);
                path.push(adjacent);
                break 'level;
            }
            chain.push((adjacent, Some(head)));
            queue.push_back(chain.len() - 1);
        }
        queue.pop_front();
    }

    Ok(SearchResult {
        found,
        distances: SearchResult::no_distances(visits.order.len()),
        visited: visits.order,
        path,
        ..SearchResult::blank(BFS, start, target)
    })
}

/// Walks parent links from a chain node back to the root, returning the
/// root-first vertex sequence.
fn chain_to_root(chain: &[(VertexId, Option<usize>)], node: usize) -> Vec<VertexId> {
    let mut slot = node;
    let mut path = vec![chain[slot].0];
    while let Some(parent) = chain[slot].1 {
        slot = parent;
        path.insert(0, chain[slot].0);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use traverso_common::types::Point;

    /// The weighted triangle with a detour:
    ///
    ///   A -1- B -2- C
    ///    \---5----/
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

    /// Two levels fanning out of a root, plus one vertex nothing reaches.
    fn two_level() -> (Graph, Vec<VertexId>) {
        let mut g = Graph::new(false, false);
        let ids = ["r", "a", "b", "x", "y", "lone"]
            .iter()
            .map(|name| g.add_vertex(*name, Point::ZERO, Point::ZERO))
            .collect::<Vec<_>>();
        g.add_edge(ids[0], ids[1], 1.0).unwrap();
        g.add_edge(ids[0], ids[2], 1.0).unwrap();
        g.add_edge(ids[1], ids[3], 1.0).unwrap();
        g.add_edge(ids[2], ids[4], 1.0).unwrap();
        (g, ids)
    }

    #[test]
    fn test_dfs_visits_whole_component_without_target() {
        let (g, a, _, _) = triangle();
        let result = dfs(&g, a, None).unwrap();
        assert_eq!(result.visited.len(), 3);
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(result.distances, vec![-1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_dfs_path_prepends_up_the_recursion() {
        let (g, a, b, c) = triangle();
        let result = dfs(&g, a, Some(c)).unwrap();
        assert!(result.found);
        // DFS descends A -> B -> C before trying the direct A-C arc.
        assert_eq!(result.path, vec![a, b, c]);
        assert_eq!(result.visited, vec![a, b, c]);
    }

    #[test]
    fn test_dfs_self_loop() {
        let (g, a, _, _) = triangle();
        let result = dfs(&g, a, Some(a)).unwrap();
        assert!(result.found);
        assert_eq!(result.visited, vec![a]);
        assert_eq!(result.path, vec![a]);
    }

    #[test]
    fn test_dfs_deterministic_repeat() {
        let (g, ids) = two_level();
        let first = dfs(&g, ids[0], None).unwrap();
        let second = dfs(&g, ids[0], None).unwrap();
        assert_eq!(first.visited, second.visited);
    }

    #[test]
    fn test_dfs_unknown_start() {
        let (g, _, _, _) = triangle();
        let ghost = VertexId::new(99);
        assert_eq!(
            dfs(&g, ghost, None).unwrap_err(),
            Error::UnknownVertex(ghost)
        );
    }

    #[test]
    fn test_dfs_seeded_visited_skips_components_already_swept() {
        let (g, ids) = two_level();
        let first = dfs(&g, ids[0], None).unwrap();
        assert_eq!(first.visited.len(), 5);

        // Continue the sweep from the leftover vertex.
        let mut seed = first.visited.clone();
        seed.push(ids[5]);
        let second = dfs_with_visited(&g, ids[5], None, seed).unwrap();
        assert_eq!(second.visited.len(), 6);
    }

    #[test]
    fn test_bfs_level_order() {
        let (g, ids) = two_level();
        let result = bfs(&g, ids[0], None).unwrap();
        // Root, then both children (precedence order), then grandchildren.
        assert_eq!(
            result.visited,
            vec![ids[0], ids[1], ids[2], ids[3], ids[4]]
        );
        assert!(!result.found);
    }

    #[test]
    fn test_bfs_path_via_parent_chain() {
        let (g, ids) = two_level();
        let result = bfs(&g, ids[0], Some(ids[4])).unwrap();
        assert!(result.found);
        assert_eq!(result.path, vec![ids[0], ids[2], ids[4]]);
    }

    #[test]
    fn test_bfs_stops_when_target_is_enqueued() {
        let (g, ids) = two_level();
        let result = bfs(&g, ids[0], Some(ids[2])).unwrap();
        assert!(result.found);
        // "b" is discovered while expanding the root; the second level is
        // never explored.
        assert_eq!(result.visited, vec![ids[0], ids[1], ids[2]]);
        assert_eq!(result.path, vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_bfs_unreachable_target() {
        let (g, ids) = two_level();
        let result = bfs(&g, ids[5], Some(ids[0])).unwrap();
        assert!(!result.found);
        assert_eq!(result.visited, vec![ids[5]]);
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_bfs_self_loop() {
        let (g, a, _, _) = triangle();
        let result = bfs(&g, a, Some(a)).unwrap();
        assert!(result.found);
        assert_eq!(result.visited, vec![a]);
        assert_eq!(result.path, vec![a]);
    }

    #[test]
    fn test_bfs_and_dfs_cover_the_same_component() {
        let (g, ids) = two_level();
        let by_depth = dfs(&g, ids[1], None).unwrap();
        let by_breadth = bfs(&g, ids[1], None).unwrap();
        assert_eq!(by_depth.visited.len(), by_breadth.visited.len());
    }
}
