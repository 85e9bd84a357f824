//! Structural analyses: connectivity, coloring, cycle and planarity checks.
//!
//! All of these lean on the traversal engine or on plain degree/edge
//! counting; none of them mutate the graph.

use crate::traversal::dfs;
use traverso_common::types::VertexId;
use traverso_common::utils::hash::{FxHashMap, FxHashSet};
use traverso_core::Graph;

/// Whether every vertex reaches every other vertex.
///
/// Checked the simple way: a full (target-less) DFS from every root must
/// visit the whole vertex set. Quadratic, no shortcuts. The empty graph is
/// vacuously connected.
#[must_use]
pub fn is_connected(graph: &Graph) -> bool {
    graph.vertices().iter().all(|root| {
        dfs(graph, root.id(), None)
            .is_ok_and(|result| result.visited.len() == graph.vertex_count())
    })
}

/// A greedy vertex coloring.
#[derive(Debug, Clone)]
pub struct ColoringResult {
    /// Color index assigned to each vertex.
    pub colors: FxHashMap<VertexId, u32>,
    /// Chromatic-number estimate: one past the highest color used.
    pub color_count: u32,
}

/// Colors the graph greedily.
///
/// Vertices are processed in ascending total-degree order (outgoing plus
/// incoming edges, so directed graphs are treated uniformly); each one takes
/// the smallest color not already used by any neighbor in the undirected
/// sense. Adjacent vertices never share a color; the number of colors is an
/// upper bound on the chromatic number, not the optimum.
#[must_use]
pub fn greedy_coloring(graph: &Graph) -> ColoringResult {
    let mut order = graph.vertex_ids();
    order.sort_by_key(|&id| graph.total_degree(id));

    let mut colors: FxHashMap<VertexId, u32> = FxHashMap::default();
    for id in order {
        let neighbor_colors: FxHashSet<u32> = graph
            .linked(id)
            .into_iter()
            .filter_map(|neighbor| colors.get(&neighbor).copied())
            .collect();
        let mut color = 0;
        while neighbor_colors.contains(&color) {
            color += 1;
        }
        colors.insert(id, color);
    }

    let color_count = colors.values().max().map_or(0, |&highest| highest + 1);
    ColoringResult {
        colors,
        color_count,
    }
}

/// Whether some cycle of exactly `length` edges exists.
///
/// From every vertex, a depth-first search with an explicit stack grows
/// simple paths out of the root; a cycle is reported as soon as a path of
/// exactly `length` edges returns to its root, and paths are pruned once
/// they would exceed `length`. For `length = 3` this is triangle detection,
/// which is all the planarity heuristic needs. Note that the mirrored arc
/// pair of an undirected edge counts as a cycle of length 2.
#[must_use]
pub fn contains_cycle(graph: &Graph, length: usize) -> bool {
    if length == 0 {
        return false;
    }
    graph.vertices().iter().any(|root| {
        let root = root.id();
        // Each stack entry is a simple path out of the root.
        let mut stack: Vec<Vec<VertexId>> = vec![vec![root]];
        while let Some(path) = stack.pop() {
            let walked = path.len() - 1;
            let tail = path[walked];
            for adjacent in graph.adjacent(tail) {
                if adjacent == root && walked + 1 == length {
                    return true;
                }
                if walked + 1 < length && !path.contains(&adjacent) {
                    let mut extended = path.clone();
                    extended.push(adjacent);
                    stack.push(extended);
                }
            }
        }
        false
    })
}

/// Planarity heuristic.
///
/// Trivially true up to four vertices; beyond that the necessary edge-count
/// conditions from Euler's formula are applied: `E <= 3V - 6`, tightened to
/// `E <= 2V - 4` when the graph has no 3-cycle. This is an approximation -
/// a graph passing the bound may still be non-planar - and is kept as such.
#[must_use]
pub fn is_planar(graph: &Graph) -> bool {
    let v = graph.vertex_count();
    if v <= 4 {
        return true;
    }
    let e = graph.edge_count();
    if contains_cycle(graph, 3) {
        e <= 3 * v - 6
    } else {
        e <= 2 * v - 4
    }
}
