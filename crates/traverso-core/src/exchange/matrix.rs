//! Dense adjacency-matrix export.

use crate::graph::Graph;

/// Matrix sentinel for "no edge between this ordered pair".
pub const NO_EDGE: f64 = -1.0;

impl Graph {
    /// Builds the dense V×V adjacency matrix, rows and columns in arena
    /// order.
    ///
    /// Cell `(i, j)` holds the weight of the first outgoing arc of vertex
    /// `i` that lands on vertex `j`, or [`NO_EDGE`] when there is none. The
    /// diagonal is always [`NO_EDGE`] for simple graphs.
    #[must_use]
    pub fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        self.vertices()
            .iter()
            .map(|v1| {
                self.vertices()
                    .iter()
                    .map(|v2| {
                        v1.arcs()
                            .iter()
                            .find(|arc| arc.destination == v2.id())
                            .map_or(NO_EDGE, |arc| arc.weight)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traverso_common::types::Point;

    #[test]
    fn test_matrix_symmetric_for_undirected() {
        let mut g = Graph::new(false, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        let c = g.add_vertex("C", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 2.0).unwrap();
        g.add_edge(b, c, 3.0).unwrap();

        let m = g.adjacency_matrix();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[i][j], m[j][i]);
            }
        }
        assert_eq!(m[0][1], 2.0);
        assert_eq!(m[0][2], NO_EDGE);
    }

    #[test]
    fn test_matrix_diagonal_is_no_edge() {
        let mut g = Graph::new(true, false);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 1.0).unwrap();

        let m = g.adjacency_matrix();
        assert_eq!(m[0][0], NO_EDGE);
        assert_eq!(m[1][1], NO_EDGE);
    }

    #[test]
    fn test_matrix_directed_is_one_sided() {
        let mut g = Graph::new(true, true);
        let a = g.add_vertex("A", Point::ZERO, Point::ZERO);
        let b = g.add_vertex("B", Point::ZERO, Point::ZERO);
        g.add_edge(a, b, 4.0).unwrap();

        let m = g.adjacency_matrix();
        assert_eq!(m[0][1], 4.0);
        assert_eq!(m[1][0], NO_EDGE);
    }

    #[test]
    fn test_empty_graph_matrix() {
        let g = Graph::new(false, false);
        assert!(g.adjacency_matrix().is_empty());
    }
}
