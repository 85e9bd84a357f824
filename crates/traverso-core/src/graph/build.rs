//! Builders realizing the loader contract.
//!
//! The file-format parsing itself lives outside the core; these builders
//! accept the already-decoded records and produce a structurally sound
//! [`Graph`].

use super::store::Graph;
use super::vertex::Arc;
use traverso_common::types::{Point, VertexId};
use traverso_common::utils::error::Result;

/// A decoded vertex record from an edge-list description.
#[derive(Debug, Clone)]
pub struct VertexRecord {
    /// Unique vertex id.
    pub id: VertexId,
    /// Display label.
    pub label: String,
    /// Horizontal schematic position.
    pub x: f64,
    /// Vertical schematic position.
    pub y: f64,
}

/// A decoded edge record from an edge-list description.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRecord {
    /// First endpoint.
    pub origin: VertexId,
    /// Second endpoint.
    pub destination: VertexId,
    /// Edge weight.
    pub weight: f64,
}

/// Description of a rectangular obstacle grid.
///
/// Cell coordinates are `(row, col)`, zero-based. Blocked cells produce no
/// vertex; surviving orthogonal and diagonal neighbors are connected with
/// uniform weight 1.
#[derive(Debug, Clone, Default)]
pub struct GridSpec {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Cells with no vertex.
    pub blocked: Vec<(usize, usize)>,
    /// Cell of the suggested search origin.
    pub start: (usize, usize),
    /// Cell of the suggested search target.
    pub end: (usize, usize),
}

/// Scale between grid cells and schematic (drawing) coordinates.
const CELL_SCREEN: f64 = 64.0;
/// Scale between grid cells and metric coordinates.
const CELL_REAL: f64 = 10.0;

impl Graph {
    /// Builds a graph from vertex and edge records.
    ///
    /// When `directed` is false, the symmetric reverse arc of every edge is
    /// materialized here - the algorithms never infer it. Vertices end up in
    /// precedence order.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownVertex`](traverso_common::Error::UnknownVertex) if an
    /// edge references an id with no vertex record.
    pub fn from_edge_list(
        vertices: &[VertexRecord],
        edges: &[EdgeRecord],
        directed: bool,
        weighted: bool,
    ) -> Result<Self> {
        let mut graph = Graph::new(directed, weighted);
        for record in vertices {
            let position = Point::new(record.x, record.y);
            graph.insert_vertex(record.id, record.label.as_str(), position, position);
        }
        for edge in edges {
            graph.add_edge(edge.origin, edge.destination, edge.weight)?;
        }
        graph.sort_vertices();
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            directed,
            weighted,
            "graph built from edge list"
        );
        Ok(graph)
    }

    /// Builds an unweighted, undirected graph from an obstacle grid with
    /// 8-connectivity between surviving cells.
    ///
    /// Cell `(row, col)` is named `"row+1,col+1"`, placed at
    /// `(col·64, row·64)` on screen and `(col·10, row·10)` in metric space.
    /// The result has `is_grid_map() == true` and carries the start/end
    /// cells as vertex references when those cells survived.
    #[must_use]
    pub fn from_grid(spec: &GridSpec) -> Self {
        let mut graph = Graph::new(false, false);
        let mut cells: Vec<Option<VertexId>> = vec![None; spec.rows * spec.cols];

        let index = |row: usize, col: usize| col + row * spec.cols;
        for row in 0..spec.rows {
            for col in 0..spec.cols {
                if spec.blocked.contains(&(row, col)) {
                    continue;
                }
                let name = format!("{},{}", row + 1, col + 1);
                #[allow(clippy::cast_precision_loss)]
                let (x, y) = (col as f64, row as f64);
                let id = graph.add_vertex(
                    name,
                    Point::new(x * CELL_SCREEN, y * CELL_SCREEN),
                    Point::new(x * CELL_REAL, y * CELL_REAL),
                );
                cells[index(row, col)] = Some(id);
            }
        }

        // Arcs come in symmetric pairs because the neighbor relation is
        // symmetric and every surviving cell emits its own side.
        for row in 0..spec.rows {
            for col in 0..spec.cols {
                let Some(origin) = cells[index(row, col)] else {
                    continue;
                };
                for neighbor in grid_neighbors(&cells, spec, row, col) {
                    graph
                        .insert_arc(Arc::unweighted(origin, neighbor))
                        .expect("grid cells are always inserted before arcs");
                }
            }
        }

        graph.set_grid_map(true);
        let at = |(row, col): (usize, usize)| {
            if row < spec.rows && col < spec.cols {
                cells[index(row, col)]
            } else {
                None
            }
        };
        graph.set_endpoints(at(spec.start), at(spec.end));
        tracing::debug!(
            rows = spec.rows,
            cols = spec.cols,
            vertices = graph.vertex_count(),
            "graph built from grid"
        );
        graph
    }
}

/// Surviving 8-neighbors of a cell, row-major scan order.
fn grid_neighbors(
    cells: &[Option<VertexId>],
    spec: &GridSpec,
    row: usize,
    col: usize,
) -> Vec<VertexId> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    OFFSETS
        .iter()
        .filter_map(|&(d_row, d_col)| {
            let n_row = row.checked_add_signed(d_row)?;
            let n_col = col.checked_add_signed(d_col)?;
            if n_row >= spec.rows || n_col >= spec.cols {
                return None;
            }
            cells[n_col + n_row * spec.cols]
        })
        .collect()
}
