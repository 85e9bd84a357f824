//! # traverso-algorithms
//!
//! The algorithm layer of Traverso: traversal, shortest-path search, the
//! travelling-salesman heuristic, and the structural analyses, all reporting
//! progress through a shared [`SearchResult`] snapshot shape.
//!
//! Two execution shapes exist. The synchronous algorithms ([`dfs`], [`bfs`],
//! [`dijkstra`], [`is_connected`], [`greedy_coloring`], [`contains_cycle`],
//! [`is_planar`]) run to completion in one call. The step-wise algorithms
//! ([`AStarSearch`], [`TourSearch`]) are lazy, finite, non-restartable
//! sequences of snapshots pulled one unit of progress at a time - a
//! control-flow device for incremental rendering, not concurrency. The graph
//! is read-only to all of them.
//!
//! ## Modules
//!
//! - [`result`] - [`SearchResult`] snapshots and the step protocol
//! - [`traversal`] - Depth-first and breadth-first search
//! - [`shortest_path`] - Dijkstra and the step-wise A*
//! - [`tour`] - Cheapest-insertion travelling-salesman heuristic
//! - [`structure`] - Connectivity, coloring, cycle and planarity checks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod result;
pub mod shortest_path;
pub mod structure;
pub mod tour;
pub mod traversal;

pub use result::{CostDetails, SearchResult, SearchStep, UNREACHABLE};
pub use shortest_path::{AStarSearch, dijkstra};
pub use structure::{ColoringResult, contains_cycle, greedy_coloring, is_connected, is_planar};
pub use tour::TourSearch;
pub use traversal::{bfs, bfs_with_visited, dfs, dfs_with_visited};
