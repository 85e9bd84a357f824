//! Error types for Traverso.

use crate::types::VertexId;
use thiserror::Error;

/// Convenience alias used by every fallible Traverso operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by graph construction, transforms, and searches.
///
/// Unreachable targets are *not* errors; searches report those as a normal
/// `found = false` result. Errors are reserved for precondition violations
/// and data-integrity faults, and everything fails synchronously to the
/// immediate caller - nothing retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An edge or search referenced a vertex id the graph does not contain.
    #[error("vertex {0} does not exist in the graph")]
    UnknownVertex(VertexId),

    /// A vertex lookup by display name found nothing.
    #[error("no vertex is named {0:?}")]
    UnknownName(String),

    /// The tour heuristic requires a connected graph.
    #[error("graph is not connected")]
    Disconnected,

    /// The tour heuristic requires an undirected graph.
    #[error("operation is not defined for directed graphs")]
    DirectedUnsupported,

    /// The tour heuristic requires edge weights.
    #[error("operation requires a weighted graph")]
    UnweightedUnsupported,

    /// Heuristic search requires metric vertex positions (a grid map).
    #[error("heuristic search requires a grid map graph")]
    NotGridMap,
}
