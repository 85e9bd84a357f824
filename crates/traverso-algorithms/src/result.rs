//! Search snapshots.
//!
//! Every algorithm - synchronous or step-wise - reports its progress through
//! the same [`SearchResult`] shape, so the renderer can treat a final answer
//! and an intermediate animation frame uniformly.

use traverso_common::types::VertexId;

/// Distance sentinel for "not computed / unreachable".
pub const UNREACHABLE: f64 = -1.0;

/// The g/h/f cost triple of a heuristic-search expansion, exposed for
/// display next to the edge being checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostDetails {
    /// Accumulated distance from the start.
    pub g: f64,
    /// Heuristic distance to the target.
    pub h: f64,
    /// Combined estimate, `g + h`.
    pub f: f64,
}

/// A snapshot of an algorithm's progress.
///
/// Used both as the final result of a synchronous run and as one
/// intermediate frame of a step-wise run. Snapshots are created fresh per
/// invocation or per step and never mutated by the consumer.
///
/// `visited` is in discovery order - the order is a first-class output, not
/// incidental. `distances` parallels `visited` (or, for the shortest-path
/// table variant, the algorithm's label table) with [`UNREACHABLE`] for
/// values that were never computed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The vertex the search started from.
    pub initial: VertexId,
    /// The vertex searched for, if any.
    pub target: Option<VertexId>,
    /// Vertices in discovery order.
    pub visited: Vec<VertexId>,
    /// Realized path from `initial` to `target`; empty if not found or not
    /// applicable.
    pub path: Vec<VertexId>,
    /// Whether the target was reached (always false for full traversals).
    pub found: bool,
    /// Distance labels, [`UNREACHABLE`] sentinel where not computed.
    pub distances: Vec<f64>,
    /// Display name of the producing algorithm.
    pub algorithm: &'static str,
    /// Open/candidate set of the running step, when the algorithm has one.
    pub open_set: Option<Vec<VertexId>>,
    /// Vertices the running step is focused on.
    pub current: Option<Vec<VertexId>>,
    /// The single vertex being examined by the running step.
    pub checked: Option<VertexId>,
    /// Algorithm-specific cost payload for the examined vertex.
    pub details: Option<CostDetails>,
}

impl SearchResult {
    /// An empty, not-found result. Algorithms build their snapshots from
    /// this with struct update syntax.
    #[must_use]
    pub fn blank(algorithm: &'static str, initial: VertexId, target: Option<VertexId>) -> Self {
        Self {
            initial,
            target,
            visited: Vec::new(),
            path: Vec::new(),
            found: false,
            distances: Vec::new(),
            algorithm,
            open_set: None,
            current: None,
            checked: None,
            details: None,
        }
    }

    /// A vector of [`UNREACHABLE`] sentinels parallel to `len` entries.
    #[must_use]
    pub fn no_distances(len: usize) -> Vec<f64> {
        vec![UNREACHABLE; len]
    }
}

/// One pulled unit of a step-wise search.
///
/// The step-wise algorithms are lazy, finite, non-restartable sequences of
/// snapshots: the driver pulls one step at a time and each pull performs one
/// unit of algorithmic progress. `Complete` carries the final result; no
/// further steps follow it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStep {
    /// An intermediate animation frame; more steps follow.
    Progress(SearchResult),
    /// The final result; the sequence is exhausted.
    Complete(SearchResult),
}

impl SearchStep {
    /// The snapshot carried by this step.
    #[must_use]
    pub fn result(&self) -> &SearchResult {
        match self {
            Self::Progress(result) | Self::Complete(result) => result,
        }
    }

    /// Consumes the step, returning its snapshot.
    #[must_use]
    pub fn into_result(self) -> SearchResult {
        match self {
            Self::Progress(result) | Self::Complete(result) => result,
        }
    }

    /// Whether this step ends the sequence.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}
