//! Breakpoint graph construction and phylogeny-weighted adjacency inference.
//!
//! Nodes are signed block extremities: for consecutive blocks `left, right` of a
//! reference chromosome the graph links `-left` with `right`.

pub mod adjacency;
pub mod debug;
pub mod graph;
pub mod inferer;
pub mod matching;
pub mod weighted;

pub use adjacency::{Adjacencies, Connection};
pub use debug::DebugSink;
pub use graph::{BreakpointGraph, GraphEdge};
pub use inferer::AdjacencyInferer;
pub use weighted::WeightedGraph;

use std::collections::BTreeMap;
use std::fmt;

/// Per-genome adjacency state at one extremity: the neighboring extremity, or
/// `None` for the void state (no adjacency in that genome).
pub type AdjacencyStates = BTreeMap<String, Option<i64>>;

/// Scores a table of per-genome adjacency states. Lower scores are more likely.
///
/// Implementations must be pure: the same table always gives the same score.
pub trait AdjacencyScorer: Sync {
    fn score(&self, states: &AdjacencyStates) -> anyhow::Result<f64>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum BreakpointError {
    /// The scoring oracle failed (or returned a non-finite score) for the
    /// hypothesis "the target links `node` and `neighbor`"
    Oracle {
        node: i64,
        neighbor: i64,
        message: String,
    },
}

impl fmt::Display for BreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointError::Oracle {
                node,
                neighbor,
                message,
            } => write!(
                f,
                "Can't score adjacency {:+} -- {:+}: {}",
                node, neighbor, message
            ),
        }
    }
}

impl std::error::Error for BreakpointError {}
