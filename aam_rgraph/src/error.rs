//! Error types for resolution-graph construction, clique search and mapping
//! extraction.
//!
//! A missing common substructure is not an error: the search reports it as an
//! empty result. Everything here is raised at the molecule-pair boundary so a
//! batch caller can decide whether to skip the pair or abort the batch.

use std::time::Duration;

use aam_common::NodeId;
use thiserror::Error;

/// Error raised by a compatibility predicate.
pub type PredicateError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while computing one MCS.
#[derive(Debug, Error)]
pub enum McsError {
    // === Construction phase ===
    /// The compatibility predicate failed for an edge pair.
    #[error("Compatibility predicate failed for edge pair ({edge_a}, {edge_b}): {source}")]
    Construction {
        /// Edge index in graph A.
        edge_a: usize,
        /// Edge index in graph B.
        edge_b: usize,
        /// The predicate's own error.
        #[source]
        source: PredicateError,
    },

    /// Externally supplied nodes violate the resolution-graph invariants.
    #[error("Invalid resolution graph: {0}")]
    InvalidResolutionGraph(String),

    /// More resolution nodes than [`NodeId`] can name.
    #[error("Resolution graph has {nodes} nodes, more than a node id can address")]
    TooManyNodes {
        /// Number of nodes requested.
        nodes: usize,
    },

    // === Search phase ===
    /// The search exceeded its step or time budget before proving a maximum.
    #[error(
        "Search budget exceeded after {steps} steps ({elapsed:?}); best clique so far had {best_size} nodes"
    )]
    BudgetExceeded {
        /// Expansions performed.
        steps: u64,
        /// Wall-clock time spent.
        elapsed: Duration,
        /// Size of the best admitted clique at the time of abort.
        best_size: usize,
    },

    /// The search observed a cancellation request.
    #[error("Search cancelled after {steps} steps")]
    Cancelled {
        /// Expansions performed.
        steps: u64,
    },

    // === Extraction phase (internal invariant violations) ===
    /// A clique names a node that has no composite-list entries.
    #[error("Internal: clique references node {0} absent from the composite list")]
    UnknownNode(NodeId),

    /// Extraction produced fewer pairs than the clique requires.
    #[error("Internal: extraction inconsistency: {0}")]
    ExtractionInconsistency(String),

    // === Reaction mapping ===
    /// A non-empty mapping removed no atoms from the remaining molecules.
    #[error(
        "Failed to remove matched parts: {mapped} mapped atoms, educt still has {remaining} atoms"
    )]
    RemovalMismatch {
        /// Number of atom pairs in the mapping.
        mapped: usize,
        /// Atoms left in the educt.
        remaining: usize,
    },
}

impl McsError {
    /// Create an extraction inconsistency error.
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::ExtractionInconsistency(msg.into())
    }

    /// Create an invalid resolution graph error.
    pub fn invalid_graph(msg: impl Into<String>) -> Self {
        Self::InvalidResolutionGraph(msg.into())
    }

    /// True for errors a caller may answer by retrying with a stricter
    /// predicate or a larger budget.
    pub const fn is_budget(&self) -> bool {
        matches!(self, Self::BudgetExceeded { .. } | Self::Cancelled { .. })
    }

    /// True for errors that indicate a bug in the builder or the search rather
    /// than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::UnknownNode(_) | Self::ExtractionInconsistency(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_budget_errors() {
        let err = McsError::BudgetExceeded {
            steps: 10,
            elapsed: Duration::from_millis(1),
            best_size: 3,
        };
        assert!(err.is_budget());
        assert!(!err.is_internal());
        assert!(err.to_string().contains("10 steps"));
    }

    #[test]
    fn classifies_internal_errors() {
        assert!(McsError::UnknownNode(NodeId::new(4)).is_internal());
        assert!(McsError::inconsistent("empty").is_internal());
        assert!(!McsError::invalid_graph("asymmetric").is_internal());
    }

    #[test]
    fn construction_keeps_source() {
        let err = McsError::Construction {
            edge_a: 1,
            edge_b: 2,
            source: "boom".into(),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("boom"));
    }
}
