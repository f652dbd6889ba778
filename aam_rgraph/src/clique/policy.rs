//! Caller-supplied solution filtering and ordering.
//!
//! The search itself only maximises clique size. A [`SolutionPolicy`] can
//! veto cliques as they are found and order the surviving equal-size cliques
//! once the search finishes. It never changes which size is maximal among the
//! admitted cliques.

use std::cmp::Ordering;

use aam_common::NodeId;

use crate::builder::ResolutionGraph;

/// Filters and orders maximum cliques.
pub trait SolutionPolicy: Send + Sync {
    /// Whether `clique` may be recorded at all.
    fn admit(&self, _graph: &ResolutionGraph, _clique: &[NodeId]) -> bool {
        true
    }

    /// Order of two equal-size cliques; `Less` sorts first.
    fn compare(&self, _graph: &ResolutionGraph, _a: &[NodeId], _b: &[NodeId]) -> Ordering {
        Ordering::Equal
    }
}

/// Admits everything and preserves discovery order.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl SolutionPolicy for AcceptAll {}

/// Orders cliques by a score, highest first. Ties keep discovery order.
#[derive(Clone, Copy, Debug)]
pub struct ScoreFn<F> {
    score: F,
}

impl<F> ScoreFn<F>
where
    F: Fn(&ResolutionGraph, &[NodeId]) -> i64 + Send + Sync,
{
    /// Wrap a scoring closure.
    pub const fn new(score: F) -> Self {
        Self { score }
    }
}

impl<F> SolutionPolicy for ScoreFn<F>
where
    F: Fn(&ResolutionGraph, &[NodeId]) -> i64 + Send + Sync,
{
    fn compare(&self, graph: &ResolutionGraph, a: &[NodeId], b: &[NodeId]) -> Ordering {
        (self.score)(graph, b).cmp(&(self.score)(graph, a))
    }
}

/// Admits only cliques the predicate accepts.
#[derive(Clone, Copy, Debug)]
pub struct Filter<F> {
    accept: F,
}

impl<F> Filter<F>
where
    F: Fn(&ResolutionGraph, &[NodeId]) -> bool + Send + Sync,
{
    /// Wrap a predicate.
    pub const fn new(accept: F) -> Self {
        Self { accept }
    }
}

impl<F> SolutionPolicy for Filter<F>
where
    F: Fn(&ResolutionGraph, &[NodeId]) -> bool + Send + Sync,
{
    fn admit(&self, graph: &ResolutionGraph, clique: &[NodeId]) -> bool {
        (self.accept)(graph, clique)
    }
}
