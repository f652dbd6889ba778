//! Maximum clique search over a resolution graph.
//!
//! A clique is a set of nodes no two of which forbid each other. The search
//! is an include/exclude branch and bound: at every level the lowest-numbered
//! candidate is either taken (and its forbidden set removed from the
//! remaining candidates) or dropped for the rest of that level. Excludes are
//! handled by looping, so recursion depth never exceeds the clique size.
//!
//! The bound for a partial clique is its size plus the smallest of
//! - the number of nodes still allowed,
//! - the number of distinct A edges among them,
//! - the number of distinct B edges among them,
//!
//! since a clique never uses an edge of either graph twice.

mod budget;
mod policy;

use std::time::Duration;

use aam_common::{Config, Connectivity, NodeId};
use fixedbitset::FixedBitSet;
use tracing::{info, trace, warn};

pub use self::budget::CancellationToken;
pub use self::policy::{AcceptAll, Filter, ScoreFn, SolutionPolicy};

use self::budget::Budget;
use crate::builder::ResolutionGraph;
use crate::error::McsError;
use crate::profiling::Timer;

/// A set of pairwise non-forbidden nodes, sorted ascending.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clique {
    members: Vec<NodeId>,
}

impl Clique {
    /// Creates a clique from arbitrary-order members.
    pub fn new(mut members: Vec<NodeId>) -> Self {
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    /// Members in ascending order.
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of members, i.e. matched edge pairs.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True for the empty clique.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True if `node` is a member.
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.binary_search(&node).is_ok()
    }

    /// Iterate over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }
}

impl From<Vec<NodeId>> for Clique {
    fn from(members: Vec<NodeId>) -> Self {
        Self::new(members)
    }
}

/// How a finished search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The whole search space was explored; the result is the true maximum.
    Proven,
    /// A clique as large as the theoretical maximum was found and the search
    /// stopped early.
    TargetReached,
}

/// Result of a clique search.
#[derive(Clone, Debug)]
pub struct CliqueSearch {
    cliques: Vec<Clique>,
    size: usize,
    steps: u64,
    elapsed: Duration,
    status: SearchStatus,
}

impl CliqueSearch {
    /// Maximum cliques in policy order. Empty if no clique was admitted.
    pub fn cliques(&self) -> &[Clique] {
        &self.cliques
    }

    /// Consume the result, keeping the cliques.
    pub fn into_cliques(self) -> Vec<Clique> {
        self.cliques
    }

    /// The first clique in policy order.
    pub fn best(&self) -> Option<&Clique> {
        self.cliques.first()
    }

    /// Size shared by every returned clique; zero if none.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Expansions performed.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Wall-clock time spent searching.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How the search ended.
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// True if the search space was fully explored.
    pub fn is_proven(&self) -> bool {
        self.status == SearchStatus::Proven
    }
}

/// Configured clique search over one resolution graph.
///
/// ```
/// use aam_common::{Config, ETHANOL};
/// use aam_rgraph::{CliqueEngine, ExactMatch, ResolutionGraph};
///
/// let graph = ResolutionGraph::build(&*ETHANOL, &*ETHANOL, &ExactMatch).unwrap();
/// let config = Config::default();
/// let search = CliqueEngine::new(&graph, &config).run().unwrap();
/// assert_eq!(search.size(), 2);
/// ```
pub struct CliqueEngine<'a> {
    graph: &'a ResolutionGraph,
    config: &'a Config,
    policy: &'a dyn SolutionPolicy,
    token: Option<&'a CancellationToken>,
}

impl<'a> CliqueEngine<'a> {
    /// A search admitting every clique in discovery order.
    pub fn new(graph: &'a ResolutionGraph, config: &'a Config) -> Self {
        Self {
            graph,
            config,
            policy: &AcceptAll,
            token: None,
        }
    }

    /// Use `policy` to filter and order cliques.
    pub fn with_policy(mut self, policy: &'a dyn SolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stop with [`McsError::Cancelled`] once `token` is cancelled.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Run the search.
    ///
    /// # Errors
    ///
    /// [`McsError::BudgetExceeded`] if the step or time budget runs out and
    /// [`McsError::Cancelled`] if the token is cancelled.
    pub fn run(&self) -> Result<CliqueSearch, McsError> {
        let _timer = Timer::new("clique::search");
        let graph = self.graph;
        info!(
            "Starting clique search: {} nodes, target {}, mode {:?}, {:?}",
            graph.len(),
            graph.theoretical_max(),
            self.config.mode,
            self.config.connectivity
        );

        let mut search = Search::new(graph, self.config, self.policy, self.token);
        let mut allowed = FixedBitSet::with_capacity(graph.len());
        allowed.insert_range(..);
        let frontier = allowed.clone();

        if let Err(err) = search.expand(allowed, frontier) {
            warn!("Clique search aborted: {}", err);
            return Err(err);
        }

        let status = if search.done {
            SearchStatus::TargetReached
        } else {
            SearchStatus::Proven
        };
        let policy = self.policy;
        let mut cliques = search.found;
        cliques.sort_by(|a, b| policy.compare(graph, a.members(), b.members()));
        let size = cliques.first().map_or(0, Clique::len);

        info!(
            "Clique search complete: {} clique(s) of size {} in {} steps ({:?})",
            cliques.len(),
            size,
            search.budget.steps(),
            status
        );

        Ok(CliqueSearch {
            cliques,
            size,
            steps: search.budget.steps(),
            elapsed: search.budget.elapsed(),
            status,
        })
    }
}

/// Runs a search with the default policy.
///
/// # Errors
///
/// See [`CliqueEngine::run`].
pub fn find_cliques(graph: &ResolutionGraph, config: &Config) -> Result<CliqueSearch, McsError> {
    CliqueEngine::new(graph, config).run()
}

/// Mutable search state.
struct Search<'a> {
    graph: &'a ResolutionGraph,
    policy: &'a dyn SolutionPolicy,
    connected: bool,
    collect_all: bool,
    max_solutions: Option<usize>,
    target: usize,
    budget: Budget<'a>,
    /// Edge ids per node, for the bound.
    edges: Vec<(usize, usize)>,
    seen_a: FixedBitSet,
    seen_b: FixedBitSet,
    current: Vec<usize>,
    best: usize,
    found: Vec<Clique>,
    done: bool,
}

impl<'a> Search<'a> {
    fn new(
        graph: &'a ResolutionGraph,
        config: &Config,
        policy: &'a dyn SolutionPolicy,
        token: Option<&'a CancellationToken>,
    ) -> Self {
        let edges: Vec<(usize, usize)> = graph
            .nodes()
            .iter()
            .map(|node| (node.pairing().id1(), node.pairing().id2()))
            .collect();
        let width_a = edges.iter().map(|e| e.0 + 1).max().unwrap_or(0);
        let width_b = edges.iter().map(|e| e.1 + 1).max().unwrap_or(0);
        Self {
            graph,
            policy,
            connected: config.connectivity == Connectivity::Connected,
            collect_all: config.mode.collects_all(),
            max_solutions: config.max_solutions,
            target: graph.theoretical_max(),
            budget: Budget::new(config.step_budget, config.time_budget, token),
            edges,
            seen_a: FixedBitSet::with_capacity(width_a),
            seen_b: FixedBitSet::with_capacity(width_b),
            current: Vec::new(),
            best: 0,
            found: Vec::new(),
            done: false,
        }
    }

    /// Explore every clique extending `current` from `allowed`, choosing
    /// candidates from `frontier` (always a subset of `allowed`).
    fn expand(
        &mut self,
        mut allowed: FixedBitSet,
        mut frontier: FixedBitSet,
    ) -> Result<(), McsError> {
        loop {
            if self.done {
                return Ok(());
            }
            self.budget.tick(self.best)?;

            let Some(v) = frontier.ones().next() else {
                return self.record();
            };

            let bound = self.current.len() + self.bound(&allowed);
            if self.prunes(bound) {
                return Ok(());
            }

            // include v
            let node = &self.graph.nodes()[v];
            let mut child_allowed = allowed.clone();
            child_allowed.difference_with(node.forbidden());
            child_allowed.set(v, false);
            let child_frontier = if !self.connected {
                child_allowed.clone()
            } else if self.current.is_empty() {
                let mut f = node.extension().clone();
                f.intersect_with(&child_allowed);
                f
            } else {
                let mut f = frontier.clone();
                f.union_with(node.extension());
                f.intersect_with(&child_allowed);
                f
            };
            self.current.push(v);
            self.expand(child_allowed, child_frontier)?;
            self.current.pop();

            // exclude v
            allowed.set(v, false);
            frontier.set(v, false);
        }
    }

    /// Upper bound on how many of `allowed` can still join.
    fn bound(&mut self, allowed: &FixedBitSet) -> usize {
        let remaining = allowed.count_ones(..);
        if self.current.len() + remaining < self.best {
            return remaining;
        }
        self.seen_a.clear();
        self.seen_b.clear();
        for i in allowed.ones() {
            let (a, b) = self.edges[i];
            self.seen_a.insert(a);
            self.seen_b.insert(b);
        }
        remaining
            .min(self.seen_a.count_ones(..))
            .min(self.seen_b.count_ones(..))
    }

    fn prunes(&self, bound: usize) -> bool {
        if bound < self.best {
            return true;
        }
        bound == self.best && !self.wants_ties()
    }

    /// True while equal-size cliques are still worth collecting.
    fn wants_ties(&self) -> bool {
        self.collect_all && self.max_solutions.is_none_or(|cap| self.found.len() < cap)
    }

    fn record(&mut self) -> Result<(), McsError> {
        let size = self.current.len();
        if size == 0 || size < self.best || (size == self.best && !self.wants_ties()) {
            return Ok(());
        }
        let nodes = self.graph.len();
        let members = self
            .current
            .iter()
            .map(|&i| NodeId::try_from(i).map_err(|_| McsError::TooManyNodes { nodes }))
            .collect::<Result<Vec<_>, _>>()?;
        let clique = Clique::new(members);
        if !self.policy.admit(self.graph, clique.members()) {
            trace!("Policy rejected clique of size {}", size);
            return Ok(());
        }

        if size > self.best {
            self.best = size;
            self.found.clear();
        }
        trace!("Recorded clique of size {} at step {}", size, self.budget.steps());
        self.found.push(clique);

        if self.best >= self.target && !self.wants_ties() {
            self.done = true;
        }
        Ok(())
    }
}
