//! Configuration for the resolution-graph MCS search.
//!
//! This module exposes a small, stable surface for consumers (for example a
//! reaction-mapping pipeline) to parameterize how the clique search behaves.
//!
//! The main concepts are:
//! - mode: stop at the first maximum clique, or collect every maximum clique of
//!   equal size (degenerate MCS).
//! - connectivity: whether the common subgraph may be disconnected.
//! - dedupe: how to collapse equivalent solutions after extraction.
//! - budgets: a step budget and an optional wall-clock budget bounding the
//!   search on large or highly symmetric graphs.
//!
//! Quick examples
//!
//! Default (first maximum clique, disconnected MCS, 5M step budget):
//! ```
//! use aam_common::Config;
//! let cfg = Config::default();
//! assert_eq!(cfg.step_budget, Some(5_000_000));
//! ```
//!
//! Every degenerate solution, collapsed by mapped atom sets:
//! ```
//! use aam_common::{Config, Dedupe, SolutionMode};
//! let cfg = Config::builder().all_solutions().dedupe(Dedupe::AtomSets).build();
//! assert_eq!(cfg.mode, SolutionMode::All);
//! ```
//!
//! Connected MCS with a tight wall-clock budget:
//! ```
//! use std::time::Duration;
//! use aam_common::{Config, Connectivity};
//! let cfg = Config::builder()
//!     .connected()
//!     .time_budget(Duration::from_millis(50))
//!     .build();
//! assert_eq!(cfg.connectivity, Connectivity::Connected);
//! ```

use std::time::Duration;

/// Default number of branch-and-bound expansions before a search gives up.
pub const DEFAULT_STEP_BUDGET: u64 = 5_000_000;

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Whether to stop at the first maximum clique or collect all of them.
    pub mode: SolutionMode,
    /// Whether solutions must be connected through extension relations.
    pub connectivity: Connectivity,
    /// How to deduplicate mappings after extraction.
    pub dedupe: Dedupe,
    /// Maximum number of expansions; `None` disables the step budget.
    pub step_budget: Option<u64>,
    /// Maximum wall-clock time for one search; `None` disables it.
    pub time_budget: Option<Duration>,
    /// Upper bound on the number of equal-size cliques kept in `All` mode.
    pub max_solutions: Option<usize>,
}

impl Config {
    /// Create a new configuration with the given mode and connectivity, and
    /// default dedupe and budgets.
    pub const fn new(mode: SolutionMode, connectivity: Connectivity) -> Self {
        Self {
            mode,
            connectivity,
            dedupe: Dedupe::None,
            step_budget: Some(DEFAULT_STEP_BUDGET),
            time_budget: None,
            max_solutions: None,
        }
    }

    /// Start a fluent builder from the default configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience: first maximum clique, disconnected MCS.
    pub const fn first() -> Self {
        Self::new(SolutionMode::First, Connectivity::Disconnected)
    }

    /// Convenience: all maximum cliques, disconnected MCS.
    pub const fn all() -> Self {
        Self::new(SolutionMode::All, Connectivity::Disconnected)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::first()
    }
}

/// Fluent builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Stop at the first maximum clique.
    pub const fn first_solution(mut self) -> Self {
        self.config.mode = SolutionMode::First;
        self
    }

    /// Collect every maximum clique of equal size.
    pub const fn all_solutions(mut self) -> Self {
        self.config.mode = SolutionMode::All;
        self
    }

    /// Require solutions connected through extension relations.
    pub const fn connected(mut self) -> Self {
        self.config.connectivity = Connectivity::Connected;
        self
    }

    /// Allow disconnected common subgraphs.
    pub const fn disconnected(mut self) -> Self {
        self.config.connectivity = Connectivity::Disconnected;
        self
    }

    /// Set the dedupe mode.
    pub const fn dedupe(mut self, dedupe: Dedupe) -> Self {
        self.config.dedupe = dedupe;
        self
    }

    /// Set the step budget.
    pub const fn step_budget(mut self, steps: u64) -> Self {
        self.config.step_budget = Some(steps);
        self
    }

    /// Remove the step budget entirely.
    pub const fn unbounded_steps(mut self) -> Self {
        self.config.step_budget = None;
        self
    }

    /// Set the wall-clock budget.
    pub const fn time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget = Some(budget);
        self
    }

    /// Cap the number of equal-size cliques collected in `All` mode.
    pub const fn max_solutions(mut self, n: usize) -> Self {
        self.config.max_solutions = Some(n);
        self
    }

    /// Finish building.
    pub fn build(self) -> Config {
        self.config
    }
}

/// Whether the search stops at one solution or collects all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolutionMode {
    /// Return the first maximum clique found.
    First,
    /// Return every maximum clique of the maximum size.
    All,
}

impl SolutionMode {
    /// True when every equal-size solution must be collected.
    pub const fn collects_all(self) -> bool {
        matches!(self, Self::All)
    }
}

/// Connectivity requirement on solutions.
///
/// - Disconnected:
///     Any set of pairwise non-forbidden nodes is a solution. The common
///     subgraph may fall apart into several fragments.
/// - Connected:
///     After the first member, only nodes in the extension of some member may
///     be added, so the common subgraph is connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Allow disconnected common subgraphs.
    Disconnected,
    /// Require a connected common subgraph.
    Connected,
}

/// Control how mappings are deduplicated after extraction.
///
/// - None:
///     Keep every maximum clique.
/// - Mapping:
///     Two solutions are the same if they yield the same atom-to-atom map.
/// - AtomSets:
///     Two solutions are the same if they cover the same atoms of both graphs,
///     regardless of which atom maps to which (collapses automorphisms).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dedupe {
    /// Keep every solution.
    None,
    /// Collapse solutions with identical atom maps.
    Mapping,
    /// Collapse solutions covering identical atom sets.
    AtomSets,
}
