//! Maximum common substructure through a resolution graph.
//!
//! Two labeled graphs are compared by pairing their edges: every admissible
//! edge pairing becomes a node of the resolution graph, and nodes that cannot
//! coexist in one mapping forbid each other. A maximum set of mutually
//! non-forbidden nodes is a maximum common edge subgraph, and the atom pairs
//! its nodes induce form the atom-atom mapping.
//!
//! ```
//! use aam_common::{Config, ETHANOL};
//! use aam_rgraph::{ExactMatch, find_mcs};
//!
//! let outcome = find_mcs(&*ETHANOL, &*ETHANOL, &ExactMatch, &Config::default()).unwrap();
//! assert_eq!(outcome.best().unwrap().map().len(), 3);
//! ```

pub mod builder;
pub mod clique;
pub mod compat;
pub mod composite;
mod dedupe;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod node;
pub mod pairing;
pub mod profiling;
pub mod reaction;

pub use crate::builder::{Relation, ResolutionGraph};
pub use crate::clique::{
    AcceptAll, CancellationToken, Clique, CliqueEngine, CliqueSearch, Filter, ScoreFn,
    SearchStatus, SolutionPolicy, find_cliques,
};
pub use crate::compat::{AtomsOnly, Compatibility, ElementOnly, ExactMatch, FnCompatibility};
pub use crate::composite::{CompositeIndex, CompositeList, Triplet};
pub use crate::error::{McsError, PredicateError};
pub use crate::extract::{MappingExtractor, extract_flat, extract_map};
pub use crate::matcher::{AtomMapping, McsMatcher, McsOutcome, find_mcs, match_pairs};
pub use crate::node::ResolutionNode;
pub use crate::pairing::{Orientation, Pairing};
pub use crate::reaction::{ReactionMapper, ReactionMapping};
