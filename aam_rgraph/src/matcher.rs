//! One-pair MCS: build the resolution graph, search it, extract mappings.
//!
//! [`McsMatcher`] bundles a compatibility predicate with a configuration and
//! an optional solution policy and cancellation token. It holds no mutable
//! state, so one matcher can serve many molecule pairs, in parallel with the
//! `rayon` feature.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use aam_common::Config;
use petgraph::graph::UnGraph;
use petgraph::unionfind::UnionFind;
use tracing::{debug, info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::builder::ResolutionGraph;
use crate::clique::{
    AcceptAll, CancellationToken, Clique, CliqueEngine, SearchStatus, SolutionPolicy,
};
use crate::compat::Compatibility;
use crate::dedupe;
use crate::error::McsError;
use crate::extract::MappingExtractor;

/// The atom mapping induced by one maximum clique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomMapping {
    clique: Clique,
    flat: Vec<usize>,
    map: BTreeMap<usize, usize>,
    fragments: usize,
}

impl AtomMapping {
    /// Assemble a mapping from its parts.
    pub const fn new(
        clique: Clique,
        flat: Vec<usize>,
        map: BTreeMap<usize, usize>,
        fragments: usize,
    ) -> Self {
        Self {
            clique,
            flat,
            map,
            fragments,
        }
    }

    /// The clique the mapping was extracted from.
    pub const fn clique(&self) -> &Clique {
        &self.clique
    }

    /// Flat `[a0, b0, a1, b1, ...]` form in extraction order.
    pub fn flat(&self) -> &[usize] {
        &self.flat
    }

    /// Atom A → atom B.
    pub const fn map(&self) -> &BTreeMap<usize, usize> {
        &self.map
    }

    /// Number of mapped atoms.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no atom is mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Connected pieces the matched bonds of A fall into.
    pub const fn fragments(&self) -> usize {
        self.fragments
    }
}

/// Result of matching one molecule pair.
#[derive(Clone, Debug)]
pub struct McsOutcome {
    mappings: Vec<AtomMapping>,
    clique_size: usize,
    theoretical_max: usize,
    steps: u64,
    elapsed: Duration,
    status: SearchStatus,
}

impl McsOutcome {
    /// Mappings in policy order, after deduplication.
    pub fn mappings(&self) -> &[AtomMapping] {
        &self.mappings
    }

    /// Consume the outcome, keeping the mappings.
    pub fn into_mappings(self) -> Vec<AtomMapping> {
        self.mappings
    }

    /// The first mapping in policy order.
    pub fn best(&self) -> Option<&AtomMapping> {
        self.mappings.first()
    }

    /// Matched bonds in each mapping.
    pub const fn clique_size(&self) -> usize {
        self.clique_size
    }

    /// The smaller bond count of the two molecules.
    pub const fn theoretical_max(&self) -> usize {
        self.theoretical_max
    }

    /// Search expansions.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Search time.
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How the search ended.
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// Fragment count of the best mapping, zero if there is none.
    pub fn fragments(&self) -> usize {
        self.best().map_or(0, AtomMapping::fragments)
    }

    /// True if the molecules share no bond at all.
    pub fn is_exhausted(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Reusable MCS matcher for molecule pairs.
pub struct McsMatcher<'a, C: ?Sized> {
    compat: &'a C,
    config: &'a Config,
    policy: &'a dyn SolutionPolicy,
    token: Option<&'a CancellationToken>,
}

impl<'a, C: ?Sized> McsMatcher<'a, C> {
    /// A matcher using `compat` and `config` with the default policy.
    pub fn new(compat: &'a C, config: &'a Config) -> Self {
        Self {
            compat,
            config,
            policy: &AcceptAll,
            token: None,
        }
    }

    /// Filter and order solutions with `policy`.
    pub fn with_policy(mut self, policy: &'a dyn SolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Abort searches once `token` is cancelled.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// The configuration in use.
    pub const fn config(&self) -> &Config {
        self.config
    }

    /// Match one molecule pair.
    ///
    /// # Errors
    ///
    /// Any [`McsError`] from construction, search or extraction. No common
    /// bond is not an error: the outcome is then empty.
    pub fn find<NA, EA, NB, EB>(
        &self,
        a: &UnGraph<NA, EA>,
        b: &UnGraph<NB, EB>,
    ) -> Result<McsOutcome, McsError>
    where
        C: Compatibility<NA, EA, NB, EB>,
    {
        info!(
            "Starting MCS: {} atoms / {} bonds vs {} atoms / {} bonds",
            a.node_count(),
            a.edge_count(),
            b.node_count(),
            b.edge_count()
        );
        let graph = ResolutionGraph::build(a, b, self.compat)?;
        self.solve(&graph)
    }

    /// Search an already built resolution graph and extract its mappings.
    ///
    /// # Errors
    ///
    /// Search and extraction errors.
    pub fn solve(&self, graph: &ResolutionGraph) -> Result<McsOutcome, McsError> {
        let mut engine = CliqueEngine::new(graph, self.config).with_policy(self.policy);
        if let Some(token) = self.token {
            engine = engine.with_cancellation(token);
        }
        let search = engine.run()?;
        let (clique_size, steps, elapsed, status) =
            (search.size(), search.steps(), search.elapsed(), search.status());

        let mut extractor = MappingExtractor::new(graph.composite());
        if let Some(pairs) = graph.pairs_per_node() {
            extractor = extractor.expect_pairs_per_node(pairs);
        }
        let mut mappings = search
            .into_cliques()
            .into_iter()
            .map(|clique| {
                let groups = extractor.groups(clique.members())?;
                let flat = extractor.flat(clique.members())?;
                let map = extractor.map(clique.members())?;
                check_injective(&flat, &map)?;
                let fragments = count_fragments(&groups);
                Ok::<_, McsError>(AtomMapping::new(clique, flat, map, fragments))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let raw = mappings.len();
        dedupe::apply(self.config.dedupe, &mut mappings);

        info!(
            "MCS complete: {} bond(s) matched, {} mapping(s), {} after deduplication",
            clique_size,
            raw,
            mappings.len()
        );

        Ok(McsOutcome {
            mappings,
            clique_size,
            theoretical_max: graph.theoretical_max(),
            steps,
            elapsed,
            status,
        })
    }
}

impl<C: ?Sized + Sync> McsMatcher<'_, C> {
    /// Match many independent pairs. Each pair fails on its own; results keep
    /// input order.
    pub fn find_all<NA, EA, NB, EB>(
        &self,
        pairs: &[(&UnGraph<NA, EA>, &UnGraph<NB, EB>)],
    ) -> Vec<Result<McsOutcome, McsError>>
    where
        C: Compatibility<NA, EA, NB, EB>,
        NA: Sync,
        EA: Sync,
        NB: Sync,
        EB: Sync,
    {
        #[cfg(feature = "rayon")]
        let iter = pairs.par_iter().enumerate();
        #[cfg(not(feature = "rayon"))]
        let iter = pairs.iter().enumerate();

        iter.map(|(i, (a, b))| {
            let result = self.find(a, b);
            match &result {
                Ok(outcome) => debug!("pair {}: {} bond(s) matched", i, outcome.clique_size()),
                Err(err) => warn!("pair {}: {}", i, err),
            }
            result
        })
        .collect()
    }
}

/// Match one molecule pair with the default policy.
///
/// ```
/// use aam_common::{Config, PROPANE, BUTANE};
/// use aam_rgraph::{ExactMatch, find_mcs};
///
/// let outcome = find_mcs(&*PROPANE, &*BUTANE, &ExactMatch, &Config::default()).unwrap();
/// assert_eq!(outcome.clique_size(), 2);
/// assert_eq!(outcome.best().unwrap().len(), 3);
/// ```
///
/// # Errors
///
/// See [`McsMatcher::find`].
pub fn find_mcs<NA, EA, NB, EB, C>(
    a: &UnGraph<NA, EA>,
    b: &UnGraph<NB, EB>,
    compat: &C,
    config: &Config,
) -> Result<McsOutcome, McsError>
where
    C: Compatibility<NA, EA, NB, EB> + ?Sized,
{
    McsMatcher::new(compat, config).find(a, b)
}

/// Match independent pairs with the default policy; parallel with `rayon`.
pub fn match_pairs<NA, EA, NB, EB, C>(
    pairs: &[(&UnGraph<NA, EA>, &UnGraph<NB, EB>)],
    compat: &C,
    config: &Config,
) -> Vec<Result<McsOutcome, McsError>>
where
    C: Compatibility<NA, EA, NB, EB> + Sync + ?Sized,
    NA: Sync,
    EA: Sync,
    NB: Sync,
    EB: Sync,
{
    McsMatcher::new(compat, config).find_all(pairs)
}

/// Fail if the map form lost a pair of the flat form, which happens when one
/// atom is paired with two different partners on the other side.
fn check_injective(flat: &[usize], map: &BTreeMap<usize, usize>) -> Result<(), McsError> {
    let distinct: BTreeSet<(usize, usize)> = flat.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    let images: BTreeSet<usize> = map.values().copied().collect();
    if distinct.len() != map.len() || images.len() != map.len() {
        return Err(McsError::inconsistent(format!(
            "{} distinct atom pairs collapse to {} mapped A atoms onto {} B atoms",
            distinct.len(),
            map.len(),
            images.len()
        )));
    }
    Ok(())
}

/// Connected components of the A atoms covered by a mapping. All A atoms of
/// one clique member belong to the same component.
fn count_fragments(groups: &[Vec<(usize, usize)>]) -> usize {
    let Some(atom_count) = groups.iter().flatten().map(|&(a, _)| a + 1).max() else {
        return 0;
    };
    let mut uf = UnionFind::<usize>::new(atom_count);
    let mut touched = vec![false; atom_count];
    for group in groups {
        let Some(&(first, _)) = group.first() else {
            continue;
        };
        for &(a, _) in group {
            touched[a] = true;
            uf.union(first, a);
        }
    }
    let mut roots: Vec<usize> = (0..atom_count)
        .filter(|&i| touched[i])
        .map(|i| uf.find(i))
        .collect();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::ExactMatch;
    use crate::composite::Triplet;
    use crate::node::ResolutionNode;
    use crate::pairing::{Orientation, Pairing};
    use aam_common::{BENZENE, CCNOO, CCSOO, Dedupe, ETHANOL};

    #[test]
    fn count_fragments_joins_shared_atoms() {
        // bonds 0-1 and 1-2 share atom 1, 3-4 stands alone
        let groups = vec![
            vec![(0, 0), (1, 1)],
            vec![(1, 1), (2, 2)],
            vec![(3, 3), (4, 4)],
        ];
        assert_eq!(count_fragments(&groups), 2);
        assert_eq!(count_fragments(&[]), 0);
    }

    #[test]
    fn count_fragments_unions_every_atom_of_a_member() {
        assert_eq!(count_fragments(&[vec![(0, 0)]]), 1);
        let groups = vec![vec![(0, 0)], vec![(5, 5), (6, 6)]];
        assert_eq!(count_fragments(&groups), 2);
        let groups = vec![vec![(0, 0)], vec![(5, 5), (6, 6), (0, 1)]];
        assert_eq!(count_fragments(&groups), 1);
    }

    /// Unrelated nodes pairing edge i with edge i, with the given triplets.
    fn prepared(nodes: usize, triplets: &[(usize, usize, u32)]) -> ResolutionGraph {
        let nodes = (0..nodes)
            .map(|i| ResolutionNode::new(Pairing::new(i, i, Orientation::Parallel)))
            .collect();
        let composite = triplets.iter().copied().map(Triplet::from).collect();
        ResolutionGraph::from_nodes(nodes, composite).unwrap()
    }

    #[test]
    fn solve_counts_fragments_of_single_triplet_nodes() {
        let config = Config::default();
        let matcher = McsMatcher::new(&ExactMatch, &config);

        let outcome = matcher.solve(&prepared(1, &[(0, 0, 0)])).unwrap();
        let best = outcome.best().unwrap();
        assert_eq!(best.map(), &BTreeMap::from([(0, 0)]));
        assert_eq!(best.fragments(), 1);

        let graph = prepared(2, &[(0, 0, 0), (5, 5, 1), (6, 6, 1)]);
        let outcome = matcher.solve(&graph).unwrap();
        let best = outcome.best().unwrap();
        assert_eq!(best.len(), 3);
        assert_eq!(best.fragments(), 2);
    }

    #[test]
    fn solve_rejects_conflicting_pairs() {
        let config = Config::default();
        let matcher = McsMatcher::new(&ExactMatch, &config);
        // node 1 sends A atom 0 to B atom 1, node 0 already sent it to 0
        let graph = prepared(2, &[(0, 0, 0), (1, 1, 0), (0, 1, 1), (2, 2, 1)]);
        let err = matcher.solve(&graph).unwrap_err();
        assert!(matches!(err, McsError::ExtractionInconsistency(_)));
    }

    #[test]
    fn built_graphs_expect_two_pairs_per_node() {
        let graph = ResolutionGraph::build(&*ETHANOL, &*ETHANOL, &ExactMatch).unwrap();
        assert_eq!(graph.pairs_per_node(), Some(2));
        assert_eq!(prepared(1, &[(0, 0, 0)]).pairs_per_node(), None);
    }

    #[test]
    fn ethanol_self_maps_every_atom() {
        let outcome = find_mcs(&*ETHANOL, &*ETHANOL, &ExactMatch, &Config::default()).unwrap();
        let best = outcome.best().unwrap();
        assert_eq!(outcome.clique_size(), 2);
        assert_eq!(best.map(), &BTreeMap::from([(0, 0), (1, 1), (2, 2)]));
        assert_eq!(best.fragments(), 1);
        assert!(!outcome.is_exhausted());
    }

    #[test]
    fn disconnected_mcs_reports_fragments() {
        let outcome = find_mcs(&*CCNOO, &*CCSOO, &ExactMatch, &Config::default()).unwrap();
        assert_eq!(outcome.clique_size(), 2);
        assert_eq!(outcome.fragments(), 2);
    }

    #[test]
    fn dedupe_atom_sets_collapses_automorphisms() {
        let config = Config::builder()
            .all_solutions()
            .dedupe(Dedupe::AtomSets)
            .build();
        let outcome = find_mcs(&*BENZENE, &*BENZENE, &ExactMatch, &config).unwrap();
        assert_eq!(outcome.mappings().len(), 1);
        assert_eq!(outcome.clique_size(), 6);
    }

    #[test]
    fn find_all_keeps_input_order() {
        let pairs = [(&*ETHANOL, &*ETHANOL), (&*BENZENE, &*BENZENE)];
        let results = match_pairs(&pairs, &ExactMatch, &Config::default());
        let sizes: Vec<usize> = results
            .into_iter()
            .map(|r| r.unwrap().clique_size())
            .collect();
        assert_eq!(sizes, vec![2, 6]);
    }
}
