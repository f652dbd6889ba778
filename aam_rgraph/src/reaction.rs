//! Iterative atom-atom mapping of one educt onto one product.
//!
//! Each round runs the pair matcher on what is left of both molecules,
//! records the best mapping in the molecules' original atom indices and
//! deletes the matched atoms (with their bonds) from both sides. Rounds stop
//! once no common bond remains or a round maps too few atoms.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::stable_graph::StableUnGraph;
use tracing::{debug, info};

use crate::compat::Compatibility;
use crate::error::McsError;
use crate::matcher::McsMatcher;

/// Default smallest mapping worth recording: one bond.
pub const DEFAULT_MIN_FRAGMENT_ATOMS: usize = 2;

/// Accumulated result of [`ReactionMapper::map_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReactionMapping {
    /// `(educt atom, product atom)` pairs in original index space, in the
    /// order they were recorded.
    pub pairs: Vec<(usize, usize)>,
    /// Rounds that recorded a mapping.
    pub rounds: usize,
    /// Sum of the fragment counts of every recorded mapping.
    pub fragments: usize,
    /// Educt atoms left unmapped.
    pub unmapped_educt: Vec<usize>,
    /// Product atoms left unmapped.
    pub unmapped_product: Vec<usize>,
}

/// Pending mapping of the last successful [`ReactionMapper::mcs_match`].
#[derive(Clone, Debug)]
struct PendingMatch {
    pairs: Vec<(usize, usize)>,
    fragments: usize,
}

/// Maps one educt onto one product round by round.
pub struct ReactionMapper<'a, N, E, C: ?Sized> {
    educt: StableUnGraph<N, E>,
    product: StableUnGraph<N, E>,
    matcher: McsMatcher<'a, C>,
    min_fragment_atoms: usize,
    pending: Option<PendingMatch>,
    recorded: ReactionMapping,
}

impl<'a, N, E, C> ReactionMapper<'a, N, E, C>
where
    N: Clone,
    E: Clone,
    C: Compatibility<N, E> + ?Sized,
{
    /// Start from full copies of `educt` and `product`.
    pub fn new(educt: &UnGraph<N, E>, product: &UnGraph<N, E>, matcher: McsMatcher<'a, C>) -> Self {
        Self {
            educt: StableUnGraph::from(educt.clone()),
            product: StableUnGraph::from(product.clone()),
            matcher,
            min_fragment_atoms: DEFAULT_MIN_FRAGMENT_ATOMS,
            pending: None,
            recorded: ReactionMapping::default(),
        }
    }

    /// Stop once a round would map fewer than `atoms` atoms.
    pub const fn with_min_fragment_atoms(mut self, atoms: usize) -> Self {
        self.min_fragment_atoms = atoms;
        self
    }

    /// What is left of the educt.
    pub const fn remaining_educt(&self) -> &StableUnGraph<N, E> {
        &self.educt
    }

    /// What is left of the product.
    pub const fn remaining_product(&self) -> &StableUnGraph<N, E> {
        &self.product
    }

    /// Pairs recorded so far.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.recorded.pairs
    }

    /// Run the matcher on the remaining molecules and hold the best mapping
    /// for [`remove_matched_atoms_and_record`](Self::remove_matched_atoms_and_record).
    ///
    /// Returns `false` when either molecule is empty, no bond is shared, or the
    /// best mapping covers fewer than the minimum number of atoms.
    ///
    /// # Errors
    ///
    /// Errors from the pair matcher.
    pub fn mcs_match(&mut self) -> Result<bool, McsError> {
        self.pending = None;
        if self.educt.node_count() == 0 || self.product.node_count() == 0 {
            return Ok(false);
        }

        let (educt, educt_ids) = compact(&self.educt);
        let (product, product_ids) = compact(&self.product);
        let outcome = self.matcher.find(&educt, &product)?;

        let Some(best) = outcome.best() else {
            debug!("no common bond left");
            return Ok(false);
        };
        if best.len() < self.min_fragment_atoms {
            debug!(
                "best mapping covers {} atoms, below minimum {}",
                best.len(),
                self.min_fragment_atoms
            );
            return Ok(false);
        }

        let pairs = best
            .map()
            .iter()
            .map(|(&a, &b)| (educt_ids[a], product_ids[b]))
            .collect();
        self.pending = Some(PendingMatch {
            pairs,
            fragments: best.fragments(),
        });
        Ok(true)
    }

    /// Record the pending mapping and delete its atoms from both molecules.
    /// Returns the mapping's fragment count, zero if nothing was pending.
    ///
    /// # Errors
    ///
    /// [`McsError::RemovalMismatch`] if a mapped atom is no longer present on
    /// either side. Both molecules are left untouched in that case.
    pub fn remove_matched_atoms_and_record(&mut self) -> Result<usize, McsError> {
        let Some(pending) = self.pending.take() else {
            return Ok(0);
        };

        let present = pending.pairs.iter().all(|&(e, p)| {
            self.educt.contains_node(NodeIndex::new(e))
                && self.product.contains_node(NodeIndex::new(p))
        });
        if !present {
            return Err(McsError::RemovalMismatch {
                mapped: pending.pairs.len(),
                remaining: self.educt.node_count(),
            });
        }

        for &(e, p) in &pending.pairs {
            self.educt.remove_node(NodeIndex::new(e));
            self.product.remove_node(NodeIndex::new(p));
            self.recorded.pairs.push((e, p));
        }

        self.recorded.rounds += 1;
        self.recorded.fragments += pending.fragments;
        Ok(pending.fragments)
    }

    /// Alternate [`mcs_match`](Self::mcs_match) and removal until nothing
    /// more can be mapped.
    ///
    /// # Errors
    ///
    /// The first error of either step.
    pub fn map_all(mut self) -> Result<ReactionMapping, McsError> {
        while self.mcs_match()? {
            let fragments = self.remove_matched_atoms_and_record()?;
            debug!(
                "round {}: {} fragment(s), {} educt / {} product atoms left",
                self.recorded.rounds,
                fragments,
                self.educt.node_count(),
                self.product.node_count()
            );
        }

        let mut mapping = self.recorded;
        mapping.unmapped_educt = self.educt.node_indices().map(NodeIndex::index).collect();
        mapping.unmapped_product = self.product.node_indices().map(NodeIndex::index).collect();
        info!(
            "Reaction mapped in {} round(s): {} pairs, {} educt and {} product atoms unmapped",
            mapping.rounds,
            mapping.pairs.len(),
            mapping.unmapped_educt.len(),
            mapping.unmapped_product.len()
        );
        Ok(mapping)
    }
}

/// Dense copy of a stable graph plus the original index of every new node.
fn compact<N: Clone, E: Clone>(g: &StableUnGraph<N, E>) -> (UnGraph<N, E>, Vec<usize>) {
    let mut out = UnGraph::with_capacity(g.node_count(), g.edge_count());
    let mut original = Vec::with_capacity(g.node_count());
    let mut renumber: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(g.node_count());

    for old in g.node_indices() {
        let new = out.add_node(g[old].clone());
        renumber.insert(old, new);
        original.push(old.index());
    }
    for edge in g.edge_indices() {
        if let Some((s, t)) = g.edge_endpoints(edge) {
            out.add_edge(renumber[&s], renumber[&t], g[edge].clone());
        }
    }
    (out, original)
}
