//! Turning a clique back into atom-atom pairs.
//!
//! Two output forms exist. The flat form lists `atomA, atomB` for every
//! triplet of every clique member, walking members in clique order and each
//! member's triplets in composite order. The map form folds the same walk
//! into an A → B map where a later triplet overwrites an earlier one with the
//! same A atom.

use std::collections::BTreeMap;

use aam_common::NodeId;

use crate::composite::{CompositeIndex, CompositeList};
use crate::error::McsError;
use crate::profiling::Timer;

/// Extracts mappings from cliques over one composite list.
///
/// Building the extractor indexes the list once; each extraction is then
/// linear in the number of triplets it emits.
#[derive(Clone, Debug)]
pub struct MappingExtractor<'a> {
    index: CompositeIndex<'a>,
    per_node: Option<usize>,
}

impl<'a> MappingExtractor<'a> {
    /// Index `list` for extraction.
    pub fn new(list: &'a CompositeList) -> Self {
        Self {
            index: list.index(),
            per_node: None,
        }
    }

    /// Require every clique member to own at least `pairs` triplets.
    pub const fn expect_pairs_per_node(mut self, pairs: usize) -> Self {
        self.per_node = Some(pairs);
        self
    }

    /// `(atomA, atomB)` pairs of each member of `clique`, one group per
    /// member in clique order.
    ///
    /// # Errors
    ///
    /// [`McsError::UnknownNode`] if a member has no triplets and
    /// [`McsError::ExtractionInconsistency`] if a member owns fewer triplets
    /// than the extractor expects.
    pub fn groups(&self, clique: &[NodeId]) -> Result<Vec<Vec<(usize, usize)>>, McsError> {
        let _timer = Timer::new("extract");
        clique
            .iter()
            .map(|&node| {
                let entries = self.index.entries(node).ok_or(McsError::UnknownNode(node))?;
                let group: Vec<(usize, usize)> = entries.map(|t| (t.atom_a, t.atom_b)).collect();
                match self.per_node {
                    Some(expected) if group.len() < expected => {
                        Err(McsError::inconsistent(format!(
                            "node {node} produced {} atom pairs, expected {expected}",
                            group.len()
                        )))
                    }
                    _ => Ok(group),
                }
            })
            .collect()
    }

    /// `(atomA, atomB)` pairs for `clique`, in walk order.
    ///
    /// # Errors
    ///
    /// See [`groups`](Self::groups).
    pub fn pairs(&self, clique: &[NodeId]) -> Result<Vec<(usize, usize)>, McsError> {
        Ok(self.groups(clique)?.into_iter().flatten().collect())
    }

    /// Flat `[a0, b0, a1, b1, ...]` form.
    ///
    /// # Errors
    ///
    /// See [`groups`](Self::groups).
    pub fn flat(&self, clique: &[NodeId]) -> Result<Vec<usize>, McsError> {
        Ok(self
            .pairs(clique)?
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect())
    }

    /// Map form, sorted by A atom. Later pairs win on a repeated A atom.
    ///
    /// # Errors
    ///
    /// See [`groups`](Self::groups).
    pub fn map(&self, clique: &[NodeId]) -> Result<BTreeMap<usize, usize>, McsError> {
        Ok(self.pairs(clique)?.into_iter().collect())
    }
}

/// One-shot flat extraction.
///
/// # Errors
///
/// See [`MappingExtractor::groups`].
pub fn extract_flat(list: &CompositeList, clique: &[NodeId]) -> Result<Vec<usize>, McsError> {
    MappingExtractor::new(list).flat(clique)
}

/// One-shot map extraction.
///
/// # Errors
///
/// See [`MappingExtractor::groups`].
pub fn extract_map(
    list: &CompositeList,
    clique: &[NodeId],
) -> Result<BTreeMap<usize, usize>, McsError> {
    MappingExtractor::new(list).map(clique)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::composite::Triplet;
    use quickcheck::{TestResult, quickcheck};

    fn triplet(a: u8, b: u8, node: u8) -> Triplet {
        Triplet::new(usize::from(a), usize::from(b), NodeId::new(u32::from(node)))
    }

    /// Scan the whole list per member.
    fn naive_flat(list: &CompositeList, clique: &[NodeId]) -> Vec<usize> {
        clique
            .iter()
            .flat_map(|&node| {
                list.iter()
                    .filter(move |t| t.node == node)
                    .flat_map(|t| [t.atom_a, t.atom_b])
            })
            .collect()
    }

    quickcheck! {
        fn prop_indexed_matches_naive(raw: Vec<(u8, u8, u8)>, picks: Vec<u8>) -> TestResult {
            if raw.is_empty() {
                return TestResult::discard();
            }
            let list: CompositeList = raw
                .iter()
                .map(|&(a, b, n)| triplet(a, b, n % 16))
                .collect();
            let clique: Vec<NodeId> = picks
                .iter()
                .map(|&p| raw[usize::from(p) % raw.len()].2 % 16)
                .map(|n| NodeId::new(u32::from(n)))
                .collect();

            let flat = extract_flat(&list, &clique).unwrap();
            TestResult::from_bool(flat == naive_flat(&list, &clique))
        }

        fn prop_map_is_last_write_of_flat(raw: Vec<(u8, u8, u8)>) -> TestResult {
            if raw.is_empty() {
                return TestResult::discard();
            }
            let list: CompositeList = raw
                .iter()
                .map(|&(a, b, n)| triplet(a, b, n % 4))
                .collect();
            let mut clique: Vec<NodeId> = list.iter().map(|t| t.node).collect();
            clique.sort_unstable();
            clique.dedup();

            let flat = extract_flat(&list, &clique).unwrap();
            let mut expected = BTreeMap::new();
            for pair in flat.chunks(2) {
                expected.insert(pair[0], pair[1]);
            }
            TestResult::from_bool(extract_map(&list, &clique).unwrap() == expected)
        }
    }
}
