use std::collections::HashSet;

use aam_common::Dedupe;

use crate::matcher::AtomMapping;

/// Atoms covered on each side, independent of which maps to which.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct AtomSetSig {
    a: Vec<usize>,
    b: Vec<usize>,
}

pub(crate) fn signature_mapping(m: &AtomMapping) -> Vec<(usize, usize)> {
    m.map().iter().map(|(&a, &b)| (a, b)).collect()
}

pub(crate) fn signature_atom_sets(m: &AtomMapping) -> AtomSetSig {
    let a: Vec<usize> = m.map().keys().copied().collect();
    let mut b: Vec<usize> = m.map().values().copied().collect();
    b.sort_unstable();
    b.dedup();
    AtomSetSig { a, b }
}

/// Drop later mappings whose signature repeats an earlier one.
pub(crate) fn apply(dedupe: Dedupe, mappings: &mut Vec<AtomMapping>) {
    match dedupe {
        Dedupe::None => {}
        Dedupe::Mapping => {
            let mut seen = HashSet::new();
            mappings.retain(|m| seen.insert(signature_mapping(m)));
        }
        Dedupe::AtomSets => {
            let mut seen = HashSet::new();
            mappings.retain(|m| seen.insert(signature_atom_sets(m)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::clique::Clique;

    fn mapping(pairs: &[(usize, usize)]) -> AtomMapping {
        let map: BTreeMap<usize, usize> = pairs.iter().copied().collect();
        let flat = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
        AtomMapping::new(Clique::new(Vec::new()), flat, map, 1)
    }

    #[test]
    fn atom_sets_collapse_permutations() {
        let mut ms = vec![mapping(&[(0, 0), (1, 1)]), mapping(&[(0, 1), (1, 0)])];
        apply(Dedupe::AtomSets, &mut ms);
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].map().get(&0), Some(&0));
    }

    #[test]
    fn mapping_keeps_permutations() {
        let mut ms = vec![
            mapping(&[(0, 0), (1, 1)]),
            mapping(&[(0, 1), (1, 0)]),
            mapping(&[(0, 0), (1, 1)]),
        ];
        apply(Dedupe::Mapping, &mut ms);
        assert_eq!(ms.len(), 2);
    }

    #[test]
    fn none_keeps_everything() {
        let mut ms = vec![mapping(&[(0, 0)]), mapping(&[(0, 0)])];
        apply(Dedupe::None, &mut ms);
        assert_eq!(ms.len(), 2);
    }
}
