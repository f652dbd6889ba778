//! Resolution graph construction.
//!
//! Every admissible (edge A, edge B, orientation) triple becomes a node. Two
//! nodes are then related by comparing the atom pairs they induce:
//!
//! - forbidden: they claim the same edge on either side, or some atom of one
//!   graph would be assigned two different atoms of the other;
//! - extension: they are consistent and share at least one atom pair, i.e.
//!   their edges are adjacent in both graphs through the same atoms;
//! - unrelated: consistent and disjoint.
//!
//! A set of pairwise non-forbidden nodes therefore induces an injective atom
//! mapping under which adjacent edges stay adjacent, which is exactly a common
//! edge subgraph.

use aam_common::NodeId;
use fixedbitset::FixedBitSet;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::compat::Compatibility;
use crate::composite::{CompositeList, Triplet};
use crate::error::McsError;
use crate::node::ResolutionNode;
use crate::pairing::{Orientation, Pairing};
use crate::profiling::Timer;

/// How two nodes relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Mutually in each other's extension set.
    Compatible,
    /// Mutually in each other's forbidden set.
    Incompatible,
    /// In neither set.
    Unrelated,
}

/// Edge with its `(source, target)` atom indices.
#[derive(Clone, Copy, Debug)]
struct EdgeEnds {
    index: usize,
    ends: (usize, usize),
}

/// The compatibility graph between two input graphs plus its composite list.
#[derive(Clone, Debug)]
pub struct ResolutionGraph {
    nodes: Vec<ResolutionNode>,
    composite: CompositeList,
    theoretical_max: usize,
    atom_counts: (usize, usize),
    pairs_per_node: Option<usize>,
}

impl ResolutionGraph {
    /// Builds the resolution graph of `a` and `b` under `compat`.
    ///
    /// # Errors
    ///
    /// Returns [`McsError::Construction`] if the predicate fails for any edge
    /// pair.
    pub fn build<NA, EA, NB, EB, C>(
        a: &UnGraph<NA, EA>,
        b: &UnGraph<NB, EB>,
        compat: &C,
    ) -> Result<Self, McsError>
    where
        C: Compatibility<NA, EA, NB, EB> + ?Sized,
    {
        let _timer = Timer::new("rgraph::build");

        let edges_a = edge_ends(a);
        let edges_b = edge_ends(b);

        // 1. Nodes, in (edge A, edge B, orientation) order.
        let mut pairings: Vec<Pairing> = Vec::new();
        let mut assignments: Vec<[(usize, usize); 2]> = Vec::new();
        for ea in &edges_a {
            for eb in &edges_b {
                let construction = |source| McsError::Construction {
                    edge_a: ea.index,
                    edge_b: eb.index,
                    source,
                };

                let bond_a = &a.raw_edges()[ea.index].weight;
                let bond_b = &b.raw_edges()[eb.index].weight;
                if !compat.bonds(bond_a, bond_b).map_err(construction)? {
                    continue;
                }

                for orientation in Orientation::BOTH {
                    let pairing = Pairing::new(ea.index, eb.index, orientation);
                    let pairs = pairing.assignments(ea.ends, eb.ends);
                    let mut admissible = true;
                    for (atom_a, atom_b) in pairs {
                        let weight_a = &a.raw_nodes()[atom_a].weight;
                        let weight_b = &b.raw_nodes()[atom_b].weight;
                        if !compat.atoms(weight_a, weight_b).map_err(construction)? {
                            admissible = false;
                            break;
                        }
                    }
                    if admissible {
                        pairings.push(pairing);
                        assignments.push(pairs);
                    }
                }
            }
        }

        // 2. Relations. Only nodes touching a common atom on either side can
        //    interact, so candidates are drawn from per-atom buckets.
        let n = pairings.len();
        check_addressable(n)?;
        let bucket_a = buckets(a.node_count(), assignments.iter().map(|p| [p[0].0, p[1].0]));
        let bucket_b = buckets(b.node_count(), assignments.iter().map(|p| [p[0].1, p[1].1]));

        let mut extension: Vec<FixedBitSet> = vec![FixedBitSet::with_capacity(n); n];
        let mut forbidden: Vec<FixedBitSet> = vec![FixedBitSet::with_capacity(n); n];
        let mut seen = FixedBitSet::with_capacity(n);
        let mut touched: Vec<usize> = Vec::new();
        let (mut compatible_pairs, mut forbidden_pairs) = (0usize, 0usize);

        for i in 0..n {
            let [(a0, b0), (a1, b1)] = assignments[i];
            let neighbours = [&bucket_a[a0], &bucket_a[a1], &bucket_b[b0], &bucket_b[b1]];
            for &j in neighbours.into_iter().flatten() {
                if j <= i || seen.contains(j) {
                    continue;
                }
                seen.insert(j);
                touched.push(j);

                match relate(&pairings[i], &assignments[i], &pairings[j], &assignments[j]) {
                    Relation::Compatible => {
                        extension[i].insert(j);
                        extension[j].insert(i);
                        compatible_pairs += 1;
                    }
                    Relation::Incompatible => {
                        forbidden[i].insert(j);
                        forbidden[j].insert(i);
                        forbidden_pairs += 1;
                    }
                    Relation::Unrelated => {}
                }
            }
            for j in touched.drain(..) {
                seen.set(j, false);
            }
        }

        // 3. Assign each node its finished sets in one replace per set.
        let nodes: Vec<ResolutionNode> = pairings
            .into_iter()
            .zip(extension.into_iter().zip(forbidden))
            .map(|(pairing, (ext, forb))| {
                let mut node = ResolutionNode::new(pairing);
                node.set_extension(ext);
                node.set_forbidden(forb);
                node
            })
            .collect();

        // 4. Composite list in node-insertion order.
        let mut composite = CompositeList::with_capacity(2 * n);
        for (id, pairs) in assignments.iter().enumerate() {
            for &(atom_a, atom_b) in pairs {
                let node = NodeId::try_from(id).map_err(|_| McsError::TooManyNodes { nodes: n })?;
                composite.push(Triplet::new(atom_a, atom_b, node));
            }
        }

        let theoretical_max = edges_a.len().min(edges_b.len());
        let atom_counts = (a.node_count(), b.node_count());

        debug!(
            "resolution graph: {} x {} edges -> {} nodes, {} compatible pairs, {} forbidden pairs",
            edges_a.len(),
            edges_b.len(),
            n,
            compatible_pairs,
            forbidden_pairs
        );

        Ok(Self {
            nodes,
            composite,
            theoretical_max,
            atom_counts,
            pairs_per_node: Some(2),
        })
    }

    /// Builds a resolution graph from externally prepared nodes.
    ///
    /// The theoretical maximum is the smaller of the number of distinct A and
    /// B edge ids among the nodes; atom counts are inferred from the
    /// composite list.
    ///
    /// # Errors
    ///
    /// Returns [`McsError::InvalidResolutionGraph`] if a node relates to
    /// itself, relates to a node that does not exist, is both compatible with
    /// and forbidden from another node, or if a relation is not mutual.
    pub fn from_nodes(
        nodes: Vec<ResolutionNode>,
        composite: CompositeList,
    ) -> Result<Self, McsError> {
        let n = nodes.len();
        check_addressable(n)?;
        for (i, node) in nodes.iter().enumerate() {
            let sets = [("extension", node.extension()), ("forbidden", node.forbidden())];
            for (name, set) in sets {
                for j in set.ones() {
                    if j == i {
                        return Err(McsError::invalid_graph(format!(
                            "node {i} is in its own {name} set"
                        )));
                    }
                    if j >= n {
                        return Err(McsError::invalid_graph(format!(
                            "node {i} {name} names node {j}, graph has {n} nodes"
                        )));
                    }
                }
            }
            if let Some(j) = node.extension().ones().find(|&j| node.forbidden().contains(j)) {
                return Err(McsError::invalid_graph(format!(
                    "nodes {i} and {j} are both compatible and forbidden"
                )));
            }
            if let Some(j) = node
                .extension()
                .ones()
                .find(|&j| !nodes[j].extension().contains(i))
            {
                return Err(McsError::invalid_graph(format!(
                    "extension {i} -> {j} is not mutual"
                )));
            }
            if let Some(j) = node
                .forbidden()
                .ones()
                .find(|&j| !nodes[j].forbidden().contains(i))
            {
                return Err(McsError::invalid_graph(format!(
                    "forbidden {i} -> {j} is not mutual"
                )));
            }
        }

        let distinct = |key: fn(&Pairing) -> usize| {
            let mut ids: Vec<usize> = nodes.iter().map(|node| key(node.pairing())).collect();
            ids.sort_unstable();
            ids.dedup();
            ids.len()
        };
        let theoretical_max = distinct(Pairing::id1).min(distinct(Pairing::id2));
        let atom_counts = composite.iter().fold((0, 0), |(na, nb), t| {
            (na.max(t.atom_a + 1), nb.max(t.atom_b + 1))
        });

        Ok(Self {
            nodes,
            composite,
            theoretical_max,
            atom_counts,
            pairs_per_node: None,
        })
    }

    /// Number of nodes.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no edge pair was admissible.
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, indexed by [`NodeId`].
    pub fn nodes(&self) -> &[ResolutionNode] {
        &self.nodes
    }

    /// The node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&ResolutionNode> {
        self.nodes.get(id.as_usize())
    }

    /// The composite list.
    pub const fn composite(&self) -> &CompositeList {
        &self.composite
    }

    /// Largest clique size that could possibly exist: the smaller edge count.
    pub const fn theoretical_max(&self) -> usize {
        self.theoretical_max
    }

    /// Atom counts of graph A and graph B. For graphs built with
    /// [`from_nodes`](Self::from_nodes) these are inferred from the composite
    /// list.
    pub const fn atom_counts(&self) -> (usize, usize) {
        self.atom_counts
    }

    /// Composite triplets every node is known to emit. Graphs built from two
    /// molecules emit one per bond endpoint; externally prepared graphs make
    /// no promise.
    pub const fn pairs_per_node(&self) -> Option<usize> {
        self.pairs_per_node
    }

    /// How nodes `x` and `y` relate.
    pub fn relation(&self, x: NodeId, y: NodeId) -> Relation {
        match self.node(x) {
            Some(node) if node.is_compatible_with(y) => Relation::Compatible,
            Some(node) if node.forbids(y) => Relation::Incompatible,
            _ => Relation::Unrelated,
        }
    }

    /// True if no member of `members` forbids another.
    pub fn is_clique(&self, members: &[NodeId]) -> bool {
        members.iter().enumerate().all(|(k, &x)| {
            members[k + 1..]
                .iter()
                .all(|&y| self.relation(x, y) != Relation::Incompatible)
        })
    }
}

/// Non-loop edges of `g` in edge-index order.
fn check_addressable(nodes: usize) -> Result<(), McsError> {
    match nodes.checked_sub(1).map(NodeId::try_from) {
        Some(Err(_)) => Err(McsError::TooManyNodes { nodes }),
        _ => Ok(()),
    }
}

fn edge_ends<N, E>(g: &UnGraph<N, E>) -> Vec<EdgeEnds> {
    g.edge_references()
        .filter(|e| e.source() != e.target())
        .map(|e| EdgeEnds {
            index: e.id().index(),
            ends: (e.source().index(), e.target().index()),
        })
        .collect()
}

/// node ids touching each atom, ascending.
fn buckets(atom_count: usize, atoms: impl Iterator<Item = [usize; 2]>) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new(); atom_count];
    for (id, pair) in atoms.enumerate() {
        out[pair[0]].push(id);
        if pair[1] != pair[0] {
            out[pair[1]].push(id);
        }
    }
    out
}

/// Relation between two nodes given the atom pairs they induce.
pub(crate) fn relate(
    p: &Pairing,
    pairs_p: &[(usize, usize); 2],
    q: &Pairing,
    pairs_q: &[(usize, usize); 2],
) -> Relation {
    if p.id1() == q.id1() || p.id2() == q.id2() {
        return Relation::Incompatible;
    }
    let mut shared = false;
    for &(a1, b1) in pairs_p {
        for &(a2, b2) in pairs_q {
            match (a1 == a2, b1 == b2) {
                (true, true) => shared = true,
                (false, false) => {}
                _ => return Relation::Incompatible,
            }
        }
    }
    if shared {
        Relation::Compatible
    } else {
        Relation::Unrelated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{ExactMatch, FnCompatibility};
    use crate::error::PredicateError;
    use aam_common::molecule::{BondOrder, chain, ring};
    use aam_common::{ETHANOL, TOLUENE};

    #[test]
    fn relate_same_edge_is_forbidden() {
        let p = Pairing::new(0, 0, Orientation::Parallel);
        let q = Pairing::new(0, 0, Orientation::Crossed);
        assert_eq!(
            relate(&p, &[(0, 0), (1, 1)], &q, &[(0, 1), (1, 0)]),
            Relation::Incompatible
        );
    }

    #[test]
    fn relate_shared_atom_consistent_is_compatible() {
        let p = Pairing::new(0, 0, Orientation::Parallel);
        let q = Pairing::new(1, 1, Orientation::Parallel);
        assert_eq!(
            relate(&p, &[(0, 0), (1, 1)], &q, &[(1, 1), (2, 2)]),
            Relation::Compatible
        );
    }

    #[test]
    fn relate_adjacent_in_one_graph_only_is_forbidden() {
        // A edges share atom 1, B edges are disjoint.
        let p = Pairing::new(0, 0, Orientation::Parallel);
        let q = Pairing::new(1, 2, Orientation::Parallel);
        assert_eq!(
            relate(&p, &[(0, 0), (1, 1)], &q, &[(1, 4), (2, 5)]),
            Relation::Incompatible
        );
    }

    #[test]
    fn relate_disjoint_is_unrelated() {
        let p = Pairing::new(0, 0, Orientation::Parallel);
        let q = Pairing::new(2, 2, Orientation::Parallel);
        assert_eq!(
            relate(&p, &[(0, 0), (1, 1)], &q, &[(3, 3), (4, 4)]),
            Relation::Unrelated
        );
    }

    #[test]
    fn ethanol_self_nodes() {
        let g = ResolutionGraph::build(&*ETHANOL, &*ETHANOL, &ExactMatch).unwrap();
        // C-C matches itself both ways, C-O only parallel.
        assert_eq!(g.len(), 3);
        assert_eq!(g.theoretical_max(), 2);
        assert_eq!(g.composite().len(), 6);
        let n0 = g.node(NodeId::new(0)).unwrap();
        assert_eq!(n0.pairing().orientation(), Orientation::Parallel);
        assert!(n0.forbids(NodeId::new(1)));
        assert!(n0.is_compatible_with(NodeId::new(2)));
        // C-C crossed puts C1 on C0, clashing with C-O.
        assert_eq!(
            g.relation(NodeId::new(1), NodeId::new(2)),
            Relation::Incompatible
        );
    }

    #[test]
    fn node_invariants_hold() {
        let g = ResolutionGraph::build(&*TOLUENE, &*TOLUENE, &ExactMatch).unwrap();
        let n = g.len();
        for (i, node) in g.nodes().iter().enumerate() {
            assert!(!node.extension().contains(i));
            assert!(!node.forbidden().contains(i));
            for j in 0..n {
                assert!(!(node.extension().contains(j) && node.forbidden().contains(j)));
                assert_eq!(
                    node.extension().contains(j),
                    g.nodes()[j].extension().contains(i)
                );
                assert_eq!(
                    node.forbidden().contains(j),
                    g.nodes()[j].forbidden().contains(i)
                );
            }
        }
    }

    #[test]
    fn composite_follows_node_order() {
        let ring = ring("C", 4, BondOrder::Single);
        let g = ResolutionGraph::build(&chain("C", 3), &ring, &ExactMatch).unwrap();
        let ids: Vec<usize> = g.composite().iter().map(|t| t.node.as_usize()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 2 * g.len());
    }

    #[test]
    fn build_is_deterministic() {
        let first = ResolutionGraph::build(&*TOLUENE, &*TOLUENE, &ExactMatch).unwrap();
        let second = ResolutionGraph::build(&*TOLUENE, &*TOLUENE, &ExactMatch).unwrap();
        assert_eq!(first.nodes(), second.nodes());
        assert_eq!(first.composite(), second.composite());
    }

    #[test]
    fn predicate_failure_names_edge_pair() {
        let a = chain("C", 2);
        let compat = FnCompatibility::new(
            |_: &aam_common::molecule::Atom,
             _: &aam_common::molecule::Atom|
             -> Result<bool, PredicateError> { Err("no valence model".into()) },
            |_: &aam_common::molecule::Bond,
             _: &aam_common::molecule::Bond|
             -> Result<bool, PredicateError> { Ok(true) },
        );
        let err = ResolutionGraph::build(&a, &a, &compat).unwrap_err();
        assert!(matches!(
            err,
            McsError::Construction {
                edge_a: 0,
                edge_b: 0,
                ..
            }
        ));
    }

    #[test]
    fn from_nodes_rejects_asymmetric_relations() {
        let mut a = ResolutionNode::new(Pairing::new(0, 0, Orientation::Parallel));
        let b = ResolutionNode::new(Pairing::new(1, 1, Orientation::Parallel));
        let mut ext = FixedBitSet::with_capacity(2);
        ext.insert(1);
        a.set_extension(ext);
        let err = ResolutionGraph::from_nodes(vec![a, b], CompositeList::new()).unwrap_err();
        assert!(matches!(err, McsError::InvalidResolutionGraph(_)));
    }

    #[test]
    fn from_nodes_rejects_self_relation() {
        let mut a = ResolutionNode::new(Pairing::new(0, 0, Orientation::Parallel));
        let mut forb = FixedBitSet::with_capacity(1);
        forb.insert(0);
        a.set_forbidden(forb);
        assert!(ResolutionGraph::from_nodes(vec![a], CompositeList::new()).is_err());
    }

    #[test]
    fn node_count_must_fit_node_ids() {
        let max = usize::try_from(u32::MAX).unwrap();
        assert!(check_addressable(0).is_ok());
        assert!(check_addressable(max + 1).is_ok());
        let nodes = max + 2;
        assert!(matches!(
            check_addressable(nodes),
            Err(McsError::TooManyNodes { nodes: n }) if n == nodes
        ));
    }
}
