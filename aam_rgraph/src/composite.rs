//! The composite list: every candidate atom pair generated while building the
//! resolution graph, tagged with the node that produced it.

use std::collections::HashMap;

use aam_common::NodeId;

/// One `(atomA, atomB, nodeID)` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triplet {
    /// Atom index in graph A.
    pub atom_a: usize,
    /// Atom index in graph B.
    pub atom_b: usize,
    /// Node that induced the pair.
    pub node: NodeId,
}

impl Triplet {
    /// Creates a triplet.
    pub const fn new(atom_a: usize, atom_b: usize, node: NodeId) -> Self {
        Self {
            atom_a,
            atom_b,
            node,
        }
    }
}

impl From<(usize, usize, u32)> for Triplet {
    fn from((atom_a, atom_b, node): (usize, usize, u32)) -> Self {
        Self::new(atom_a, atom_b, NodeId::new(node))
    }
}

/// Ordered, append-only sequence of triplets.
///
/// The builder appends in node-insertion order; nothing mutates the list once
/// the resolution graph is finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeList {
    items: Vec<Triplet>,
}

impl CompositeList {
    /// An empty list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// A list with room for `n` triplets.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            items: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, triplet: Triplet) {
        self.items.push(triplet);
    }

    /// Number of triplets.
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no triplets.
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The triplets in enumeration order.
    pub fn as_slice(&self) -> &[Triplet] {
        &self.items
    }

    /// Iterate in enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triplet> {
        self.items.iter()
    }

    /// Build the node → positions index used by extraction.
    pub fn index(&self) -> CompositeIndex<'_> {
        CompositeIndex::build(self)
    }
}

impl FromIterator<Triplet> for CompositeList {
    fn from_iter<I: IntoIterator<Item = Triplet>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompositeList {
    type Item = &'a Triplet;
    type IntoIter = std::slice::Iter<'a, Triplet>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Positions of each node's triplets, in enumeration order.
#[derive(Clone, Debug)]
pub struct CompositeIndex<'a> {
    list: &'a CompositeList,
    by_node: HashMap<NodeId, Vec<usize>>,
}

impl<'a> CompositeIndex<'a> {
    /// Index `list` in one pass.
    pub fn build(list: &'a CompositeList) -> Self {
        let mut by_node: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (pos, triplet) in list.iter().enumerate() {
            by_node.entry(triplet.node).or_default().push(pos);
        }
        Self { list, by_node }
    }

    /// The indexed list.
    pub const fn list(&self) -> &'a CompositeList {
        self.list
    }

    /// True if `node` has at least one triplet.
    pub fn contains(&self, node: NodeId) -> bool {
        self.by_node.contains_key(&node)
    }

    /// Triplets produced by `node`, in enumeration order, or `None` if the node
    /// never appears in the list.
    pub fn entries(&self, node: NodeId) -> Option<impl Iterator<Item = &'a Triplet> + '_> {
        let items = self.list.as_slice();
        self.by_node
            .get(&node)
            .map(move |positions| positions.iter().map(move |&pos| &items[pos]))
    }
}
