//! Resolution-graph node: a pairing plus its precomputed relation to every
//! other node.

use std::fmt;

use aam_common::NodeId;
use fixedbitset::FixedBitSet;
use itertools::Itertools;

use crate::pairing::Pairing;

/// A node of the resolution graph.
///
/// `extension` holds the nodes compatible with this one, `forbidden` the nodes
/// mutually exclusive with it. Both are indexed by [`NodeId`]. Nodes carry no
/// search state; once the builder has assigned their relation sets they are
/// only ever read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionNode {
    pairing: Pairing,
    extension: FixedBitSet,
    forbidden: FixedBitSet,
}

impl ResolutionNode {
    /// Creates a node with empty relation sets.
    #[contracts::debug_ensures(ret.extension.count_ones(..) == 0)]
    #[contracts::debug_ensures(ret.forbidden.count_ones(..) == 0)]
    pub fn new(pairing: Pairing) -> Self {
        Self {
            pairing,
            extension: FixedBitSet::new(),
            forbidden: FixedBitSet::new(),
        }
    }

    /// Replaces the whole extension set.
    pub fn set_extension(&mut self, extension: FixedBitSet) {
        self.extension = extension;
    }

    /// Replaces the whole forbidden set.
    pub fn set_forbidden(&mut self, forbidden: FixedBitSet) {
        self.forbidden = forbidden;
    }

    /// The edge pairing this node stands for.
    pub const fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    /// Nodes compatible with this one.
    pub const fn extension(&self) -> &FixedBitSet {
        &self.extension
    }

    /// Nodes that may not appear in the same solution as this one.
    pub const fn forbidden(&self) -> &FixedBitSet {
        &self.forbidden
    }

    /// True if `other` is in the extension set.
    pub fn is_compatible_with(&self, other: NodeId) -> bool {
        self.extension.contains(other.as_usize())
    }

    /// True if `other` is in the forbidden set.
    pub fn forbids(&self, other: NodeId) -> bool {
        self.forbidden.contains(other.as_usize())
    }
}

impl fmt::Display for ResolutionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "id1 : {}, id2 : {}",
            self.pairing.id1(),
            self.pairing.id2()
        )?;
        writeln!(f, "extension : {{{}}}", self.extension.ones().join(", "))?;
        write!(f, "forbidden : {{{}}}", self.forbidden.ones().join(", "))
    }
}
