use contracts::*;
use std::fmt;
use std::hash::Hash;
use std::num::TryFromIntError;

/// Identifier of a resolution-graph node.
///
/// Node ids are dense: the builder hands them out in insertion order, so an id
/// doubles as the bit position of the node in every extension/forbidden set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// The underlying raw integer index.
    inner: u32,
}

impl NodeId {
    /// Creates a node id from a raw integer.
    #[ensures(ret.inner == id)]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the id as a usize for bitset and array access.
    #[ensures(ret == self.inner as usize)]
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.inner)
    }
}

/// Fails for indices past `u32::MAX`.
impl TryFrom<usize> for NodeId {
    type Error = TryFromIntError;

    #[inline]
    fn try_from(id: usize) -> Result<Self, Self::Error> {
        u32::try_from(id).map(Self::new)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.inner as Self
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.inner
    }
}
