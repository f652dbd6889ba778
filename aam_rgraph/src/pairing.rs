//! One admissible correspondence between an edge of graph A and an edge of
//! graph B.

use std::fmt;

/// How the endpoints of edge A land on the endpoints of edge B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// source→source, target→target.
    Parallel,
    /// source→target, target→source.
    Crossed,
}

impl Orientation {
    /// Both orientations, in the order the builder tries them.
    pub const BOTH: [Self; 2] = [Self::Parallel, Self::Crossed];
}

/// Immutable record pairing edge `id1` of graph A with edge `id2` of graph B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pairing {
    id1: usize,
    id2: usize,
    orientation: Orientation,
}

impl Pairing {
    /// Creates a pairing.
    pub const fn new(id1: usize, id2: usize, orientation: Orientation) -> Self {
        Self {
            id1,
            id2,
            orientation,
        }
    }

    /// Edge index in graph A.
    pub const fn id1(&self) -> usize {
        self.id1
    }

    /// Edge index in graph B.
    pub const fn id2(&self) -> usize {
        self.id2
    }

    /// Endpoint orientation.
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The atom pairs this pairing induces, given the `(source, target)` atom
    /// indices of its two edges.
    pub const fn assignments(
        &self,
        ends_a: (usize, usize),
        ends_b: (usize, usize),
    ) -> [(usize, usize); 2] {
        match self.orientation {
            Orientation::Parallel => [(ends_a.0, ends_b.0), (ends_a.1, ends_b.1)],
            Orientation::Crossed => [(ends_a.0, ends_b.1), (ends_a.1, ends_b.0)],
        }
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.orientation {
            Orientation::Parallel => "=",
            Orientation::Crossed => "x",
        };
        write!(f, "e{}{}e{}", self.id1, arrow, self.id2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_assignments() {
        let p = Pairing::new(0, 1, Orientation::Parallel);
        assert_eq!(p.assignments((3, 4), (7, 8)), [(3, 7), (4, 8)]);
    }

    #[test]
    fn crossed_assignments() {
        let p = Pairing::new(0, 1, Orientation::Crossed);
        assert_eq!(p.assignments((3, 4), (7, 8)), [(3, 8), (4, 7)]);
    }

    #[test]
    fn display() {
        assert_eq!(Pairing::new(2, 5, Orientation::Crossed).to_string(), "e2xe5");
    }
}
