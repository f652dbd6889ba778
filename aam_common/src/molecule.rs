//! Minimal labeled molecule model.
//!
//! The MCS core treats graphs as opaque beyond identity and a compatibility
//! predicate. This model exists so the default predicates and the shared test
//! cases have something concrete to work with; real pipelines bring their own
//! atom and bond types.

use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

/// A labeled atom: element symbol, formal charge and aromaticity flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    /// Element symbol, e.g. `"C"`.
    pub element: &'static str,
    /// Formal charge.
    pub charge: i8,
    /// Whether the atom is part of an aromatic system.
    pub aromatic: bool,
}

impl Atom {
    /// A neutral aliphatic atom.
    pub const fn new(element: &'static str) -> Self {
        Self {
            element,
            charge: 0,
            aromatic: false,
        }
    }

    /// A neutral aromatic atom.
    pub const fn aromatic(element: &'static str) -> Self {
        Self {
            element,
            charge: 0,
            aromatic: true,
        }
    }

    /// Same atom with the given formal charge.
    pub const fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.aromatic {
            write!(f, "{}", self.element.to_ascii_lowercase())?;
        } else {
            write!(f, "{}", self.element)?;
        }
        match self.charge {
            0 => Ok(()),
            c if c > 0 => write!(f, "+{c}"),
            c => write!(f, "{c}"),
        }
    }
}

/// Bond order label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BondOrder {
    /// Single bond.
    Single,
    /// Double bond.
    Double,
    /// Triple bond.
    Triple,
    /// Aromatic bond.
    Aromatic,
}

/// A labeled bond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bond {
    /// The bond order.
    pub order: BondOrder,
}

impl Bond {
    /// A bond of the given order.
    pub const fn new(order: BondOrder) -> Self {
        Self { order }
    }
}

/// A molecule is an undirected labeled graph.
pub type Molecule = UnGraph<Atom, Bond>;

/// Build a molecule from atoms and `(from, to, order)` bond triples.
///
/// Bond endpoints index into `atoms`. Out-of-range endpoints panic, like
/// `petgraph` itself; this helper is for fixtures, not for parsing input.
pub fn molecule(atoms: &[Atom], bonds: &[(usize, usize, BondOrder)]) -> Molecule {
    let mut graph = Molecule::with_capacity(atoms.len(), bonds.len());
    let indices: Vec<NodeIndex> = atoms.iter().map(|a| graph.add_node(*a)).collect();
    for &(from, to, order) in bonds {
        graph.add_edge(indices[from], indices[to], Bond::new(order));
    }
    graph
}

/// An unbranched chain of `n` aliphatic atoms of one element joined by single bonds.
pub fn chain(element: &'static str, n: usize) -> Molecule {
    let atoms = vec![Atom::new(element); n];
    let bonds: Vec<_> = (1..n).map(|i| (i - 1, i, BondOrder::Single)).collect();
    molecule(&atoms, &bonds)
}

/// A ring of `n` atoms of one element, all bonds of `order`.
pub fn ring(element: &'static str, n: usize, order: BondOrder) -> Molecule {
    let atom = if order == BondOrder::Aromatic {
        Atom::aromatic(element)
    } else {
        Atom::new(element)
    };
    let atoms = vec![atom; n];
    let bonds: Vec<_> = (0..n).map(|i| (i, (i + 1) % n, order)).collect();
    molecule(&atoms, &bonds)
}
