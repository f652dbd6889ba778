//! Compatibility predicates deciding which atoms and bonds may correspond.
//!
//! The builder only ever asks two questions: may atom `a` of graph A map onto
//! atom `b` of graph B, and may bond `a` map onto bond `b`. Both answers are
//! fallible so an external chemistry model can report lookups it cannot
//! answer; a failure aborts the current molecule pair only.

use aam_common::MatchPolicy;
use aam_common::molecule::{Atom, Bond};

use crate::error::PredicateError;

/// Decides whether atoms and bonds of two graphs may correspond.
pub trait Compatibility<NA, EA, NB = NA, EB = EA> {
    /// May atom `a` of graph A map onto atom `b` of graph B?
    fn atoms(&self, a: &NA, b: &NB) -> Result<bool, PredicateError>;

    /// May bond `a` of graph A map onto bond `b` of graph B?
    fn bonds(&self, a: &EA, b: &EB) -> Result<bool, PredicateError>;
}

impl<T, NA, EA, NB, EB> Compatibility<NA, EA, NB, EB> for &T
where
    T: Compatibility<NA, EA, NB, EB> + ?Sized,
{
    fn atoms(&self, a: &NA, b: &NB) -> Result<bool, PredicateError> {
        Compatibility::<NA, EA, NB, EB>::atoms(*self, a, b)
    }

    fn bonds(&self, a: &EA, b: &EB) -> Result<bool, PredicateError> {
        Compatibility::<NA, EA, NB, EB>::bonds(*self, a, b)
    }
}

/// Atom and bond labels must be equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatch;

impl<N: PartialEq, E: PartialEq> Compatibility<N, E> for ExactMatch {
    fn atoms(&self, a: &N, b: &N) -> Result<bool, PredicateError> {
        Ok(a == b)
    }

    fn bonds(&self, a: &E, b: &E) -> Result<bool, PredicateError> {
        Ok(a == b)
    }
}

/// Atom labels must be equal; any bond may match any bond.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtomsOnly;

impl<N: PartialEq, E> Compatibility<N, E> for AtomsOnly {
    fn atoms(&self, a: &N, b: &N) -> Result<bool, PredicateError> {
        Ok(a == b)
    }

    fn bonds(&self, _: &E, _: &E) -> Result<bool, PredicateError> {
        Ok(true)
    }
}

/// Only element symbols are compared; charge, aromaticity and bond order are
/// ignored. Useful around a reaction centre where bond orders change.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementOnly;

impl Compatibility<Atom, Bond> for ElementOnly {
    fn atoms(&self, a: &Atom, b: &Atom) -> Result<bool, PredicateError> {
        Ok(a.element == b.element)
    }

    fn bonds(&self, _: &Bond, _: &Bond) -> Result<bool, PredicateError> {
        Ok(true)
    }
}

/// Shorthand for the molecule-model predicate used by the shared test cases.
type MoleculeCompat = dyn Compatibility<Atom, Bond>;

fn policy_predicate(policy: MatchPolicy) -> &'static MoleculeCompat {
    match policy {
        MatchPolicy::Exact => &ExactMatch,
        MatchPolicy::ElementOnly => &ElementOnly,
    }
}

impl Compatibility<Atom, Bond> for MatchPolicy {
    fn atoms(&self, a: &Atom, b: &Atom) -> Result<bool, PredicateError> {
        policy_predicate(*self).atoms(a, b)
    }

    fn bonds(&self, a: &Bond, b: &Bond) -> Result<bool, PredicateError> {
        policy_predicate(*self).bonds(a, b)
    }
}

/// Predicate built from two closures.
#[derive(Clone, Copy, Debug)]
pub struct FnCompatibility<FA, FB> {
    atom_fn: FA,
    bond_fn: FB,
}

impl<FA, FB> FnCompatibility<FA, FB> {
    /// Wrap an atom closure and a bond closure.
    pub const fn new(atom_fn: FA, bond_fn: FB) -> Self {
        Self { atom_fn, bond_fn }
    }
}

impl<NA, EA, NB, EB, FA, FB> Compatibility<NA, EA, NB, EB> for FnCompatibility<FA, FB>
where
    FA: Fn(&NA, &NB) -> Result<bool, PredicateError>,
    FB: Fn(&EA, &EB) -> Result<bool, PredicateError>,
{
    fn atoms(&self, a: &NA, b: &NB) -> Result<bool, PredicateError> {
        (self.atom_fn)(a, b)
    }

    fn bonds(&self, a: &EA, b: &EB) -> Result<bool, PredicateError> {
        (self.bond_fn)(a, b)
    }
}
