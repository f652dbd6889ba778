//! Common test cases shared by the workspace crates.
//!
//! Each case pairs an educt with a product, names the compatibility policy to
//! use and records the expected maximum clique size (number of matched bonds)
//! and, where it is pinned, the number of degenerate maximum solutions.

use crate::config::Config;
use crate::molecule::{Atom, BondOrder, Molecule, chain, molecule, ring};

/// Which compatibility predicate a test case expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Atom and bond labels must be equal.
    Exact,
    /// Only element symbols must be equal; bond orders are ignored.
    ElementOnly,
}

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// The configuration for the search.
    pub config: Config,
    /// Compatibility policy.
    pub policy: MatchPolicy,
    /// Graph A.
    pub educt: &'static Molecule,
    /// Graph B.
    pub product: &'static Molecule,
    /// Expected size of the maximum clique.
    pub expected_size: usize,
    /// Expected number of maximum cliques, when collected with `Config::all()`.
    pub expected_solutions: Option<usize>,
}

// #####################
// MOLECULES
// #####################
lazy_static::lazy_static! {
    /// C-C-O
    pub static ref ETHANOL: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("O")],
        &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Single)],
    );
    /// C-C=O
    pub static ref ACETALDEHYDE: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("O")],
        &[(0, 1, BondOrder::Single), (1, 2, BondOrder::Double)],
    );
    pub static ref PROPANE: Molecule = chain("C", 3);
    pub static ref BUTANE: Molecule = chain("C", 4);
    pub static ref HEXANE: Molecule = chain("C", 6);
    pub static ref CYCLOHEXANE: Molecule = ring("C", 6, BondOrder::Single);
    pub static ref BENZENE: Molecule = ring("C", 6, BondOrder::Aromatic);
    /// Benzene ring plus an aliphatic methyl on atom 0.
    pub static ref TOLUENE: Molecule = {
        let mut atoms = vec![Atom::aromatic("C"); 6];
        atoms.push(Atom::new("C"));
        let mut bonds: Vec<_> = (0..6).map(|i| (i, (i + 1) % 6, BondOrder::Aromatic)).collect();
        bonds.push((0, 6, BondOrder::Single));
        molecule(&atoms, &bonds)
    };
    /// CC(=O)OC
    pub static ref METHYL_ACETATE: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("O"), Atom::new("O"), Atom::new("C")],
        &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Double),
            (1, 3, BondOrder::Single),
            (3, 4, BondOrder::Single),
        ],
    );
    /// CC(=O)O
    pub static ref ACETIC_ACID: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("O"), Atom::new("O")],
        &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Double),
            (1, 3, BondOrder::Single),
        ],
    );
    /// C-C-N-O-O: shares two separate fragments with `CCSOO`.
    pub static ref CCNOO: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("N"), Atom::new("O"), Atom::new("O")],
        &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Single),
            (2, 3, BondOrder::Single),
            (3, 4, BondOrder::Single),
        ],
    );
    /// C-C-S-O-O
    pub static ref CCSOO: Molecule = molecule(
        &[Atom::new("C"), Atom::new("C"), Atom::new("S"), Atom::new("O"), Atom::new("O")],
        &[
            (0, 1, BondOrder::Single),
            (1, 2, BondOrder::Single),
            (2, 3, BondOrder::Single),
            (3, 4, BondOrder::Single),
        ],
    );
    /// Lone nitrogen, no bonds.
    pub static ref AMMONIA: Molecule = molecule(&[Atom::new("N")], &[]);
}

// #####################
// TEST CASES
// #####################
lazy_static::lazy_static! {
    pub static ref ETHANOL_SELF: TestCase = TestCase {
        name: "ethanol_self",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*ETHANOL,
        product: &*ETHANOL,
        expected_size: 2,
        expected_solutions: Some(1),
    };
    pub static ref BENZENE_SELF: TestCase = TestCase {
        name: "benzene_self",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*BENZENE,
        product: &*BENZENE,
        expected_size: 6,
        expected_solutions: Some(12),
    };
    pub static ref BENZENE_TOLUENE: TestCase = TestCase {
        name: "benzene_toluene",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*BENZENE,
        product: &*TOLUENE,
        expected_size: 6,
        expected_solutions: Some(12),
    };
    pub static ref ETHANOL_ACETALDEHYDE_EXACT: TestCase = TestCase {
        name: "ethanol_acetaldehyde_exact",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*ETHANOL,
        product: &*ACETALDEHYDE,
        expected_size: 1,
        expected_solutions: Some(2),
    };
    pub static ref ETHANOL_ACETALDEHYDE_RELAXED: TestCase = TestCase {
        name: "ethanol_acetaldehyde_relaxed",
        config: Config::default(),
        policy: MatchPolicy::ElementOnly,
        educt: &*ETHANOL,
        product: &*ACETALDEHYDE,
        expected_size: 2,
        expected_solutions: Some(1),
    };
    pub static ref PROPANE_BUTANE: TestCase = TestCase {
        name: "propane_butane",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*PROPANE,
        product: &*BUTANE,
        expected_size: 2,
        expected_solutions: Some(4),
    };
    pub static ref ESTER_HYDROLYSIS: TestCase = TestCase {
        name: "ester_hydrolysis",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*METHYL_ACETATE,
        product: &*ACETIC_ACID,
        expected_size: 3,
        expected_solutions: Some(1),
    };
    pub static ref CYCLOHEXANE_HEXANE: TestCase = TestCase {
        name: "cyclohexane_hexane",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*CYCLOHEXANE,
        product: &*HEXANE,
        expected_size: 5,
        expected_solutions: None,
    };
    pub static ref TWO_FRAGMENTS: TestCase = TestCase {
        name: "two_fragments",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*CCNOO,
        product: &*CCSOO,
        expected_size: 2,
        expected_solutions: None,
    };
    pub static ref TWO_FRAGMENTS_CONNECTED: TestCase = TestCase {
        name: "two_fragments_connected",
        config: Config::builder().connected().build(),
        policy: MatchPolicy::Exact,
        educt: &*CCNOO,
        product: &*CCSOO,
        expected_size: 1,
        expected_solutions: None,
    };
    pub static ref NO_BONDS: TestCase = TestCase {
        name: "no_bonds",
        config: Config::default(),
        policy: MatchPolicy::Exact,
        educt: &*AMMONIA,
        product: &*ETHANOL,
        expected_size: 0,
        expected_solutions: Some(0),
    };

    pub static ref ALL_TEST_CASES: Vec<&'static TestCase> = vec![
        &*ETHANOL_SELF,
        &*BENZENE_SELF,
        &*BENZENE_TOLUENE,
        &*ETHANOL_ACETALDEHYDE_EXACT,
        &*ETHANOL_ACETALDEHYDE_RELAXED,
        &*PROPANE_BUTANE,
        &*ESTER_HYDROLYSIS,
        &*CYCLOHEXANE_HEXANE,
        &*TWO_FRAGMENTS,
        &*TWO_FRAGMENTS_CONNECTED,
        &*NO_BONDS,
    ];
}
