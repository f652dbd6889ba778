//! Shared helpers for the `aam_rgraph` integration tests.
#![allow(dead_code)]

use std::sync::OnceLock;

use aam_common::molecule::Molecule;
use aam_common::{Config, TestCase};
use aam_rgraph::{McsError, McsOutcome, find_mcs};

/// Assert that a condition holds, with detailed error message
#[macro_export]
macro_rules! assert_with_context {
    ($cond:expr, $context:expr) => {
        if !$cond {
            panic!(
                "Assertion failed: {}\nContext: {}",
                stringify!($cond),
                $context
            );
        }
    };
}

/// Assert that an invariant holds
#[macro_export]
macro_rules! assert_invariant {
    ($cond:expr, $invariant_name:expr) => {
        if !$cond {
            panic!(
                "Invariant violated: {}\nCondition: {}",
                $invariant_name,
                stringify!($cond)
            );
        }
    };
}

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Run a test case with its own configuration, or with `config` if given.
pub fn run_case(tc: &TestCase, config: Option<&Config>) -> Result<McsOutcome, McsError> {
    let config = config.unwrap_or(&tc.config);
    find_mcs(tc.educt, tc.product, &tc.policy, config)
}

/// Checks every mapping of `outcome` against the two molecules:
/// atom indices in range, element labels agree, the map is injective, the
/// flat form covers exactly the map's pairs and holds two pairs per bond.
pub fn check_mappings(outcome: &McsOutcome, a: &Molecule, b: &Molecule) -> Result<(), String> {
    for (k, m) in outcome.mappings().iter().enumerate() {
        if m.flat().len() != 4 * outcome.clique_size() {
            return Err(format!(
                "mapping {k}: flat has {} values for {} bonds",
                m.flat().len(),
                outcome.clique_size()
            ));
        }
        let mut flat_pairs: Vec<(usize, usize)> =
            m.flat().chunks_exact(2).map(|p| (p[0], p[1])).collect();
        flat_pairs.sort_unstable();
        flat_pairs.dedup();
        let map_pairs: Vec<(usize, usize)> = m.map().iter().map(|(&x, &y)| (x, y)).collect();
        if flat_pairs != map_pairs {
            return Err(format!("mapping {k}: flat and map forms disagree"));
        }

        let mut images: Vec<usize> = m.map().values().copied().collect();
        images.sort_unstable();
        images.dedup();
        if images.len() != m.map().len() {
            return Err(format!("mapping {k}: two atoms share an image"));
        }

        for (&x, &y) in m.map() {
            if x >= a.node_count() || y >= b.node_count() {
                return Err(format!("mapping {k}: pair ({x}, {y}) out of range"));
            }
            let (ea, eb) = (a.raw_nodes()[x].weight.element, b.raw_nodes()[y].weight.element);
            if ea != eb {
                return Err(format!("mapping {k}: {ea} mapped onto {eb}"));
            }
        }
    }
    Ok(())
}
