//! Shared test cases: maximum sizes, tie counts and deduplication.

mod common;

use aam_common::{
    ALL_TEST_CASES, BENZENE_SELF, BENZENE_TOLUENE, CYCLOHEXANE_HEXANE, Config, Dedupe,
    ESTER_HYDROLYSIS, ETHANOL_ACETALDEHYDE_EXACT, ETHANOL_ACETALDEHYDE_RELAXED, ETHANOL_SELF,
    NO_BONDS, PROPANE_BUTANE, TWO_FRAGMENTS, TWO_FRAGMENTS_CONNECTED, TestCase,
};
use rstest::rstest;

use common::{check_mappings, init_test_logger, run_case};

#[rstest]
#[case::ethanol_self(&*ETHANOL_SELF)]
#[case::benzene_self(&*BENZENE_SELF)]
#[case::benzene_toluene(&*BENZENE_TOLUENE)]
#[case::ethanol_acetaldehyde_exact(&*ETHANOL_ACETALDEHYDE_EXACT)]
#[case::ethanol_acetaldehyde_relaxed(&*ETHANOL_ACETALDEHYDE_RELAXED)]
#[case::propane_butane(&*PROPANE_BUTANE)]
#[case::ester_hydrolysis(&*ESTER_HYDROLYSIS)]
#[case::cyclohexane_hexane(&*CYCLOHEXANE_HEXANE)]
#[case::two_fragments(&*TWO_FRAGMENTS)]
#[case::two_fragments_connected(&*TWO_FRAGMENTS_CONNECTED)]
#[case::no_bonds(&*NO_BONDS)]
fn maximum_size(#[case] tc: &'static TestCase) {
    init_test_logger();
    let outcome = run_case(tc, None).unwrap();
    assert_with_context!(
        outcome.clique_size() == tc.expected_size,
        format!(
            "{}: expected {} bonds, got {}",
            tc.name,
            tc.expected_size,
            outcome.clique_size()
        )
    );
    assert_eq!(outcome.is_exhausted(), tc.expected_size == 0, "{}", tc.name);
    check_mappings(&outcome, tc.educt, tc.product).unwrap();
}

#[rstest]
fn tie_counts_match() {
    init_test_logger();
    let mut failures = Vec::new();
    for tc in ALL_TEST_CASES.iter() {
        let Some(expected) = tc.expected_solutions else {
            continue;
        };
        let config = Config {
            mode: aam_common::SolutionMode::All,
            ..tc.config.clone()
        };
        let outcome = match run_case(tc, Some(&config)) {
            Ok(outcome) => outcome,
            Err(err) => {
                failures.push(format!("{}: {}", tc.name, err));
                continue;
            }
        };
        if outcome.mappings().len() != expected {
            failures.push(format!(
                "{}: expected {} solutions, got {}",
                tc.name,
                expected,
                outcome.mappings().len()
            ));
        }
        if let Err(msg) = check_mappings(&outcome, tc.educt, tc.product) {
            failures.push(format!("{}: {}", tc.name, msg));
        }
    }
    if !failures.is_empty() {
        panic!("{} test cases failed:\n - {}", failures.len(), failures.join("\n - "));
    }
}

#[rstest]
#[case::benzene_automorphisms(&*BENZENE_SELF, 1)]
#[case::propane_in_butane(&*PROPANE_BUTANE, 2)]
#[case::single_solution(&*ESTER_HYDROLYSIS, 1)]
fn dedupe_atom_sets(#[case] tc: &'static TestCase, #[case] expected: usize) {
    init_test_logger();
    let config = Config::builder()
        .all_solutions()
        .dedupe(Dedupe::AtomSets)
        .build();
    let outcome = run_case(tc, Some(&config)).unwrap();
    assert_eq!(outcome.mappings().len(), expected, "{}", tc.name);
}

#[rstest]
#[case::benzene_self(&*BENZENE_SELF)]
#[case::propane_butane(&*PROPANE_BUTANE)]
fn dedupe_mapping_keeps_distinct_maps(#[case] tc: &'static TestCase) {
    init_test_logger();
    let all = run_case(tc, Some(&Config::all())).unwrap();
    let config = Config::builder()
        .all_solutions()
        .dedupe(Dedupe::Mapping)
        .build();
    let deduped = run_case(tc, Some(&config)).unwrap();
    assert_eq!(deduped.mappings().len(), all.mappings().len(), "{}", tc.name);
}
