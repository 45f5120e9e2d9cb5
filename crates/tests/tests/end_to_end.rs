//! End-to-end coverage across `scm-primitives`, `scm-core`,
//! `scm-backends`, and `scm-search` together: every scenario here drives
//! the full stack exactly as `scm-cli` would, through the public
//! `scm_search::solve` entry point.

use scm_backends::BruteForceBackend;
use scm_core::Attempt;
use scm_primitives::BitWidthPlan;

#[test]
fn constant_one_is_trivial_and_needs_no_adders() {
    let mut backend = BruteForceBackend::default();
    let solution = scm_search::solve(1, None, true, &mut backend).unwrap();
    assert!(solution.found);
    assert_eq!(solution.num_adders, 0);
    assert_eq!(solution.output_values, vec![1]);
}

#[test]
fn even_constants_reduce_to_their_odd_core() {
    // 2 = 1 * 2^1, trivially solved once the trailing shift is stripped.
    let mut backend = BruteForceBackend::default();
    let solution = scm_search::solve(2, None, true, &mut backend).unwrap();
    assert!(solution.found);
    assert_eq!(solution.output_shift, 1);
    assert_eq!(solution.num_adders, 0);
}

#[test]
fn three_five_and_seven_need_exactly_one_adder() {
    for c in [3u64, 5, 7] {
        let mut backend = BruteForceBackend::default();
        let solution = scm_search::solve(c, None, true, &mut backend).unwrap();
        assert!(solution.found, "C = {c} should be solvable");
        assert_eq!(solution.num_adders, 1, "C = {c} should need one adder");
        assert_eq!(*solution.output_values.last().unwrap(), c);
    }
}

#[test]
fn forty_five_needs_two_adders() {
    let mut backend = BruteForceBackend::default();
    let solution = scm_search::solve(45, None, true, &mut backend).unwrap();
    assert!(solution.found);
    assert_eq!(solution.num_adders, 2);
    assert_eq!(*solution.output_values.last().unwrap(), 45);
}

#[test]
fn twenty_three_is_solvable_within_a_small_adder_budget() {
    let mut backend = BruteForceBackend::default();
    let solution = scm_search::solve(23, None, true, &mut backend).unwrap();
    assert!(solution.found);
    assert!(solution.num_adders <= 3);
    assert_eq!(*solution.output_values.last().unwrap(), 23);
}

#[test]
fn every_node_in_a_solved_circuit_has_a_decoded_counterpart() {
    let mut backend = BruteForceBackend::default();
    let solution = scm_search::solve(45, None, true, &mut backend).unwrap();
    assert_eq!(solution.nodes.len(), solution.num_adders as usize);
    assert_eq!(solution.output_values.len(), solution.num_adders as usize + 1);
    for node in &solution.nodes {
        assert!(node.output_value <= (1u64 << 32));
    }
}

#[test]
fn constructing_zero_adders_directly_is_rejected() {
    let plan = BitWidthPlan::new(9);
    let mut backend = BruteForceBackend::default();
    let err = Attempt::construct(&plan, 0, &mut backend).unwrap_err();
    assert!(matches!(err, scm_core::CoreError::InvalidNodeCount { .. }));
}

#[test]
fn a_single_adder_is_provably_insufficient_for_forty_five() {
    // 45 needs two adders (per the scenario above); confirm the n = 1
    // attempt is UNSAT rather than merely unexplored.
    let plan = BitWidthPlan::new(45);
    let mut backend = BruteForceBackend::default();
    let attempt = Attempt::construct(&plan, 1, &mut backend).unwrap();
    let (outcome, decoded) = attempt.check_and_decode(&mut backend).unwrap();
    assert!(!outcome.sat);
    assert!(decoded.is_none());
}
