//! scm-search: the outer search loop and independent verifier.
//!
//! §4.4 and §4.5 of the data model, wired against `scm-core`'s `Backend`
//! trait: try `n = 1, 2, 3, …` adders until a backend reports SAT or times
//! out, then independently replay and verify the decoded circuit before
//! handing it back to the caller.

mod driver;
mod error;
mod verify;

pub use driver::{solve, NodeSolution, Solution};
pub use error::SearchError;
pub use verify::VerifyError;

#[cfg(test)]
mod tests {
    use super::*;
    use scm_backends::BruteForceBackend;

    #[test]
    fn trivial_constant_one_needs_no_backend() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(1, None, true, &mut backend).unwrap();
        assert!(solution.found);
        assert_eq!(solution.num_adders, 0);
        assert_eq!(solution.output_values, vec![1]);
    }

    #[test]
    fn even_constant_extracts_output_shift() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(12, None, true, &mut backend).unwrap();
        assert!(solution.found);
        // 12 = 3 * 2^2, and 3 needs exactly one adder.
        assert_eq!(solution.output_shift, 2);
        assert_eq!(solution.num_adders, 1);
    }

    #[test]
    fn three_needs_exactly_one_adder() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(3, None, true, &mut backend).unwrap();
        assert!(solution.found);
        assert_eq!(solution.num_adders, 1);
        assert_eq!(solution.output_values, vec![1, 3]);
    }

    #[test]
    fn seven_needs_exactly_one_adder() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(7, None, true, &mut backend).unwrap();
        assert!(solution.found);
        assert_eq!(solution.num_adders, 1);
        assert_eq!(*solution.output_values.last().unwrap(), 7);
    }

    #[test]
    fn five_needs_exactly_one_adder() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(5, None, true, &mut backend).unwrap();
        assert!(solution.found);
        assert_eq!(solution.num_adders, 1);
        assert_eq!(*solution.output_values.last().unwrap(), 5);
    }

    #[test]
    fn forty_five_needs_two_adders() {
        let mut backend = BruteForceBackend::default();
        let solution = solve(45, None, true, &mut backend).unwrap();
        assert!(solution.found);
        assert_eq!(solution.num_adders, 2);
        assert_eq!(*solution.output_values.last().unwrap(), 45);
    }
}
