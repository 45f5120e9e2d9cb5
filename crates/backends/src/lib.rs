//! scm-backends: `Backend` implementations for SCM circuit synthesis.
//!
//! The distilled specification treats real SAT/SMT/PB solvers as "external
//! collaborators" and puts them out of scope for the core. This crate
//! supplies the one backend this repository can honestly ship without
//! vendoring a third-party solver: [`BruteForceBackend`], a complete,
//! from-scratch CNF encoder plus DPLL search with unit propagation. It is
//! not a stub — every `Backend` operation is implemented for real — but it
//! is scoped to the small instance sizes this problem produces in practice
//! (single-digit word widths, a handful of adders); a production
//! deployment is expected to swap in a real solver adapter behind the same
//! trait.

mod cnf;
mod solver;

use std::time::Duration;

use scm_core::{Backend, CheckOutcome, VariableId};

use cnf::{forbid_number_clause, gate_clauses, unit_clause, Clause};
use solver::{SolveOutcome, Solver};

/// A from-scratch CNF + DPLL `Backend`. Every `Backend` primitive is
/// encoded via [`cnf::gate_clauses`] — an exhaustive truth-table-to-CNF
/// reduction — so there is exactly one place in this crate where gate
/// semantics are expressed, and it is obviously correct by construction.
pub struct BruteForceBackend {
    clauses: Vec<Clause>,
    max_var: u32,
    timeout: Option<Duration>,
    model: Option<Solver>,
}

impl BruteForceBackend {
    /// `timeout = None` means "run to completion" (the original's
    /// behavior when no `--timeout` is supplied).
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            clauses: Vec::new(),
            max_var: 0,
            timeout,
            model: None,
        }
    }

    fn push(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.clauses.extend(clauses);
    }
}

impl Default for BruteForceBackend {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Backend for BruteForceBackend {
    fn reset(&mut self) {
        self.clauses.clear();
        self.max_var = 0;
        self.model = None;
    }

    fn create_new_variable(&mut self, id: VariableId) {
        self.max_var = self.max_var.max(id.raw());
    }

    fn force_bit(&mut self, v: VariableId, k: bool) {
        self.clauses.push(unit_clause(v, k));
    }

    fn force_number(&mut self, vs: &[VariableId], k: u64) {
        for (bit, &v) in vs.iter().enumerate() {
            self.clauses.push(unit_clause(v, (k >> bit) & 1 == 1));
        }
    }

    fn forbid_number(&mut self, vs: &[VariableId], k: u64) {
        self.clauses.push(forbid_number_clause(vs, k));
    }

    fn create_1x1_equivalence(&mut self, x: VariableId, y: VariableId) {
        self.push(gate_clauses(&[x, y], |a| a[0] == a[1]));
    }

    fn create_2x1_mux(&mut self, a: VariableId, b: VariableId, s: VariableId, o: VariableId) {
        self.push(gate_clauses(&[a, b, s, o], |v| {
            let (a, b, s, o) = (v[0], v[1], v[2], v[3]);
            o == if s { b } else { a }
        }));
    }

    fn create_2x1_xor(&mut self, a: VariableId, b: VariableId, y: VariableId) {
        self.push(gate_clauses(&[a, b, y], |v| v[2] == (v[0] ^ v[1])));
    }

    fn create_add_sum(&mut self, a: VariableId, b: VariableId, c_in: VariableId, s: VariableId) {
        self.push(gate_clauses(&[a, b, c_in, s], |v| v[3] == (v[0] ^ v[1] ^ v[2])));
    }

    fn create_add_carry(
        &mut self,
        a: VariableId,
        b: VariableId,
        c_in: VariableId,
        c_out: VariableId,
    ) {
        self.push(gate_clauses(&[a, b, c_in, c_out], |v| {
            let majority = (v[0] as u8 + v[1] as u8 + v[2] as u8) >= 2;
            v[3] == majority
        }));
    }

    fn check(&mut self) -> CheckOutcome {
        tracing::debug!(
            variables = self.max_var,
            clauses = self.clauses.len(),
            "starting brute-force check"
        );
        let mut solver = Solver::new(self.max_var, self.clauses.clone(), self.timeout);
        let outcome = solver.solve();
        let result = match outcome {
            SolveOutcome::Sat => {
                self.model = Some(solver);
                CheckOutcome::sat()
            }
            SolveOutcome::Unsat => CheckOutcome::unsat(),
            SolveOutcome::TimedOut => CheckOutcome::timed_out(),
        };
        tracing::debug!(sat = result.sat, timed_out = result.timed_out, "check complete");
        result
    }

    fn get_result_value(&self, v: VariableId) -> bool {
        self.model
            .as_ref()
            .expect("get_result_value called before a satisfying check()")
            .value(v.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(backend: &mut BruteForceBackend, raw_hint: &mut u32) -> VariableId {
        // Tests don't have access to scm-core's allocator (ids are
        // crate-private to mint), so they drive the backend directly
        // through a small local allocator that mimics it: monotonically
        // increasing raw ids, declared via `create_new_variable`.
        *raw_hint += 1;
        let v = VariableId::from_raw(*raw_hint);
        backend.create_new_variable(v);
        v
    }

    #[test]
    fn solves_trivial_equivalence() {
        let mut backend = BruteForceBackend::default();
        let mut counter = 0;
        let x = var(&mut backend, &mut counter);
        let y = var(&mut backend, &mut counter);
        backend.force_bit(x, true);
        backend.create_1x1_equivalence(x, y);
        let outcome = backend.check();
        assert!(outcome.sat);
        assert!(backend.get_result_value(y));
    }

    #[test]
    fn detects_unsat() {
        let mut backend = BruteForceBackend::default();
        let mut counter = 0;
        let x = var(&mut backend, &mut counter);
        backend.force_bit(x, true);
        backend.force_bit(x, false);
        let outcome = backend.check();
        assert!(!outcome.sat);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn mux_selects_correct_operand() {
        let mut backend = BruteForceBackend::default();
        let mut counter = 0;
        let a = var(&mut backend, &mut counter);
        let b = var(&mut backend, &mut counter);
        let s = var(&mut backend, &mut counter);
        let o = var(&mut backend, &mut counter);
        backend.force_bit(a, false);
        backend.force_bit(b, true);
        backend.force_bit(s, true);
        backend.create_2x1_mux(a, b, s, o);
        let outcome = backend.check();
        assert!(outcome.sat);
        assert!(backend.get_result_value(o));
    }

    #[test]
    fn add_sum_and_carry_match_full_adder_truth_table() {
        for a_val in [false, true] {
            for b_val in [false, true] {
                for c_val in [false, true] {
                    let mut backend = BruteForceBackend::default();
                    let mut counter = 0;
                    let a = var(&mut backend, &mut counter);
                    let b = var(&mut backend, &mut counter);
                    let c = var(&mut backend, &mut counter);
                    let s = var(&mut backend, &mut counter);
                    let co = var(&mut backend, &mut counter);
                    backend.force_bit(a, a_val);
                    backend.force_bit(b, b_val);
                    backend.force_bit(c, c_val);
                    backend.create_add_sum(a, b, c, s);
                    backend.create_add_carry(a, b, c, co);
                    let outcome = backend.check();
                    assert!(outcome.sat);
                    let expected_sum = a_val ^ b_val ^ c_val;
                    let expected_carry = (a_val as u8 + b_val as u8 + c_val as u8) >= 2;
                    assert_eq!(backend.get_result_value(s), expected_sum);
                    assert_eq!(backend.get_result_value(co), expected_carry);
                }
            }
        }
    }

    #[test]
    fn forbid_number_excludes_value() {
        let mut backend = BruteForceBackend::default();
        let mut counter = 0;
        let bits: Vec<VariableId> = (0..2).map(|_| var(&mut backend, &mut counter)).collect();
        backend.forbid_number(&bits, 0b11);
        let outcome = backend.check();
        assert!(outcome.sat);
        let value = (backend.get_result_value(bits[0]) as u64) | ((backend.get_result_value(bits[1]) as u64) << 1);
        assert_ne!(value, 0b11);
    }
}
