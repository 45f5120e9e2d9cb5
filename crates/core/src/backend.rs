use crate::variable::VariableId;

/// Outcome of one `Backend::check` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub sat: bool,
    pub timed_out: bool,
}

impl CheckOutcome {
    pub fn sat() -> Self {
        Self {
            sat: true,
            timed_out: false,
        }
    }

    pub fn unsat() -> Self {
        Self {
            sat: false,
            timed_out: false,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            sat: false,
            timed_out: true,
        }
    }
}

/// The abstract solver capability the constraint emitter targets.
///
/// No constraint semantics above this trait assume a particular encoding;
/// everything `scm-core` emits is expressed purely in terms of these gate
/// primitives plus bit-pinning/forbidding. A concrete SAT, SMT, or
/// pseudo-boolean backend implements this trait once; `scm-core` never
/// special-cases which backend it is talking to.
///
/// Every method here is mandatory — unlike the throwing-by-default base
/// class in the original implementation, there is no "is this overridden"
/// question at runtime; a type that implements `Backend` has necessarily
/// provided every operation.
pub trait Backend {
    /// Discard all previously declared variables and constraints.
    fn reset(&mut self);

    /// Record a newly allocated variable. May be a no-op for backends that
    /// don't require explicit declaration.
    fn create_new_variable(&mut self, id: VariableId);

    /// Pin `v` to the boolean `k`.
    fn force_bit(&mut self, v: VariableId, k: bool);

    /// Pin the LSB-first bit-vector `vs` to the unsigned integer `k`.
    fn force_number(&mut self, vs: &[VariableId], k: u64);

    /// Disallow the LSB-first bit-vector `vs` from equaling `k`.
    fn forbid_number(&mut self, vs: &[VariableId], k: u64);

    /// `x <-> y`.
    fn create_1x1_equivalence(&mut self, x: VariableId, y: VariableId);

    /// `o = a` when `s = 0`, `o = b` when `s = 1`.
    fn create_2x1_mux(&mut self, a: VariableId, b: VariableId, s: VariableId, o: VariableId);

    /// `y = a XOR b`.
    fn create_2x1_xor(&mut self, a: VariableId, b: VariableId, y: VariableId);

    /// `s = a XOR b XOR c_in`.
    fn create_add_sum(&mut self, a: VariableId, b: VariableId, c_in: VariableId, s: VariableId);

    /// `c_out = majority(a, b, c_in)`.
    fn create_add_carry(
        &mut self,
        a: VariableId,
        b: VariableId,
        c_in: VariableId,
        c_out: VariableId,
    );

    /// Run the solver under the backend's configured timeout.
    fn check(&mut self) -> CheckOutcome;

    /// Read back the value of `v` under the last satisfying assignment.
    ///
    /// Only meaningful after `check()` returned `sat = true`.
    fn get_result_value(&self, v: VariableId) -> bool;
}
