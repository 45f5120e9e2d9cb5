//! scm-core: the problem construction engine for SCM circuit synthesis.
//!
//! This is "the core" — the data model of the parametric adder circuit, the
//! variable allocator, and the constraint emitter that targets an abstract
//! [`Backend`] capability. Nothing here assumes a particular SAT/SMT/PB
//! encoding; concrete backends live in `scm-backends`, and the outer search
//! loop lives in `scm-search`.

mod allocator;
mod attempt;
mod backend;
mod decode;
mod emitter;
mod error;
mod layout;
mod variable;

pub use allocator::Allocator;
pub use attempt::Attempt;
pub use backend::{Backend, CheckOutcome};
pub use decode::{decode, DecodedCircuit, DecodedNode};
pub use emitter::Emitter;
pub use error::CoreError;
pub use layout::{AdderNodeWires, PerDirection, SelectWires, WireTables};
pub use variable::VariableId;

#[cfg(test)]
mod tests {
    use super::*;
    use scm_primitives::BitWidthPlan;
    use std::collections::HashMap;

    /// A minimal in-memory `Backend` for unit-testing allocation/emission
    /// shape without a real solver: it just records what it's told and
    /// answers `check()` with a fixed, injected assignment.
    #[derive(Default)]
    struct RecordingBackend {
        declared: Vec<VariableId>,
        forced_bits: HashMap<VariableId, bool>,
        assignment: HashMap<VariableId, bool>,
        mux_count: usize,
        xor_count: usize,
        sum_count: usize,
        carry_count: usize,
    }

    impl Backend for RecordingBackend {
        fn reset(&mut self) {
            self.declared.clear();
            self.forced_bits.clear();
        }
        fn create_new_variable(&mut self, id: VariableId) {
            self.declared.push(id);
        }
        fn force_bit(&mut self, v: VariableId, k: bool) {
            self.forced_bits.insert(v, k);
        }
        fn force_number(&mut self, vs: &[VariableId], k: u64) {
            for (i, v) in vs.iter().enumerate() {
                self.forced_bits.insert(*v, (k >> i) & 1 == 1);
            }
        }
        fn forbid_number(&mut self, _vs: &[VariableId], _k: u64) {}
        fn create_1x1_equivalence(&mut self, _x: VariableId, _y: VariableId) {}
        fn create_2x1_mux(&mut self, _a: VariableId, _b: VariableId, _s: VariableId, _o: VariableId) {
            self.mux_count += 1;
        }
        fn create_2x1_xor(&mut self, _a: VariableId, _b: VariableId, _y: VariableId) {
            self.xor_count += 1;
        }
        fn create_add_sum(&mut self, _a: VariableId, _b: VariableId, _c_in: VariableId, _s: VariableId) {
            self.sum_count += 1;
        }
        fn create_add_carry(
            &mut self,
            _a: VariableId,
            _b: VariableId,
            _c_in: VariableId,
            _c_out: VariableId,
        ) {
            self.carry_count += 1;
        }
        fn check(&mut self) -> CheckOutcome {
            CheckOutcome::unsat()
        }
        fn get_result_value(&self, v: VariableId) -> bool {
            self.assignment.get(&v).copied().unwrap_or(false)
        }
    }

    #[test]
    fn allocate_declares_every_variable_exactly_once() {
        let plan = BitWidthPlan::new(45);
        let mut backend = RecordingBackend::default();
        let mut allocator = Allocator::new(&plan);
        let tables = allocator.allocate(&plan, 2, &mut backend);

        let declared: std::collections::HashSet<_> = backend.declared.iter().copied().collect();
        assert_eq!(declared.len(), backend.declared.len(), "no id declared twice");

        // constant_zero forced to 0 at allocation time.
        assert_eq!(backend.forced_bits.get(&tables.constant_zero), Some(&false));

        // node 1 has no select machinery; node 2 does.
        assert!(tables.node(1).unwrap().select.is_none());
        assert!(tables.node(2).unwrap().select.is_some());
    }

    #[test]
    fn emit_produces_nonzero_constraints_and_covers_every_node() {
        let plan = BitWidthPlan::new(23);
        let mut backend = RecordingBackend::default();
        let attempt = Attempt::construct(&plan, 2, &mut backend).unwrap();
        assert!(attempt.constraint_count() > 0);
        assert!(backend.mux_count > 0);
        assert!(backend.xor_count > 0);
        assert_eq!(backend.sum_count as u32, 2 * plan.word_size());
        assert_eq!(backend.carry_count as u32, 2 * plan.word_size());
    }

    #[test]
    fn construct_rejects_zero_nodes() {
        let plan = BitWidthPlan::new(7);
        let mut backend = RecordingBackend::default();
        let err = Attempt::construct(&plan, 0, &mut backend).unwrap_err();
        assert!(matches!(err, CoreError::InvalidNodeCount { n: 0 }));
    }
}
