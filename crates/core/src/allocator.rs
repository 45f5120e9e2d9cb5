use scm_primitives::{BitWidthPlan, Log2Table};

use crate::backend::Backend;
use crate::layout::{AdderNodeWires, PerDirection, SelectWires, WireTables};
use crate::variable::VariableCounter;

/// Allocates fresh boolean variables for every wire of the parametric
/// circuit at a given node count `n`, in the order fixed by the data
/// model's family table, and notifies the backend of each one.
///
/// One allocator is reused across attempts; [`Allocator::allocate`] resets
/// its internal counter at the start of every call, so the variable IDs in
/// the returned [`WireTables`] always start fresh at the next available id
/// inside one `reset` → `allocate` → `emit` → `check` lifecycle. Pair it
/// with a call to `backend.reset()` before `allocate` to discard the
/// previous attempt's declarations too, per the per-attempt lifecycle in
/// the data model.
pub struct Allocator {
    counter: VariableCounter,
    log2: Log2Table,
}

impl Allocator {
    pub fn new(plan: &BitWidthPlan) -> Self {
        // The largest index ever fed to ceil_log2 is `n`, and n is bounded
        // in practice by word_size (a circuit needing more adders than bits
        // would never be minimal); double it for headroom since the search
        // driver may probe past that in pathological cases.
        let log2_domain = (plan.word_size() * 2 + 4).max(8);
        Self {
            counter: VariableCounter::default(),
            log2: Log2Table::new(log2_domain),
        }
    }

    /// Allocate every wire for a circuit with `n` adder nodes.
    ///
    /// `n` must be `>= 1`; `n = 0` is the trivial `C = 1` circuit, handled
    /// entirely outside the core (see [`crate::error::CoreError::InvalidNodeCount`]
    /// at the call site in `scm-search`).
    pub fn allocate<B: Backend>(&mut self, plan: &BitWidthPlan, n: u32, backend: &mut B) -> WireTables {
        assert!(n >= 1, "allocate(n) requires n >= 1");
        tracing::debug!(n, word_size = plan.word_size(), "allocating variables");
        self.counter.reset();
        let w = plan.word_size();
        let s = plan.shift_word_size();

        let constant_zero = self.counter.next();
        backend.create_new_variable(constant_zero);
        backend.force_bit(constant_zero, false);

        let output_value_0 = self.alloc_row(w, backend);

        let mut output_value = Vec::with_capacity((n + 1) as usize);
        output_value.push(output_value_0);

        let mut nodes = Vec::with_capacity(n as usize);
        for i in 1..=n {
            let node_wires = self.allocate_node(i, w, s, backend);
            nodes.push(node_wires);
            // output_value(i, ·) is allocated last per node, mirroring the
            // source's `create_output_value_variables` being the final call
            // in its per-node loop.
            output_value.push(self.alloc_row(w, backend));
        }

        tracing::debug!(variables = self.counter.count(), "allocation complete");
        WireTables {
            word_size: w,
            shift_word_size: s,
            num_adders: n,
            constant_zero,
            output_value,
            nodes,
        }
    }

    fn allocate_node<B: Backend>(
        &mut self,
        i: u32,
        w: u32,
        s: u32,
        backend: &mut B,
    ) -> AdderNodeWires {
        let select = if i >= 2 {
            Some(self.allocate_select(i, w, backend))
        } else {
            None
        };

        let input_shift_value = self.alloc_row(s, backend);

        let mut shift_stages = Vec::with_capacity(s as usize);
        for _ in 0..s {
            shift_stages.push(self.alloc_row(w, backend));
        }

        let input_negate_select = self.counter.next();
        backend.create_new_variable(input_negate_select);

        let negate_left = self.alloc_row(w, backend);
        let negate_right = self.alloc_row(w, backend);

        let input_negate_value = self.counter.next();
        backend.create_new_variable(input_negate_value);

        let xor_output = self.alloc_row(w, backend);
        let adder_internal = self.alloc_row(w, backend);

        AdderNodeWires {
            select,
            input_shift_value,
            shift_stages,
            input_negate_select,
            negate_select_output: PerDirection::new(negate_left, negate_right),
            input_negate_value,
            xor_output,
            adder_internal,
        }
    }

    fn allocate_select<B: Backend>(&mut self, i: u32, w: u32, backend: &mut B) -> SelectWires {
        let select_word_size = self.log2.ceil_log2(i);
        let num_muxes = (1u32 << select_word_size) - 1;

        let mux_left = self.alloc_mux_rows(num_muxes, w, backend);
        let mux_right = self.alloc_mux_rows(num_muxes, w, backend);
        let selection_left = self.alloc_row(select_word_size, backend);
        let selection_right = self.alloc_row(select_word_size, backend);

        let shift_input_select = self.counter.next();
        backend.create_new_variable(shift_input_select);

        let shift_select_output_left = self.alloc_row(w, backend);
        let shift_select_output_right = self.alloc_row(w, backend);

        SelectWires {
            select_word_size,
            selection: PerDirection::new(selection_left, selection_right),
            mux: PerDirection::new(mux_left, mux_right),
            shift_input_select,
            shift_select_output: PerDirection::new(shift_select_output_left, shift_select_output_right),
        }
    }

    fn alloc_mux_rows<B: Backend>(
        &mut self,
        num_muxes: u32,
        w: u32,
        backend: &mut B,
    ) -> Vec<Vec<crate::variable::VariableId>> {
        (0..num_muxes).map(|_| self.alloc_row(w, backend)).collect()
    }

    fn alloc_row<B: Backend>(&mut self, width: u32, backend: &mut B) -> Vec<crate::variable::VariableId> {
        (0..width)
            .map(|_| {
                let v = self.counter.next();
                backend.create_new_variable(v);
                v
            })
            .collect()
    }
}
