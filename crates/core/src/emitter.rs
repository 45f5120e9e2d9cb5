use scm_primitives::{BitWidthPlan, Direction};

use crate::backend::Backend;
use crate::error::CoreError;
use crate::layout::WireTables;
use crate::variable::VariableId;

/// Emits, in a single pass over an already-allocated [`WireTables`], every
/// constraint family from the data model: I/O pinning, the input-select mux
/// tree and its range limitation, the shift-swap crossbar, the barrel
/// shifter and its range limitation, the negate-swap crossbar, the
/// conditional inverter, and the ripple-carry adder with overflow
/// prohibition.
///
/// The emitter only reads [`WireTables`]; it never allocates a variable.
/// This separation (see the "Separation of allocation and emission" design
/// note) is what lets the allocator's output be snapshotted and tested
/// independently of any particular constraint encoding.
pub struct Emitter {
    constraint_count: u64,
}

impl Emitter {
    pub fn new() -> Self {
        Self { constraint_count: 0 }
    }

    pub fn constraint_count(&self) -> u64 {
        self.constraint_count
    }

    pub fn emit<B: Backend>(
        &mut self,
        plan: &BitWidthPlan,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        self.constraint_count = 0;
        self.emit_io_pinning(plan, tables, backend)?;
        for i in 1..=tables.num_adders {
            tracing::trace!(node = i, "emitting constraints for node");
            if i >= 2 {
                self.emit_input_select(i, tables, backend)?;
                self.emit_input_select_limitation(i, tables, backend)?;
                self.emit_shift_swap(i, tables, backend)?;
            }
            self.emit_barrel_shifter(i, tables, backend)?;
            self.emit_shift_limitation(plan, i, tables, backend)?;
            self.emit_negate_swap(i, tables, backend)?;
            self.emit_xor(i, tables, backend)?;
            self.emit_adder(i, tables, backend)?;
        }
        tracing::debug!(constraints = self.constraint_count, "emission complete");
        Ok(())
    }

    fn bump(&mut self) {
        self.constraint_count += 1;
    }

    fn emit_io_pinning<B: Backend>(
        &mut self,
        plan: &BitWidthPlan,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let input_bits: Vec<VariableId> = (0..tables.word_size)
            .map(|b| tables.output_value(0, b))
            .collect::<Result<_, _>>()?;
        backend.force_number(&input_bits, 1);
        self.constraint_count += input_bits.len() as u64;

        let output_bits: Vec<VariableId> = (0..tables.word_size)
            .map(|b| tables.output_value(tables.num_adders, b))
            .collect::<Result<_, _>>()?;
        backend.force_number(&output_bits, plan.c());
        self.constraint_count += output_bits.len() as u64;
        Ok(())
    }

    /// The balanced binary mux tree for one node's operand select, for both
    /// directions. Tree positions use heap indexing: the root is `mux_idx =
    /// 0`; the children of `h` are `2h + 1` and `2h + 2`. The deepest stage
    /// (`stage == select_word_size - 1`) connects to the node outputs
    /// themselves rather than to child muxes, with out-of-range leaves
    /// aliased to node `i - 1` (the forbidden-number constraints below are
    /// what actually excludes them).
    fn emit_input_select<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let select = tables.select(i)?;
        let stages = select.select_word_size;
        let w = tables.word_size;

        for dir in Direction::ALL {
            let selection = select.selection.get(dir);
            let mux = select.mux.get(dir);
            for stage in 0..stages {
                // msb-first: stage 0 (root) is controlled by the highest
                // selection bit.
                let sel_bit = selection[(stages - stage - 1) as usize];
                let muxes_in_stage = 1u32 << stage;
                for pos in 0..muxes_in_stage {
                    let mux_idx = (muxes_in_stage - 1) + pos;
                    let output_row = &mux[mux_idx as usize];
                    if stage == stages - 1 {
                        let mut leaf0 = 2 * pos;
                        let mut leaf1 = leaf0 + 1;
                        if leaf0 >= i {
                            leaf0 = i - 1;
                        }
                        if leaf1 >= i {
                            leaf1 = i - 1;
                        }
                        for b in 0..w {
                            let a = tables.output_value(leaf0, b)?;
                            let bb = tables.output_value(leaf1, b)?;
                            let o = output_row[b as usize];
                            if leaf0 == leaf1 {
                                backend.create_1x1_equivalence(a, o);
                            } else {
                                backend.create_2x1_mux(a, bb, sel_bit, o);
                            }
                            self.bump();
                        }
                    } else {
                        let next_stage_muxes = 1u32 << (stage + 1);
                        let child0 = (next_stage_muxes - 1) + 2 * pos;
                        let child1 = child0 + 1;
                        let child0_row = &mux[child0 as usize];
                        let child1_row = &mux[child1 as usize];
                        for b in 0..w {
                            backend.create_2x1_mux(
                                child0_row[b as usize],
                                child1_row[b as usize],
                                sel_bit,
                                output_row[b as usize],
                            );
                            self.bump();
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn emit_input_select_limitation<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let select = tables.select(i)?;
        let max_representable = (1u32 << select.select_word_size) - 1;
        for dir in Direction::ALL {
            let selection = select.selection.get(dir);
            for forbidden in i..=max_representable {
                backend.forbid_number(selection, u64::from(forbidden));
                self.bump();
            }
        }
        Ok(())
    }

    /// `shift_select_output(i, L, ·) = mux(root(R), root(L), sel)` and the
    /// mirrored form for R; `root(dir)` is `input_select_mux(i, dir, 0, ·)`.
    fn emit_shift_swap<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let select = tables.select(i)?;
        let sel = select.shift_input_select;
        let root_left = &select.mux.left[0];
        let root_right = &select.mux.right[0];
        for b in 0..tables.word_size as usize {
            backend.create_2x1_mux(
                root_right[b],
                root_left[b],
                sel,
                select.shift_select_output.left[b],
            );
            self.bump();
            backend.create_2x1_mux(
                root_left[b],
                root_right[b],
                sel,
                select.shift_select_output.right[b],
            );
            self.bump();
        }
        Ok(())
    }

    /// Barrel shifter: `shift_word_size` stages, each a conditional
    /// left-shift by `2^stage`. Stage 0's source is node 0 directly for the
    /// degenerate node 1, or the post-swap LEFT operand otherwise.
    fn emit_barrel_shifter<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let node = tables.node(i)?;
        let w = tables.word_size;
        for stage in 0..tables.shift_word_size {
            let shift_amount = 1u32 << stage;
            let sel = node.input_shift_value[stage as usize];
            for b in 0..w {
                let output = node.shift_stages[stage as usize][b as usize];
                let unshifted = self.stage_source_bit(tables, node, stage, b)?;
                let shifted = if b < shift_amount {
                    tables.constant_zero
                } else {
                    self.stage_source_bit(tables, node, stage, b - shift_amount)?
                };
                backend.create_2x1_mux(unshifted, shifted, sel, output);
                self.bump();
            }
        }
        Ok(())
    }

    /// The barrel shifter's input at `stage`, bit `bit`: for `stage == 0`
    /// this is the post-shift-swap LEFT operand (or node 0's output
    /// directly, for the degenerate node 1); for later stages it is the
    /// previous stage's output.
    fn stage_source_bit(
        &self,
        tables: &WireTables,
        node: &crate::layout::AdderNodeWires,
        stage: u32,
        bit: u32,
    ) -> Result<VariableId, CoreError> {
        if stage == 0 {
            if let Some(select) = &node.select {
                Ok(select.shift_select_output.left[bit as usize])
            } else {
                tables.output_value(0, bit)
            }
        } else {
            Ok(node.shift_stages[(stage - 1) as usize][bit as usize])
        }
    }

    fn emit_shift_limitation<B: Backend>(
        &mut self,
        plan: &BitWidthPlan,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let node = tables.node(i)?;
        let max_representable = (1u32 << tables.shift_word_size) - 1;
        for forbidden in (plan.max_shift() + 1)..=max_representable {
            backend.forbid_number(&node.input_shift_value, u64::from(forbidden));
            self.bump();
        }
        Ok(())
    }

    /// Negate-swap: LEFT operand is the shifter output, RIGHT is the
    /// post-shift-swap RIGHT operand (node 0's output directly for the
    /// degenerate node 1).
    fn emit_negate_swap<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let node = tables.node(i)?;
        let sel = node.input_negate_select;
        for b in 0..tables.word_size {
            let left_input = node.shift_output()[b as usize];
            let right_input = if let Some(select) = &node.select {
                select.shift_select_output.right[b as usize]
            } else {
                tables.output_value(0, b)?
            };
            backend.create_2x1_mux(
                right_input,
                left_input,
                sel,
                node.negate_select_output.left[b as usize],
            );
            self.bump();
            backend.create_2x1_mux(
                left_input,
                right_input,
                sel,
                node.negate_select_output.right[b as usize],
            );
            self.bump();
        }
        Ok(())
    }

    fn emit_xor<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let node = tables.node(i)?;
        for b in 0..tables.word_size as usize {
            backend.create_2x1_xor(
                node.input_negate_value,
                node.negate_select_output.right[b],
                node.xor_output[b],
            );
            self.bump();
        }
        Ok(())
    }

    fn emit_adder<B: Backend>(
        &mut self,
        i: u32,
        tables: &WireTables,
        backend: &mut B,
    ) -> Result<(), CoreError> {
        let node = tables.node(i)?;
        let w = tables.word_size;
        for b in 0..w {
            let c_in = if b == 0 {
                node.input_negate_value
            } else {
                node.adder_internal[(b - 1) as usize]
            };
            let a = node.negate_select_output.left[b as usize];
            let bb = node.xor_output[b as usize];
            let sum = tables.output_value(i, b)?;
            backend.create_add_sum(a, bb, c_in, sum);
            self.bump();
            let carry = node.adder_internal[b as usize];
            backend.create_add_carry(a, bb, c_in, carry);
            self.bump();
        }
        backend.force_bit(node.adder_internal[(w - 1) as usize], false);
        self.bump();
        Ok(())
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
