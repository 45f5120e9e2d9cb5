use crate::backend::Backend;
use crate::error::CoreError;
use crate::layout::{PerDirection, WireTables};
use crate::variable::VariableId;

/// One decoded adder node (`i >= 1`), read back from a satisfying
/// assignment. Carries not just the §6 external fields (`input_select`,
/// `shift_value`, `negate_select`, `subtract`) but every intermediate wire
/// value the independent verifier needs to cross-check, per §4.5.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedNode {
    pub output_value: u64,
    /// Source node index chosen for each operand direction. `0` for both
    /// when `i == 1` (the degenerate case: both operands are node 0).
    pub input_select: PerDirection<u32>,
    /// The value actually routed by the root of the select mux tree, per
    /// direction (for `i == 1` this is simply node 0's value, since there
    /// is no mux).
    pub input_select_mux_output: PerDirection<u64>,
    pub shift_input_select: bool,
    pub shift_select_output: PerDirection<u64>,
    pub shift_value: u32,
    pub shift_output: u64,
    pub negate_select: bool,
    pub negate_select_output: PerDirection<u64>,
    pub subtract: bool,
    pub xor_output: u64,
}

/// The fully decoded circuit: one satisfying assignment, turned into plain
/// integers. `output_values[0]` is always `1`; `output_values[num_adders]`
/// must equal the plan's `C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCircuit {
    pub word_size: u32,
    pub shift_word_size: u32,
    pub num_adders: u32,
    pub output_values: Vec<u64>,
    /// `nodes[i - 1]` is node `i`, for `i = 1..=num_adders`.
    pub nodes: Vec<DecodedNode>,
}

fn read_number<B: Backend>(backend: &B, vs: &[VariableId]) -> u64 {
    vs.iter()
        .enumerate()
        .fold(0u64, |acc, (bit, v)| acc | (u64::from(backend.get_result_value(*v)) << bit))
}

/// Decode a satisfying assignment from `backend` into plain integer fields,
/// per the data model and §6's external output shape. Only meaningful
/// after `backend.check()` returned `sat = true`.
pub fn decode<B: Backend>(tables: &WireTables, backend: &B) -> Result<DecodedCircuit, CoreError> {
    let output_values: Vec<u64> = (0..=tables.num_adders)
        .map(|i| {
            let row: Vec<VariableId> = (0..tables.word_size)
                .map(|b| tables.output_value(i, b))
                .collect::<Result<_, _>>()?;
            Ok(read_number(backend, &row))
        })
        .collect::<Result<_, CoreError>>()?;

    let mut nodes = Vec::with_capacity(tables.num_adders as usize);
    for i in 1..=tables.num_adders {
        let node = tables.node(i)?;

        let (input_select, input_select_mux_output, shift_input_select, shift_select_output) =
            if let Some(select) = &node.select {
                let l_sel = read_number(backend, &select.selection.left) as u32;
                let r_sel = read_number(backend, &select.selection.right) as u32;
                if l_sel >= i || r_sel >= i {
                    return Err(CoreError::DecodedValueOutOfRange {
                        node: i,
                        field: "input_select",
                        value: u64::from(l_sel.max(r_sel)),
                        lo: 0,
                        hi: u64::from(i - 1),
                    });
                }
                let mux_out = PerDirection::new(
                    read_number(backend, &select.mux.left[0]),
                    read_number(backend, &select.mux.right[0]),
                );
                let swap = backend.get_result_value(select.shift_input_select);
                let swap_out = PerDirection::new(
                    read_number(backend, &select.shift_select_output.left),
                    read_number(backend, &select.shift_select_output.right),
                );
                (PerDirection::new(l_sel, r_sel), mux_out, swap, swap_out)
            } else {
                let node0 = output_values[0];
                (
                    PerDirection::new(0, 0),
                    PerDirection::new(node0, node0),
                    false,
                    PerDirection::new(node0, node0),
                )
            };

        let shift_value = read_number(backend, &node.input_shift_value) as u32;
        if shift_value > tables.word_size {
            return Err(CoreError::DecodedValueOutOfRange {
                node: i,
                field: "shift_value",
                value: u64::from(shift_value),
                lo: 0,
                hi: u64::from(tables.word_size),
            });
        }
        let shift_output = read_number(backend, node.shift_output());
        let negate_select = backend.get_result_value(node.input_negate_select);
        let negate_select_output = PerDirection::new(
            read_number(backend, &node.negate_select_output.left),
            read_number(backend, &node.negate_select_output.right),
        );
        let subtract = backend.get_result_value(node.input_negate_value);
        let xor_output = read_number(backend, &node.xor_output);

        nodes.push(DecodedNode {
            output_value: output_values[i as usize],
            input_select,
            input_select_mux_output,
            shift_input_select,
            shift_select_output,
            shift_value,
            shift_output,
            negate_select,
            negate_select_output,
            subtract,
            xor_output,
        });
    }

    Ok(DecodedCircuit {
        word_size: tables.word_size,
        shift_word_size: tables.shift_word_size,
        num_adders: tables.num_adders,
        output_values,
        nodes,
    })
}
