use scm_primitives::Direction;

use crate::error::CoreError;
use crate::variable::VariableId;

/// Two values, one per [`Direction`]. Kept as a plain struct rather than a
/// `HashMap<Direction, T>` — the domain has exactly two members, so a field
/// access compiles to the same thing a lookup would cost at runtime, without
/// the lookup-miss failure mode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PerDirection<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerDirection<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, dir: Direction) -> &T {
        match dir {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, dir: Direction) -> &mut T {
        match dir {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// The operand-select mux tree feeding one direction of one node, present
/// only for nodes `i >= 2` (node 1's operands are pinned to node 0 and need
/// no select machinery — see the "Degenerate node 1" design note).
#[derive(Debug, Clone)]
pub struct SelectWires {
    /// `ceil_log2(i)`, the number of selection bits and tree stages.
    pub select_word_size: u32,
    /// `input_select_selection(i, dir, ·)`, width `select_word_size`.
    pub selection: PerDirection<Vec<VariableId>>,
    /// `input_select_mux(i, dir, mux_idx, ·)`. Outer index is the heap-style
    /// `mux_idx` (root = 0, children of `h` are `2h+1`/`2h+2`); inner index
    /// is the output bit. One row is `w` variables wide.
    pub mux: PerDirection<Vec<Vec<VariableId>>>,
    /// `input_shift_select(i)`.
    pub shift_input_select: VariableId,
    /// `shift_select_output(i, dir, ·)`, width `w`.
    pub shift_select_output: PerDirection<Vec<VariableId>>,
}

/// Everything allocated for one adder node `i >= 1`.
#[derive(Debug, Clone)]
pub struct AdderNodeWires {
    /// `None` for node 1 (degenerate: both operands are node 0).
    pub select: Option<SelectWires>,
    /// `input_shift_value(i, ·)`, width `s`.
    pub input_shift_value: Vec<VariableId>,
    /// `shift_internal_mux_output(i, stage, ·)`, one row of width `w` per
    /// stage `0..s`. The last row *is* the shifter's final output.
    pub shift_stages: Vec<Vec<VariableId>>,
    /// `input_negate_select(i)`.
    pub input_negate_select: VariableId,
    /// `negate_select_output(i, dir, ·)`, width `w`.
    pub negate_select_output: PerDirection<Vec<VariableId>>,
    /// `input_negate_value(i)`.
    pub input_negate_value: VariableId,
    /// `xor_output(i, ·)`, width `w`.
    pub xor_output: Vec<VariableId>,
    /// `adder_internal(i, ·)`, width `w` (carry-out per bit).
    pub adder_internal: Vec<VariableId>,
}

impl AdderNodeWires {
    pub fn shift_output(&self) -> &[VariableId] {
        self.shift_stages
            .last()
            .expect("shift_stages always has at least one stage")
    }
}

/// The complete set of wires for one attempt (one value of `n`), as
/// produced by [`crate::allocator::Allocator::allocate`] and consumed by
/// [`crate::emitter::Emitter`].
///
/// The allocator is the only writer; the emitter and decoder only read. All
/// families are dense `Vec`s indexed by position, never by hashing, per the
/// "Keyed wire tables" design note — an out-of-range index is the only way
/// a lookup can fail, and the accessor methods below turn that into a
/// [`CoreError::MissingWire`] rather than a panic.
#[derive(Debug, Clone)]
pub struct WireTables {
    pub word_size: u32,
    pub shift_word_size: u32,
    pub num_adders: u32,
    pub constant_zero: VariableId,
    /// `output_value(i, ·)` for `i = 0..=num_adders`, width `w` each.
    pub output_value: Vec<Vec<VariableId>>,
    /// `nodes[i - 1]` holds node `i`'s wires, for `i = 1..=num_adders`.
    pub nodes: Vec<AdderNodeWires>,
}

impl WireTables {
    pub fn output_value(&self, node: u32, bit: u32) -> Result<VariableId, CoreError> {
        let row = self
            .output_value
            .get(node as usize)
            .ok_or_else(|| CoreError::missing(node, "output_value"))?;
        row.get(bit as usize)
            .copied()
            .ok_or_else(|| CoreError::missing_with(node, "output_value", format!("bit {bit}")))
    }

    pub fn node(&self, i: u32) -> Result<&AdderNodeWires, CoreError> {
        debug_assert!(i >= 1);
        self.nodes
            .get((i - 1) as usize)
            .ok_or_else(|| CoreError::missing(i, "adder_node"))
    }

    pub fn select(&self, i: u32) -> Result<&SelectWires, CoreError> {
        self.node(i)?
            .select
            .as_ref()
            .ok_or_else(|| CoreError::missing_with(i, "input_select", "node 1 has no select mux"))
    }
}
