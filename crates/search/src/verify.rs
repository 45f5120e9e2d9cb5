use scm_core::DecodedCircuit;
use scm_primitives::BitWidthPlan;
use thiserror::Error;

/// Independent-verifier failures, per §4.5: a mismatch at any wire is a
/// core bug, never a solver bug, because the core alone owns the encoding.
/// Every variant names the node and wire so a caller can report exactly
/// where the disagreement was found, per the §7 policy for core-invariant
/// violations (fatal, descriptive).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("node {node} wire `{wire}`: backend reported {actual}, replay expected {expected}")]
    WireMismatch {
        node: u32,
        wire: &'static str,
        expected: u64,
        actual: u64,
    },
    #[error("node 0 must equal 1, backend reported {actual}")]
    InputNodeMismatch { actual: u64 },
    #[error("root node {node} must equal C = {expected}, backend reported {actual}")]
    RootMismatch { node: u32, expected: u64, actual: u64 },
}

/// Replay the decoded circuit in ordinary integer arithmetic, modulo
/// `2^w`, and cross-check every named wire against the backend's reported
/// value. This is the authoritative oracle per the "Verifier as oracle"
/// design note: any disagreement means the core mis-encoded the problem,
/// not that the backend lied.
pub fn verify(plan: &BitWidthPlan, decoded: &DecodedCircuit) -> Result<(), VerifyError> {
    let w = decoded.word_size;
    let mask = if w >= 64 { u64::MAX } else { (1u64 << w) - 1 };

    if decoded.output_values[0] != 1 {
        return Err(VerifyError::InputNodeMismatch {
            actual: decoded.output_values[0],
        });
    }

    for (offset, node) in decoded.nodes.iter().enumerate() {
        let i = offset as u32 + 1;
        let _span = tracing::trace_span!("verify_node", node = i).entered();

        let left_value = decoded.output_values[node.input_select.left as usize];
        let right_value = decoded.output_values[node.input_select.right as usize];
        tracing::trace!(left_value, right_value, "operand sources");

        if node.input_select_mux_output.left != left_value {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "input_select_mux_output[left]",
                expected: left_value,
                actual: node.input_select_mux_output.left,
            });
        }
        if node.input_select_mux_output.right != right_value {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "input_select_mux_output[right]",
                expected: right_value,
                actual: node.input_select_mux_output.right,
            });
        }

        let (shift_mux_l, shift_mux_r) = if node.shift_input_select {
            (left_value, right_value)
        } else {
            (right_value, left_value)
        };
        if node.shift_select_output.left != shift_mux_l {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "shift_select_output[left]",
                expected: shift_mux_l,
                actual: node.shift_select_output.left,
            });
        }
        if node.shift_select_output.right != shift_mux_r {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "shift_select_output[right]",
                expected: shift_mux_r,
                actual: node.shift_select_output.right,
            });
        }

        tracing::trace!(
            left = node.shift_select_output.left,
            right = node.shift_select_output.right,
            "shift_select_output"
        );
        let expected_shift_output = (shift_mux_l << node.shift_value) & mask;
        if node.shift_output != expected_shift_output {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "shift_output",
                expected: expected_shift_output,
                actual: node.shift_output,
            });
        }

        let (negate_mux_l, negate_mux_r) = if node.negate_select {
            (node.shift_output, shift_mux_r)
        } else {
            (shift_mux_r, node.shift_output)
        };
        if node.negate_select_output.left != negate_mux_l {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "negate_select_output[left]",
                expected: negate_mux_l,
                actual: node.negate_select_output.left,
            });
        }
        if node.negate_select_output.right != negate_mux_r {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "negate_select_output[right]",
                expected: negate_mux_r,
                actual: node.negate_select_output.right,
            });
        }

        tracing::trace!(
            left = node.negate_select_output.left,
            right = node.negate_select_output.right,
            "negate_select_output"
        );
        let expected_xor_output = if node.subtract {
            (!negate_mux_r) & mask
        } else {
            negate_mux_r
        };
        if node.xor_output != expected_xor_output {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "xor_output",
                expected: expected_xor_output,
                actual: node.xor_output,
            });
        }

        let expected_adder_output =
            (negate_mux_l + expected_xor_output + u64::from(node.subtract)) & mask;
        if node.output_value != expected_adder_output {
            return Err(VerifyError::WireMismatch {
                node: i,
                wire: "output_value",
                expected: expected_adder_output,
                actual: node.output_value,
            });
        }
    }

    let root = decoded.output_values[decoded.num_adders as usize];
    if root != plan.c() {
        return Err(VerifyError::RootMismatch {
            node: decoded.num_adders,
            expected: plan.c(),
            actual: root,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scm_core::{DecodedNode, PerDirection};

    fn node(
        output_value: u64,
        input_select: (u32, u32),
        shift_value: u32,
        subtract: bool,
    ) -> DecodedNode {
        DecodedNode {
            output_value,
            input_select: PerDirection::new(input_select.0, input_select.1),
            input_select_mux_output: PerDirection::new(0, 0),
            shift_input_select: true,
            shift_select_output: PerDirection::new(0, 0),
            shift_value,
            shift_output: 0,
            negate_select: true,
            negate_select_output: PerDirection::new(0, 0),
            subtract,
            xor_output: 0,
        }
    }

    /// C = 3: node 1 = (node0 << 1) + node0 = 1*2 + 1 = 3.
    fn three_circuit(w: u32) -> DecodedCircuit {
        let mut n1 = node(3, (0, 0), 1, false);
        n1.input_select_mux_output = PerDirection::new(1, 1);
        n1.shift_select_output = PerDirection::new(1, 1);
        n1.shift_output = 2;
        n1.negate_select_output = PerDirection::new(2, 1);
        n1.xor_output = 1;
        DecodedCircuit {
            word_size: w,
            shift_word_size: 2,
            num_adders: 1,
            output_values: vec![1, 3],
            nodes: vec![n1],
        }
    }

    #[test]
    fn accepts_a_correct_three_circuit() {
        let plan = BitWidthPlan::new(3);
        let decoded = three_circuit(plan.word_size());
        assert!(verify(&plan, &decoded).is_ok());
    }

    #[test]
    fn rejects_wrong_root_value() {
        let plan = BitWidthPlan::new(3);
        let mut decoded = three_circuit(plan.word_size());
        decoded.output_values[1] = 4;
        decoded.nodes[0].output_value = 4;
        decoded.nodes[0].negate_select_output.left = 3;
        let err = verify(&plan, &decoded).unwrap_err();
        assert!(matches!(err, VerifyError::WireMismatch { wire: "output_value", .. }));
    }

    #[test]
    fn rejects_bad_shift_output_wire() {
        let plan = BitWidthPlan::new(3);
        let mut decoded = three_circuit(plan.word_size());
        decoded.nodes[0].shift_output = 99;
        let err = verify(&plan, &decoded).unwrap_err();
        assert!(matches!(err, VerifyError::WireMismatch { wire: "shift_output", .. }));
    }
}
