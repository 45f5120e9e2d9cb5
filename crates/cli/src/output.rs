use scm_search::Solution;

/// Render a [`Solution`] the way the original's `print_solution` does:
/// one summary line, then one line per adder node with its decoded
/// fields indented beneath it.
pub fn print_solution(solution: &Solution) {
    if solution.timed_out {
        println!("timed out after {} adders, no solution found", solution.num_adders);
        return;
    }
    if !solution.found {
        println!("no solution found");
        return;
    }

    println!(
        "found a solution with {} adder(s), output_shift = {}",
        solution.num_adders, solution.output_shift
    );
    println!("  node 0 (input) = {}", solution.output_values[0]);

    for (offset, node) in solution.nodes.iter().enumerate() {
        let i = offset + 1;
        println!("  node {i} = {}", node.output_value);
        println!(
            "    input_select: left = node {}, right = node {}",
            node.input_select.left, node.input_select.right
        );
        if node.shift_input_select {
            println!("    shift_select: unswapped (shift applies to the left operand)");
        } else {
            println!("    shift_select: swapped (shift applies to the right operand)");
        }
        println!("    shift_value: {}", node.shift_value);
        if node.negate_select {
            println!("    negate_select: swapped");
        } else {
            println!("    negate_select: unswapped");
        }
        println!("    subtract: {}", node.subtract);
    }

    println!(
        "  root node {} = {}",
        solution.num_adders,
        solution.output_values.last().copied().unwrap_or_default()
    );
}
