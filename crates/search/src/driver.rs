use std::time::{Duration, Instant};

use scm_core::{Attempt, Backend, PerDirection};
use scm_primitives::BitWidthPlan;

use crate::error::SearchError;
use crate::verify::verify;

/// One synthesized adder node's external fields, per §6.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NodeSolution {
    pub output_value: u64,
    pub input_select: PerDirection<u32>,
    pub shift_input_select: bool,
    pub shift_value: u32,
    pub negate_select: bool,
    pub subtract: bool,
}

/// The search driver's result, matching the external interface in §6.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Solution {
    pub found: bool,
    pub timed_out: bool,
    pub num_adders: u32,
    pub output_shift: u32,
    /// `output_values[0] == 1`; `output_values[num_adders] == C` when found.
    pub output_values: Vec<u64>,
    /// One entry per adder node, `nodes[i - 1]` is node `i`.
    pub nodes: Vec<NodeSolution>,
}

impl Solution {
    fn trivial(plan: &BitWidthPlan) -> Self {
        Self {
            found: true,
            timed_out: false,
            num_adders: 0,
            output_shift: plan.output_shift(),
            output_values: vec![1],
            nodes: Vec::new(),
        }
    }

    fn timed_out(plan: &BitWidthPlan, num_adders: u32) -> Self {
        Self {
            found: false,
            timed_out: true,
            num_adders,
            output_shift: plan.output_shift(),
            output_values: Vec::new(),
            nodes: Vec::new(),
        }
    }

    fn from_decoded(plan: &BitWidthPlan, decoded: scm_core::DecodedCircuit) -> Self {
        let nodes = decoded
            .nodes
            .iter()
            .map(|n| NodeSolution {
                output_value: n.output_value,
                input_select: n.input_select.clone(),
                shift_input_select: n.shift_input_select,
                shift_value: n.shift_value,
                negate_select: n.negate_select,
                subtract: n.subtract,
            })
            .collect();
        Self {
            found: true,
            timed_out: false,
            num_adders: decoded.num_adders,
            output_shift: plan.output_shift(),
            output_values: decoded.output_values,
            nodes,
        }
    }
}

/// §4.4's search driver: try `n = 1, 2, 3, …` adders until the backend
/// reports SAT or times out. Each attempt is allocated, emitted, and
/// checked against a freshly reset `backend`; on SAT the assignment is
/// decoded and independently verified (§4.5) before being returned.
///
/// `quiet` suppresses the per-attempt progress narration (kept as an
/// explicit parameter, matching the external input in §6, rather than
/// folded entirely into the ambient logging filter) but never suppresses
/// the verifier: a decoded solution either passes or the call returns
/// `Err`.
pub fn solve<B: Backend>(
    c_raw: u64,
    timeout: Option<Duration>,
    quiet: bool,
    backend: &mut B,
) -> Result<Solution, SearchError> {
    let plan = BitWidthPlan::new(c_raw);
    narrate(
        quiet,
        format_args!(
            "trying to solve SCM problem for constant {} with word size {} and max shift {}",
            plan.c(),
            plan.word_size(),
            plan.max_shift()
        ),
    );

    if plan.is_trivial() {
        return Ok(Solution::trivial(&plan));
    }

    let mut n = 0u32;
    loop {
        n += 1;
        narrate(quiet, format_args!("constructing problem for {n} adders"));
        backend.reset();
        let start = Instant::now();
        let attempt = Attempt::construct(&plan, n, backend)?;
        narrate(
            quiet,
            format_args!(
                "start solving with {} variables and {} constraints",
                attempt.variable_count(),
                attempt.constraint_count()
            ),
        );
        let (outcome, decoded) = attempt.check_and_decode(backend)?;
        let elapsed = start.elapsed();

        if outcome.sat {
            let decoded = decoded.expect("sat outcome always decodes");
            verify(&plan, &decoded)?;
            narrate_outcome(quiet, n, elapsed.as_secs_f64(), "sat", "found solution");
            return Ok(Solution::from_decoded(&plan, decoded));
        }
        if outcome.timed_out {
            narrate_outcome(quiet, n, elapsed.as_secs_f64(), "timed_out", "ran into timeout");
            return Ok(Solution::timed_out(&plan, n));
        }
        narrate_outcome(quiet, n, elapsed.as_secs_f64(), "unsat", "proven infeasible, keep trying");
    }
}

fn narrate(quiet: bool, args: std::fmt::Arguments<'_>) {
    if quiet {
        tracing::debug!("{}", args);
    } else {
        tracing::info!("{}", args);
    }
}

/// Per-attempt outcome, as structured fields rather than a free-text
/// banner — `elapsed_secs`/`num_adders`/`outcome` are queryable on their
/// own, unlike the original's interleaved `std::cout` narration.
fn narrate_outcome(quiet: bool, num_adders: u32, elapsed_secs: f64, outcome: &str, message: &str) {
    if quiet {
        tracing::debug!(num_adders, elapsed_secs, outcome, "{}", message);
    } else {
        tracing::info!(num_adders, elapsed_secs, outcome, "{}", message);
    }
}
