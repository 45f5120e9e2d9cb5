use std::time::{Duration, Instant};

use crate::cnf::{Clause, Literal};

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolveOutcome {
    Sat,
    Unsat,
    TimedOut,
}

/// A from-scratch DPLL solver with unit propagation, sized for the small
/// instances this problem produces (single-digit word widths, a handful of
/// adders). Not a production SAT engine — see the `BruteForceBackend` docs
/// for the scope this is meant to cover; a production build would swap in
/// a real SAT/SMT/PB adapter behind the same `Backend` trait.
pub(crate) struct Solver {
    num_vars: u32,
    clauses: Vec<Clause>,
    assignment: Vec<Option<bool>>,
    deadline: Option<Instant>,
}

impl Solver {
    pub fn new(num_vars: u32, clauses: Vec<Clause>, timeout: Option<Duration>) -> Self {
        Self {
            num_vars,
            clauses,
            assignment: vec![None; (num_vars + 1) as usize],
            deadline: timeout.map(|d| Instant::now() + d),
        }
    }

    pub fn solve(&mut self) -> SolveOutcome {
        let mut trail: Vec<u32> = Vec::new();
        match self.search(&mut trail) {
            Some(true) => SolveOutcome::Sat,
            Some(false) => SolveOutcome::Unsat,
            None => SolveOutcome::TimedOut,
        }
    }

    pub fn value(&self, raw_var: u32) -> bool {
        self.assignment[raw_var as usize].unwrap_or(false)
    }

    /// Returns `Some(true)` on SAT, `Some(false)` on proven UNSAT, `None`
    /// on timeout. Every assignment made during a failed branch is undone
    /// before returning, so the assignment vector reflects only the live
    /// trail at any point in time.
    fn search(&mut self, trail: &mut Vec<u32>) -> Option<bool> {
        if self.past_deadline() {
            return None;
        }

        let propagated = match self.unit_propagate(trail) {
            PropagateResult::Conflict => return Some(false),
            PropagateResult::Ok(n) => n,
        };

        let Some(next_var) = self.first_unassigned() else {
            return Some(true);
        };

        for &try_value in &[false, true] {
            let mark = trail.len();
            self.assign(trail, next_var, try_value);
            match self.search(trail) {
                Some(true) => return Some(true),
                Some(false) => self.undo_to(trail, mark),
                None => {
                    self.undo_to(trail, mark);
                    return None;
                }
            }
        }
        self.undo_to(trail, trail.len() - propagated);
        Some(false)
    }

    fn past_deadline(&self) -> bool {
        match self.deadline {
            Some(d) => Instant::now() >= d,
            None => false,
        }
    }

    fn first_unassigned(&self) -> Option<u32> {
        (1..=self.num_vars).find(|&raw| self.assignment[raw as usize].is_none())
    }

    fn assign(&mut self, trail: &mut Vec<u32>, raw_var: u32, value: bool) {
        self.assignment[raw_var as usize] = Some(value);
        trail.push(raw_var);
    }

    fn undo_to(&mut self, trail: &mut Vec<u32>, mark: usize) {
        while trail.len() > mark {
            let raw_var = trail.pop().unwrap();
            self.assignment[raw_var as usize] = None;
        }
    }

    /// Repeatedly assign any clause's sole remaining unassigned literal
    /// until fixpoint or a clause is fully falsified. Returns the number
    /// of variables assigned this way, so the caller can undo precisely
    /// that many on backtrack.
    fn unit_propagate(&mut self, trail: &mut Vec<u32>) -> PropagateResult {
        let mut assigned_count = 0;
        loop {
            if self.past_deadline() {
                return PropagateResult::Ok(assigned_count);
            }
            let mut progressed = false;
            for clause_idx in 0..self.clauses.len() {
                match self.clause_status(&self.clauses[clause_idx]) {
                    ClauseStatus::Satisfied => continue,
                    ClauseStatus::Conflict => return PropagateResult::Conflict,
                    ClauseStatus::Unit(lit) => {
                        self.assign(trail, lit.var, lit.polarity);
                        assigned_count += 1;
                        progressed = true;
                    }
                    ClauseStatus::Unresolved => continue,
                }
            }
            if !progressed {
                return PropagateResult::Ok(assigned_count);
            }
        }
    }

    fn clause_status(&self, clause: &Clause) -> ClauseStatus {
        let mut unassigned: Option<Literal> = None;
        let mut unassigned_count = 0;
        for &lit in clause {
            match self.assignment[lit.var as usize] {
                Some(v) if v == lit.polarity => return ClauseStatus::Satisfied,
                Some(_) => continue,
                None => {
                    unassigned_count += 1;
                    unassigned = Some(lit);
                }
            }
        }
        match unassigned_count {
            0 => ClauseStatus::Conflict,
            1 => ClauseStatus::Unit(unassigned.unwrap()),
            _ => ClauseStatus::Unresolved,
        }
    }
}

enum PropagateResult {
    Ok(usize),
    Conflict,
}

enum ClauseStatus {
    Satisfied,
    Conflict,
    Unit(Literal),
    Unresolved,
}
