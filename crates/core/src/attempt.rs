use scm_primitives::BitWidthPlan;

use crate::allocator::Allocator;
use crate::backend::{Backend, CheckOutcome};
use crate::decode::{decode, DecodedCircuit};
use crate::emitter::Emitter;
use crate::error::CoreError;
use crate::layout::WireTables;

/// One attempt: allocate + emit for a fixed node count `n`, against a fixed
/// [`BitWidthPlan`]. Scoped exactly as the lifecycle in the data model
/// specifies — construct a fresh `Attempt` per value of `n`, call
/// `backend.reset()` first, and discard it afterward; no state survives
/// between attempts other than what the caller (the search driver) carries
/// forward explicitly.
pub struct Attempt {
    tables: WireTables,
    constraint_count: u64,
}

impl Attempt {
    /// Allocate variables and emit constraints for `n` adders against
    /// `backend`. The caller is responsible for calling `backend.reset()`
    /// immediately before this, per the per-attempt lifecycle.
    pub fn construct<B: Backend>(
        plan: &BitWidthPlan,
        n: u32,
        backend: &mut B,
    ) -> Result<Self, CoreError> {
        if n == 0 {
            return Err(CoreError::InvalidNodeCount { n });
        }
        let mut allocator = Allocator::new(plan);
        let tables = allocator.allocate(plan, n, backend);
        let mut emitter = Emitter::new();
        emitter.emit(plan, &tables, backend)?;
        Ok(Self {
            tables,
            constraint_count: emitter.constraint_count(),
        })
    }

    pub fn constraint_count(&self) -> u64 {
        self.constraint_count
    }

    pub fn variable_count(&self) -> u32 {
        // The last id issued is the output_value(n, w-1) wire; since ids
        // are assigned monotonically from 1, the count equals its raw id.
        self.tables
            .output_value
            .last()
            .and_then(|row| row.last())
            .map(|v| v.raw())
            .unwrap_or(0)
    }

    pub fn tables(&self) -> &WireTables {
        &self.tables
    }

    /// Run `backend.check()` and, on SAT, decode the satisfying assignment.
    pub fn check_and_decode<B: Backend>(
        &self,
        backend: &mut B,
    ) -> Result<(CheckOutcome, Option<DecodedCircuit>), CoreError> {
        let outcome = backend.check();
        if outcome.sat {
            let decoded = decode(&self.tables, backend)?;
            Ok((outcome, Some(decoded)))
        } else {
            Ok((outcome, None))
        }
    }
}
