use scm_core::CoreError;
use thiserror::Error;

use crate::verify::VerifyError;

/// Everything that can go wrong running the search driver. Backend
/// timeouts and UNSAT are *not* represented here — per §7 they are
/// expected `check()` outcomes that drive the search loop, not errors; see
/// [`crate::Solution`] for how they're surfaced instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("decoded solution failed independent verification: {0}")]
    Verify(#[from] VerifyError),
}
