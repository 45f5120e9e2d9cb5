//! scm-primitives: scalar sizing and small numeric helpers for SCM circuit synthesis.
//!
//! This crate provides:
//! - `BitWidthPlan`, derived from the target constant (word width, shift width, ...)
//! - `Direction`, the left/right tag used throughout the operand-select machinery
//! - memoized `ceil_log2`/`floor_log2`

mod direction;
mod log2;
mod plan;

pub use direction::Direction;
pub use log2::Log2Table;
pub use plan::BitWidthPlan;
