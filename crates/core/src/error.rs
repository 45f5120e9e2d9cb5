use thiserror::Error;

/// Core-invariant violations: the allocator/emitter/decoder asked for a
/// wire the variable tables don't have, or a decoded value fell outside
/// its specified range. These are never expected in a correctly wired
/// attempt; surfacing them as a typed error (rather than panicking) lets
/// an embedding caller report the offending node/wire, per the §7 policy
/// that these are fatal and descriptive, not silently recovered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("node {node} has no wire for family `{family}`{detail}")]
    MissingWire {
        node: u32,
        family: &'static str,
        detail: String,
    },

    #[error("attempted to allocate/emit for n={n}, but n must be >= 1 (n=0 is the trivial C=1 circuit and bypasses the core entirely)")]
    InvalidNodeCount { n: u32 },

    #[error("decoded value {value} for `{field}` at node {node} is out of range [{lo}, {hi}]")]
    DecodedValueOutOfRange {
        node: u32,
        field: &'static str,
        value: u64,
        lo: u64,
        hi: u64,
    },
}

impl CoreError {
    pub(crate) fn missing(node: u32, family: &'static str) -> Self {
        CoreError::MissingWire {
            node,
            family,
            detail: String::new(),
        }
    }

    pub(crate) fn missing_with(node: u32, family: &'static str, detail: impl Into<String>) -> Self {
        CoreError::MissingWire {
            node,
            family,
            detail: format!(" ({})", detail.into()),
        }
    }
}
