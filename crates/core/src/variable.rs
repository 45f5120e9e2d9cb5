/// An opaque handle to one boolean wire, assigned by the allocator.
///
/// IDs are allocated monotonically starting at 1 (id 0 is never issued, so
/// it is safe to use as a "not yet allocated" sentinel internally) and must
/// be preserved verbatim across `create_new_variable` and every subsequent
/// constraint call — the backend is free to use the id as an opaque lookup
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariableId(u32);

impl VariableId {
    /// Normally only [`crate::allocator::Allocator`] calls this. Exposed
    /// (not `pub(crate)`) so that `Backend` implementations and their test
    /// suites can drive the trait directly with hand-picked ids, without
    /// routing every test through a full allocation pass.
    pub fn from_raw(id: u32) -> Self {
        debug_assert!(id > 0, "variable id 0 is reserved");
        Self(id)
    }

    /// The raw, backend-visible integer handle.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Monotonically increasing allocation counter, reset once per attempt.
#[derive(Debug, Default)]
pub(crate) struct VariableCounter(u32);

impl VariableCounter {
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    pub fn next(&mut self) -> VariableId {
        self.0 += 1;
        VariableId::from_raw(self.0)
    }

    pub fn count(&self) -> u32 {
        self.0
    }
}
