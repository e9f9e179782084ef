//! Validation failure policy.

/// Controls the validation stage when the model call or its parsing fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Treat the idea as valid instead of failing the run
    pub fail_open: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { fail_open: true }
    }
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self { fail_open: false }
    }
}
