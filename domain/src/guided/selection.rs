//! Parsing of the user's tech-stack selection.

use crate::core::error::DomainError;

/// A validated choice among the presented stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackSelection {
    /// Let the system choose: always the first generated option
    Auto,
    /// Zero-based index into the presented options
    Index(usize),
}

impl StackSelection {
    /// Parse `input` against `available` options.
    ///
    /// Accepts `auto` (any case) or a 1-based index in `1..=available`.
    /// Anything else is [`DomainError::InvalidSelection`], which callers turn
    /// into a re-prompt.
    pub fn parse(input: &str, available: usize) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let rejected = || DomainError::InvalidSelection {
            input: trimmed.to_string(),
            max: available,
        };

        if available == 0 {
            return Err(rejected());
        }
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(StackSelection::Auto);
        }

        match trimmed.parse::<usize>() {
            Ok(n) if (1..=available).contains(&n) => Ok(StackSelection::Index(n - 1)),
            _ => Err(rejected()),
        }
    }

    /// Zero-based index of the chosen option
    pub fn index(self) -> usize {
        match self {
            StackSelection::Auto => 0,
            StackSelection::Index(i) => i,
        }
    }
}
