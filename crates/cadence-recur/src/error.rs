use std::fmt;

use thiserror::Error;

/// Which safety counter ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationBound {
    /// Consecutive upstream batches that yielded nothing.
    EmptySets,
    /// Consecutive single instances rejected by a limiting stage.
    FilteredInstances,
}

impl fmt::Display for IterationBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySets => f.write_str("empty recurrence sets"),
            Self::FilteredInstances => f.write_str("filtered recurrence instances"),
        }
    }
}

/// Recurrence pipeline errors
#[derive(Error, Debug)]
pub enum RecurError {
    /// The rule cannot produce another instance within the iteration bound.
    #[error("Too many {bound} in a row (limit {limit}); the rule is unsatisfiable")]
    IterationBoundExceeded { bound: IterationBound, limit: u32 },

    #[error("Invalid rule part: {0}")]
    InvalidRulePart(String),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

impl RecurError {
    /// Whether this error is the iteration-bound failure.
    #[must_use]
    pub const fn is_bound_exceeded(&self) -> bool {
        matches!(self, Self::IterationBoundExceeded { .. })
    }
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
