//! BYSETPOS: picks candidates by their position within each batch.

use cadence_core::Instance;
use cadence_core::config::IterationLimits;

use super::stage::{InstanceSet, PullStage};
use super::working::WorkingSet;
use crate::error::{IterationBound, RecurError, RecurResult};

/// ## Summary
/// Keeps the batch members at the given 1-based positions.
///
/// Negative positions count from the end of the batch, so `-1` is the last
/// candidate of each cycle. This stage must consume whole batches: a position
/// only means something relative to the complete set of a cycle. Batches where
/// no position exists count toward the empty-set bound.
#[derive(Debug)]
pub struct SetPositionStage<U> {
    upstream: U,
    positions: Vec<i16>,
    working: WorkingSet,
    limits: IterationLimits,
}

impl<U: PullStage> SetPositionStage<U> {
    /// ## Errors
    /// Returns `InvalidRulePart` if `positions` is empty or contains 0 or a
    /// value outside `-366..=366`.
    pub fn new(upstream: U, positions: impl IntoIterator<Item = i16>) -> RecurResult<Self> {
        let positions: Vec<i16> = positions.into_iter().collect();
        if positions.is_empty() {
            return Err(RecurError::InvalidRulePart(
                "BYSETPOS has no values".to_string(),
            ));
        }
        if let Some(bad) = positions
            .iter()
            .find(|pos| **pos == 0 || !(-366..=366).contains(*pos))
        {
            return Err(RecurError::InvalidRulePart(format!(
                "BYSETPOS value {bad} out of range"
            )));
        }
        Ok(Self {
            upstream,
            positions,
            working: WorkingSet::new(),
            limits: IterationLimits::default(),
        })
    }

    /// Replaces the default iteration limits.
    ///
    /// ## Errors
    /// Returns `CoreError` if either limit is zero.
    pub fn with_limits(mut self, limits: IterationLimits) -> RecurResult<Self> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    #[must_use]
    pub const fn upstream(&self) -> &U {
        &self.upstream
    }
}

/// Index into a batch of `len` elements for a signed 1-based position.
fn position_index(position: i16, len: usize) -> Option<usize> {
    let offset = usize::from(position.unsigned_abs());
    let index = if position > 0 {
        offset.checked_sub(1)?
    } else {
        len.checked_sub(offset)?
    };
    (index < len).then_some(index)
}

impl<U: PullStage> PullStage for SetPositionStage<U> {
    fn next(&mut self) -> RecurResult<Instance> {
        loop {
            if let Some(next) = self.working.advance() {
                return Ok(next);
            }
            self.next_set()?;
        }
    }

    fn next_set(&mut self) -> RecurResult<&InstanceSet> {
        self.working.clear();

        let limit = self.limits.max_empty_sets;
        let mut pulled = 0;
        loop {
            if pulled == limit {
                tracing::warn!(limit, "Too many empty recurrence sets");
                return Err(RecurError::IterationBoundExceeded {
                    bound: IterationBound::EmptySets,
                    limit,
                });
            }
            pulled += 1;

            let batch = self.upstream.next_set()?;
            for &position in &self.positions {
                let picked = position_index(position, batch.len())
                    .and_then(|index| batch.iter().nth(index));
                if let Some(instance) = picked {
                    self.working.insert(*instance);
                }
            }

            if !self.working.is_empty() {
                break;
            }
            tracing::debug!(pulled, "No set position matched, pulling next");
        }

        tracing::trace!(size = self.working.len(), "Selected set positions");
        Ok(self.working.view())
    }
}
