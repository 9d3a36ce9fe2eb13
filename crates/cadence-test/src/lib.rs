//! Cadence recurrence pipeline - integration test support.
//!
//! Plays the part of a rule compiler: [`Pipeline`] chains stages in the order
//! a caller asks for and finishes with the existing-date check every complete
//! rule needs.

use cadence_core::{Frequency, Instance};
use cadence_recur::RecurResult;
use cadence_recur::recur::parts::ExistingDate;
use cadence_recur::recur::{
    Expand, FilterStage, FrequencySeed, Limit, Occurrences, PullStage, SetPositionStage,
};

pub use cadence_recur::recur::testing::ScriptedStage;

/// A boxed stage, so pipelines of any shape share one type.
pub type BoxedStage = Box<dyn PullStage>;

/// ## Summary
/// Builds a stage chain one rule part at a time.
pub struct Pipeline {
    start: Instance,
    stage: BoxedStage,
}

impl Pipeline {
    /// ## Summary
    /// Starts a pipeline with a frequency seed anchored at `start`.
    ///
    /// ## Errors
    /// Returns an error if the seed rejects the interval or anchor.
    pub fn seeded(start: Instance, freq: Frequency, interval: u32) -> RecurResult<Self> {
        let seed = FrequencySeed::new(start, freq, interval)?;
        Ok(Self::from_stage(start, Box::new(seed)))
    }

    #[must_use]
    pub fn from_stage(start: Instance, stage: BoxedStage) -> Self {
        Self { start, stage }
    }

    #[must_use]
    pub fn expand(self, part: impl Expand + 'static) -> Self {
        let stage = FilterStage::expanding(self.stage, self.start, part);
        Self::from_stage(self.start, Box::new(stage))
    }

    #[must_use]
    pub fn limit(self, part: impl Limit + 'static) -> Self {
        let stage = FilterStage::limiting(self.stage, self.start, part);
        Self::from_stage(self.start, Box::new(stage))
    }

    /// ## Errors
    /// Returns an error if a position is 0 or out of range.
    pub fn set_positions(self, positions: impl IntoIterator<Item = i16>) -> RecurResult<Self> {
        let stage = SetPositionStage::new(self.stage, positions)?;
        Ok(Self::from_stage(self.start, Box::new(stage)))
    }

    /// The stage chain as built, without the existing-date check.
    #[must_use]
    pub fn into_stage(self) -> BoxedStage {
        self.stage
    }

    /// Finishes the chain and iterates its occurrences.
    #[must_use]
    pub fn occurrences(self) -> Occurrences<BoxedStage> {
        let start = self.start;
        Occurrences::new(self.limit(ExistingDate).into_stage(), start)
    }
}

/// ## Summary
/// Collects the first `n` occurrences, stopping at the first error.
///
/// ## Errors
/// Returns the first error the pipeline yields.
pub fn take_occurrences(pipeline: Pipeline, n: usize) -> RecurResult<Vec<Instance>> {
    let occurrences = pipeline.occurrences().take(n).collect::<RecurResult<Vec<_>>>()?;
    tracing::debug!(count = occurrences.len(), "Collected occurrences");
    Ok(occurrences)
}
