//! Scripted upstream stage for exercising downstream stages in isolation.

use std::collections::VecDeque;

use cadence_core::Instance;
use cadence_core::config::DEFAULT_ITERATION_LIMIT;

use super::stage::{InstanceSet, PullStage};
use crate::error::{IterationBound, RecurError, RecurResult};

type Script = Box<dyn FnMut(u32) -> Vec<Instance>>;

/// ## Summary
/// A head stage whose batches come from a script.
///
/// The script is called with the cycle number (starting at 0) and returns the
/// candidates of that cycle; it may return an empty batch. Pull counters let
/// tests assert how far a downstream stage had to read.
pub struct ScriptedStage {
    script: Script,
    cycle: u32,
    current: InstanceSet,
    pending: VecDeque<Instance>,
    batches_pulled: u32,
    instances_pulled: u32,
}

impl ScriptedStage {
    #[must_use]
    pub fn from_fn(script: impl FnMut(u32) -> Vec<Instance> + 'static) -> Self {
        Self {
            script: Box::new(script),
            cycle: 0,
            current: InstanceSet::new(),
            pending: VecDeque::new(),
            batches_pulled: 0,
            instances_pulled: 0,
        }
    }

    /// Plays the given batches in order, then empty batches forever.
    #[must_use]
    pub fn from_batches(batches: Vec<Vec<Instance>>) -> Self {
        Self::from_fn(move |cycle| {
            usize::try_from(cycle)
                .ok()
                .and_then(|index| batches.get(index))
                .cloned()
                .unwrap_or_default()
        })
    }

    /// Number of `next_set` calls served.
    #[must_use]
    pub const fn batches_pulled(&self) -> u32 {
        self.batches_pulled
    }

    /// Number of `next` calls served.
    #[must_use]
    pub const fn instances_pulled(&self) -> u32 {
        self.instances_pulled
    }

    fn run_cycle(&mut self) -> InstanceSet {
        let batch = (self.script)(self.cycle).into_iter().collect();
        self.cycle += 1;
        batch
    }
}

impl PullStage for ScriptedStage {
    fn next(&mut self) -> RecurResult<Instance> {
        let mut empty = 0;
        loop {
            if let Some(next) = self.pending.pop_front() {
                self.instances_pulled += 1;
                return Ok(next);
            }
            if empty == DEFAULT_ITERATION_LIMIT {
                return Err(RecurError::IterationBoundExceeded {
                    bound: IterationBound::EmptySets,
                    limit: DEFAULT_ITERATION_LIMIT,
                });
            }
            empty += 1;
            let batch = self.run_cycle();
            self.pending.extend(batch);
        }
    }

    fn next_set(&mut self) -> RecurResult<&InstanceSet> {
        self.current = self.run_cycle();
        self.batches_pulled += 1;
        Ok(&self.current)
    }
}
