//! Stages that expand or limit the candidates of one rule part.

use cadence_core::Instance;
use cadence_core::config::IterationLimits;

use super::stage::{InstanceSet, PullStage};
use super::working::WorkingSet;
use crate::error::{IterationBound, RecurError, RecurResult};

/// ## Summary
/// A rule part that removes candidates.
///
/// Implemented by concrete parts such as by-month or by-month-day, and by any
/// `Fn(&Instance) -> bool` closure.
pub trait Limit {
    /// Returns `true` to remove `instance` from the result.
    fn filter(&self, instance: &Instance) -> bool;
}

/// ## Summary
/// A rule part that derives new candidates from each upstream candidate.
///
/// `expand` must be deterministic in `(instance, start)`. It may skip
/// derivations that fall before `start`, but must produce every derivation at
/// or after it. Implemented by concrete parts and by any
/// `Fn(&Instance, &Instance, &mut InstanceSet)` closure.
pub trait Expand {
    /// Inserts the expansions of `instance` into `out`.
    fn expand(&self, instance: &Instance, start: &Instance, out: &mut InstanceSet);
}

impl<F> Limit for F
where
    F: Fn(&Instance) -> bool,
{
    fn filter(&self, instance: &Instance) -> bool {
        self(instance)
    }
}

impl<F> Expand for F
where
    F: Fn(&Instance, &Instance, &mut InstanceSet),
{
    fn expand(&self, instance: &Instance, start: &Instance, out: &mut InstanceSet) {
        self(instance, start, out);
    }
}

/// How a [`FilterStage`] treats upstream candidates; fixed for the stage's lifetime.
pub enum FilterMode {
    Expand(Box<dyn Expand>),
    Limit(Box<dyn Limit>),
}

impl std::fmt::Debug for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expand(_) => f.write_str("Expand"),
            Self::Limit(_) => f.write_str("Limit"),
        }
    }
}

/// ## Summary
/// A pipeline stage applying one rule part to the stage above it.
///
/// In expand mode every upstream candidate is expanded and the results are
/// united into one batch. In limit mode candidates the part rejects are
/// dropped. Either way a batch that comes out empty is skipped and the next
/// upstream batch is pulled, up to `max_empty_sets` batches in a row. Single
/// pulls in limit mode likewise give up after `max_filtered_instances`
/// consecutive rejections.
#[derive(Debug)]
pub struct FilterStage<U> {
    upstream: U,
    start: Instance,
    mode: FilterMode,
    working: WorkingSet,
    limits: IterationLimits,
}

impl<U: PullStage> FilterStage<U> {
    /// Creates a stage pulling from `upstream` for a rule anchored at `start`.
    #[must_use]
    pub fn new(upstream: U, start: Instance, mode: FilterMode) -> Self {
        Self {
            upstream,
            start,
            mode,
            working: WorkingSet::new(),
            limits: IterationLimits::default(),
        }
    }

    /// Creates an expanding stage.
    #[must_use]
    pub fn expanding(upstream: U, start: Instance, part: impl Expand + 'static) -> Self {
        Self::new(upstream, start, FilterMode::Expand(Box::new(part)))
    }

    /// Creates a limiting stage.
    #[must_use]
    pub fn limiting(upstream: U, start: Instance, part: impl Limit + 'static) -> Self {
        Self::new(upstream, start, FilterMode::Limit(Box::new(part)))
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
    pub const fn start(&self) -> &Instance {
        &self.start
    }

    #[must_use]
    pub const fn upstream(&self) -> &U {
        &self.upstream
    }

    #[must_use]
    pub const fn is_expanding(&self) -> bool {
        matches!(self.mode, FilterMode::Expand(_))
    }

    fn next_expanded(&mut self) -> RecurResult<Instance> {
        loop {
            if let Some(next) = self.working.advance() {
                return Ok(next);
            }
            self.next_set()?;
        }
    }
}

impl<U: PullStage> PullStage for FilterStage<U> {
    fn next(&mut self) -> RecurResult<Instance> {
        let FilterMode::Limit(limiter) = &self.mode else {
            return self.next_expanded();
        };

        let limit = self.limits.max_filtered_instances;
        let mut pulled = 0;
        loop {
            if pulled == limit {
                tracing::warn!(limit, start = %self.start, "Too many filtered recurrence instances");
                return Err(RecurError::IterationBoundExceeded {
                    bound: IterationBound::FilteredInstances,
                    limit,
                });
            }
            pulled += 1;

            let candidate = self.upstream.next()?;
            if !limiter.filter(&candidate) {
                return Ok(candidate);
            }
        }
    }

    fn next_set(&mut self) -> RecurResult<&InstanceSet> {
        self.working.clear();

        let limit = self.limits.max_empty_sets;
        let mut pulled = 0;
        loop {
            if pulled == limit {
                tracing::warn!(limit, start = %self.start, "Too many empty recurrence sets");
                return Err(RecurError::IterationBoundExceeded {
                    bound: IterationBound::EmptySets,
                    limit,
                });
            }
            pulled += 1;

            let batch = self.upstream.next_set()?;
            match self.mode {
                FilterMode::Expand(ref expander) => {
                    let out = self.working.items_mut();
                    for instance in batch {
                        expander.expand(instance, &self.start, out);
                    }
                }
                FilterMode::Limit(ref limiter) => {
                    for instance in batch {
                        if !limiter.filter(instance) {
                            self.working.insert(*instance);
                        }
                    }
                }
            }

            if !self.working.is_empty() {
                break;
            }
            tracing::debug!(pulled, "Recurrence set came out empty, pulling next");
        }

        tracing::trace!(size = self.working.len(), "Produced recurrence set");
        Ok(self.working.view())
    }
}
