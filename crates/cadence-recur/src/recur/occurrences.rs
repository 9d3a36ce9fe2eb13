//! Iterator over the instances a compiled rule produces.

use cadence_core::Instance;

use super::stage::PullStage;
use crate::error::RecurResult;

/// ## Summary
/// Drives the last stage of a pipeline as a standard iterator.
///
/// Instances before `start` are dropped, as is anything not strictly after
/// the previously returned instance. Iteration ends after `count` instances,
/// at the first instance past `until`, or after yielding the first error.
/// Without either bound the sequence is unbounded; callers cap it with
/// `take`, `take_while` and friends.
#[derive(Debug)]
pub struct Occurrences<S> {
    stage: S,
    start: Instance,
    count: Option<u32>,
    until: Option<Instance>,
    emitted: u32,
    last: Option<Instance>,
    done: bool,
}

impl<S: PullStage> Occurrences<S> {
    #[must_use]
    pub const fn new(stage: S, start: Instance) -> Self {
        Self {
            stage,
            start,
            count: None,
            until: None,
            emitted: 0,
            last: None,
            done: false,
        }
    }

    /// Stops after `count` instances (COUNT).
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Stops after the last instance at or before `until` (UNTIL).
    #[must_use]
    pub const fn with_until(mut self, until: Instance) -> Self {
        self.until = Some(until);
        self
    }

    fn pull(&mut self) -> RecurResult<Option<Instance>> {
        loop {
            let candidate = self.stage.next()?;
            if candidate < self.start {
                continue;
            }
            if self.last.is_some_and(|last| candidate <= last) {
                tracing::debug!(%candidate, "Dropping repeated recurrence instance");
                continue;
            }
            if self.until.is_some_and(|until| candidate > until) {
                return Ok(None);
            }
            return Ok(Some(candidate));
        }
    }
}

impl<S: PullStage> Iterator for Occurrences<S> {
    type Item = RecurResult<Instance>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.count.is_some_and(|count| self.emitted >= count) {
            return None;
        }

        match self.pull() {
            Ok(Some(instance)) => {
                self.emitted += 1;
                self.last = Some(instance);
                Some(Ok(instance))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: PullStage> std::iter::FusedIterator for Occurrences<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recur::testing::ScriptedStage;

    fn ymd(month: u8, day: u8) -> Instance {
        Instance::date_only(2024, month, day).unwrap()
    }

    fn days_of_january() -> ScriptedStage {
        ScriptedStage::from_fn(|cycle| {
            u8::try_from(cycle + 1)
                .ok()
                .and_then(|day| Instance::date_only(2024, 1, day).ok())
                .into_iter()
                .collect()
        })
    }

    #[test]
    fn test_drops_instances_before_start() {
        let occurrences = Occurrences::new(days_of_january(), ymd(1, 5)).with_count(2);
        let days: Vec<_> = occurrences.map(Result::unwrap).collect();
        assert_eq!(days, vec![ymd(1, 5), ymd(1, 6)]);
    }

    #[test]
    fn test_until_is_inclusive() {
        let occurrences =
            Occurrences::new(days_of_january(), ymd(1, 1)).with_until(ymd(1, 3));
        let days: Vec<_> = occurrences.map(Result::unwrap).collect();
        assert_eq!(days, vec![ymd(1, 1), ymd(1, 2), ymd(1, 3)]);
    }

    #[test_log::test]
    fn test_drops_repeats() {
        let stage = ScriptedStage::from_batches(vec![
            vec![ymd(1, 1)],
            vec![ymd(1, 1)],
            vec![ymd(1, 2)],
        ]);
        let days: Vec<_> = Occurrences::new(stage, ymd(1, 1))
            .take(2)
            .map(Result::unwrap)
            .collect();
        assert_eq!(days, vec![ymd(1, 1), ymd(1, 2)]);
    }

    #[test]
    fn test_leap_second_start_is_first_occurrence() {
        let start = Instance::new(2016, 12, 31, 23, 59, 60).unwrap();
        let seed = crate::recur::FrequencySeed::new(start, cadence_core::Frequency::Daily, 1)
            .unwrap();

        let first = Occurrences::new(seed, start).next().unwrap().unwrap();
        assert_eq!(first, start);
    }

    #[test_log::test]
    fn test_error_is_yielded_once() {
        // January runs out after the 31st and the script only yields empty cycles.
        let mut occurrences = Occurrences::new(days_of_january(), ymd(1, 31));

        assert_eq!(occurrences.next().unwrap().unwrap(), ymd(1, 31));
        assert!(occurrences.next().unwrap().unwrap_err().is_bound_exceeded());
        assert!(occurrences.next().is_none());
    }
}
