//! Head stage advancing the base frequency.

use chrono::TimeDelta;

use cadence_core::error::CoreError;
use cadence_core::{Frequency, Instance};

use super::stage::{InstanceSet, PullStage};
use crate::error::{RecurError, RecurResult};

/// ## Summary
/// Emits one single-candidate batch per frequency cycle.
///
/// Cycle `k` yields the anchor advanced by `k * interval` units of the
/// frequency. Monthly and yearly advances only touch the month and year
/// fields, so a rule anchored on January 31st seeds February 31st; such
/// candidates are meant to be dropped by an
/// [`ExistingDate`](super::parts::ExistingDate) limit further down, unless an
/// expansion replaces the day first.
#[derive(Debug)]
pub struct FrequencySeed {
    anchor: Instance,
    freq: Frequency,
    interval: u32,
    cycle: u32,
    current: InstanceSet,
}

impl FrequencySeed {
    /// ## Summary
    /// Creates a seed for a rule anchored at `anchor`.
    ///
    /// ## Errors
    /// Returns `InvalidRulePart` if `interval` is zero or the anchor date does
    /// not exist.
    pub fn new(anchor: Instance, freq: Frequency, interval: u32) -> RecurResult<Self> {
        if interval == 0 {
            return Err(RecurError::InvalidRulePart(
                "INTERVAL must be positive".to_string(),
            ));
        }
        if !anchor.is_valid() {
            return Err(RecurError::InvalidRulePart(format!(
                "anchor {anchor} is not a calendar date"
            )));
        }
        Ok(Self {
            anchor,
            freq,
            interval,
            cycle: 0,
            current: InstanceSet::new(),
        })
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.freq
    }

    fn advance(&mut self) -> RecurResult<Instance> {
        let steps = i64::from(self.cycle)
            .checked_mul(i64::from(self.interval))
            .ok_or_else(out_of_range)?;
        let instance = match self.freq {
            Frequency::Yearly => {
                self.shift_months(steps.checked_mul(12).ok_or_else(out_of_range)?)?
            }
            Frequency::Monthly => self.shift_months(steps)?,
            Frequency::Weekly => self.shift_seconds(steps, 7 * 86_400)?,
            Frequency::Daily => self.shift_seconds(steps, 86_400)?,
            Frequency::Hourly => self.shift_seconds(steps, 3_600)?,
            Frequency::Minutely => self.shift_seconds(steps, 60)?,
            Frequency::Secondly => self.shift_seconds(steps, 1)?,
        };
        self.cycle = self.cycle.checked_add(1).ok_or_else(out_of_range)?;
        Ok(instance)
    }

    fn shift_months(&self, months: i64) -> RecurResult<Instance> {
        let total = i64::from(self.anchor.month() - 1)
            .checked_add(months)
            .ok_or_else(out_of_range)?;
        let year = i32::try_from(i64::from(self.anchor.year()) + total.div_euclid(12)).ok();
        let month = u8::try_from(total.rem_euclid(12) + 1).ok();
        let (year, month) = year.zip(month).ok_or_else(out_of_range)?;

        Ok(Instance::new(
            year,
            month,
            self.anchor.day(),
            self.anchor.hour(),
            self.anchor.minute(),
            self.anchor.second(),
        )?)
    }

    fn shift_seconds(&self, steps: i64, unit: i64) -> RecurResult<Instance> {
        let shifted = steps
            .checked_mul(unit)
            .and_then(TimeDelta::try_seconds)
            .zip(self.anchor.to_naive())
            .and_then(|(delta, anchor)| anchor.checked_add_signed(delta))
            .ok_or_else(out_of_range)?;
        Ok(Instance::from_naive(shifted))
    }
}

fn out_of_range() -> RecurError {
    RecurError::CoreError(CoreError::InvalidInput(
        "recurrence left the supported date range".to_string(),
    ))
}

impl PullStage for FrequencySeed {
    fn next(&mut self) -> RecurResult<Instance> {
        self.advance()
    }

    fn next_set(&mut self) -> RecurResult<&InstanceSet> {
        let instance = self.advance()?;
        self.current.clear();
        self.current.insert(instance);
        tracing::trace!(cycle = self.cycle, %instance, "Seeded recurrence set");
        Ok(&self.current)
    }
}
