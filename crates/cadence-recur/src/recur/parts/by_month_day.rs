use cadence_core::{Instance, days_in_month};

use super::normalize;
use crate::error::RecurResult;
use crate::recur::filter::{Expand, Limit};
use crate::recur::scope::Scope;
use crate::recur::stage::InstanceSet;

/// ## Summary
/// BYMONTHDAY: days of the month, negative values counting from its end.
///
/// Expansion yields the listed days of the candidate's month, or of every
/// month of its year in [`Scope::Yearly`]. Days the month does not have are
/// skipped, so `31` produces nothing in April.
#[derive(Debug, Clone)]
pub struct ByMonthDay {
    days: Vec<i8>,
    scope: Scope,
}

impl ByMonthDay {
    /// ## Errors
    /// Returns `InvalidRulePart` if `days` is empty or holds 0 or a value
    /// outside `-31..=31`.
    pub fn new(days: impl IntoIterator<Item = i8>, scope: Scope) -> RecurResult<Self> {
        Ok(Self {
            days: normalize("BYMONTHDAY", days, |d| d != 0 && (-31..=31).contains(&d))?,
            scope,
        })
    }

    fn resolved(&self, year: i32, month: u8) -> impl Iterator<Item = u8> + '_ {
        let length = days_in_month(year, month);
        self.days
            .iter()
            .filter_map(move |&day| resolve_month_day(day, length))
    }
}

/// Maps a signed month day onto `1..=length`, if the month has it.
fn resolve_month_day(day: i8, length: u8) -> Option<u8> {
    let resolved = if day > 0 {
        day.unsigned_abs()
    } else {
        (length + 1).checked_sub(day.unsigned_abs())?
    };
    (1..=length).contains(&resolved).then_some(resolved)
}

impl Limit for ByMonthDay {
    fn filter(&self, instance: &Instance) -> bool {
        !self
            .resolved(instance.year(), instance.month())
            .any(|day| day == instance.day())
    }
}

impl Expand for ByMonthDay {
    fn expand(&self, instance: &Instance, _start: &Instance, out: &mut InstanceSet) {
        let months = if self.scope == Scope::Yearly {
            1..=12
        } else {
            instance.month()..=instance.month()
        };
        for month in months {
            let Some(in_month) = instance.with_month(month) else {
                continue;
            };
            out.extend(
                self.resolved(instance.year(), month)
                    .filter_map(|day| in_month.with_day(day)),
            );
        }
    }
}
