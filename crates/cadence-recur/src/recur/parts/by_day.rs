use chrono::{Datelike, Days, NaiveDate};

use cadence_core::{Instance, Weekday, WeekdayNum};

use crate::error::{RecurError, RecurResult};
use crate::recur::filter::{Expand, Limit};
use crate::recur::scope::Scope;
use crate::recur::stage::InstanceSet;

/// ## Summary
/// BYDAY: weekdays, optionally numbered within the month or year.
///
/// How a candidate expands depends on the scope:
/// - [`Scope::Weekly`]: the listed weekdays of the candidate's week.
/// - [`Scope::WeeklyAndMonthly`]: the same, minus days outside its month.
/// - [`Scope::Monthly`]: every (or the nth) listed weekday of its month.
/// - [`Scope::Yearly`]: every (or the nth) listed weekday of its year.
///
/// Weeks begin on `week_start` (WKST).
#[derive(Debug, Clone)]
pub struct ByDay {
    days: Vec<WeekdayNum>,
    scope: Scope,
    week_start: Weekday,
}

impl ByDay {
    /// ## Errors
    /// Returns `InvalidRulePart` if `days` is empty, or if a numbered weekday
    /// is given in a weekly scope.
    pub fn new(
        days: impl IntoIterator<Item = WeekdayNum>,
        scope: Scope,
        week_start: Weekday,
    ) -> RecurResult<Self> {
        let days: Vec<_> = days.into_iter().collect();
        if days.is_empty() {
            return Err(RecurError::InvalidRulePart("BYDAY has no values".to_string()));
        }
        let weekly = matches!(scope, Scope::Weekly | Scope::WeeklyAndMonthly);
        if let Some(numbered) = days.iter().find(|day| weekly && day.ordinal.is_some()) {
            return Err(RecurError::InvalidRulePart(format!(
                "BYDAY value {numbered} is not allowed in a weekly scope"
            )));
        }
        Ok(Self {
            days,
            scope,
            week_start,
        })
    }

    /// First and last date of the period numbered weekdays count within.
    fn period(&self, instance: &Instance) -> Option<(NaiveDate, NaiveDate)> {
        let year = instance.year();
        if self.scope.is_monthly() {
            let first = NaiveDate::from_ymd_opt(year, u32::from(instance.month()), 1)?;
            let last = first.checked_add_months(chrono::Months::new(1))?.pred_opt()?;
            Some((first, last))
        } else {
            Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            ))
        }
    }

    fn expand_week(&self, instance: &Instance, out: &mut InstanceSet) {
        let Some(date) = instance.date() else {
            return;
        };
        let weekday = Weekday::from_chrono(date.weekday());
        let Some(week_first) =
            date.checked_sub_days(Days::new(u64::from(weekday.days_since(self.week_start))))
        else {
            return;
        };

        for day in &self.days {
            let offset = u64::from(day.weekday.days_since(self.week_start));
            let Some(target) = week_first.checked_add_days(Days::new(offset)) else {
                continue;
            };
            if self.scope == Scope::WeeklyAndMonthly
                && u32::from(instance.month()) != target.month()
            {
                continue;
            }
            out.insert(instance.with_date(target));
        }
    }
}

/// All dates in `first..=last` falling on `weekday`.
fn weekdays_between(first: NaiveDate, last: NaiveDate, weekday: Weekday) -> Vec<NaiveDate> {
    let lead = weekday.days_since(Weekday::from_chrono(first.weekday()));
    first
        .checked_add_days(Days::new(u64::from(lead)))
        .map(|start| {
            start
                .iter_weeks()
                .take_while(|date| *date <= last)
                .collect()
        })
        .unwrap_or_default()
}

/// Picks the entries an ordinal selects: all, the nth, or the nth from the end.
fn select(dates: &[NaiveDate], ordinal: Option<i8>) -> &[NaiveDate] {
    let Some(ordinal) = ordinal else {
        return dates;
    };
    let nth = usize::from(ordinal.unsigned_abs());
    let index = if ordinal > 0 {
        nth.checked_sub(1)
    } else {
        dates.len().checked_sub(nth)
    };
    index
        .and_then(|index| dates.get(index..=index))
        .unwrap_or_default()
}

impl Limit for ByDay {
    fn filter(&self, instance: &Instance) -> bool {
        let (Some(date), Some(weekday)) = (instance.date(), instance.weekday()) else {
            return true;
        };
        let matches = self.days.iter().any(|day| {
            if day.weekday != weekday {
                return false;
            }
            if day.ordinal.is_none() {
                return true;
            }
            self.period(instance).is_some_and(|(first, last)| {
                select(&weekdays_between(first, last, weekday), day.ordinal).contains(&date)
            })
        });
        !matches
    }
}

impl Expand for ByDay {
    fn expand(&self, instance: &Instance, _start: &Instance, out: &mut InstanceSet) {
        if matches!(self.scope, Scope::Weekly | Scope::WeeklyAndMonthly) {
            self.expand_week(instance, out);
            return;
        }

        let Some((first, last)) = self.period(instance) else {
            return;
        };
        for day in &self.days {
            let dates = weekdays_between(first, last, day.weekday);
            out.extend(
                select(&dates, day.ordinal)
                    .iter()
                    .map(|date| instance.with_date(*date)),
            );
        }
    }
}
