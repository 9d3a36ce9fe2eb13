//! Concrete rule parts.
//!
//! Each part implements [`Limit`](super::Limit), [`Expand`](super::Expand),
//! or both; the rule compiler decides which capability a given stage uses.

mod by_day;
mod by_hour;
mod by_month;
mod by_month_day;
mod existing_date;

pub use by_day::ByDay;
pub use by_hour::ByHour;
pub use by_month::ByMonth;
pub use by_month_day::ByMonthDay;
pub use existing_date::ExistingDate;

use crate::error::{RecurError, RecurResult};

/// Sorts and dedups rule-part values, rejecting an empty list or any value
/// outside `valid`.
fn normalize<T: Ord + Copy + std::fmt::Display>(
    part: &str,
    values: impl IntoIterator<Item = T>,
    valid: impl Fn(T) -> bool,
) -> RecurResult<Vec<T>> {
    let mut values: Vec<T> = values.into_iter().collect();
    if values.is_empty() {
        return Err(RecurError::InvalidRulePart(format!("{part} has no values")));
    }
    if let Some(bad) = values.iter().copied().find(|value| !valid(*value)) {
        return Err(RecurError::InvalidRulePart(format!(
            "{part} value {bad} out of range"
        )));
    }
    values.sort_unstable();
    values.dedup();
    Ok(values)
}
