use cadence_core::Instance;

use super::normalize;
use crate::error::RecurResult;
use crate::recur::filter::{Expand, Limit};
use crate::recur::stage::InstanceSet;

/// BYMONTH: keeps, or places candidates in, the listed months of their year.
#[derive(Debug, Clone)]
pub struct ByMonth {
    months: Vec<u8>,
}

impl ByMonth {
    /// ## Errors
    /// Returns `InvalidRulePart` if `months` is empty or holds a value
    /// outside `1..=12`.
    pub fn new(months: impl IntoIterator<Item = u8>) -> RecurResult<Self> {
        Ok(Self {
            months: normalize("BYMONTH", months, |m| (1..=12).contains(&m))?,
        })
    }
}

impl Limit for ByMonth {
    fn filter(&self, instance: &Instance) -> bool {
        !self.months.contains(&instance.month())
    }
}

impl Expand for ByMonth {
    fn expand(&self, instance: &Instance, _start: &Instance, out: &mut InstanceSet) {
        out.extend(self.months.iter().filter_map(|&m| instance.with_month(m)));
    }
}
