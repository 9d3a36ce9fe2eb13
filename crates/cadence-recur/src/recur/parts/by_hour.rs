use cadence_core::Instance;

use super::normalize;
use crate::error::RecurResult;
use crate::recur::filter::{Expand, Limit};
use crate::recur::stage::InstanceSet;

/// BYHOUR: keeps, or moves candidates to, the listed hours of their day.
#[derive(Debug, Clone)]
pub struct ByHour {
    hours: Vec<u8>,
}

impl ByHour {
    /// ## Errors
    /// Returns `InvalidRulePart` if `hours` is empty or holds a value above 23.
    pub fn new(hours: impl IntoIterator<Item = u8>) -> RecurResult<Self> {
        Ok(Self {
            hours: normalize("BYHOUR", hours, |h| h <= 23)?,
        })
    }
}

impl Limit for ByHour {
    fn filter(&self, instance: &Instance) -> bool {
        !self.hours.contains(&instance.hour())
    }
}

impl Expand for ByHour {
    fn expand(&self, instance: &Instance, _start: &Instance, out: &mut InstanceSet) {
        out.extend(self.hours.iter().filter_map(|&h| instance.with_hour(h)));
    }
}
