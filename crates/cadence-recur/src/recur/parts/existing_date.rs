use cadence_core::Instance;

use crate::recur::filter::Limit;

/// Drops candidates whose date does not exist, like February 30th.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistingDate;

impl Limit for ExistingDate {
    fn filter(&self, instance: &Instance) -> bool {
        !instance.is_valid()
    }
}
