//! The protocol shared by every pipeline node.

use std::collections::BTreeSet;

use cadence_core::Instance;

use crate::error::RecurResult;

/// A batch of unique instances in ascending order.
pub type InstanceSet = BTreeSet<Instance>;

/// ## Summary
/// A pipeline node that produces recurrence instances on demand.
///
/// Successive [`next`](PullStage::next) results are strictly ascending.
/// [`next_set`](PullStage::next_set) returns all candidates of the next
/// cycle (week, month or year, depending on the rule); consecutive batches
/// are disjoint and ascending relative to each other. Stages that reason
/// about a whole cycle at once (by-set-position, say) must pull batches.
///
/// The returned batch is a view of the stage's own buffer and is only valid
/// until the stage is pulled again.
pub trait PullStage {
    /// ## Summary
    /// Returns the next instance of the stream.
    ///
    /// ## Errors
    /// Returns `IterationBoundExceeded` if no further instance can be produced
    /// within the iteration bounds.
    fn next(&mut self) -> RecurResult<Instance>;

    /// ## Summary
    /// Returns the next whole batch.
    ///
    /// ## Errors
    /// Returns `IterationBoundExceeded` if no further non-empty batch can be
    /// produced within the iteration bounds.
    fn next_set(&mut self) -> RecurResult<&InstanceSet>;
}

impl<S: PullStage + ?Sized> PullStage for Box<S> {
    fn next(&mut self) -> RecurResult<Instance> {
        (**self).next()
    }

    fn next_set(&mut self) -> RecurResult<&InstanceSet> {
        (**self).next_set()
    }
}
