//! Per-stage batch buffer.

use std::ops::Bound;

use cadence_core::Instance;

use super::stage::InstanceSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// No batch has been handed out for single pulls yet.
    Unset,
    /// Before the first element of the current batch.
    Start,
    /// Past the given element of the current batch.
    After(Instance),
}

/// ## Summary
/// The reusable buffer a stage builds each batch in.
///
/// Holds the current batch, uniqued and ordered, plus the cursor single
/// pulls are served from. Replacing the batch (via [`WorkingSet::clear`])
/// rewinds the cursor to the start of the new batch.
#[derive(Debug)]
pub struct WorkingSet {
    items: InstanceSet,
    cursor: Cursor,
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkingSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: InstanceSet::new(),
            cursor: Cursor::Unset,
        }
    }

    /// Empties the buffer for a new batch and rewinds the cursor.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = Cursor::Start;
    }

    /// Adds an instance; returns `false` if an equal one was already present.
    pub fn insert(&mut self, instance: Instance) -> bool {
        self.items.insert(instance)
    }

    /// Mutable access for expansions that write straight into the batch.
    pub(crate) const fn items_mut(&mut self) -> &mut InstanceSet {
        &mut self.items
    }

    /// Read-only view of the current batch.
    #[must_use]
    pub const fn view(&self) -> &InstanceSet {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// ## Summary
    /// Returns the element after the cursor and moves the cursor past it.
    ///
    /// Returns `None` when the batch is exhausted or no batch has been
    /// produced yet; the caller then fills a new batch.
    pub fn advance(&mut self) -> Option<Instance> {
        let next = match self.cursor {
            Cursor::Unset => None,
            Cursor::Start => self.items.first().copied(),
            Cursor::After(last) => self
                .items
                .range((Bound::Excluded(last), Bound::Unbounded))
                .next()
                .copied(),
        }?;
        self.cursor = Cursor::After(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u8) -> Instance {
        Instance::date_only(2024, 1, d).unwrap()
    }

    #[test]
    fn test_insert_uniques_and_orders() {
        let mut working = WorkingSet::new();
        working.clear();

        assert!(working.insert(day(5)));
        assert!(working.insert(day(2)));
        assert!(!working.insert(day(5)));

        let items: Vec<_> = working.view().iter().copied().collect();
        assert_eq!(items, vec![day(2), day(5)]);
    }

    #[test]
    fn test_advance_requires_a_batch() {
        let mut working = WorkingSet::new();
        working.insert(day(1));

        assert_eq!(working.advance(), None);
    }

    #[test]
    fn test_advance_walks_batch_then_exhausts() {
        let mut working = WorkingSet::new();
        working.clear();
        working.insert(day(3));
        working.insert(day(1));

        assert_eq!(working.advance(), Some(day(1)));
        assert_eq!(working.advance(), Some(day(3)));
        assert_eq!(working.advance(), None);
        assert_eq!(working.advance(), None);
    }

    #[test]
    fn test_clear_rewinds_cursor() {
        let mut working = WorkingSet::new();
        working.clear();
        working.insert(day(1));
        assert_eq!(working.advance(), Some(day(1)));

        working.clear();
        working.insert(day(9));
        assert_eq!(working.len(), 1);
        assert_eq!(working.advance(), Some(day(9)));
    }
}
