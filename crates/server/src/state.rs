//! Shared index state for the HTTP shell.

use std::sync::{Arc, RwLock};

use basketry_core::CoOccurrenceIndex;

/// Handle to the currently live co-occurrence index.
///
/// The index itself is immutable; a dataset reload builds a complete new index
/// off to the side and swaps the `Arc` in one step, so readers only ever
/// observe a fully built index. In-flight queries keep the snapshot they
/// cloned until they finish.
#[derive(Clone)]
pub struct IndexHandle {
    inner: Arc<RwLock<Arc<CoOccurrenceIndex>>>,
}

impl IndexHandle {
    pub fn new(index: CoOccurrenceIndex) -> Self {
        Self { inner: Arc::new(RwLock::new(Arc::new(index))) }
    }

    /// Snapshot of the live index.
    pub fn current(&self) -> Arc<CoOccurrenceIndex> {
        self.inner.read().expect("index lock poisoned").clone()
    }

    /// Atomically replaces the live index with a freshly built one.
    pub fn swap(&self, index: CoOccurrenceIndex) {
        *self.inner.write().expect("index lock poisoned") = Arc::new(index);
    }
}

#[cfg(test)]
mod tests {
    use basketry_core::LineItem;
    use chrono::NaiveDate;

    use super::*;

    fn dataset() -> Vec<LineItem> {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        vec![
            LineItem::new("O1", "A", "A", date),
            LineItem::new("O1", "B", "B", date),
            LineItem::new("O1", "C", "C", date),
        ]
    }

    #[test]
    fn swap_replaces_the_snapshot_for_new_readers() {
        let handle = IndexHandle::new(CoOccurrenceIndex::build(&[]));
        let empty_snapshot = handle.current();

        handle.swap(CoOccurrenceIndex::build(&dataset()));

        assert!(empty_snapshot.is_empty());
        assert_eq!(handle.current().len(), 1);
    }
}
