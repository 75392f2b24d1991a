//! Drop results and applying them to caller-owned item lists.

use crate::types::{ContainerId, Payload};

/// Where the dropped element came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedElement {
    pub container: ContainerId,
    pub index: usize,
}

/// The logical move a container reports when a drag ends on a valid target.
///
/// `added_index` is already corrected for the removal: when both indices are
/// set and `removed_index < added_index`, the raw insertion index has been
/// decremented so it can be applied after removing the item.
#[derive(Debug, Clone)]
pub struct DropResult {
    /// Container reporting this result.
    pub container: ContainerId,
    pub removed_index: Option<usize>,
    pub added_index: Option<usize>,
    pub payload: Payload,
    pub dropped_element: DroppedElement,
}

impl DropResult {
    /// Correct a raw insertion index for a preceding removal.
    pub fn corrected_added_index(removed: Option<usize>, added: Option<usize>) -> Option<usize> {
        match (removed, added) {
            (Some(removed), Some(added)) if removed < added => Some(added - 1),
            (_, added) => added,
        }
    }

    /// True if this container gains or loses an item.
    pub fn is_change(&self) -> bool {
        self.removed_index.is_some() || self.added_index.is_some()
    }

    /// True if the item stays in the same place.
    pub fn is_noop(&self) -> bool {
        !self.is_change() || (self.removed_index.is_some() && self.removed_index == self.added_index)
    }

    /// Apply this result to `items`.
    ///
    /// A removal takes the item out; an insertion reuses the removed item or
    /// builds one from the payload with `from_payload`. Returns the removed
    /// item when it was not reinserted here.
    pub fn apply<T>(
        &self,
        items: &mut Vec<T>,
        from_payload: impl FnOnce(&Payload) -> Option<T>,
    ) -> Option<T> {
        let removed = self
            .removed_index
            .filter(|&index| index < items.len())
            .map(|index| items.remove(index));

        let Some(added) = self.added_index else {
            return removed;
        };

        let item = match removed {
            Some(item) => Some(item),
            None => from_payload(&self.payload),
        };
        if let Some(item) = item {
            items.insert(added.min(items.len()), item);
        }
        None
    }
}
