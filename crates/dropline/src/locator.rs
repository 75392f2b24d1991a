//! Insertion-index lookup over ordered slot extents.
//!
//! Extents must be sorted by display order (non-decreasing `begin`). All
//! lookups are binary searches.

use crate::layout::LayoutPort;
use crate::types::BeginEnd;

/// Index of the slot containing `pos` (containing-slot mode).
///
/// Slots are treated as `[begin, end)`, so a position on a shared boundary
/// belongs to the later slot. A position in a gap maps to the following
/// slot, a position past the last slot maps to `extents.len()`, and a
/// position before the first slot yields `None`. An empty sequence yields
/// `Some(0)`.
pub fn slot_at(extents: &[BeginEnd], pos: f32) -> Option<usize> {
    let index = extents.partition_point(|extent| extent.end <= pos);
    if index == 0 && extents.first().is_some_and(|first| pos < first.begin) {
        return None;
    }
    Some(index)
}

/// Insertion index for `pos` (midpoint-refined mode).
///
/// Inside slot `i` this returns `i` when `pos` is before the slot's midpoint
/// and `i + 1` otherwise. Gaps, past-the-end and before-start behave like
/// [`slot_at`].
pub fn insertion_at(extents: &[BeginEnd], pos: f32) -> Option<usize> {
    let index = slot_at(extents, pos)?;
    match extents.get(index) {
        Some(extent) if extent.begin <= pos => {
            Some(if pos < extent.midpoint() { index } else { index + 1 })
        }
        _ => Some(index),
    }
}

/// Number of slots that begin before `pos`.
///
/// This is the insertion index just past the slot containing `pos`, or the
/// index of the next slot when `pos` sits in a gap.
pub fn insertion_after(extents: &[BeginEnd], pos: f32) -> usize {
    extents.partition_point(|extent| extent.begin < pos)
}

/// Slot extents of a container with one slot optionally left out.
///
/// The vacated slot of a move drag stays in the container's sequence until
/// drop but must not take part in hit testing. Indices returned by the
/// lookups are mapped back onto the full sequence.
#[derive(Debug, Clone, Default)]
pub struct SlotExtents {
    extents: Vec<BeginEnd>,
    indices: Vec<usize>,
    total: usize,
}

impl SlotExtents {
    /// Measure `count` slots through `layout`, skipping `skip`.
    pub fn measure(layout: &dyn LayoutPort, count: usize, skip: Option<usize>) -> Self {
        let mut extents = Vec::with_capacity(count);
        let mut indices = Vec::with_capacity(count);
        for index in (0..count).filter(|&index| Some(index) != skip) {
            extents.push(layout.begin_end(index));
            indices.push(index);
        }
        Self {
            extents,
            indices,
            total: count,
        }
    }

    pub fn from_extents(extents: Vec<BeginEnd>) -> Self {
        let total = extents.len();
        Self {
            extents,
            indices: (0..total).collect(),
            total,
        }
    }

    pub fn extents(&self) -> &[BeginEnd] {
        &self.extents
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    fn to_slot_index(&self, filtered: usize) -> usize {
        self.indices.get(filtered).copied().unwrap_or(self.total)
    }

    pub fn slot_at(&self, pos: f32) -> Option<usize> {
        slot_at(&self.extents, pos).map(|index| self.to_slot_index(index))
    }

    pub fn insertion_at(&self, pos: f32) -> Option<usize> {
        insertion_at(&self.extents, pos).map(|index| self.to_slot_index(index))
    }

    pub fn insertion_after(&self, pos: f32) -> usize {
        self.to_slot_index(insertion_after(&self.extents, pos))
    }
}
