use tracing::{debug, trace};

use super::{shadow_bounds, CaptureNotice, DragPipeline, StageContext, FIRST_INSERT_MARGIN};
use crate::deferred::{DeferredEffect, INVALIDATE_RECTS_DELAY};
use crate::locator::SlotExtents;
use crate::types::{Behaviour, DraggableInfo};

impl DragPipeline {
    pub(super) fn removed_index(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        if self.memo.removed_index.is_none()
            && info.source == cx.id
            && cx.options.behaviour == Behaviour::Move
            && info.element_index < cx.slots.len()
        {
            self.memo.removed_index = Some(info.element_index);
        }
        self.result.removed_index = self.memo.removed_index;
    }

    pub(super) fn removed_visibility(&mut self, cx: &mut StageContext<'_>) {
        let Some(index) = self.result.removed_index else {
            return;
        };
        if let Some(slot) = cx.slots.get_mut(index) {
            if slot.visible {
                cx.layout.set_visibility(index, false);
                slot.visible = false;
            }
        }
    }

    pub(super) fn position(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        self.result.pos = if cx.suppressed {
            None
        } else {
            cx.layout.position(info.position)
        };
    }

    /// Ownership is reported for the whole subtree: a container also counts
    /// as captured while one of its descendants holds the pointer.
    pub(super) fn notify_parent(&mut self, cx: &StageContext<'_>) -> Option<CaptureNotice> {
        let captured = self.result.pos.is_some() || cx.suppressed;
        let notice = self.sync_capture(cx.parent, captured);
        if let Some(notice) = notice {
            trace!(container = cx.id.0, parent = notice.parent.0, captured, "capture changed");
        }
        notice
    }

    pub(super) fn element_size(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        self.result.element_size = match self.result.pos {
            None => {
                self.memo.element_size = None;
                None
            }
            Some(_) => Some(
                *self
                    .memo
                    .element_size
                    .get_or_insert_with(|| cx.layout.element_size(info.element_size)),
            ),
        };
    }

    pub(super) fn target_container(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        if self.result.pos.is_some() {
            info.target.set(cx.id);
        } else {
            info.target.release(cx.id);
        }
    }

    pub(super) fn invalidate_shadow(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        if !info.invalidate_shadow {
            return;
        }
        match (self.result.pos, self.result.added_index) {
            (None, _) => self.result.shadow_begin_end = None,
            (Some(_), Some(added)) => self.recompute_shadow(cx, added),
            (Some(_), None) => {}
        }
    }

    pub(super) fn added_index(&mut self, cx: &StageContext<'_>) {
        let Some(pos) = self.result.pos else {
            self.result.added_index = None;
            return;
        };
        let extents = SlotExtents::measure(&*cx.layout, cx.slots.len(), self.result.removed_index);
        let located = match self.result.shadow_begin_end {
            None => Some(extents.insertion_at(pos).unwrap_or(0)),
            Some(shadow) if shadow.contains(pos) => None,
            Some(shadow) if pos < shadow.adjusted_begin() => extents.slot_at(pos),
            Some(_) => Some(extents.insertion_after(pos)),
        };
        self.result.added_index = located.or(self.result.added_index);
    }

    pub(super) fn reset_shadow_adjustment(&mut self) {
        let added = self.result.added_index;
        if self.memo.adjustment_index.is_some() && added != self.memo.adjustment_index {
            if let Some(shadow) = self.result.shadow_begin_end.as_mut() {
                shadow.begin_adjustment = 0.0;
            }
        }
        self.memo.adjustment_index = added;
    }

    /// Only containers the drag did not start from can overflow.
    pub(super) fn insertion_size_change(&mut self, cx: &mut StageContext<'_>) {
        if self.result.removed_index.is_some() {
            return;
        }
        match self.result.added_index {
            Some(_) if !self.memo.stretcher_checked => {
                let container = cx.layout.container_begin_end();
                let scroll_size = cx.layout.scroll_size();
                let container_end = if scroll_size > cx.layout.container_size() {
                    container.begin + scroll_size - cx.layout.scroll_value()
                } else {
                    container.end
                };
                let last_end = match cx.slots.len().checked_sub(1) {
                    Some(last) => cx.layout.begin_end(last).end - cx.slots[last].translation,
                    None => container.begin,
                };
                let overflow = last_end + self.result.element_size.unwrap_or(0.0) - container_end;
                if overflow > 0.0 {
                    cx.layout.show_spacer(overflow);
                    self.memo.stretcher = Some(overflow);
                    debug!(container = cx.id.0, size = overflow, "showing overflow spacer");
                }
                self.memo.stretcher_checked = true;
                cx.deferred.schedule(DeferredEffect::InvalidateRects, INVALIDATE_RECTS_DELAY);
            }
            None if self.memo.stretcher_checked => {
                if self.memo.stretcher.take().is_some() {
                    cx.layout.hide_spacer();
                    debug!(container = cx.id.0, "hiding overflow spacer");
                }
                self.memo.stretcher_checked = false;
                cx.deferred.schedule(DeferredEffect::InvalidateRects, INVALIDATE_RECTS_DELAY);
            }
            _ => {}
        }
    }

    pub(super) fn translations(&mut self, cx: &mut StageContext<'_>) {
        let added = self.result.added_index;
        let removed = self.result.removed_index;
        if (added, removed) == self.memo.translated {
            return;
        }
        let removed_size = removed.map_or(0.0, |index| cx.layout.slot_size(index));
        let element_size = self.result.element_size.unwrap_or(0.0);

        for index in 0..cx.slots.len() {
            if Some(index) == removed {
                continue;
            }
            let mut offset = 0.0;
            if removed.is_some_and(|removed| removed < index) {
                offset -= removed_size;
            }
            if added.is_some_and(|added| added <= index) {
                offset += element_size;
            }
            if cx.slots[index].translation != offset {
                cx.layout.set_translation(index, offset);
                cx.slots[index].translation = offset;
            }
        }
        self.memo.translated = (added, removed);
    }

    pub(super) fn shadow_bounds(&mut self, info: &DraggableInfo, cx: &StageContext<'_>) {
        match (self.result.pos, self.result.added_index) {
            (Some(_), Some(added)) => {
                if info.invalidate_shadow || self.memo.shadow_index != Some(added) {
                    self.memo.shadow_index = Some(added);
                    self.recompute_shadow(cx, added);
                }
            }
            _ => {
                self.memo.shadow_index = None;
                self.result.shadow_begin_end = None;
            }
        }
    }

    pub(super) fn first_insert_shadow_adjustment(&mut self) {
        let Some(pos) = self.result.pos else {
            self.memo.first_insert_index = None;
            return;
        };
        let Some(added) = self.result.added_index else {
            return;
        };
        if self.memo.first_insert_index.is_some() {
            return;
        }
        if let Some(shadow) = self.result.shadow_begin_end.as_mut() {
            if pos < shadow.begin {
                shadow.begin_adjustment = pos - shadow.begin - FIRST_INSERT_MARGIN;
            }
        }
        self.memo.first_insert_index = Some(added);
    }

    fn recompute_shadow(&mut self, cx: &StageContext<'_>, added: usize) {
        let begin_adjustment = self
            .result
            .shadow_begin_end
            .map_or(0.0, |shadow| shadow.begin_adjustment);
        self.result.shadow_begin_end = Some(shadow_bounds(
            &*cx.layout,
            cx.slots.len(),
            added,
            self.result.removed_index,
            self.result.element_size.unwrap_or(0.0),
            begin_adjustment,
        ));
    }
}
