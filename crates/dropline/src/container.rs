//! A single drop container.

use std::time::Duration;

use dropline_core::profiling::profile_function;
use tracing::{debug, trace, warn};

use crate::deferred::{DeferredEffect, DeferredQueue, ENABLE_ANIMATION_DELAY};
use crate::drop::{DropResult, DroppedElement};
use crate::error::ConfigError;
use crate::layout::LayoutPort;
use crate::options::ContainerOptions;
use crate::pipeline::{CaptureNotice, DragPipeline, StageContext};
use crate::scroll::DragScroller;
use crate::slot::Slot;
use crate::types::{Behaviour, ContainerId, DragResult, DraggableInfo, Payload};

/// Where a container is in the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Not taking part in a drag.
    #[default]
    Idle,
    /// Prepared for a drag but no sample processed yet.
    Armed,
    /// At least one sample processed; slots may be translated.
    Active,
}

/// An ordered list of slots that items can be dragged out of and dropped into.
///
/// Containers are normally driven through a
/// [`ContainerRegistry`](crate::ContainerRegistry), which delivers the
/// [`CaptureNotice`]s returned here to parent containers.
pub struct Container {
    id: ContainerId,
    options: ContainerOptions,
    layout: Box<dyn LayoutPort>,
    slots: Vec<Slot>,
    pipeline: DragPipeline,
    deferred: DeferredQueue,
    scroller: Option<Box<dyn DragScroller>>,
    parent: Option<ContainerId>,
    children: Vec<ContainerId>,
    pos_in_child_container: bool,
    last_sample: Option<DraggableInfo>,
    phase: DragPhase,
}

impl Container {
    pub fn new(
        id: ContainerId,
        mut layout: Box<dyn LayoutPort>,
        options: ContainerOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        layout.set_orientation(options.orientation);
        let slots = vec![Slot::new(); layout.slot_count()];

        let mut container = Self {
            id,
            options,
            layout,
            slots,
            pipeline: DragPipeline::new(),
            deferred: DeferredQueue::new(),
            scroller: None,
            parent: None,
            children: Vec::new(),
            pos_in_child_container: false,
            last_sample: None,
            phase: DragPhase::Idle,
        };
        container.enable_animation();
        Ok(container)
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Replace the options. Takes effect from the next drag sample.
    pub fn set_options(&mut self, options: ContainerOptions) -> Result<(), ConfigError> {
        options.validate()?;
        self.layout.set_orientation(options.orientation);
        self.options = options;
        Ok(())
    }

    pub fn layout(&self) -> &dyn LayoutPort {
        self.layout.as_ref()
    }

    pub fn layout_mut(&mut self) -> &mut dyn LayoutPort {
        self.layout.as_mut()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn set_scroller(&mut self, scroller: impl DragScroller + 'static) {
        self.scroller = Some(Box::new(scroller));
    }

    pub fn drag_result(&self) -> &DragResult {
        self.pipeline.result()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    /// True while a nested container owns the pointer.
    pub fn is_pos_in_child_container(&self) -> bool {
        self.pos_in_child_container
    }

    pub fn scale(&self) -> f32 {
        self.layout.container_scale()
    }

    pub fn payload_for(&self, index: usize) -> Payload {
        self.options.payload_for(index)
    }

    /// True if a drag started from `source` (configured with `source_options`)
    /// may land in this container.
    ///
    /// Structural nesting is checked by the registry, which knows the tree.
    pub fn is_drag_relevant(&self, source: ContainerId, source_options: &ContainerOptions) -> bool {
        if self.options.behaviour == Behaviour::Copy {
            return false;
        }
        if source == self.id {
            return true;
        }
        let source_group = source_options.group_name.as_deref();
        if source_group.is_some() && source_group == self.options.group_name.as_deref() {
            return true;
        }
        self.options.accepts_group(source_group)
    }

    /// Arm the container for a new drag.
    pub(crate) fn prepare_drag(&mut self) {
        profile_function!();
        self.layout.invalidate_rects();
        self.slots.resize_with(self.layout.slot_count(), Slot::new);
        for slot in &mut self.slots {
            slot.nested.clear();
        }
        self.pipeline.reset();
        self.parent = None;
        self.children.clear();
        self.pos_in_child_container = false;
        self.last_sample = None;
        self.phase = DragPhase::Armed;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ContainerId>) {
        self.parent = parent;
    }

    /// Record `child` as nested inside slot `slot` for this drag.
    pub(crate) fn attach_child(&mut self, child: ContainerId, slot: usize) {
        self.children.push(child);
        if let Some(slot) = self.slots.get_mut(slot) {
            slot.nested.push(child);
        }
    }

    /// Process one drag sample.
    ///
    /// The returned notice must be delivered to the parent with
    /// [`on_child_position_captured`](Self::on_child_position_captured).
    pub fn handle_drag(&mut self, info: &DraggableInfo) -> Option<CaptureNotice> {
        profile_function!();
        if self.phase == DragPhase::Idle {
            warn!(container = self.id.0, "handle_drag called before prepare_drag");
        }
        self.phase = DragPhase::Active;
        self.last_sample = Some(info.clone());
        let notice = self.run_pipeline(info);
        if let Some(scroller) = self.scroller.as_mut() {
            scroller.on_drag(info, self.pipeline.result());
        }
        notice
    }

    /// A nested container gained or lost the pointer.
    pub fn on_child_position_captured(&mut self, captured: bool) -> Option<CaptureNotice> {
        trace!(container = self.id.0, captured, "child capture");
        self.pos_in_child_container = captured;
        match self.last_sample.clone() {
            Some(sample) => self.run_pipeline(&sample),
            None => self.pipeline.sync_capture(self.parent, captured),
        }
    }

    /// Re-measure after the container scrolled.
    pub fn on_scroll(&mut self) -> Option<CaptureNotice> {
        self.process_last_sample()
    }

    /// Re-measure after a slot transition finished.
    pub fn on_translated(&mut self) -> Option<CaptureNotice> {
        self.process_last_sample()
    }

    fn process_last_sample(&mut self) -> Option<CaptureNotice> {
        let mut sample = self.last_sample.clone()?;
        sample.invalidate_shadow = true;
        self.run_pipeline(&sample)
    }

    fn run_pipeline(&mut self, info: &DraggableInfo) -> Option<CaptureNotice> {
        let mut cx = StageContext {
            id: self.id,
            options: &self.options,
            layout: &mut *self.layout,
            slots: &mut self.slots,
            parent: self.parent,
            suppressed: self.pos_in_child_container,
            deferred: &mut self.deferred,
        };
        self.pipeline.run(info, &mut cx)
    }

    /// Finish the drag.
    ///
    /// Reverts every visual change and, if the drag ended over a target and
    /// this container gains or loses the item, emits the [`DropResult`] to
    /// the `on_drop` callback and returns it.
    pub fn handle_drop(&mut self, info: &DraggableInfo) -> (Option<DropResult>, Option<CaptureNotice>) {
        profile_function!();
        self.last_sample = None;
        self.pos_in_child_container = false;
        let notice = self.pipeline.sync_capture(self.parent, false);

        let result = self.drop_result(info);
        self.reset_slots();

        if let Some(result) = &result {
            debug!(
                container = self.id.0,
                removed = ?result.removed_index,
                added = ?result.added_index,
                "drop"
            );
            if let Some(on_drop) = &self.options.on_drop {
                on_drop(result);
            }
        }

        if let Some(scroller) = self.scroller.as_mut() {
            scroller.reset();
        }
        self.pipeline.reset();
        self.parent = None;
        self.children.clear();
        self.phase = DragPhase::Idle;
        (result, notice)
    }

    fn drop_result(&self, info: &DraggableInfo) -> Option<DropResult> {
        if self.phase != DragPhase::Active {
            return None;
        }
        info.target_container()?;
        let result = self.pipeline.result();
        if result.removed_index.is_none() && result.added_index.is_none() {
            return None;
        }
        Some(DropResult {
            container: self.id,
            removed_index: result.removed_index,
            added_index: DropResult::corrected_added_index(result.removed_index, result.added_index),
            payload: info.payload.clone(),
            dropped_element: DroppedElement {
                container: info.source,
                index: info.element_index,
            },
        })
    }

    fn reset_slots(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            self.layout.set_animation(index, None);
            self.layout.set_translation(index, 0.0);
            self.layout.set_visibility(index, true);
            *slot = Slot {
                animated: false,
                ..Slot::new()
            };
        }
        self.slots.resize_with(self.layout.slot_count(), || Slot {
            animated: false,
            ..Slot::new()
        });
        if self.pipeline.stretcher().is_some() {
            self.layout.hide_spacer();
        }
        self.deferred
            .schedule(DeferredEffect::EnableAnimation, ENABLE_ANIMATION_DELAY);
    }

    fn enable_animation(&mut self) {
        let duration = self.options.animation_duration;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            self.layout.set_animation(index, Some(duration));
            slot.animated = true;
        }
    }

    /// Advance deferred effects by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        for effect in self.deferred.tick(dt) {
            match effect {
                DeferredEffect::InvalidateRects => self.layout.invalidate_rects(),
                DeferredEffect::EnableAnimation => self.enable_animation(),
            }
        }
    }

    pub fn has_pending_effects(&self) -> bool {
        !self.deferred.is_empty()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("slots", &self.slots.len())
            .field("phase", &self.phase)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("pos_in_child_container", &self.pos_in_child_container)
            .finish_non_exhaustive()
    }
}
