//! Per-container drag pipeline.
//!
//! Every pointer sample runs the same fixed sequence of [`Stage`]s over one
//! shared [`DragResult`]. Later stages read fields written by earlier ones, so
//! [`STAGES`] order is part of the contract. Each stage owns a slot in
//! [`PipelineMemo`] and only redoes geometry work when its inputs changed.
//!
//! ```text
//! RemovedIndex -> RemovedVisibility -> Position -> NotifyParent
//!   -> ElementSize -> TargetContainer -> InvalidateShadow -> AddedIndex
//!   -> ResetShadowAdjustment -> InsertionSizeChange -> Translations
//!   -> ShadowBounds -> FirstInsertShadowAdjustment
//! ```
//!
//! Translations move the slots the insertion index was located against. After
//! the last stage the index is located again over the moved slots, and
//! [`SETTLE_STAGES`] re-run until it stops changing, so a repeated sample is a
//! no-op.

mod shadow;
mod stages;

use dropline_core::profiling::profile_function;
use tracing::debug;

use crate::deferred::DeferredQueue;
use crate::layout::LayoutPort;
use crate::options::ContainerOptions;
use crate::slot::Slot;
use crate::types::{ContainerId, DragResult, DraggableInfo};

pub use shadow::shadow_bounds;

/// Margin subtracted from the first-settle begin adjustment.
pub const FIRST_INSERT_MARGIN: f32 = 5.0;

/// One step of the drag pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Pin the vacated index for move drags that started in this container.
    RemovedIndex,
    /// Hide the vacated slot.
    RemovedVisibility,
    /// Project the pointer onto this container's axis.
    Position,
    /// Tell the parent container when pointer ownership changes.
    NotifyParent,
    /// Memoize the dragged element's size along the axis.
    ElementSize,
    /// Mark or unmark this container as the drop target.
    TargetContainer,
    /// Recompute placeholder bounds when the sample asks for it.
    InvalidateShadow,
    /// Locate the insertion index.
    AddedIndex,
    /// Drop the first-settle adjustment once the index moves.
    ResetShadowAdjustment,
    /// Show or hide the overflow spacer.
    InsertionSizeChange,
    /// Shift siblings to make room.
    Translations,
    /// Compute placeholder bounds.
    ShadowBounds,
    /// Pull the placeholder toward the pointer on the first settle.
    FirstInsertShadowAdjustment,
}

/// Pipeline stages in execution order.
pub const STAGES: [Stage; 13] = [
    Stage::RemovedIndex,
    Stage::RemovedVisibility,
    Stage::Position,
    Stage::NotifyParent,
    Stage::ElementSize,
    Stage::TargetContainer,
    Stage::InvalidateShadow,
    Stage::AddedIndex,
    Stage::ResetShadowAdjustment,
    Stage::InsertionSizeChange,
    Stage::Translations,
    Stage::ShadowBounds,
    Stage::FirstInsertShadowAdjustment,
];

/// Stages re-run after a moved insertion index, in execution order.
pub const SETTLE_STAGES: [Stage; 4] = [
    Stage::ResetShadowAdjustment,
    Stage::InsertionSizeChange,
    Stage::Translations,
    Stage::ShadowBounds,
];

/// Per-stage memory, reset at the start of every drag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineMemo {
    /// [`Stage::RemovedIndex`]
    pub removed_index: Option<usize>,
    /// [`Stage::NotifyParent`]: last ownership state reported to the parent.
    pub captured: bool,
    /// [`Stage::ElementSize`]
    pub element_size: Option<f32>,
    /// [`Stage::ResetShadowAdjustment`]
    pub adjustment_index: Option<usize>,
    /// [`Stage::InsertionSizeChange`]: whether overflow was checked for this entry.
    pub stretcher_checked: bool,
    /// [`Stage::InsertionSizeChange`]: size of the visible spacer.
    pub stretcher: Option<f32>,
    /// [`Stage::Translations`]: `(added_index, removed_index)` last applied.
    pub translated: (Option<usize>, Option<usize>),
    /// [`Stage::ShadowBounds`]
    pub shadow_index: Option<usize>,
    /// [`Stage::FirstInsertShadowAdjustment`]
    pub first_insert_index: Option<usize>,
}

/// Pointer ownership change to deliver to a parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureNotice {
    pub parent: ContainerId,
    /// True if the position is owned somewhere inside the notifying container.
    pub captured: bool,
}

/// Everything a stage may read or mutate besides the pipeline's own state.
pub struct StageContext<'a> {
    pub id: ContainerId,
    pub options: &'a ContainerOptions,
    pub layout: &'a mut dyn LayoutPort,
    pub slots: &'a mut [Slot],
    pub parent: Option<ContainerId>,
    /// A nested container owns the pointer.
    pub suppressed: bool,
    pub deferred: &'a mut DeferredQueue,
}

/// The drag pipeline of one container.
#[derive(Debug, Default)]
pub struct DragPipeline {
    memo: PipelineMemo,
    result: DragResult,
}

impl DragPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> &DragResult {
        &self.result
    }

    pub fn memo(&self) -> &PipelineMemo {
        &self.memo
    }

    /// Forget everything about the current drag.
    pub fn reset(&mut self) {
        self.memo = PipelineMemo::default();
        self.result = DragResult::default();
    }

    /// Run every stage for one sample.
    ///
    /// Returns the ownership change the parent must hear about, if any.
    pub fn run(&mut self, info: &DraggableInfo, cx: &mut StageContext<'_>) -> Option<CaptureNotice> {
        profile_function!();
        let mut notice = None;
        for stage in STAGES {
            self.apply(stage, info, cx, &mut notice);
        }
        self.settle(info, cx, &mut notice);
        notice
    }

    /// Re-locate the insertion index over the translated slots until it is
    /// stable. Each pass either keeps the index or moves it by re-running
    /// [`SETTLE_STAGES`].
    fn settle(&mut self, info: &DraggableInfo, cx: &mut StageContext<'_>, notice: &mut Option<CaptureNotice>) {
        for _ in 0..=cx.slots.len() {
            let previous = self.result.added_index;
            self.added_index(cx);
            if self.result.added_index == previous {
                return;
            }
            for stage in SETTLE_STAGES {
                self.apply(stage, info, cx, notice);
            }
        }
        debug!(container = cx.id.0, added = ?self.result.added_index, "insertion index did not settle");
    }

    fn apply(
        &mut self,
        stage: Stage,
        info: &DraggableInfo,
        cx: &mut StageContext<'_>,
        notice: &mut Option<CaptureNotice>,
    ) {
        match stage {
            Stage::RemovedIndex => self.removed_index(info, cx),
            Stage::RemovedVisibility => self.removed_visibility(cx),
            Stage::Position => self.position(info, cx),
            Stage::NotifyParent => *notice = self.notify_parent(cx),
            Stage::ElementSize => self.element_size(info, cx),
            Stage::TargetContainer => self.target_container(info, cx),
            Stage::InvalidateShadow => self.invalidate_shadow(info, cx),
            Stage::AddedIndex => self.added_index(cx),
            Stage::ResetShadowAdjustment => self.reset_shadow_adjustment(),
            Stage::InsertionSizeChange => self.insertion_size_change(cx),
            Stage::Translations => self.translations(cx),
            Stage::ShadowBounds => self.shadow_bounds(info, cx),
            Stage::FirstInsertShadowAdjustment => self.first_insert_shadow_adjustment(),
        }
    }

    /// Report `captured` to `parent` without running the stages.
    ///
    /// Used when a nested container's ownership changes before this container
    /// has seen any sample.
    pub fn sync_capture(&mut self, parent: Option<ContainerId>, captured: bool) -> Option<CaptureNotice> {
        let parent = parent?;
        if self.memo.captured == captured {
            return None;
        }
        self.memo.captured = captured;
        Some(CaptureNotice { parent, captured })
    }

    /// Size of the overflow spacer currently shown by this pipeline.
    pub fn stretcher(&self) -> Option<f32> {
        self.memo.stretcher
    }
}
