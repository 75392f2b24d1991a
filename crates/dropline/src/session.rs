//! Drag sessions: one gesture from press to release.

use std::time::Duration;

use dropline_core::math::Vec2;
use dropline_core::profiling;
use tracing::{debug, info};

use crate::drop::DropResult;
use crate::error::{DndError, DndResult};
use crate::layout::LayoutPort;
use crate::options::ContainerOptions;
use crate::registry::ContainerRegistry;
use crate::types::{ContainerId, DragResult, DraggableInfo};

/// Pointer travel needed before a press turns into a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// State of one drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Latest sample; clones share the target mark.
    pub info: DraggableInfo,
    /// Position where the drag started.
    pub start_pos: Vec2,
    /// Whether the drag threshold has been exceeded.
    pub is_active: bool,
    /// Containers the drag can land in. Empty until the session is active.
    pub participants: Vec<ContainerId>,
}

impl DragSession {
    pub fn delta(&self) -> Vec2 {
        self.info.position - self.start_pos
    }

    pub fn target(&self) -> Option<ContainerId> {
        self.info.target_container()
    }
}

/// Drives drags across every container of a [`ContainerRegistry`].
///
/// Each sample is fed to every participant, nested containers first, and
/// drops run ancestors first so a parent never re-claims the pointer while
/// its children are being reset.
#[derive(Debug)]
pub struct DragManager {
    registry: ContainerRegistry,
    session: Option<DragSession>,
    threshold: f32,
}

impl Default for DragManager {
    fn default() -> Self {
        Self::new(ContainerRegistry::new())
    }
}

impl DragManager {
    pub fn new(registry: ContainerRegistry) -> Self {
        Self {
            registry,
            session: None,
            threshold: DRAG_THRESHOLD,
        }
    }

    /// Set the pointer travel needed before a drag starts. `0.0` starts on press.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ContainerRegistry {
        &mut self.registry
    }

    /// Register a container with the underlying registry.
    pub fn register(
        &mut self,
        layout: impl LayoutPort + 'static,
        options: ContainerOptions,
    ) -> DndResult<ContainerId> {
        self.registry.register(layout, options)
    }

    /// Unregister a container. Fails while it takes part in a drag.
    pub fn unregister(&mut self, id: ContainerId) -> DndResult<()> {
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.participants.contains(&id))
        {
            return Err(DndError::DragInProgress);
        }
        self.registry.unregister(id).map(drop)
    }

    /// Press on slot `index` of `source` at `pointer`.
    pub fn start_drag(&mut self, source: ContainerId, index: usize, pointer: Vec2) -> DndResult<()> {
        if self.session.is_some() {
            return Err(DndError::DragInProgress);
        }
        let container = self.registry.container(source)?;
        let len = container.layout().slot_count();
        if index >= len {
            return Err(DndError::InvalidSlotIndex {
                container: source,
                index,
                len,
            });
        }

        let element_size = container.layout().slot_rect(index).size();
        let payload = container.payload_for(index);
        let info = DraggableInfo::new(source, index, element_size, payload).with_position(pointer);
        debug!(container = source.0, index, "drag pressed");

        self.session = Some(DragSession {
            info,
            start_pos: pointer,
            is_active: false,
            participants: Vec::new(),
        });
        if self.threshold <= 0.0 {
            self.activate()?;
        }
        Ok(())
    }

    /// Feed a new pointer position.
    ///
    /// Returns true once the drag is active.
    pub fn update(&mut self, pointer: Vec2) -> DndResult<bool> {
        let session = self.session.as_mut().ok_or(DndError::NoActiveDrag)?;
        session.info.position = pointer;
        if !session.is_active {
            if session.delta().length() < self.threshold {
                return Ok(false);
            }
            return self.activate().map(|()| true);
        }
        self.process_sample()?;
        Ok(true)
    }

    fn activate(&mut self) -> DndResult<()> {
        let session = self.session.as_mut().ok_or(DndError::NoActiveDrag)?;
        let source = session.info.source;
        let index = session.info.element_index;

        let mut participants = self.registry.containers_compatible_with(source, index);
        self.registry.prepare_drag(&participants);
        // Nested containers first: they decide pointer ownership for their ancestors.
        participants.sort_by_key(|&id| std::cmp::Reverse(self.registry.depth(id)));

        info!(
            container = source.0,
            index,
            participants = participants.len(),
            "drag started"
        );
        session.participants = participants;
        session.is_active = true;
        self.process_sample()
    }

    fn process_sample(&mut self) -> DndResult<()> {
        profiling::new_frame();
        let Some(session) = self.session.as_ref() else {
            return Err(DndError::NoActiveDrag);
        };
        for &id in &session.participants {
            self.registry.handle_drag(id, &session.info)?;
        }
        Ok(())
    }

    /// Re-measure `id` after it scrolled during the drag.
    pub fn on_scroll(&mut self, id: ContainerId) -> DndResult<()> {
        self.registry.on_scroll(id)
    }

    /// Release the pointer and collect the results of every container that
    /// gained or lost the item.
    pub fn end_drag(&mut self) -> DndResult<Vec<DropResult>> {
        let session = self.session.take().ok_or(DndError::NoActiveDrag)?;
        if !session.is_active {
            debug!("drag released before threshold");
            return Ok(Vec::new());
        }

        let mut order = session.participants.clone();
        order.sort_by_key(|&id| self.registry.depth(id));

        let mut results = Vec::new();
        for id in order {
            if let Some(result) = self.registry.handle_drop(id, &session.info)? {
                results.push(result);
            }
        }
        info!(
            target = ?session.target().map(|id| id.0),
            results = results.len(),
            "drag ended"
        );
        Ok(results)
    }

    /// Abort the drag. Every container reverts and nothing is emitted.
    pub fn cancel_drag(&mut self) -> DndResult<()> {
        let session = self.session.as_ref().ok_or(DndError::NoActiveDrag)?;
        session.info.target.clear();
        self.end_drag().map(drop)
    }

    /// Advance deferred container effects.
    pub fn tick(&mut self, dt: Duration) {
        self.registry.tick(dt);
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// True while a drag is past its threshold.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.is_active)
    }

    /// True between a press and the threshold being exceeded.
    pub fn has_pending_drag(&self) -> bool {
        self.session.as_ref().is_some_and(|session| !session.is_active)
    }

    /// Container the drag would currently drop into.
    pub fn target(&self) -> Option<ContainerId> {
        self.session.as_ref().and_then(DragSession::target)
    }

    /// Current drag state of container `id`.
    pub fn drag_result(&self, id: ContainerId) -> Option<&DragResult> {
        self.registry.get(id).map(|container| container.drag_result())
    }
}

#[cfg(test)]
mod tests {
    use dropline_core::geometry::LayoutRect;

    use super::*;
    use crate::layout::RectLayout;
    use crate::types::Orientation;

    fn manager() -> (DragManager, ContainerId, ContainerId) {
        let mut manager = DragManager::default();
        let lists = ContainerOptions::new().group_name("lists");
        let a = manager
            .register(
                RectLayout::stacked(
                    Orientation::Vertical,
                    LayoutRect::new(0.0, 0.0, 100.0, 300.0),
                    &[50.0, 50.0, 50.0],
                ),
                lists.clone(),
            )
            .expect("valid");
        let b = manager
            .register(
                RectLayout::stacked(
                    Orientation::Vertical,
                    LayoutRect::new(200.0, 0.0, 100.0, 300.0),
                    &[50.0, 50.0],
                ),
                lists,
            )
            .expect("valid");
        (manager, a, b)
    }

    #[test]
    fn test_threshold_gates_activation() {
        let (mut manager, a, _) = manager();
        manager.start_drag(a, 0, Vec2::new(50.0, 25.0)).expect("start");
        assert!(manager.has_pending_drag());
        assert!(!manager.is_dragging());

        assert_eq!(manager.update(Vec2::new(52.0, 26.0)), Ok(false));
        assert_eq!(manager.drag_result(a), Some(&DragResult::default()));

        assert_eq!(manager.update(Vec2::new(50.0, 40.0)), Ok(true));
        assert!(manager.is_dragging());
        assert_eq!(manager.target(), Some(a));
        assert_eq!(manager.session().map(|s| s.participants.len()), Some(2));
    }

    #[test]
    fn test_release_before_threshold_is_quiet() {
        let (mut manager, a, _) = manager();
        manager.start_drag(a, 1, Vec2::new(50.0, 75.0)).expect("start");
        let results = manager.end_drag().expect("session");
        assert!(results.is_empty());
        assert_eq!(manager.registry().container(a).map(|c| c.phase()), Ok(crate::container::DragPhase::Idle));
    }

    #[test]
    fn test_cross_container_move() {
        let (manager, a, b) = manager();
        let mut manager = manager.with_threshold(0.0);
        manager.start_drag(a, 1, Vec2::new(50.0, 75.0)).expect("start");
        manager.update(Vec2::new(250.0, 30.0)).expect("active");
        assert_eq!(manager.target(), Some(b));
        assert_eq!(manager.drag_result(b).and_then(|r| r.added_index), Some(1));

        let results = manager.end_drag().expect("session");
        let moves: Vec<_> = results
            .iter()
            .map(|r| (r.container, r.removed_index, r.added_index))
            .collect();
        assert_eq!(moves, vec![(a, Some(1), None), (b, None, Some(1))]);
        assert!(!manager.is_dragging());
    }

    #[test]
    fn test_cancel_reverts_without_results() {
        let (manager, a, _) = manager();
        let mut manager = manager.with_threshold(0.0);
        manager.start_drag(a, 0, Vec2::new(50.0, 25.0)).expect("start");
        manager.update(Vec2::new(50.0, 140.0)).expect("active");
        assert_ne!(manager.registry().container(a).map(|c| c.layout().begin_end(1).begin), Ok(50.0));

        manager.cancel_drag().expect("session");
        assert_eq!(manager.registry().container(a).map(|c| c.layout().begin_end(1).begin), Ok(50.0));
        assert_eq!(manager.cancel_drag(), Err(DndError::NoActiveDrag));
    }

    #[test]
    fn test_protocol_errors() {
        let (mut manager, a, b) = manager();
        assert_eq!(
            manager.start_drag(a, 3, Vec2::ZERO),
            Err(DndError::InvalidSlotIndex {
                container: a,
                index: 3,
                len: 3
            })
        );
        assert_eq!(manager.update(Vec2::ZERO), Err(DndError::NoActiveDrag));

        manager.start_drag(a, 0, Vec2::ZERO).expect("start");
        assert_eq!(manager.start_drag(b, 0, Vec2::ZERO), Err(DndError::DragInProgress));
        manager.update(Vec2::new(0.0, 50.0)).expect("active");
        assert_eq!(manager.unregister(b), Err(DndError::DragInProgress));
    }
}
