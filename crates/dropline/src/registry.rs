//! Registry of all drop containers.
//!
//! The registry owns every [`Container`], hands out [`ContainerId`]s, links
//! containers into a tree at drag start and delivers capture notices up that
//! tree within the sample that produced them.

use std::time::Duration;

use dropline_core::geometry::LayoutRect;
use dropline_core::profiling::profile_function;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::container::Container;
use crate::drop::DropResult;
use crate::error::{DndError, DndResult};
use crate::layout::LayoutPort;
use crate::options::ContainerOptions;
use crate::pipeline::CaptureNotice;
use crate::tree::{ContainerGeometry, ParentLink, SpatialResolver, TreeResolver};
use crate::types::{ContainerId, DraggableInfo};

pub struct ContainerRegistry {
    containers: IndexMap<ContainerId, Container>,
    next_id: usize,
    resolver: Box<dyn TreeResolver>,
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRegistry {
    /// Create an empty registry that infers nesting from container rectangles.
    pub fn new() -> Self {
        Self::with_resolver(SpatialResolver)
    }

    pub fn with_resolver(resolver: impl TreeResolver + 'static) -> Self {
        Self {
            containers: IndexMap::new(),
            next_id: 0,
            resolver: Box::new(resolver),
        }
    }

    pub fn set_resolver(&mut self, resolver: impl TreeResolver + 'static) {
        self.resolver = Box::new(resolver);
    }

    pub fn register(
        &mut self,
        layout: impl LayoutPort + 'static,
        options: ContainerOptions,
    ) -> DndResult<ContainerId> {
        let id = ContainerId(self.next_id);
        let container = Container::new(id, Box::new(layout), options)?;
        self.next_id += 1;
        self.containers.insert(id, container);
        debug!(container = id.0, "registered container");
        Ok(id)
    }

    pub fn unregister(&mut self, id: ContainerId) -> DndResult<Container> {
        self.containers
            .shift_remove(&id)
            .ok_or(DndError::UnknownContainer(id))
    }

    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    pub fn container(&self, id: ContainerId) -> DndResult<&Container> {
        self.get(id).ok_or(DndError::UnknownContainer(id))
    }

    pub fn container_mut(&mut self, id: ContainerId) -> DndResult<&mut Container> {
        self.get_mut(id).ok_or(DndError::UnknownContainer(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// True if dragging slot `dragged_index` of `source` may land in `target`.
    ///
    /// Besides the options-level rules of [`Container::is_drag_relevant`], a
    /// container nested inside the dragged slot never accepts it.
    pub fn is_drag_relevant(&self, target: ContainerId, source: ContainerId, dragged_index: usize) -> bool {
        let (Some(target_container), Some(source_container)) = (self.get(target), self.get(source)) else {
            return false;
        };
        if !target_container.is_drag_relevant(source, source_container.options()) {
            return false;
        }
        target == source
            || !self
                .resolver
                .is_nested_in(target, source, Some(dragged_index), self)
    }

    /// Containers a drag of `dragged_index` from `source` can land in, in
    /// registration order.
    pub fn containers_compatible_with(&self, source: ContainerId, dragged_index: usize) -> Vec<ContainerId> {
        self.ids()
            .filter(|&id| self.is_drag_relevant(id, source, dragged_index))
            .collect()
    }

    /// Arm `participants` for a drag and link them into a tree.
    pub fn prepare_drag(&mut self, participants: &[ContainerId]) {
        profile_function!();
        let this = &*self;
        let links: Vec<(ContainerId, ParentLink)> = participants
            .iter()
            .filter_map(|&child| {
                this.resolver
                    .resolve_parent(child, participants, this)
                    .map(|link| (child, link))
            })
            .collect();

        for id in participants {
            if let Some(container) = self.containers.get_mut(id) {
                container.prepare_drag();
            }
        }

        for (child, link) in links {
            if let Some(container) = self.containers.get_mut(&child) {
                container.set_parent(Some(link.container));
            }
            if let Some(parent) = self.containers.get_mut(&link.container) {
                parent.attach_child(child, link.slot);
            }
            debug!(child = child.0, parent = link.container.0, slot = link.slot, "nested container");
        }
    }

    /// Number of ancestors of `id` in the current drag.
    pub fn depth(&self, id: ContainerId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(Container::parent);
        while let Some(parent) = current {
            depth += 1;
            if depth > self.containers.len() {
                break;
            }
            current = self.get(parent).and_then(Container::parent);
        }
        depth
    }

    /// Deliver `notice` and every notice it triggers up the tree.
    fn propagate(&mut self, mut notice: Option<CaptureNotice>) {
        let mut hops = 0;
        while let Some(CaptureNotice { parent, captured }) = notice {
            hops += 1;
            if hops > self.containers.len() {
                warn!(container = parent.0, "capture notice cycle");
                return;
            }
            notice = self
                .containers
                .get_mut(&parent)
                .and_then(|container| container.on_child_position_captured(captured));
        }
    }

    pub fn handle_drag(&mut self, id: ContainerId, info: &DraggableInfo) -> DndResult<()> {
        let notice = self.container_mut(id)?.handle_drag(info);
        self.propagate(notice);
        Ok(())
    }

    pub fn handle_drop(&mut self, id: ContainerId, info: &DraggableInfo) -> DndResult<Option<DropResult>> {
        let (result, notice) = self.container_mut(id)?.handle_drop(info);
        self.propagate(notice);
        Ok(result)
    }

    /// Re-measure `id` after it scrolled during a drag.
    pub fn on_scroll(&mut self, id: ContainerId) -> DndResult<()> {
        let notice = self.container_mut(id)?.on_scroll();
        self.propagate(notice);
        Ok(())
    }

    /// Re-measure `id` after one of its slot transitions finished.
    pub fn on_translated(&mut self, id: ContainerId) -> DndResult<()> {
        let notice = self.container_mut(id)?.on_translated();
        self.propagate(notice);
        Ok(())
    }

    /// Advance deferred effects of every container.
    pub fn tick(&mut self, dt: Duration) {
        for container in self.containers.values_mut() {
            container.tick(dt);
        }
    }
}

impl ContainerGeometry for ContainerRegistry {
    fn container_ids(&self) -> Vec<ContainerId> {
        self.ids().collect()
    }

    fn container_rect(&self, id: ContainerId) -> Option<LayoutRect> {
        self.get(id).map(|container| container.layout().container_rect())
    }

    fn slot_count(&self, id: ContainerId) -> usize {
        self.get(id).map_or(0, |container| container.layout().slot_count())
    }

    fn slot_rect(&self, id: ContainerId, slot: usize) -> Option<LayoutRect> {
        let layout = self.get(id)?.layout();
        (slot < layout.slot_count()).then(|| layout.slot_rect(slot))
    }
}

impl std::fmt::Debug for ContainerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerRegistry")
            .field("containers", &self.containers)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
