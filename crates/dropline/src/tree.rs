//! Parent/child discovery between nested containers.
//!
//! Containers do not know their ancestry. At drag start the registry asks a
//! [`TreeResolver`] for the nearest relevant ancestor of every participating
//! container and links them for the duration of the drag.

use dropline_core::alloc::HashMap;
use dropline_core::geometry::LayoutRect;

use crate::types::ContainerId;

/// Where a container is anchored inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentLink {
    pub container: ContainerId,
    /// Slot of `container` that hosts the child.
    pub slot: usize,
}

/// Read-only view of registered containers used by resolvers.
pub trait ContainerGeometry {
    fn container_ids(&self) -> Vec<ContainerId>;

    fn container_rect(&self, id: ContainerId) -> Option<LayoutRect>;

    fn slot_count(&self, id: ContainerId) -> usize;

    /// Untranslated rectangle of a slot.
    fn slot_rect(&self, id: ContainerId, slot: usize) -> Option<LayoutRect>;
}

/// Resolves container ancestry.
pub trait TreeResolver {
    /// Nearest ancestor of `child` that is in `relevant`, with the slot of that
    /// ancestor the child sits in.
    fn resolve_parent(
        &self,
        child: ContainerId,
        relevant: &[ContainerId],
        geometry: &dyn ContainerGeometry,
    ) -> Option<ParentLink>;

    /// True if `candidate` is nested anywhere inside `ancestor`, optionally
    /// restricted to the subtree hosted by slot `slot`.
    fn is_nested_in(
        &self,
        candidate: ContainerId,
        ancestor: ContainerId,
        slot: Option<usize>,
        geometry: &dyn ContainerGeometry,
    ) -> bool {
        let all = geometry.container_ids();
        let mut current = candidate;
        for _ in 0..all.len() {
            let Some(link) = self.resolve_parent(current, &all, geometry) else {
                return false;
            };
            if link.container == ancestor {
                return slot.is_none_or(|slot| slot == link.slot);
            }
            current = link.container;
        }
        false
    }
}

/// Ancestry configured up front.
#[derive(Debug, Clone, Default)]
pub struct ExplicitTree {
    links: HashMap<ContainerId, ParentLink>,
}

impl ExplicitTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest `child` inside slot `slot` of `parent`.
    pub fn attach(&mut self, child: ContainerId, parent: ContainerId, slot: usize) -> &mut Self {
        self.links.insert(
            child,
            ParentLink {
                container: parent,
                slot,
            },
        );
        self
    }

    pub fn detach(&mut self, child: ContainerId) -> Option<ParentLink> {
        self.links.remove(&child)
    }

    pub fn parent_of(&self, child: ContainerId) -> Option<ParentLink> {
        self.links.get(&child).copied()
    }
}

impl TreeResolver for ExplicitTree {
    fn resolve_parent(
        &self,
        child: ContainerId,
        relevant: &[ContainerId],
        _geometry: &dyn ContainerGeometry,
    ) -> Option<ParentLink> {
        let mut current = child;
        // Bounded so a misconfigured cycle cannot hang the drag.
        for _ in 0..=self.links.len() {
            let link = self.parent_of(current)?;
            if relevant.contains(&link.container) {
                return Some(link);
            }
            current = link.container;
        }
        None
    }
}

/// Ancestry inferred from container rectangles.
///
/// The parent of a container is the smallest relevant container that fully
/// contains it and has a slot containing its center.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialResolver;

impl TreeResolver for SpatialResolver {
    fn resolve_parent(
        &self,
        child: ContainerId,
        relevant: &[ContainerId],
        geometry: &dyn ContainerGeometry,
    ) -> Option<ParentLink> {
        let rect = geometry.container_rect(child)?;
        let center = rect.center();

        relevant
            .iter()
            .copied()
            .filter(|&id| id != child)
            .filter_map(|id| {
                let outer = geometry.container_rect(id)?;
                if outer.area() <= rect.area() || !outer.contains_rect(&rect) {
                    return None;
                }
                let slot = (0..geometry.slot_count(id)).find(|&slot| {
                    geometry
                        .slot_rect(id, slot)
                        .is_some_and(|slot_rect| slot_rect.contains(center))
                })?;
                Some((ParentLink { container: id, slot }, outer.area()))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(link, _)| link)
    }
}
