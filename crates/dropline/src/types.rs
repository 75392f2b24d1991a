//! Core value types shared by the drag pipeline, containers and sessions.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use dropline_core::geometry::LayoutRect;
use dropline_core::math::Vec2;

/// Identifier of a container registered in a [`ContainerRegistry`](crate::ContainerRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(pub usize);

/// Axis along which a container lays out its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Component of `v` along this axis.
    #[inline]
    pub fn main(self, v: Vec2) -> f32 {
        match self {
            Orientation::Vertical => v.y,
            Orientation::Horizontal => v.x,
        }
    }

    /// Component of `v` across this axis.
    #[inline]
    pub fn cross(self, v: Vec2) -> f32 {
        match self {
            Orientation::Vertical => v.x,
            Orientation::Horizontal => v.y,
        }
    }

    /// Build a vector from main/cross components.
    #[inline]
    pub fn compose(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Orientation::Vertical => Vec2::new(cross, main),
            Orientation::Horizontal => Vec2::new(main, cross),
        }
    }

    /// Extent of `rect` along this axis.
    pub fn begin_end(self, rect: &LayoutRect) -> BeginEnd {
        match self {
            Orientation::Vertical => BeginEnd::new(rect.y, rect.y + rect.height),
            Orientation::Horizontal => BeginEnd::new(rect.x, rect.x + rect.width),
        }
    }
}

/// Whether dragging out of a container removes the item or leaves it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Behaviour {
    #[default]
    Move,
    Copy,
}

/// A one-dimensional extent along a container's orientation axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeginEnd {
    pub begin: f32,
    pub end: f32,
}

impl BeginEnd {
    pub const fn new(begin: f32, end: f32) -> Self {
        Self { begin, end }
    }

    pub fn size(&self) -> f32 {
        self.end - self.begin
    }

    pub fn midpoint(&self) -> f32 {
        (self.begin + self.end) / 2.0
    }

    /// Half-open containment, `[begin, end)`.
    pub fn contains(&self, pos: f32) -> bool {
        pos >= self.begin && pos < self.end
    }

    pub fn translated(self, offset: f32) -> Self {
        Self::new(self.begin + offset, self.end + offset)
    }
}

/// Placeholder ("shadow") bounds reserved for the dragged element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowBeginEnd {
    pub begin: f32,
    pub end: f32,
    /// One-off correction applied to `begin` on the first settle after entering.
    pub begin_adjustment: f32,
    /// Top-left rendering anchor of the gap.
    pub anchor: Option<Vec2>,
}

impl ShadowBeginEnd {
    pub fn adjusted_begin(&self) -> f32 {
        self.begin + self.begin_adjustment
    }

    /// True if `pos` falls inside `[begin + begin_adjustment, end]`.
    pub fn contains(&self, pos: f32) -> bool {
        self.adjusted_begin() <= pos && pos <= self.end
    }
}

/// Accumulated per-container state for the active drag.
///
/// `shadow_begin_end` is `Some` exactly when `added_index` is `Some`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragResult {
    /// Index vacated in this container, for move drags that started here.
    pub removed_index: Option<usize>,
    /// Pointer projected onto this container's axis, `None` when the pointer
    /// is outside or owned by a nested container.
    pub pos: Option<f32>,
    /// Size of the dragged element along this container's axis.
    pub element_size: Option<f32>,
    /// Slot index the element would be inserted at.
    pub added_index: Option<usize>,
    pub shadow_begin_end: Option<ShadowBeginEnd>,
}

impl DragResult {
    /// True if this container currently owns the pointer.
    pub fn has_position(&self) -> bool {
        self.pos.is_some()
    }
}

/// Opaque data carried by a drag, produced by the source container's payload accessor.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn empty() -> Self {
        Self(Rc::new(()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is::<()>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Payload(<empty>)")
        } else {
            f.write_str("Payload(..)")
        }
    }
}

/// The container currently marked as the drop target.
///
/// Clones share the same mark, so every copy of a [`DraggableInfo`] taken
/// during one drag observes the same target.
#[derive(Debug, Clone, Default)]
pub struct TargetMark(Rc<Cell<Option<ContainerId>>>);

impl TargetMark {
    pub fn get(&self) -> Option<ContainerId> {
        self.0.get()
    }

    pub fn set(&self, id: ContainerId) {
        self.0.set(Some(id));
    }

    /// Clear the mark, but only if `id` holds it.
    pub fn release(&self, id: ContainerId) {
        if self.0.get() == Some(id) {
            self.0.set(None);
        }
    }

    pub fn clear(&self) {
        self.0.set(None);
    }
}

/// One sample of an active drag.
#[derive(Debug, Clone)]
pub struct DraggableInfo {
    /// Container the drag started from.
    pub source: ContainerId,
    /// Index of the dragged slot inside `source`.
    pub element_index: usize,
    /// Size of the dragged element.
    pub element_size: Vec2,
    pub payload: Payload,
    /// Current pointer position.
    pub position: Vec2,
    /// Forces a one-time recompute of placeholder bounds.
    pub invalidate_shadow: bool,
    pub target: TargetMark,
}

impl DraggableInfo {
    pub fn new(source: ContainerId, element_index: usize, element_size: Vec2, payload: Payload) -> Self {
        Self {
            source,
            element_index,
            element_size,
            payload,
            position: Vec2::ZERO,
            invalidate_shadow: false,
            target: TargetMark::default(),
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn target_container(&self) -> Option<ContainerId> {
        self.target.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_axes() {
        let v = Vec2::new(3.0, 7.0);
        assert_eq!(Orientation::Vertical.main(v), 7.0);
        assert_eq!(Orientation::Horizontal.main(v), 3.0);
        assert_eq!(Orientation::Horizontal.compose(3.0, 7.0), Vec2::new(3.0, 7.0));
        assert_eq!(Orientation::Vertical.compose(7.0, 3.0), v);

        let rect = LayoutRect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Orientation::Vertical.begin_end(&rect), BeginEnd::new(20.0, 60.0));
        assert_eq!(Orientation::Horizontal.begin_end(&rect), BeginEnd::new(10.0, 40.0));
    }

    #[test]
    fn test_shadow_span_uses_adjustment() {
        let shadow = ShadowBeginEnd {
            begin: 100.0,
            end: 150.0,
            begin_adjustment: -10.0,
            anchor: None,
        };
        assert!(shadow.contains(90.0));
        assert!(shadow.contains(150.0));
        assert!(!shadow.contains(89.0));
        assert!(!shadow.contains(150.5));
    }

    #[test]
    fn test_target_mark_is_shared_between_clones() {
        let info = DraggableInfo::new(ContainerId(0), 0, Vec2::ZERO, Payload::empty());
        let copy = info.clone();
        copy.target.set(ContainerId(3));
        assert_eq!(info.target_container(), Some(ContainerId(3)));

        info.target.release(ContainerId(1));
        assert_eq!(copy.target_container(), Some(ContainerId(3)));
        info.target.release(ContainerId(3));
        assert_eq!(copy.target_container(), None);
    }

    #[test]
    fn test_payload_downcast() {
        let payload = Payload::new(String::from("card"));
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("card"));
        assert!(payload.downcast_ref::<u32>().is_none());
        assert!(!payload.is_empty());
        assert!(Payload::default().is_empty());
    }
}
