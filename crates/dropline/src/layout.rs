//! Measurement and mutation boundary between containers and the renderer.
//!
//! A container never touches rendering state directly. It asks its
//! [`LayoutPort`] for extents and pushes translations, visibility and
//! spacer changes back through it. [`RectLayout`] is an in-memory
//! implementation for retained-mode UIs that already know their rectangles.

use std::time::Duration;

use dropline_core::geometry::LayoutRect;
use dropline_core::math::Vec2;

use crate::types::{BeginEnd, Orientation};

/// Geometry queries and visual mutations for one container.
///
/// Extents are reported in the same coordinate space as pointer positions
/// and include the translation last applied with [`set_translation`].
///
/// [`set_translation`]: LayoutPort::set_translation
pub trait LayoutPort {
    fn orientation(&self) -> Orientation;

    fn set_orientation(&mut self, orientation: Orientation);

    /// Number of slots currently present in the container.
    fn slot_count(&self) -> usize;

    /// Extent of slot `index` along the orientation axis, translation included.
    fn begin_end(&self, index: usize) -> BeginEnd;

    /// Size of slot `index` along the orientation axis.
    fn slot_size(&self, index: usize) -> f32 {
        self.begin_end(index).size()
    }

    /// Untranslated rectangle of slot `index`.
    fn slot_rect(&self, index: usize) -> LayoutRect;

    /// Size of a dragged element along the orientation axis.
    fn element_size(&self, size: Vec2) -> f32 {
        self.orientation().main(size)
    }

    /// Extent of the container's visible area along the orientation axis.
    fn container_begin_end(&self) -> BeginEnd {
        self.orientation().begin_end(&self.container_rect())
    }

    fn container_rect(&self) -> LayoutRect;

    /// Visible size of the container along the orientation axis.
    fn container_size(&self) -> f32 {
        self.container_begin_end().size()
    }

    /// Total scrollable content size along the orientation axis.
    fn scroll_size(&self) -> f32;

    /// Current scroll offset along the orientation axis.
    fn scroll_value(&self) -> f32;

    /// Project a pointer onto the orientation axis, or `None` if it is outside
    /// the container.
    fn position(&self, pointer: Vec2) -> Option<f32>;

    /// Rendering anchor of a placeholder spanning `begin..end`.
    fn shadow_anchor(&self, begin: f32, end: f32) -> Vec2;

    fn container_scale(&self) -> f32 {
        1.0
    }

    fn set_translation(&mut self, index: usize, offset: f32);

    fn set_visibility(&mut self, index: usize, visible: bool);

    /// Enable (`Some(duration)`) or disable (`None`) transitions on a slot.
    fn set_animation(&mut self, index: usize, duration: Option<Duration>);

    /// Show the overflow spacer with the given size along the axis.
    fn show_spacer(&mut self, size: f32);

    fn hide_spacer(&mut self);

    /// Drop cached measurements so the next query re-measures.
    fn invalidate_rects(&mut self);
}

/// Per-slot state kept by [`RectLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSlot {
    pub rect: LayoutRect,
    pub translation: f32,
    pub visible: bool,
    pub animation: Option<Duration>,
}

impl RectSlot {
    pub fn new(rect: LayoutRect) -> Self {
        Self {
            rect,
            translation: 0.0,
            visible: true,
            animation: None,
        }
    }
}

/// [`LayoutPort`] over explicit rectangles.
///
/// Slot rectangles are stored in content space; the scroll offset is
/// subtracted when reporting extents.
#[derive(Debug, Clone)]
pub struct RectLayout {
    orientation: Orientation,
    container: LayoutRect,
    slots: Vec<RectSlot>,
    content_size: Option<f32>,
    scroll_value: f32,
    scale: f32,
    spacer: Option<f32>,
    invalidations: u32,
}

impl RectLayout {
    pub fn new(orientation: Orientation, container: LayoutRect) -> Self {
        Self {
            orientation,
            container,
            slots: Vec::new(),
            content_size: None,
            scroll_value: 0.0,
            scale: 1.0,
            spacer: None,
            invalidations: 0,
        }
    }

    /// Lay out slots of the given sizes end to end from the container's begin,
    /// each spanning the container's full cross size.
    pub fn stacked(orientation: Orientation, container: LayoutRect, sizes: &[f32]) -> Self {
        let mut layout = Self::new(orientation, container);
        let cross_begin = orientation.cross(container.position());
        let cross_size = orientation.cross(container.size());
        let mut begin = orientation.main(container.position());
        for &size in sizes {
            let position = orientation.compose(begin, cross_begin);
            let extent = orientation.compose(size, cross_size);
            layout.push_slot(LayoutRect::new(position.x, position.y, extent.x, extent.y));
            begin += size;
        }
        layout
    }

    pub fn push_slot(&mut self, rect: LayoutRect) {
        self.slots.push(RectSlot::new(rect));
    }

    pub fn remove_slot(&mut self, index: usize) -> Option<RectSlot> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    pub fn set_container_rect(&mut self, rect: LayoutRect) {
        self.container = rect;
    }

    /// Make the container scrollable with `content_size` along the axis.
    pub fn set_scroll(&mut self, content_size: f32, value: f32) {
        self.content_size = Some(content_size);
        self.scroll_value = value;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn slot(&self, index: usize) -> Option<&RectSlot> {
        self.slots.get(index)
    }

    pub fn translation(&self, index: usize) -> f32 {
        self.slots.get(index).map_or(0.0, |slot| slot.translation)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.visible)
    }

    pub fn spacer(&self) -> Option<f32> {
        self.spacer
    }

    pub fn invalidation_count(&self) -> u32 {
        self.invalidations
    }
}

impl LayoutPort for RectLayout {
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn begin_end(&self, index: usize) -> BeginEnd {
        self.slots.get(index).map_or_else(BeginEnd::default, |slot| {
            self.orientation
                .begin_end(&slot.rect)
                .translated(slot.translation - self.scroll_value)
        })
    }

    fn slot_rect(&self, index: usize) -> LayoutRect {
        self.slots.get(index).map(|slot| slot.rect).unwrap_or_default()
    }

    fn container_rect(&self) -> LayoutRect {
        self.container
    }

    fn scroll_size(&self) -> f32 {
        self.content_size.unwrap_or_else(|| self.container_size())
    }

    fn scroll_value(&self) -> f32 {
        self.scroll_value
    }

    fn position(&self, pointer: Vec2) -> Option<f32> {
        self.container
            .contains(pointer)
            .then(|| self.orientation.main(pointer))
    }

    fn shadow_anchor(&self, begin: f32, end: f32) -> Vec2 {
        self.orientation
            .compose(begin.min(end), self.orientation.cross(self.container.position()))
    }

    fn container_scale(&self) -> f32 {
        self.scale
    }

    fn set_translation(&mut self, index: usize, offset: f32) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.translation = offset;
        }
    }

    fn set_visibility(&mut self, index: usize, visible: bool) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.visible = visible;
        }
    }

    fn set_animation(&mut self, index: usize, duration: Option<Duration>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.animation = duration;
        }
    }

    fn show_spacer(&mut self, size: f32) {
        self.spacer = Some(size);
    }

    fn hide_spacer(&mut self) {
        self.spacer = None;
    }

    fn invalidate_rects(&mut self) {
        self.invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_vertical() {
        let layout = RectLayout::stacked(
            Orientation::Vertical,
            LayoutRect::new(10.0, 100.0, 200.0, 400.0),
            &[50.0, 30.0],
        );
        assert_eq!(layout.slot_count(), 2);
        assert_eq!(layout.begin_end(0), BeginEnd::new(100.0, 150.0));
        assert_eq!(layout.begin_end(1), BeginEnd::new(150.0, 180.0));
        assert_eq!(layout.slot_rect(1), LayoutRect::new(10.0, 150.0, 200.0, 30.0));
        assert_eq!(layout.container_begin_end(), BeginEnd::new(100.0, 500.0));
    }

    #[test]
    fn test_stacked_horizontal() {
        let layout = RectLayout::stacked(
            Orientation::Horizontal,
            LayoutRect::new(0.0, 20.0, 300.0, 40.0),
            &[100.0, 100.0],
        );
        assert_eq!(layout.begin_end(1), BeginEnd::new(100.0, 200.0));
        assert_eq!(layout.slot_rect(0), LayoutRect::new(0.0, 20.0, 100.0, 40.0));
        assert_eq!(layout.element_size(Vec2::new(80.0, 40.0)), 80.0);
        assert_eq!(layout.shadow_anchor(100.0, 180.0), Vec2::new(100.0, 20.0));
    }

    #[test]
    fn test_translation_and_scroll_shift_extents() {
        let mut layout = RectLayout::stacked(
            Orientation::Vertical,
            LayoutRect::new(0.0, 0.0, 100.0, 100.0),
            &[50.0, 50.0, 50.0],
        );
        layout.set_translation(1, 20.0);
        assert_eq!(layout.begin_end(1), BeginEnd::new(70.0, 120.0));
        assert_eq!(layout.slot_size(1), 50.0);

        layout.set_scroll(150.0, 30.0);
        assert_eq!(layout.begin_end(0), BeginEnd::new(-30.0, 20.0));
        assert_eq!(layout.scroll_size(), 150.0);
        assert_eq!(layout.scroll_value(), 30.0);
    }

    #[test]
    fn test_position_outside_container_is_none() {
        let layout = RectLayout::new(Orientation::Vertical, LayoutRect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(layout.position(Vec2::new(50.0, 40.0)), Some(40.0));
        assert_eq!(layout.position(Vec2::new(150.0, 40.0)), None);
        assert_eq!(layout.scroll_size(), layout.container_size());
    }

    #[test]
    fn test_out_of_range_queries_are_neutral() {
        let mut layout = RectLayout::new(Orientation::Vertical, LayoutRect::default());
        layout.set_translation(4, 10.0);
        layout.set_visibility(4, false);
        assert_eq!(layout.begin_end(4), BeginEnd::default());
        assert!(!layout.is_visible(4));
        assert!(layout.remove_slot(0).is_none());
    }
}
