//! Call-recording layout for container tests.

use std::sync::Arc;
use std::time::Duration;

use dropline::{BeginEnd, LayoutPort, Orientation, RectLayout};
use dropline_core::geometry::LayoutRect;
use dropline_core::math::Vec2;
use parking_lot::Mutex;

/// Records a layout mutation for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCall {
    SetOrientation(Orientation),
    SetTranslation { index: usize, offset: f32 },
    SetVisibility { index: usize, visible: bool },
    SetAnimation { index: usize, duration: Option<Duration> },
    ShowSpacer { size: f32 },
    HideSpacer,
    InvalidateRects,
}

#[derive(Debug)]
struct MockState {
    layout: RectLayout,
    calls: Vec<LayoutCall>,
}

/// [`LayoutPort`] backed by a [`RectLayout`] that records every mutation.
///
/// # Shared Handle
///
/// The registry takes ownership of the layout it is given, but tests need to
/// inspect it afterwards. Clones share the same state, so keep one clone and
/// register the other.
///
/// ```rust
/// use dropline::{LayoutPort, Orientation};
/// use dropline_core::geometry::LayoutRect;
/// use dropline_test_utils::{LayoutCall, MockLayout};
///
/// let handle = MockLayout::stacked(
///     Orientation::Vertical,
///     LayoutRect::new(0.0, 0.0, 100.0, 100.0),
///     &[50.0, 50.0],
/// );
/// let mut port = handle.clone();
/// port.set_translation(1, 20.0);
///
/// assert_eq!(handle.translation(1), 20.0);
/// assert_eq!(handle.calls(), vec![LayoutCall::SetTranslation { index: 1, offset: 20.0 }]);
/// ```
#[derive(Debug, Clone)]
pub struct MockLayout {
    state: Arc<Mutex<MockState>>,
}

impl MockLayout {
    pub fn new(layout: RectLayout) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                layout,
                calls: Vec::new(),
            })),
        }
    }

    /// Slots of the given sizes laid end to end from the container's begin.
    pub fn stacked(orientation: Orientation, container: LayoutRect, sizes: &[f32]) -> Self {
        Self::new(RectLayout::stacked(orientation, container, sizes))
    }

    /// Mutate the underlying geometry without recording a call.
    pub fn with_layout<R>(&self, f: impl FnOnce(&mut RectLayout) -> R) -> R {
        f(&mut self.state.lock().layout)
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<LayoutCall> {
        self.state.lock().calls.clone()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    fn count(&self, predicate: impl Fn(&LayoutCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn count_translations(&self) -> usize {
        self.count(|call| matches!(call, LayoutCall::SetTranslation { .. }))
    }

    pub fn count_visibility_changes(&self) -> usize {
        self.count(|call| matches!(call, LayoutCall::SetVisibility { .. }))
    }

    pub fn count_animation_changes(&self) -> usize {
        self.count(|call| matches!(call, LayoutCall::SetAnimation { .. }))
    }

    pub fn count_invalidations(&self) -> usize {
        self.count(|call| matches!(call, LayoutCall::InvalidateRects))
    }

    pub fn translation(&self, index: usize) -> f32 {
        self.state.lock().layout.translation(index)
    }

    /// Translations of every slot, in order.
    pub fn translations(&self) -> Vec<f32> {
        let state = self.state.lock();
        (0..state.layout.slot_count())
            .map(|index| state.layout.translation(index))
            .collect()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.state.lock().layout.is_visible(index)
    }

    pub fn spacer(&self) -> Option<f32> {
        self.state.lock().layout.spacer()
    }

    pub fn animation(&self, index: usize) -> Option<Duration> {
        self.state
            .lock()
            .layout
            .slot(index)
            .and_then(|slot| slot.animation)
    }

    fn record(&self, call: LayoutCall, apply: impl FnOnce(&mut RectLayout)) {
        let mut state = self.state.lock();
        apply(&mut state.layout);
        state.calls.push(call);
    }
}

impl LayoutPort for MockLayout {
    fn orientation(&self) -> Orientation {
        self.state.lock().layout.orientation()
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.record(LayoutCall::SetOrientation(orientation), |layout| {
            layout.set_orientation(orientation)
        });
    }

    fn slot_count(&self) -> usize {
        self.state.lock().layout.slot_count()
    }

    fn begin_end(&self, index: usize) -> BeginEnd {
        self.state.lock().layout.begin_end(index)
    }

    fn slot_rect(&self, index: usize) -> LayoutRect {
        self.state.lock().layout.slot_rect(index)
    }

    fn container_rect(&self) -> LayoutRect {
        self.state.lock().layout.container_rect()
    }

    fn scroll_size(&self) -> f32 {
        self.state.lock().layout.scroll_size()
    }

    fn scroll_value(&self) -> f32 {
        self.state.lock().layout.scroll_value()
    }

    fn position(&self, pointer: Vec2) -> Option<f32> {
        self.state.lock().layout.position(pointer)
    }

    fn shadow_anchor(&self, begin: f32, end: f32) -> Vec2 {
        self.state.lock().layout.shadow_anchor(begin, end)
    }

    fn container_scale(&self) -> f32 {
        self.state.lock().layout.container_scale()
    }

    fn set_translation(&mut self, index: usize, offset: f32) {
        self.record(LayoutCall::SetTranslation { index, offset }, |layout| {
            layout.set_translation(index, offset)
        });
    }

    fn set_visibility(&mut self, index: usize, visible: bool) {
        self.record(LayoutCall::SetVisibility { index, visible }, |layout| {
            layout.set_visibility(index, visible)
        });
    }

    fn set_animation(&mut self, index: usize, duration: Option<Duration>) {
        self.record(LayoutCall::SetAnimation { index, duration }, |layout| {
            layout.set_animation(index, duration)
        });
    }

    fn show_spacer(&mut self, size: f32) {
        self.record(LayoutCall::ShowSpacer { size }, |layout| layout.show_spacer(size));
    }

    fn hide_spacer(&mut self) {
        self.record(LayoutCall::HideSpacer, RectLayout::hide_spacer);
    }

    fn invalidate_rects(&mut self) {
        self.record(LayoutCall::InvalidateRects, RectLayout::invalidate_rects);
    }
}
