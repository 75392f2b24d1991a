//! Hook for auto-scrolling while dragging.

use crate::types::{DragResult, DraggableInfo};

/// Receives every processed sample of a container, and a reset at drop.
///
/// Implementations decide whether the container should scroll; the pipeline
/// never reads anything back. Scrolling that moves slots should be followed
/// by [`Container::on_scroll`](crate::Container::on_scroll) so placeholder
/// bounds are re-measured.
pub trait DragScroller {
    fn on_drag(&mut self, info: &DraggableInfo, result: &DragResult);

    fn reset(&mut self);
}
