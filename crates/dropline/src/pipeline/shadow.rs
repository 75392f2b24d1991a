use crate::layout::LayoutPort;
use crate::types::{BeginEnd, ShadowBeginEnd};

/// Placeholder bounds for inserting an element of `element_size` at `added`.
///
/// The gap spans from the end of the preceding slot to the begin of the
/// following one, skipping `removed`. Each neighbour that is larger than the
/// element lends half of the difference to the gap. Without a neighbour the
/// container edge is used. `begin_adjustment` is carried over unchanged.
pub fn shadow_bounds(
    layout: &dyn LayoutPort,
    slot_count: usize,
    added: usize,
    removed: Option<usize>,
    element_size: f32,
    begin_adjustment: f32,
) -> ShadowBeginEnd {
    let container = layout.container_begin_end();

    let before = added
        .checked_sub(1)
        .and_then(|index| if Some(index) == removed { index.checked_sub(1) } else { Some(index) })
        .filter(|&index| index < slot_count)
        .map(|index| layout.begin_end(index));
    let after = Some(if Some(added) == removed { added + 1 } else { added })
        .filter(|&index| index < slot_count)
        .map(|index| layout.begin_end(index));

    let begin = before.map_or(container.begin, |extent| extent.end - lend(extent, element_size));
    let end = after.map_or(container.end, |extent| extent.begin + lend(extent, element_size));
    let anchor = layout.shadow_anchor(
        before.map_or(container.begin, |extent| extent.end),
        after.map_or(container.end, |extent| extent.begin),
    );

    ShadowBeginEnd {
        begin,
        end,
        begin_adjustment,
        anchor: Some(anchor),
    }
}

fn lend(neighbour: BeginEnd, element_size: f32) -> f32 {
    let size = neighbour.size();
    if element_size < size { (size - element_size) / 2.0 } else { 0.0 }
}
