//! Delayed, fire-and-forget container effects.
//!
//! Two effects outlive the sample that triggered them: re-measuring after the
//! overflow spacer changes the container's extent, and re-enabling slot
//! transitions after a drop so the reset itself is not animated. Both are
//! advanced by the caller's frame clock through [`DeferredQueue::tick`].

use std::time::Duration;

/// Delay before re-measuring after the overflow spacer is shown or hidden.
pub const INVALIDATE_RECTS_DELAY: Duration = Duration::from_millis(100);

/// Delay before slot transitions are re-enabled after a drop.
pub const ENABLE_ANIMATION_DELAY: Duration = Duration::from_millis(50);

/// An effect scheduled to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredEffect {
    /// Call [`LayoutPort::invalidate_rects`](crate::LayoutPort::invalidate_rects).
    InvalidateRects,
    /// Re-enable transitions on every slot.
    EnableAnimation,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    effect: DeferredEffect,
    remaining: Duration,
}

/// Queue of pending effects for one container.
///
/// Scheduling an effect that is already pending restarts its timer instead of
/// queueing a second copy.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<Pending>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, effect: DeferredEffect, delay: Duration) {
        match self.pending.iter_mut().find(|pending| pending.effect == effect) {
            Some(pending) => pending.remaining = delay,
            None => self.pending.push(Pending {
                effect,
                remaining: delay,
            }),
        }
    }

    /// Advance all timers by `dt` and return the effects that came due, in
    /// scheduling order.
    pub fn tick(&mut self, dt: Duration) -> Vec<DeferredEffect> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                fired.push(pending.effect);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn is_pending(&self, effect: DeferredEffect) -> bool {
        self.pending.iter().any(|pending| pending.effect == effect)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
