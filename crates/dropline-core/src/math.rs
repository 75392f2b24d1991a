/// Fast vector math using SIMD-accelerated `glam` types.
///
/// Pointer positions, element sizes and anchor points are all [`Vec2`]. Only
/// the 2D subset of [`glam`] is needed here, but the whole crate is re-exported
/// so callers can share one math vocabulary with their renderer.
///
/// # Examples
///
/// ```
/// use dropline_core::math::Vec2;
///
/// let pointer = Vec2::new(10.0, 20.0);
/// let delta = Vec2::new(1.0, 0.5);
/// assert_eq!(pointer + delta, Vec2::new(11.0, 20.5));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
