//! Test utilities for dropline.
//!
//! The main component is [`MockLayout`], a [`LayoutPort`](dropline::LayoutPort)
//! that answers geometry queries from explicit rectangles and records every
//! mutation a container pushes through it.
//!
//! # Example
//!
//! ```rust
//! use dropline::{ContainerOptions, ContainerRegistry, Orientation};
//! use dropline_core::geometry::LayoutRect;
//! use dropline_test_utils::MockLayout;
//!
//! let layout = MockLayout::stacked(
//!     Orientation::Vertical,
//!     LayoutRect::new(0.0, 0.0, 100.0, 300.0),
//!     &[50.0, 50.0],
//! );
//! let mut registry = ContainerRegistry::new();
//! registry.register(layout.clone(), ContainerOptions::new()).unwrap();
//!
//! // Containers enable slot transitions when they are created.
//! assert_eq!(layout.count_animation_changes(), 2);
//! ```

pub mod mock_layout;

pub use mock_layout::*;
