//! Dropline - drag-to-reorder containers
//!
//! This crate keeps the logical state of a drag consistent across any number
//! of drop containers, including containers nested inside each other:
//! - Insertion index lookup over slot extents
//! - Sibling translations and a placeholder gap that never thrash
//! - Overflow spacers for containers that cannot fit the dragged item
//! - Pointer ownership negotiated between nested containers
//! - A drop result describing the logical move
//!
//! Rendering stays outside the crate. Containers measure and mutate through a
//! [`LayoutPort`]; [`RectLayout`] is a ready-made in-memory implementation.
//!
//! ## Quick Start
//!
//! ```rust
//! use dropline::{ContainerOptions, DragManager, Orientation, RectLayout};
//! use dropline_core::geometry::LayoutRect;
//! use dropline_core::math::Vec2;
//!
//! let mut manager = DragManager::default().with_threshold(0.0);
//! let list = manager
//!     .register(
//!         RectLayout::stacked(
//!             Orientation::Vertical,
//!             LayoutRect::new(0.0, 0.0, 100.0, 300.0),
//!             &[50.0, 50.0, 50.0],
//!         ),
//!         ContainerOptions::new(),
//!     )
//!     .unwrap();
//!
//! manager.start_drag(list, 0, Vec2::new(50.0, 25.0)).unwrap();
//! manager.update(Vec2::new(50.0, 140.0)).unwrap();
//!
//! let results = manager.end_drag().unwrap();
//! assert_eq!(results[0].removed_index, Some(0));
//! assert_eq!(results[0].added_index, Some(2));
//! ```

pub mod container;
pub mod deferred;
pub mod drop;
pub mod error;
pub mod layout;
pub mod locator;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod scroll;
pub mod session;
pub mod slot;
pub mod tree;
pub mod types;

pub use container::{Container, DragPhase};
pub use deferred::{DeferredEffect, DeferredQueue};
pub use drop::{DropResult, DroppedElement};
pub use error::{ConfigError, DndError, DndResult};
pub use layout::{LayoutPort, RectLayout};
pub use locator::SlotExtents;
pub use options::{ContainerOptions, DEFAULT_GROUP_NAME};
pub use pipeline::{CaptureNotice, DragPipeline, Stage};
pub use registry::ContainerRegistry;
pub use scroll::DragScroller;
pub use session::{DragManager, DragSession};
pub use slot::Slot;
pub use tree::{ContainerGeometry, ExplicitTree, ParentLink, SpatialResolver, TreeResolver};
pub use types::{
    Behaviour, BeginEnd, ContainerId, DragResult, DraggableInfo, Orientation, Payload, ShadowBeginEnd,
};
