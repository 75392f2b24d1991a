//! Dropline Core
//!
//! This crate contains the shared plumbing for the dropline crates: logging,
//! profiling, math re-exports, geometry primitives and hash collections.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
