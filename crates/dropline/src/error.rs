//! Error types for container configuration and registry operations.
//!
//! Geometry never fails: empty containers, positions outside every slot and
//! zero-sized elements all degrade to well-defined results. Errors only cover
//! invalid configuration and lookups of containers that are not registered.

use crate::types::ContainerId;

/// Invalid [`ContainerOptions`](crate::ContainerOptions).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("group name must not be empty")]
    EmptyGroupName,
    #[error("accepted group at index {index} is empty")]
    EmptyAcceptGroup { index: usize },
}

/// Errors returned by containers, the registry and the drag manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DndError {
    #[error("invalid container options: {0}")]
    Config(#[from] ConfigError),
    #[error("container {0:?} is not registered")]
    UnknownContainer(ContainerId),
    #[error("slot {index} is out of bounds for container {container:?} with {len} slots")]
    InvalidSlotIndex {
        container: ContainerId,
        index: usize,
        len: usize,
    },
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("no drag in progress")]
    NoActiveDrag,
}

/// Result type for drag-and-drop operations.
pub type DndResult<T> = Result<T, DndError>;
