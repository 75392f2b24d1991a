use crate::types::ContainerId;

/// One orderable child of a container.
///
/// Mirrors what the container last pushed through its
/// [`LayoutPort`](crate::LayoutPort) so the pipeline can reason about
/// translations without querying the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub translation: f32,
    pub visible: bool,
    pub animated: bool,
    /// Containers anchored inside this slot for the current drag.
    pub nested: Vec<ContainerId>,
}

impl Slot {
    pub fn new() -> Self {
        Self {
            translation: 0.0,
            visible: true,
            animated: true,
            nested: Vec::new(),
        }
    }

    /// True if the slot is untranslated and visible.
    pub fn is_neutral(&self) -> bool {
        self.translation == 0.0 && self.visible
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::new()
    }
}
