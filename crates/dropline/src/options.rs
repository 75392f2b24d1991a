//! Container configuration.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::drop::DropResult;
use crate::error::ConfigError;
use crate::types::{Behaviour, Orientation, Payload};

/// Group accepted by containers that neither name a group nor list accepted groups.
pub const DEFAULT_GROUP_NAME: &str = "@@dropline-default-group@@";

/// Default slot transition duration.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(180);

/// Maps a slot index to the payload carried when that slot is dragged.
pub type PayloadAccessor = Rc<dyn Fn(usize) -> Payload>;

/// Invoked with the finalized move when a drop lands on a valid target.
pub type DropCallback = Rc<dyn Fn(&DropResult)>;

/// Configuration of a single drop container.
///
/// Options are validated when a container is created and whenever they are
/// replaced with [`Container::set_options`](crate::Container::set_options).
#[derive(Clone)]
pub struct ContainerOptions {
    /// Group this container drags items as. `None` keeps drags local.
    pub group_name: Option<String>,
    /// Explicit accepted groups. `None` derives them from `group_name`.
    pub accept_groups: Option<Vec<String>>,
    pub behaviour: Behaviour,
    pub orientation: Orientation,
    pub animation_duration: Duration,
    pub child_payload: Option<PayloadAccessor>,
    pub on_drop: Option<DropCallback>,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            group_name: None,
            accept_groups: None,
            behaviour: Behaviour::Move,
            orientation: Orientation::Vertical,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            child_payload: None,
            on_drop: None,
        }
    }
}

impl ContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group name.
    pub fn group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Set the groups this container accepts drags from.
    pub fn accept_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn behaviour(mut self, behaviour: Behaviour) -> Self {
        self.behaviour = behaviour;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the payload accessor used when a slot of this container is dragged.
    pub fn child_payload(mut self, accessor: impl Fn(usize) -> Payload + 'static) -> Self {
        self.child_payload = Some(Rc::new(accessor));
        self
    }

    /// Set the drop callback.
    pub fn on_drop(mut self, callback: impl Fn(&DropResult) + 'static) -> Self {
        self.on_drop = Some(Rc::new(callback));
        self
    }

    /// Groups this container accepts.
    ///
    /// Falls back to `[group_name]` when a group is named, and to
    /// `[DEFAULT_GROUP_NAME]` otherwise.
    pub fn accepted_groups(&self) -> Vec<&str> {
        match (&self.accept_groups, &self.group_name) {
            (Some(groups), _) => groups.iter().map(String::as_str).collect(),
            (None, Some(name)) => vec![name.as_str()],
            (None, None) => vec![DEFAULT_GROUP_NAME],
        }
    }

    /// True if a drag coming from a container in `group` may land here.
    pub fn accepts_group(&self, group: Option<&str>) -> bool {
        group.is_some_and(|group| self.accepted_groups().contains(&group))
    }

    /// Payload for the slot at `index`, or an empty payload without an accessor.
    pub fn payload_for(&self, index: usize) -> Payload {
        self.child_payload
            .as_ref()
            .map(|accessor| accessor(index))
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_name.as_deref() == Some("") {
            return Err(ConfigError::EmptyGroupName);
        }
        if let Some(groups) = &self.accept_groups {
            if let Some(index) = groups.iter().position(String::is_empty) {
                return Err(ConfigError::EmptyAcceptGroup { index });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ContainerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerOptions")
            .field("group_name", &self.group_name)
            .field("accept_groups", &self.accepted_groups())
            .field("behaviour", &self.behaviour)
            .field("orientation", &self.orientation)
            .field("animation_duration", &self.animation_duration)
            .field("child_payload", &self.child_payload.is_some())
            .field("on_drop", &self.on_drop.is_some())
            .finish()
    }
}
