use bevy::prelude::*;

/// Marker for a parachute prop entity. Always a child of `owner`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParachuteProp {
    pub owner: Entity,
}

/// Model the host renders for the prop.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PropModel(pub String);

/// Exclusive ownership of a spawned prop. Not `Clone`; release it with
/// `Attachments::detach`.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a PropHandle leaks the prop entity; pass it to Attachments::detach"]
pub struct PropHandle(Entity);

impl PropHandle {
    pub(crate) fn new(entity: Entity) -> Self {
        Self(entity)
    }

    pub fn entity(&self) -> Entity {
        self.0
    }
}
