//! Entity: the externally owned record a device type reads and mutates.
//!
//! The hosting platform owns entity lifecycle and persistence. This crate
//! only ever touches two things on a reference it is handed: the list of
//! configured actions and the three state blobs in [`EntityData`].

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{HubError, ValidationError};

/// A controllable thing (a light, a switch, …) as seen by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Platform identifier, e.g. `light.kitchen`.
    pub id: String,
    /// Device-type domain the entity is bound to (`switch`, `light`, …).
    #[serde(default)]
    pub domain: String,
    /// Actions this particular entity accepts. May be a subset of the schema.
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub data: EntityData,
}

/// The three opaque JSON state slots.
///
/// `None` means the slot has never been written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityData {
    /// Target state, written by commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<Box<RawValue>>,
    /// Last state the device claimed, written by events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported: Option<Box<RawValue>>,
    /// State treated as ground truth; mirrors `reported`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective: Option<Box<RawValue>>,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `id` is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyEntityId.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<String>,
    domain: Option<String>,
    actions: Vec<String>,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Consume the builder, validate, and return an [`Entity`] with empty state slots.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if `id` is missing or empty.
    pub fn build(self) -> Result<Entity, HubError> {
        let entity = Entity {
            id: self.id.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            actions: self.actions,
            data: EntityData::default(),
        };
        entity.validate()?;
        Ok(entity)
    }
}
