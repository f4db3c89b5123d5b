//! Tri-state store: desired / reported / effective state on one entity.
//!
//! Every write is read-merge-write: the current blob is decoded into the
//! device's typed state, only the attributes implicated by the action are
//! replaced, and the result is re-encoded in a single assignment. Any error
//! is raised before the entity is touched.
//!
//! A stored blob that no longer decodes is an error for readers, but the
//! setters merge onto the default state instead, so the next write repairs
//! the slot.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::entity::Entity;
use crate::error::HubError;
use crate::payload::{Command, Event, Payload};
use crate::schema::DeviceSchema;

/// A device type: a schema plus the typed state it persists.
pub trait DeviceType {
    /// Attribute snapshot. `Default` is the never-written state.
    type State: Serialize + DeserializeOwned + Default + Clone + PartialEq + fmt::Debug;

    const SCHEMA: &'static DeviceSchema;
}

/// Binds a device type to one entity for the duration of a borrow.
pub struct Store<'a, D> {
    entity: &'a mut Entity,
    device: PhantomData<D>,
}

impl<'a, D: DeviceType> Store<'a, D> {
    /// Bind to an entity.
    pub fn bind(entity: &'a mut Entity) -> Self {
        Self {
            entity,
            device: PhantomData,
        }
    }

    /// The bound entity.
    #[must_use]
    pub fn entity(&self) -> &Entity {
        self.entity
    }

    /// Fill the entity's action list with the schema defaults if it is empty.
    ///
    /// A non-empty list is never touched, even if it differs from the schema.
    pub fn ensure_default_actions(&mut self) {
        if self.entity.actions.is_empty() {
            self.entity.actions = D::SCHEMA.supported_actions();
        }
    }

    /// Whether this entity accepts `action` (checked against its own list,
    /// not the schema).
    #[must_use]
    pub fn supports(&self, action: &str) -> bool {
        self.entity.actions.iter().any(|a| a == action)
    }

    /// Decode the desired state. A never-written slot yields the default.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Decode`] if the stored blob is malformed.
    pub fn desired(&self) -> Result<D::State, HubError> {
        decode::<D>(self.entity.data.desired.as_deref())
    }

    /// Decode the reported state. A never-written slot yields the default.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Decode`] if the stored blob is malformed.
    pub fn reported(&self) -> Result<D::State, HubError> {
        decode::<D>(self.entity.data.reported.as_deref())
    }

    /// Decode the effective state. A never-written slot yields the default.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Decode`] if the stored blob is malformed.
    pub fn effective(&self) -> Result<D::State, HubError> {
        decode::<D>(self.entity.data.effective.as_deref())
    }

    /// Merge a command into desired state and return the new state.
    ///
    /// A malformed desired blob is treated as never written.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] if the command is invalid,
    /// [`HubError::Decode`] if a merged field cannot be decoded, and
    /// [`HubError::Encode`] on serialization failure. Desired state is
    /// unchanged on error.
    pub fn set_desired_from_command(&mut self, command: &Command) -> Result<D::State, HubError> {
        D::SCHEMA.validate_command(command)?;
        let state = merge::<D>(self.desired().unwrap_or_default(), command)?;
        self.entity.data.desired = Some(encode::<D>(&state)?);
        Ok(state)
    }

    /// Merge an event into reported state, mirror it into effective state,
    /// and return the new state.
    ///
    /// Attributes the event does not carry keep their previous value. A
    /// malformed reported blob is treated as never written.
    ///
    /// # Errors
    ///
    /// Same as [`set_desired_from_command`](Self::set_desired_from_command);
    /// neither slot is written on error.
    pub fn set_reported_from_event(&mut self, event: &Event) -> Result<D::State, HubError> {
        D::SCHEMA.validate_event(event)?;
        let state = merge::<D>(self.reported().unwrap_or_default(), event)?;
        let blob = encode::<D>(&state)?;
        self.entity.data.effective = Some(blob.clone());
        self.entity.data.reported = Some(blob);
        Ok(state)
    }
}

impl<D> fmt::Debug for Store<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("entity", &self.entity.id)
            .finish_non_exhaustive()
    }
}

/// Only a JSON object is a valid state blob; serde's struct visitor would
/// also take a sequence.
fn decode<D: DeviceType>(raw: Option<&RawValue>) -> Result<D::State, HubError> {
    let Some(raw) = raw else {
        return Ok(D::State::default());
    };
    let decode = HubError::decode(D::SCHEMA.domain);
    serde_json::from_str::<Map<String, Value>>(raw.get())
        .and_then(|map| serde_json::from_value(Value::Object(map)))
        .map_err(decode)
}

fn encode<D: DeviceType>(state: &D::State) -> Result<Box<RawValue>, HubError> {
    serde_json::value::to_raw_value(state).map_err(HubError::encode(D::SCHEMA.domain))
}

fn merge<D: DeviceType>(current: D::State, payload: &impl Payload) -> Result<D::State, HubError> {
    let domain = D::SCHEMA.domain;
    let mut value = serde_json::to_value(current).map_err(HubError::encode(domain))?;
    let Value::Object(map) = &mut value else {
        return Err(HubError::Encode {
            domain,
            source: serde::ser::Error::custom("state must serialize to a JSON object"),
        });
    };
    D::SCHEMA.apply(map, payload);
    serde_json::from_value(value).map_err(HubError::decode(domain))
}
