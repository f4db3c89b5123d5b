//! Command and event payloads.
//!
//! Both carry an action tag (`type` on the wire) plus a flat set of optional
//! fields. A field is "unset" when its key is absent or `null`; that is
//! distinct from being supplied as `0`, `false` or `""`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read access shared by [`Command`] and [`Event`].
pub trait Payload {
    /// The action tag.
    fn action(&self) -> &str;

    /// All fields other than the action tag and event metadata.
    fn fields(&self) -> &Map<String, Value>;

    /// Look up a field, treating `null` as absent.
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields().get(name).filter(|v| !v.is_null())
    }
}

/// A user or automation intent directed at an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "type", default)]
    pub action: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Command {
    /// Create a command with no fields.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            fields: Map::new(),
        }
    }

    /// Attach a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Payload for Command {
    fn action(&self) -> &str {
        &self.action
    }

    fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Telemetry pushed by a device. May report only some attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub action: String,
    /// Actions the device currently claims to support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_actions: Option<Vec<String>>,
    /// Human-readable reason for the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    /// Create an event with no fields.
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Attach a reported attribute.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    #[must_use]
    pub fn with_available_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_actions = Some(actions.into_iter().map(Into::into).collect());
        self
    }
}

impl Payload for Event {
    fn action(&self) -> &str {
        &self.action
    }

    fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
