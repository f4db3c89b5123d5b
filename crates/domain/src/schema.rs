//! Declarative device schemas and the generic validate/merge engine.
//!
//! A device type is described entirely as data: a table of fields and an
//! ordered list of actions. Each action names the fields a command must
//! carry and the [`Effect`] it has on state. Parsing, validation, merging
//! and descriptor generation are all driven by that table, so adding a
//! device type means writing a new `const` [`DeviceSchema`], not new logic.

mod descriptor;
mod field;

pub use descriptor::{ActionDescriptor, DomainDescriptor, FieldDescriptor};
pub use field::{FieldKind, FieldSpec};

use serde_json::{Map, Value};

use crate::error::{HubError, ValidationError};
use crate::payload::{Command, Event, Payload};
use field::Violation;

/// The complete schema for one device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSchema {
    /// Unique device-type identifier, e.g. `"light"`.
    pub domain: &'static str,
    /// Every field any action of this type may carry.
    pub fields: &'static [FieldSpec],
    /// Supported actions, in declaration order.
    pub actions: &'static [ActionSpec],
}

/// One supported action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    /// Fields a command with this action must carry.
    pub fields: &'static [&'static str],
    pub effect: Effect,
}

/// How an action changes the device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Set a boolean attribute to a fixed value (`turn_on` → `power = true`).
    SetFlag { field: &'static str, value: bool },
    /// Copy the action's fields from the payload into state.
    Assign,
}

impl DeviceSchema {
    /// Names of all supported actions, in declaration order.
    #[must_use]
    pub fn supported_actions(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name.to_string()).collect()
    }

    /// Look up an action by name.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&'static ActionSpec> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Decode a raw command payload and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Decode`] if the bytes are not a JSON object or a
    /// known field has the wrong type, and [`HubError::Validation`] if the
    /// command breaks a rule checked by [`validate_command`](Self::validate_command).
    pub fn parse_command(&self, raw: &[u8]) -> Result<Command, HubError> {
        let command: Command =
            serde_json::from_slice(raw).map_err(HubError::decode(self.domain))?;
        self.check_shapes(&command)?;
        self.validate_command(&command)?;
        Ok(command)
    }

    /// Decode a raw event payload and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Decode`] on malformed payloads and
    /// [`HubError::Validation`] when the action is not supported.
    pub fn parse_event(&self, raw: &[u8]) -> Result<Event, HubError> {
        let event: Event = serde_json::from_slice(raw).map_err(HubError::decode(self.domain))?;
        self.check_shapes(&event)?;
        self.validate_event(&event)?;
        Ok(event)
    }

    /// Check a command is complete and within bounds.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnsupportedAction`] for an unknown action
    /// - [`ValidationError::MissingField`] when a required field is absent or empty
    /// - [`ValidationError::FieldConstraint`] when a field violates its kind's constraints
    pub fn validate_command(&self, command: &Command) -> Result<(), ValidationError> {
        let action = self.lookup(command.action())?;
        for &name in action.fields {
            let missing = || ValidationError::MissingField {
                action: action.name.to_string(),
                field: name,
            };
            let value = command.field(name).ok_or_else(missing)?;
            let Some(spec) = self.field(name) else {
                continue;
            };
            spec.kind.check(value).map_err(|violation| match violation {
                Violation::Missing => missing(),
                Violation::Constraint(constraint) => ValidationError::FieldConstraint {
                    action: action.name.to_string(),
                    field: name,
                    constraint,
                },
            })?;
        }
        Ok(())
    }

    /// Check an event's action is supported.
    ///
    /// Field presence is not enforced: devices may push partial updates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedAction`] for an unknown action.
    pub fn validate_event(&self, event: &Event) -> Result<(), ValidationError> {
        self.lookup(event.action()).map(drop)
    }

    /// Build the discovery descriptor for this schema.
    #[must_use]
    pub fn describe(&self) -> DomainDescriptor {
        let actions: Vec<ActionDescriptor> = self
            .actions
            .iter()
            .map(|action| ActionDescriptor {
                action: action.name.to_string(),
                fields: action
                    .fields
                    .iter()
                    .filter_map(|name| self.field(name))
                    .map(FieldDescriptor::required)
                    .collect(),
            })
            .collect();
        DomainDescriptor {
            domain: self.domain.to_string(),
            commands: actions.clone(),
            events: actions,
        }
    }

    /// Merge the fields implicated by the payload's action into `state`.
    ///
    /// Fields the payload does not carry are left untouched. Unknown actions
    /// are a no-op; callers validate first.
    pub(crate) fn apply(&self, state: &mut Map<String, Value>, payload: &impl Payload) {
        let Some(action) = self.action(payload.action()) else {
            return;
        };
        match action.effect {
            Effect::SetFlag { field, value } => {
                state.insert(field.to_string(), Value::Bool(value));
            }
            Effect::Assign => {
                for &name in action.fields {
                    if let Some(value) = payload.field(name) {
                        state.insert(name.to_string(), value.clone());
                    }
                }
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&'static ActionSpec, ValidationError> {
        self.action(name)
            .ok_or_else(|| ValidationError::UnsupportedAction {
                domain: self.domain,
                action: name.to_string(),
            })
    }

    fn check_shapes(&self, payload: &impl Payload) -> Result<(), HubError> {
        for spec in self.fields {
            if let Some(value) = payload.field(spec.name) {
                spec.kind
                    .check_shape(value)
                    .map_err(HubError::decode(self.domain))?;
            }
        }
        Ok(())
    }
}
