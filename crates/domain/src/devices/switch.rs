//! Switch: a binary on/off device.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{HubError, ValidationError};
use crate::payload::{Command, Event};
use crate::schema::{ActionSpec, DeviceSchema, DomainDescriptor, Effect};
use crate::store::{DeviceType, Store};

pub const DOMAIN: &str = "switch";

pub const TURN_ON: &str = "turn_on";
pub const TURN_OFF: &str = "turn_off";

pub const SCHEMA: DeviceSchema = DeviceSchema {
    domain: DOMAIN,
    fields: &[],
    actions: &[
        ActionSpec {
            name: TURN_ON,
            fields: &[],
            effect: Effect::SetFlag {
                field: "power",
                value: true,
            },
        },
        ActionSpec {
            name: TURN_OFF,
            fields: &[],
            effect: Effect::SetFlag {
                field: "power",
                value: false,
            },
        },
    ],
};

/// Marker type binding the switch schema to [`SwitchState`].
#[derive(Debug, Clone, Copy)]
pub struct Switch;

impl DeviceType for Switch {
    type State = SwitchState;

    const SCHEMA: &'static DeviceSchema = &SCHEMA;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchState {
    pub power: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchCommand {
    TurnOn,
    TurnOff,
}

impl From<SwitchCommand> for Command {
    fn from(command: SwitchCommand) -> Self {
        match command {
            SwitchCommand::TurnOn => Command::new(TURN_ON),
            SwitchCommand::TurnOff => Command::new(TURN_OFF),
        }
    }
}

pub type SwitchStore<'a> = Store<'a, Switch>;

impl Store<'_, Switch> {
    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn turn_on(&mut self) -> Result<SwitchState, HubError> {
        self.set_desired_from_command(&SwitchCommand::TurnOn.into())
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn turn_off(&mut self) -> Result<SwitchState, HubError> {
        self.set_desired_from_command(&SwitchCommand::TurnOff.into())
    }
}

#[must_use]
pub fn bind(entity: &mut Entity) -> SwitchStore<'_> {
    Store::bind(entity)
}

#[must_use]
pub fn supported_actions() -> Vec<String> {
    SCHEMA.supported_actions()
}

#[must_use]
pub fn describe() -> DomainDescriptor {
    SCHEMA.describe()
}

/// # Errors
///
/// See [`DeviceSchema::parse_command`].
pub fn parse_command(raw: &[u8]) -> Result<Command, HubError> {
    SCHEMA.parse_command(raw)
}

/// # Errors
///
/// See [`DeviceSchema::parse_event`].
pub fn parse_event(raw: &[u8]) -> Result<Event, HubError> {
    SCHEMA.parse_event(raw)
}

/// # Errors
///
/// Returns [`ValidationError::UnsupportedAction`] unless the action is
/// `turn_on` or `turn_off`.
pub fn validate_command(command: &Command) -> Result<(), ValidationError> {
    SCHEMA.validate_command(command)
}

/// # Errors
///
/// Returns [`ValidationError::UnsupportedAction`] for unknown actions.
pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
    SCHEMA.validate_event(event)
}
