//! Light: power, brightness, RGB colour, colour temperature and scene.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{HubError, ValidationError};
use crate::payload::{Command, Event};
use crate::schema::{ActionSpec, DeviceSchema, DomainDescriptor, Effect, FieldKind, FieldSpec};
use crate::store::{DeviceType, Store};

pub const DOMAIN: &str = "light";

pub const TURN_ON: &str = "turn_on";
pub const TURN_OFF: &str = "turn_off";
pub const SET_BRIGHTNESS: &str = "set_brightness";
pub const SET_RGB: &str = "set_rgb";
pub const SET_TEMPERATURE: &str = "set_temperature";
pub const SET_SCENE: &str = "set_scene";

pub const SCHEMA: DeviceSchema = DeviceSchema {
    domain: DOMAIN,
    fields: &[
        FieldSpec {
            name: "brightness",
            kind: FieldKind::Int {
                min: Some(0),
                max: Some(100),
            },
        },
        FieldSpec {
            name: "rgb",
            kind: FieldKind::IntList { len: Some(3) },
        },
        FieldSpec {
            name: "temperature",
            kind: FieldKind::Int {
                min: None,
                max: None,
            },
        },
        FieldSpec {
            name: "scene",
            kind: FieldKind::Text { non_empty: true },
        },
    ],
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
        ActionSpec {
            name: SET_BRIGHTNESS,
            fields: &["brightness"],
            effect: Effect::Assign,
        },
        ActionSpec {
            name: SET_RGB,
            fields: &["rgb"],
            effect: Effect::Assign,
        },
        ActionSpec {
            name: SET_TEMPERATURE,
            fields: &["temperature"],
            effect: Effect::Assign,
        },
        ActionSpec {
            name: SET_SCENE,
            fields: &["scene"],
            effect: Effect::Assign,
        },
    ],
};

/// Marker type binding the light schema to [`LightState`].
#[derive(Debug, Clone, Copy)]
pub struct Light;

impl DeviceType for Light {
    type State = LightState;

    const SCHEMA: &'static DeviceSchema = &SCHEMA;
}

/// Attribute snapshot of a light. `None` means "never set", not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub power: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

/// Typed form of every light command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightCommand {
    TurnOn,
    TurnOff,
    SetBrightness(i64),
    SetRgb([i64; 3]),
    SetTemperature(i64),
    SetScene(String),
}

impl From<LightCommand> for Command {
    fn from(command: LightCommand) -> Self {
        match command {
            LightCommand::TurnOn => Command::new(TURN_ON),
            LightCommand::TurnOff => Command::new(TURN_OFF),
            LightCommand::SetBrightness(v) => {
                Command::new(SET_BRIGHTNESS).with_field("brightness", v)
            }
            LightCommand::SetRgb(rgb) => Command::new(SET_RGB).with_field("rgb", rgb.to_vec()),
            LightCommand::SetTemperature(v) => {
                Command::new(SET_TEMPERATURE).with_field("temperature", v)
            }
            LightCommand::SetScene(scene) => Command::new(SET_SCENE).with_field("scene", scene),
        }
    }
}

pub type LightStore<'a> = Store<'a, Light>;

/// Convenience setters. Each goes through [`Store::set_desired_from_command`],
/// so validation still applies.
impl Store<'_, Light> {
    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn turn_on(&mut self) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::TurnOn)
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn turn_off(&mut self) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::TurnOff)
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn set_brightness(&mut self, brightness: i64) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::SetBrightness(brightness))
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn set_rgb(&mut self, r: i64, g: i64, b: i64) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::SetRgb([r, g, b]))
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn set_temperature(&mut self, temperature: i64) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::SetTemperature(temperature))
    }

    /// # Errors
    ///
    /// See [`Store::set_desired_from_command`].
    pub fn set_scene(&mut self, scene: impl Into<String>) -> Result<LightState, HubError> {
        self.apply_command(LightCommand::SetScene(scene.into()))
    }

    fn apply_command(&mut self, command: LightCommand) -> Result<LightState, HubError> {
        self.set_desired_from_command(&command.into())
    }
}

#[must_use]
pub fn bind(entity: &mut Entity) -> LightStore<'_> {
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
/// See [`DeviceSchema::validate_command`].
pub fn validate_command(command: &Command) -> Result<(), ValidationError> {
    SCHEMA.validate_command(command)
}

/// # Errors
///
/// See [`DeviceSchema::validate_event`].
pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
    SCHEMA.validate_event(event)
}
