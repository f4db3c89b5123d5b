//! Built-in device types.
//!
//! Each module is a `const` [`DeviceSchema`] plus a typed state; all
//! behaviour lives in the generic engine.

pub mod light;
pub mod switch;

pub use light::{Light, LightCommand, LightState};
pub use switch::{Switch, SwitchCommand, SwitchState};

use crate::schema::DeviceSchema;

/// Every built-in schema, in a stable order.
pub const ALL: &[&DeviceSchema] = &[&switch::SCHEMA, &light::SCHEMA];

/// Find a built-in schema by domain name.
#[must_use]
pub fn schema(domain: &str) -> Option<&'static DeviceSchema> {
    ALL.iter().copied().find(|schema| schema.domain == domain)
}
