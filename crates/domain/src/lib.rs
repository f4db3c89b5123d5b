//! # hubkit-domain
//!
//! Pure domain model for per-device-type schemas on a home automation
//! entity platform.
//!
//! ## Responsibilities
//! - Model the externally owned **Entity** record (action list + desired /
//!   reported / effective state blobs)
//! - Define **Commands** (user intents) and **Events** (device telemetry)
//! - Declare **device schemas** as data and run the one generic
//!   validate/merge engine over them
//! - Mediate reads and read-merge-writes of entity state through [`store::Store`]
//! - Ship the built-in `switch` and `light` device types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Logging and registry wiring live in the `app` crate.

pub mod error;

pub mod devices;
pub mod entity;
pub mod payload;
pub mod schema;
pub mod store;
