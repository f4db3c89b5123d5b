//! # hubkit-app
//!
//! Application layer: use-cases and start-up wiring helpers.
//!
//! ## Responsibilities
//! - Provide the [`registry::SchemaRegistry`], an explicit object the
//!   composition root fills with device descriptors during start-up
//! - Provide the [`services::device_service::DeviceService`] use-case:
//!   parse → capability check → state update, with structured logging
//!
//! ## Dependency rule
//! Depends on `hubkit-domain` only (plus `tracing`).
//! Never performs IO; callers own transport and persistence.

pub mod registry;
pub mod services;
