//! Application services: use-case implementations.
//!
//! Services are generic over the device type they serve, so the compiler
//! picks the schema and the typed state at the call site.

pub mod device_service;
