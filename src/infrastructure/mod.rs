//! # Infrastructure Layer
//!
//! Adapters to the outside world.
//!
//! - [`upstream`]: HTTP clients for the FX and promotion services
//! - [`config`]: Layered service configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod telemetry;
pub mod upstream;
