//! Thermowatch firmware library.
//!
//! Exposes the pipeline, its domain logic and the drivers for integration
//! testing and host-side tooling. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; host builds get
//! in-memory stand-ins.

#![deny(unused_must_use)]

pub mod analysis;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod halt;
pub mod pins;
pub mod pipeline;
pub mod queue;
pub mod runtime;
pub mod sensors;
pub mod stats;
pub mod tasks;
pub mod time;
