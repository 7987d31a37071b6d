//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod fan;
pub mod hw_init;
pub mod indicators;
pub mod serial;
pub mod task_pin;
