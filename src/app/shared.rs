//! Shared runtime record: current state, cached temperature, fan speed.
//!
//! Written by the actuation task (state, fan) and the decision task
//! (temperature); read by the decision and reporting tasks. The whole
//! record sits behind one critical-section mutex, so every read is a
//! consistent snapshot of all three fields.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use super::state::SystemState;

/// Point-in-time copy of the shared record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeSnapshot {
    pub current_state: SystemState,
    pub current_temperature_c: f32,
    pub fan_speed: u8,
}

impl Default for RuntimeSnapshot {
    fn default() -> Self {
        Self {
            current_state: SystemState::Idle,
            current_temperature_c: 20.0,
            fan_speed: 0,
        }
    }
}

pub struct SharedRuntimeState {
    inner: Mutex<CriticalSectionRawMutex, Cell<RuntimeSnapshot>>,
}

impl Default for SharedRuntimeState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedRuntimeState {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(RuntimeSnapshot {
                current_state: SystemState::Idle,
                current_temperature_c: 20.0,
                fan_speed: 0,
            })),
        }
    }

    pub fn snapshot(&self) -> RuntimeSnapshot {
        self.inner.lock(Cell::get)
    }

    pub fn current_state(&self) -> SystemState {
        self.snapshot().current_state
    }

    /// Decision task: cache the latest valid temperature for reporting.
    pub fn set_temperature(&self, temperature_c: f32) {
        self.update(|s| s.current_temperature_c = temperature_c);
    }

    /// Actuation task: apply a state-driven command.
    pub fn set_state_and_fan(&self, state: SystemState, fan_speed: u8) {
        self.update(|s| {
            s.current_state = state;
            s.fan_speed = fan_speed;
        });
    }

    /// Actuation task: apply a fan-only command.
    pub fn set_fan(&self, fan_speed: u8) {
        self.update(|s| s.fan_speed = fan_speed);
    }

    fn update(&self, f: impl FnOnce(&mut RuntimeSnapshot)) {
        self.inner.lock(|cell| {
            let mut s = cell.get();
            f(&mut s);
            cell.set(s);
        });
    }
}
