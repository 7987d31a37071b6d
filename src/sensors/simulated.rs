//! Deterministic temperature source for bench runs without a thermistor.
//!
//! Sweeps between [`LOW_TURN_C`] and [`HIGH_TURN_C`] in fixed steps, so
//! the pipeline visits Idle, Warning and Critical on its own.

use crate::app::ports::TemperatureSource;

pub const START_C: f32 = 24.0;
pub const STEP_C: f32 = 0.1;
pub const HIGH_TURN_C: f32 = 30.0;
pub const LOW_TURN_C: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct SimulatedThermometer {
    current_c: f32,
    rising: bool,
}

impl SimulatedThermometer {
    pub fn new() -> Self {
        Self::starting_at(START_C)
    }

    pub fn starting_at(celsius: f32) -> Self {
        Self { current_c: celsius, rising: true }
    }
}

impl Default for SimulatedThermometer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureSource for SimulatedThermometer {
    fn read(&mut self) -> f32 {
        if self.rising {
            self.current_c += STEP_C;
            if self.current_c > HIGH_TURN_C {
                self.rising = false;
            }
        } else {
            self.current_c -= STEP_C;
            if self.current_c < LOW_TURN_C {
                self.rising = true;
            }
        }
        self.current_c
    }
}
