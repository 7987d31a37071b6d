//! Sample → command decision logic.
//!
//! Pure function of (sample, currently known state). The decision task
//! feeds it samples from the Sample Queue and forwards whatever it returns
//! to the Command Queue.

use super::commands::ControlCommand;
use super::state::{SensorSample, SystemState, Thresholds, classify};

/// Fan speed that accompanies a transition into Critical.
pub const CRITICAL_FAN_PERCENT: u8 = 100;

/// Fan speed that a state-driven command implies for `state`.
pub const fn fan_for_state(state: SystemState) -> u8 {
    match state {
        SystemState::Critical => CRITICAL_FAN_PERCENT,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    thresholds: Thresholds,
}

impl DecisionEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Decide what, if anything, to send to the actuation task.
    ///
    /// - Invalid sample: always `SetState(Error, 0)`, whatever `current`.
    /// - Valid sample: `SetState(new, fan)` only when the classification
    ///   differs from `current`; otherwise nothing.
    pub fn evaluate(&self, sample: &SensorSample, current: SystemState) -> Option<ControlCommand> {
        let Ok(temperature_c) = sample.checked() else {
            return Some(ControlCommand::set_state(SystemState::Error, 0));
        };

        let next = classify(temperature_c, &self.thresholds);
        (next != current).then(|| ControlCommand::set_state(next, fan_for_state(next)))
    }
}
