//! Command application: state → indicators, fan speed → PWM.
//!
//! The actuation task is the only caller, which makes it the only writer
//! of the shared state and fan speed.

use log::info;

use super::commands::{CommandKind, ControlCommand};
use super::ports::{FanPort, Indicator, IndicatorPort};
use super::shared::SharedRuntimeState;
use super::state::SystemState;

/// The indicator that represents `state`, if any. Error owns none of the
/// steady indicators.
pub const fn indicator_for(state: SystemState) -> Option<Indicator> {
    match state {
        SystemState::Idle => Some(Indicator::Idle),
        SystemState::Warning => Some(Indicator::Warning),
        SystemState::Critical => Some(Indicator::Critical),
        SystemState::Error => None,
    }
}

/// Write all three indicators so that at most one is lit.
pub fn drive_indicators(indicators: &mut impl IndicatorPort, state: SystemState) {
    let lit = indicator_for(state);
    for ind in Indicator::ALL {
        indicators.set(ind, lit == Some(ind));
    }
}

/// Apply one command to the actuators and the shared record.
pub fn apply_command(
    cmd: ControlCommand,
    indicators: &mut impl IndicatorPort,
    fan: &mut impl FanPort,
    shared: &SharedRuntimeState,
) {
    let fan_speed = cmd.fan_speed.min(100);
    match cmd.kind {
        CommandKind::SetState => {
            let prev = shared.current_state();
            shared.set_state_and_fan(cmd.target_state, fan_speed);
            drive_indicators(indicators, cmd.target_state);
            fan.set_duty_percent(fan_speed);
            if prev != cmd.target_state {
                info!("STATE | {} -> {} (fan={}%)", prev.name(), cmd.target_state.name(), fan_speed);
            }
        }
        CommandKind::SetFanSpeed => {
            shared.set_fan(fan_speed);
            fan.set_duty_percent(fan_speed);
            info!("FAN | override {}%", fan_speed);
        }
        CommandKind::RefreshIndicators => {
            drive_indicators(indicators, shared.current_state());
        }
    }
}
