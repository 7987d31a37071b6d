//! Control directives carried by the Command Queue.
//!
//! Produced by the decision task (state changes) and the reporting task
//! (manual override); consumed exactly once by the actuation task.

use super::state::SystemState;

/// What the actuation task should do with a [`ControlCommand`]. Commands
/// travel the queue typed, so there is no unknown kind to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Re-assert indicators for the current state.
    RefreshIndicators,
    /// Apply a fan speed, leave the state alone.
    SetFanSpeed,
    /// Switch state, drive indicators, apply the fan speed.
    SetState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCommand {
    pub kind: CommandKind,
    /// Only meaningful for [`CommandKind::SetState`].
    pub target_state: SystemState,
    /// Fan speed in percent (0-100).
    pub fan_speed: u8,
}

impl ControlCommand {
    pub const fn set_state(target_state: SystemState, fan_speed: u8) -> Self {
        Self {
            kind: CommandKind::SetState,
            target_state,
            fan_speed,
        }
    }

    pub const fn set_fan_speed(fan_speed: u8) -> Self {
        Self {
            kind: CommandKind::SetFanSpeed,
            target_state: SystemState::Idle,
            fan_speed,
        }
    }

    pub const fn refresh_indicators() -> Self {
        Self {
            kind: CommandKind::RefreshIndicators,
            target_state: SystemState::Idle,
            fan_speed: 0,
        }
    }
}
