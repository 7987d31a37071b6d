//! Serial status-line protocol.
//!
//! Outbound, once per reporting period:
//!
//! ```text
//! Estado: <state_ordinal>, Temp: <temp .1>°C, Fan: <fan>%, Time: <tick>\r\n
//! ```
//!
//! Inbound, a single byte: `F` requests the manual fan override; anything
//! else is ignored and never acknowledged.

use core::fmt::Write;

use heapless::String;

use super::commands::ControlCommand;
use super::shared::RuntimeSnapshot;
use super::state::SystemState;

/// Upper bound on a formatted status line, in bytes.
pub const STATUS_LINE_CAP: usize = 96;

pub type StatusLine = String<STATUS_LINE_CAP>;

/// Render the status line for `snapshot` at `tick`.
pub fn format_status_line(snapshot: &RuntimeSnapshot, tick: u32) -> StatusLine {
    let mut line = StatusLine::new();
    // Worst case (long negative float) is still well under the capacity;
    // a write error would only truncate the line.
    let _ = write!(
        line,
        "Estado: {}, Temp: {:.1}\u{00b0}C, Fan: {}%, Time: {}\r\n",
        snapshot.current_state.ordinal(),
        snapshot.current_temperature_c,
        snapshot.fan_speed,
        tick,
    );
    line
}

/// A status line as seen by a host-side reader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub state: SystemState,
    pub temperature_c: f32,
    pub fan_speed: u8,
    pub tick: u32,
}

/// Parse one status line. Surrounding whitespace (including the `\r\n`
/// terminator) is ignored. Returns `None` for anything that is not a
/// well-formed status line.
pub fn parse_status_line(line: &str) -> Option<StatusReport> {
    let rest = line.trim().strip_prefix("Estado: ")?;
    let (state, rest) = rest.split_once(", Temp: ")?;
    let (temp, rest) = rest.split_once("\u{00b0}C, Fan: ")?;
    let (fan, tick) = rest.split_once("%, Time: ")?;

    Some(StatusReport {
        state: SystemState::from_ordinal(state.parse().ok()?)?,
        temperature_c: temp.parse().ok()?,
        fan_speed: fan.parse().ok()?,
        tick: tick.parse().ok()?,
    })
}

/// Translate an inbound byte into an override command.
pub fn decode_override(byte: u8, trigger: u8, fan_percent: u8) -> Option<ControlCommand> {
    (byte == trigger).then(|| ControlCommand::set_fan_speed(fan_percent))
}
