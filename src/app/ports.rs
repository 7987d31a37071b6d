//! Port traits: the boundary between the task pipeline and the outside world.
//!
//! ```text
//!   Driver ──▶ Port trait ──▶ task loop (domain)
//! ```
//!
//! Drivers (thermistor, LEDs, fan PWM, UART) implement these traits. The
//! task loops consume them via generics, so the pipeline never touches
//! hardware directly and every task runs on the host against mocks.
//!
//! Each port is owned by exactly one task. The serial transmit half is the
//! exception: it lives inside the pipeline's serial guard.

use core::time::Duration;

use crate::error::SerialError;

// ───────────────────────────────────────────────────────────────
// Temperature source (hardware → sensing task)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the temperature sensor.
///
/// Implementations return promptly and perform no validation; a failed
/// conversion should surface as a value outside the valid window (NaN is
/// fine, it never validates).
pub trait TemperatureSource {
    fn read(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Status indicators (actuation task → hardware)
// ───────────────────────────────────────────────────────────────

/// The three steady status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Idle,
    Warning,
    Critical,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Idle, Indicator::Warning, Indicator::Critical];
}

/// Three independent on/off outputs. No combined encoding: callers write
/// all three on every update.
pub trait IndicatorPort {
    fn set(&mut self, indicator: Indicator, on: bool);
}

/// Transient fault output, pulsed by the sensing task when a sample is
/// dropped and blinked by the fatal halt.
pub trait FaultIndicator {
    fn set_fault(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Fan actuator (actuation task → hardware)
// ───────────────────────────────────────────────────────────────

/// Variable-speed fan. The implementation scales the percentage onto the
/// hardware duty range.
pub trait FanPort {
    fn set_duty_percent(&mut self, percent: u8);
}

// ───────────────────────────────────────────────────────────────
// Serial transport
// ───────────────────────────────────────────────────────────────

/// Blocking transmit half of the serial link.
pub trait SerialTx {
    /// Transmit every byte, giving up after `timeout`.
    fn write_all(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), SerialError>;
}

/// Receive half of the serial link.
pub trait SerialRx {
    /// Wait at most `timeout` for a single byte.
    fn read_byte(&mut self, timeout: Duration) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading a [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The document could not be deserialized.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
