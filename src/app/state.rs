//! Operating state, sensor samples, and the threshold classifier.

use crate::config::SystemConfig;
use crate::error::SensorError;

// ---------------------------------------------------------------------------
// System state
// ---------------------------------------------------------------------------

/// Discrete operating state. Variants are declared in severity order, so
/// the derived `Ord` compares by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum SystemState {
    #[default]
    Idle = 0,
    Warning = 1,
    Critical = 2,
    Error = 3,
}

impl SystemState {
    pub const COUNT: usize = 4;

    /// Wire ordinal used in the status line.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Idle),
            1 => Some(Self::Warning),
            2 => Some(Self::Critical),
            3 => Some(Self::Error),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Band boundaries in Celsius. Bands are left-inclusive, right-exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning_c: f32,
    pub critical_c: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_c: 25.0,
            critical_c: 28.0,
        }
    }
}

impl From<&SystemConfig> for Thresholds {
    fn from(c: &SystemConfig) -> Self {
        Self {
            warning_c: c.warning_threshold_c,
            critical_c: c.critical_threshold_c,
        }
    }
}

/// Map a temperature onto Idle / Warning / Critical.
///
/// ```text
/// t < warning              -> Idle
/// warning <= t < critical  -> Warning
/// t >= critical            -> Critical
/// ```
///
/// Never yields `Error`; that state comes only from invalid samples.
pub fn classify(temperature_c: f32, thresholds: &Thresholds) -> SystemState {
    if temperature_c < thresholds.warning_c {
        SystemState::Idle
    } else if temperature_c < thresholds.critical_c {
        SystemState::Warning
    } else {
        SystemState::Critical
    }
}

// ---------------------------------------------------------------------------
// Sensor samples
// ---------------------------------------------------------------------------

/// Open interval of plausible sensor readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min_c: f32,
    pub max_c: f32,
}

impl Default for ValidRange {
    fn default() -> Self {
        Self {
            min_c: -50.0,
            max_c: 100.0,
        }
    }
}

impl From<&SystemConfig> for ValidRange {
    fn from(c: &SystemConfig) -> Self {
        Self {
            min_c: c.valid_min_c,
            max_c: c.valid_max_c,
        }
    }
}

impl ValidRange {
    /// Strictly inside `(min_c, max_c)`. NaN is never valid.
    pub fn contains(&self, temperature_c: f32) -> bool {
        temperature_c > self.min_c && temperature_c < self.max_c
    }
}

/// One reading from the sensing task. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature_c: f32,
    /// Tick count (ms since boot, wrapping) at the time of the reading.
    pub timestamp: u32,
    pub valid: bool,
}

impl SensorSample {
    pub fn new(temperature_c: f32, timestamp: u32, range: &ValidRange) -> Self {
        Self {
            temperature_c,
            timestamp,
            valid: range.contains(temperature_c),
        }
    }

    /// The temperature if the sample is valid.
    pub fn checked(&self) -> Result<f32, SensorError> {
        if self.valid {
            Ok(self.temperature_c)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}
