//! System configuration parameters
//!
//! All tunable parameters for the monitoring pipeline.
//! Defaults reproduce the reference timing; a build can override them by
//! baking a JSON document in through `THERMOWATCH_CONFIG_JSON`.

use core::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Capacity of the sensing → decision queue.
pub const SAMPLE_QUEUE_CAP: usize = 5;
/// Capacity of the decision/reporting → actuation queue.
pub const COMMAND_QUEUE_CAP: usize = 3;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Classification thresholds ---
    /// Lower bound (inclusive) of the Warning band, in Celsius
    pub warning_threshold_c: f32,
    /// Lower bound (inclusive) of the Critical band, in Celsius
    pub critical_threshold_c: f32,

    // --- Sensor validity window (both bounds exclusive) ---
    pub valid_min_c: f32,
    pub valid_max_c: f32,

    // --- Sensing task ---
    /// Sampling period, measured from the previous wake time (ms)
    pub sensing_period_ms: u32,
    /// Sample enqueue timeout (ms)
    pub sample_send_timeout_ms: u32,
    /// Fault indicator pulse on a dropped sample (ms)
    pub drop_pulse_ms: u32,

    // --- Decision task ---
    /// Sample receive timeout (ms)
    pub decision_receive_timeout_ms: u32,
    /// Sleep after every receive attempt (ms)
    pub decision_sleep_ms: u32,
    /// Command enqueue timeout (ms)
    pub command_send_timeout_ms: u32,

    // --- Actuation task ---
    /// Command receive timeout (ms)
    pub actuation_receive_timeout_ms: u32,
    /// Sleep after every receive attempt (ms)
    pub actuation_sleep_ms: u32,

    // --- Reporting task ---
    /// Reporting period (ms)
    pub reporting_period_ms: u32,
    /// Serial guard acquisition timeout (ms)
    pub serial_lock_timeout_ms: u32,
    /// Blocking transmit timeout (ms)
    pub serial_tx_timeout_ms: u32,
    /// Single-byte receive timeout (ms)
    pub serial_rx_timeout_ms: u32,

    // --- Manual override ---
    /// Inbound byte that requests the manual fan override
    pub override_byte: u8,
    /// Fan speed applied by the manual override (0-100%)
    pub override_fan_percent: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            warning_threshold_c: 25.0,
            critical_threshold_c: 28.0,

            valid_min_c: -50.0,
            valid_max_c: 100.0,

            sensing_period_ms: 500,
            sample_send_timeout_ms: 10,
            drop_pulse_ms: 100,

            decision_receive_timeout_ms: 200,
            decision_sleep_ms: 100,
            command_send_timeout_ms: 50,

            actuation_receive_timeout_ms: 100,
            actuation_sleep_ms: 50,

            reporting_period_ms: 1000,
            serial_lock_timeout_ms: 100,
            serial_tx_timeout_ms: 100,
            serial_rx_timeout_ms: 10,

            override_byte: b'F',
            override_fan_percent: 50,
        }
    }
}

impl SystemConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep
    /// their defaults. The result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply an optional override document on top of the defaults. A
    /// document that fails to parse or validate is reported and ignored.
    pub fn load_or_default(document: Option<&str>) -> Self {
        let Some(json) = document else {
            info!("config: using defaults");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                info!("config: override applied");
                config
            }
            Err(e) => {
                warn!("config: override rejected ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.valid_min_c < self.valid_max_c) {
            return Err(ConfigError::ValidationFailed("valid_min_c must be below valid_max_c"));
        }
        if !(self.warning_threshold_c < self.critical_threshold_c) {
            return Err(ConfigError::ValidationFailed(
                "warning_threshold_c must be below critical_threshold_c",
            ));
        }
        if self.sensing_period_ms == 0
            || self.decision_sleep_ms == 0
            || self.actuation_sleep_ms == 0
            || self.reporting_period_ms == 0
        {
            return Err(ConfigError::ValidationFailed("task periods must be non-zero"));
        }
        if self.override_fan_percent > 100 {
            return Err(ConfigError::ValidationFailed("override_fan_percent exceeds 100"));
        }
        Ok(())
    }

    pub fn sensing_period(&self) -> Duration {
        ms(self.sensing_period_ms)
    }

    pub fn sample_send_timeout(&self) -> Duration {
        ms(self.sample_send_timeout_ms)
    }

    pub fn drop_pulse(&self) -> Duration {
        ms(self.drop_pulse_ms)
    }

    pub fn decision_receive_timeout(&self) -> Duration {
        ms(self.decision_receive_timeout_ms)
    }

    pub fn decision_sleep(&self) -> Duration {
        ms(self.decision_sleep_ms)
    }

    pub fn command_send_timeout(&self) -> Duration {
        ms(self.command_send_timeout_ms)
    }

    pub fn actuation_receive_timeout(&self) -> Duration {
        ms(self.actuation_receive_timeout_ms)
    }

    pub fn actuation_sleep(&self) -> Duration {
        ms(self.actuation_sleep_ms)
    }

    pub fn reporting_period(&self) -> Duration {
        ms(self.reporting_period_ms)
    }

    pub fn serial_lock_timeout(&self) -> Duration {
        ms(self.serial_lock_timeout_ms)
    }

    pub fn serial_tx_timeout(&self) -> Duration {
        ms(self.serial_tx_timeout_ms)
    }

    pub fn serial_rx_timeout(&self) -> Duration {
        ms(self.serial_rx_timeout_ms)
    }
}

fn ms(v: u32) -> Duration {
    Duration::from_millis(u64::from(v))
}
