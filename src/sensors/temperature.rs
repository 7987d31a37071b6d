//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via
//! the ESP32-S3 ADC. The simplified Beta (Steinhart-Hart) equation
//! converts resistance to temperature.
//!
//! An ADC error or a rail reading (open or shorted thermistor) yields NaN,
//! which never passes sample validation.

use crate::app::ports::TemperatureSource;
use crate::drivers::hw_init;
use crate::pins;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

pub struct NtcThermistor {
    channel: u32,
    last_raw: Option<u16>,
}

impl NtcThermistor {
    pub fn new(channel: u32) -> Self {
        Self { channel, last_raw: None }
    }

    pub fn onboard() -> Self {
        Self::new(pins::TEMP_ADC_CHANNEL)
    }

    /// Raw ADC value behind the most recent read, if it succeeded.
    pub fn last_raw(&self) -> Option<u16> {
        self.last_raw
    }
}

impl TemperatureSource for NtcThermistor {
    fn read(&mut self) -> f32 {
        self.last_raw = hw_init::adc1_read(self.channel);
        self.last_raw.map_or(f32::NAN, adc_to_celsius)
    }
}

pub fn adc_to_celsius(raw: u16) -> f32 {
    let voltage = (raw as f32 / ADC_MAX) * V_REF;
    if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
        return f32::NAN;
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return f32::NAN;
    }
    (1.0 / inv_t) - 273.15
}
