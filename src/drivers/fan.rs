//! Cooling fan driver.
//!
//! Speed is a percentage; the driver maps it onto whatever duty range the
//! PWM channel exposes via `embedded_hal::pwm::SetDutyCycle`. On the board
//! the channel is LEDC CH0 (10-bit); host tests pass a recording channel.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use log::warn;

use crate::app::ports::FanPort;
use crate::drivers::hw_init;
use crate::pins;

/// An LEDC channel configured by `hw_init::init_peripherals()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedcChannel {
    channel: u32,
    max_duty: u16,
}

impl LedcChannel {
    pub const fn new(channel: u32, resolution_bits: u32) -> Self {
        Self { channel, max_duty: ((1u32 << resolution_bits) - 1) as u16 }
    }

    pub const fn fan() -> Self {
        Self::new(hw_init::LEDC_CH_FAN, pins::FAN_PWM_RESOLUTION_BITS)
    }
}

impl ErrorType for LedcChannel {
    type Error = Infallible;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        hw_init::ledc_set(self.channel, duty.min(self.max_duty) as u32);
        Ok(())
    }
}

pub struct FanDriver<P> {
    pwm: P,
    percent: u8,
}

impl<P: SetDutyCycle> FanDriver<P> {
    /// Wraps `pwm` and stops the fan.
    pub fn new(mut pwm: P) -> Self {
        if let Err(e) = pwm.set_duty_cycle_fully_off() {
            warn!("fan: initial stop failed: {:?}", e);
        }
        Self { pwm, percent: 0 }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_running(&self) -> bool {
        self.percent > 0
    }
}

impl FanDriver<LedcChannel> {
    pub fn onboard() -> Self {
        Self::new(LedcChannel::fan())
    }
}

impl<P: SetDutyCycle> FanPort for FanDriver<P> {
    fn set_duty_percent(&mut self, percent: u8) {
        let percent = percent.min(100);
        match self.pwm.set_duty_cycle_percent(percent) {
            Ok(()) => self.percent = percent,
            Err(e) => warn!("fan: duty {}% rejected: {:?}", percent, e),
        }
    }
}
