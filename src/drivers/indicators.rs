//! State indicator LEDs and the fault pulse.
//!
//! Three discrete LEDs, one per non-error state. The bank is generic over
//! `embedded_hal::digital::OutputPin` so host tests can hand it recording
//! pins; on the board each pin is a [`GpioOutput`] writing through
//! `hw_init`.
//!
//! The fault indicator drives the same physical pin as the critical LED.
//! It is a separate handle because it belongs to the sensing task while
//! the bank belongs to actuation.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::app::ports::{FaultIndicator, Indicator, IndicatorPort};
use crate::drivers::hw_init;
use crate::pins;

/// A GPIO configured as output by `hw_init::init_peripherals()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub const fn new(pin: i32) -> Self {
        Self { pin }
    }

    pub const fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true);
        Ok(())
    }
}

pub struct IndicatorBank<P> {
    idle: P,
    warning: P,
    critical: P,
}

impl<P: OutputPin> IndicatorBank<P> {
    pub fn new(idle: P, warning: P, critical: P) -> Self {
        Self { idle, warning, critical }
    }

    fn pin_mut(&mut self, which: Indicator) -> &mut P {
        match which {
            Indicator::Idle => &mut self.idle,
            Indicator::Warning => &mut self.warning,
            Indicator::Critical => &mut self.critical,
        }
    }
}

impl IndicatorBank<GpioOutput> {
    /// The board's three indicator LEDs.
    pub fn onboard() -> Self {
        Self::new(
            GpioOutput::new(pins::LED_IDLE_GPIO),
            GpioOutput::new(pins::LED_WARNING_GPIO),
            GpioOutput::new(pins::LED_CRITICAL_GPIO),
        )
    }
}

impl<P: OutputPin> IndicatorPort for IndicatorBank<P> {
    fn set(&mut self, which: Indicator, on: bool) {
        if let Err(e) = self.pin_mut(which).set_state(on.into()) {
            warn!("indicator {:?}: write failed: {:?}", which, e);
        }
    }
}

/// Fault pulse / halt blink output.
pub struct FaultLed<P> {
    pin: P,
}

impl<P: OutputPin> FaultLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl FaultLed<GpioOutput> {
    pub fn onboard() -> Self {
        Self::new(GpioOutput::new(pins::LED_CRITICAL_GPIO))
    }
}

impl<P: OutputPin> FaultIndicator for FaultLed<P> {
    fn set_fault(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(on.into()) {
            warn!("fault LED: write failed: {:?}", e);
        }
    }
}
