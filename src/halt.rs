//! Unrecoverable-failure handling.

use embassy_time::{Duration, Timer};
use futures_lite::future::block_on;
use log::error;

use crate::app::ports::FaultIndicator;

pub const HALT_BLINK_MS: u64 = 200;

/// Stop doing useful work and blink the fault indicator forever.
///
/// Only reached when startup cannot complete (queue or task creation,
/// peripheral init). The pipeline never enters this at runtime.
pub fn fatal_halt(reason: &str, fault: &mut impl FaultIndicator) -> ! {
    error!("FATAL: {} - halting", reason);
    block_on(blink_forever(fault))
}

async fn blink_forever(fault: &mut impl FaultIndicator) -> ! {
    let mut on = false;
    loop {
        on = !on;
        fault.set_fault(on);
        Timer::after(Duration::from_millis(HALT_BLINK_MS)).await;
    }
}
