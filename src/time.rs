//! Monotonic tick source.
//!
//! One tick is one millisecond since boot, wrapping at `u32::MAX` like the
//! scheduler tick it stands in for. Backed by `embassy-time`, whose driver
//! is the ESP-IDF high-resolution timer on target and `std::time::Instant`
//! on the host.

use embassy_time::{Duration, Instant};

/// Milliseconds since boot, truncated to 32 bits.
pub fn tick_count() -> u32 {
    Instant::now().as_millis() as u32
}

/// Convert a `core` duration into an `embassy-time` one.
pub fn to_embassy(d: core::time::Duration) -> Duration {
    Duration::from_micros(d.as_micros() as u64)
}
