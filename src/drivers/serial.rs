//! Status UART, split into a transmit and a receive half.
//!
//! The transmit half is moved into the pipeline's serial guard; the
//! receive half is owned by the reporting task. Both halves talk to the
//! same driver instance, installed by `hw_init`.
//!
//! On host builds the transmit half writes to stdout and the receive half
//! is fed through a channel, see [`sim_link`].

use core::time::Duration;

use crate::app::ports::{SerialRx, SerialTx};
use crate::error::SerialError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
fn to_ticks(timeout: Duration) -> TickType_t {
    let ms = timeout.as_millis().min(u32::MAX as u128) as u32;
    let ticks = ms.saturating_mul(configTICK_RATE_HZ as u32) / 1000;
    // A non-zero timeout never rounds down to "don't wait".
    if ms > 0 && ticks == 0 { 1 } else { ticks }
}

// ── ESP-IDF ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct UartTx {
    port: uart_port_t,
}

#[cfg(target_os = "espidf")]
pub struct UartRx {
    port: uart_port_t,
}

/// Both halves of the status UART. `hw_init::init_peripherals()` must have
/// installed the driver.
#[cfg(target_os = "espidf")]
pub fn status_uart() -> (UartTx, UartRx) {
    (
        UartTx { port: pins::STATUS_UART_PORT },
        UartRx { port: pins::STATUS_UART_PORT },
    )
}

#[cfg(target_os = "espidf")]
impl SerialTx for UartTx {
    fn write_all(&mut self, bytes: &[u8], timeout: Duration) -> Result<(), SerialError> {
        // SAFETY: the driver is installed and uart_write_bytes copies into
        // the driver's ring buffer before returning.
        let written = unsafe { uart_write_bytes(self.port, bytes.as_ptr() as *const _, bytes.len()) };
        if written < 0 {
            return Err(SerialError::Driver(written));
        }
        // SAFETY: read-only wait on an installed driver.
        let ret = unsafe { uart_wait_tx_done(self.port, to_ticks(timeout)) };
        if ret == ESP_OK as i32 {
            Ok(())
        } else if ret == ESP_ERR_TIMEOUT as i32 {
            Err(SerialError::TxTimeout)
        } else {
            Err(SerialError::Driver(ret))
        }
    }
}

#[cfg(target_os = "espidf")]
impl SerialRx for UartRx {
    fn read_byte(&mut self, timeout: Duration) -> Option<u8> {
        let mut byte = 0u8;
        // SAFETY: `byte` outlives the call and the length is 1.
        let n = unsafe {
            uart_read_bytes(self.port, (&raw mut byte) as *mut _, 1, to_ticks(timeout))
        };
        (n == 1).then_some(byte)
    }
}

// ── Host ──────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct UartTx;

#[cfg(not(target_os = "espidf"))]
pub struct UartRx {
    incoming: std::sync::mpsc::Receiver<u8>,
}

/// Host stand-in for the status UART: lines go to stdout, and bytes sent
/// on the returned sender arrive at the receive half.
#[cfg(not(target_os = "espidf"))]
pub fn sim_link() -> (UartTx, UartRx, std::sync::mpsc::Sender<u8>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (UartTx, UartRx { incoming: rx }, tx)
}

#[cfg(not(target_os = "espidf"))]
impl SerialTx for UartTx {
    fn write_all(&mut self, bytes: &[u8], _timeout: Duration) -> Result<(), SerialError> {
        use std::io::Write;

        let mut out = std::io::stdout().lock();
        out.write_all(bytes)
            .and_then(|()| out.flush())
            .map_err(|e| SerialError::Driver(e.raw_os_error().unwrap_or(-1)))
    }
}

#[cfg(not(target_os = "espidf"))]
impl SerialRx for UartRx {
    fn read_byte(&mut self, timeout: Duration) -> Option<u8> {
        self.incoming.recv_timeout(timeout).ok()
    }
}
