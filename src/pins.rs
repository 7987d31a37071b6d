//! GPIO / peripheral pin assignments for the monitor board.
//!
//! Every driver references this module rather than hard-coding pin
//! numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// State indicator LEDs (active HIGH)
// ---------------------------------------------------------------------------

/// Green: temperature in the normal band.
pub const LED_IDLE_GPIO: i32 = 12;
/// Yellow: warning band.
pub const LED_WARNING_GPIO: i32 = 13;
/// Red: critical band. Also driven by the fault pulse and the halt blink.
pub const LED_CRITICAL_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Cooling fan (logic-level MOSFET, low side)
// ---------------------------------------------------------------------------

pub const FAN_PWM_GPIO: i32 = 1;
/// LEDC fan frequency.
pub const FAN_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC timer resolution (bits). 10-bit gives 0 – 1023 duty levels.
pub const FAN_PWM_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// Temperature sensor
// ---------------------------------------------------------------------------

/// NTC thermistor, 10 kΩ @ 25 °C, voltage divider to ADC.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;
pub const TEMP_ADC_CHANNEL: u32 = 8;

// ---------------------------------------------------------------------------
// Status serial link (UART1; the console keeps UART0)
// ---------------------------------------------------------------------------

pub const STATUS_UART_PORT: i32 = 1;
pub const STATUS_UART_TX_GPIO: i32 = 17;
pub const STATUS_UART_RX_GPIO: i32 = 18;
/// 8 data bits, no parity, 1 stop bit.
pub const STATUS_UART_BAUD: u32 = 115_200;
pub const STATUS_UART_BUF_LEN: i32 = 256;
