//! Thermowatch firmware entry point.
//!
//! ```text
//!   NtcThermistor ─▶ sensing ─[samples:5]─▶ decision ─[commands:3]─▶ actuation ─▶ LEDs, fan
//!                                                          ▲
//!   UART rx ───────▶ reporting ─── 'F' override ───────────┘
//!                        │
//!                        └─▶ serial guard ─▶ UART tx (status line, 1 Hz)
//! ```
//!
//! `main` only wires things up: peripherals, config, the shared pipeline
//! and four task threads. It then parks for good.

#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use thermowatch::app::ports::TemperatureSource;
use thermowatch::config::SystemConfig;
use thermowatch::drivers::fan::FanDriver;
use thermowatch::drivers::hw_init;
use thermowatch::drivers::indicators::{FaultLed, IndicatorBank};
use thermowatch::drivers::serial;
use thermowatch::halt::fatal_halt;
use thermowatch::pipeline::Pipeline;
use thermowatch::runtime::{self, TaskPorts};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Thermowatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    let mut fault = FaultLed::onboard();
    if let Err(e) = hw_init::init_peripherals() {
        fatal_halt(&format!("peripheral init: {e}"), &mut fault);
    }

    // ── 3. Configuration ──────────────────────────────────────
    let config = SystemConfig::load_or_default(option_env!("THERMOWATCH_CONFIG_JSON"));
    info!(
        "thresholds: warning>={:.1}C critical>={:.1}C, valid ({:.1}, {:.1})",
        config.warning_threshold_c, config.critical_threshold_c, config.valid_min_c, config.valid_max_c
    );

    // ── 4. Pipeline + banner ──────────────────────────────────
    let (tx, rx) = serial::status_uart();
    let pipeline: &'static Pipeline<serial::UartTx> = Box::leak(Box::new(Pipeline::new(config, tx)));
    runtime::announce_startup(pipeline);

    // ── 5. Tasks ──────────────────────────────────────────────
    let ports = TaskPorts {
        sensor: temperature_source(),
        fault: FaultLed::onboard(),
        indicators: IndicatorBank::onboard(),
        fan: FanDriver::onboard(),
        rx,
    };
    if let Err(e) = runtime::spawn_all(pipeline, ports) {
        fatal_halt(&e.to_string(), &mut fault);
    }

    // ── 6. Nothing left for the main thread ───────────────────
    loop {
        std::thread::park();
    }
}

#[cfg(not(feature = "sim-sensor"))]
fn temperature_source() -> impl TemperatureSource + Send + 'static {
    thermowatch::sensors::NtcThermistor::onboard()
}

#[cfg(feature = "sim-sensor")]
fn temperature_source() -> impl TemperatureSource + Send + 'static {
    info!("sensor: simulated");
    thermowatch::sensors::SimulatedThermometer::new()
}
