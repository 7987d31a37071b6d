//! Reporting task: lowest priority, best effort.
//!
//! Emits one status line per period through the serial guard and polls
//! for the single-byte fan override. A busy guard skips the report; a
//! full Command Queue drops the override. Neither is retried.

use embassy_time::Timer;
use log::{debug, info};

use crate::app::commands::ControlCommand;
use crate::app::ports::{SerialRx, SerialTx};
use crate::app::report::{decode_override, format_status_line};
use crate::error::SerialError;
use crate::pipeline::Pipeline;
use crate::time::{tick_count, to_embassy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Sent,
    /// The serial guard was not acquired within its timeout.
    Skipped,
    /// The guard was acquired but the transmit failed.
    TxFailed(SerialError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideStatus {
    /// No byte, or a byte that is not the override trigger.
    None,
    Queued(ControlCommand),
    Dropped(ControlCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub report: ReportStatus,
    pub override_cmd: OverrideStatus,
}

pub async fn reporting_cycle<Tx: SerialTx>(
    pipeline: &Pipeline<Tx>,
    rx: &mut impl SerialRx,
) -> ReportOutcome {
    let cfg = &pipeline.config;

    let report = match pipeline.serial.lock_within(cfg.serial_lock_timeout()).await {
        Some(mut tx) => {
            let line = format_status_line(&pipeline.shared.snapshot(), tick_count());
            match tx.write_all(line.as_bytes(), cfg.serial_tx_timeout()) {
                Ok(()) => ReportStatus::Sent,
                Err(e) => {
                    debug!("reporting: status line not sent: {}", e);
                    ReportStatus::TxFailed(e)
                }
            }
        }
        None => {
            let total = pipeline.stats.report_skipped();
            debug!("reporting: serial guard busy, report skipped (total {})", total);
            ReportStatus::Skipped
        }
    };

    let override_cmd = match rx
        .read_byte(cfg.serial_rx_timeout())
        .and_then(|b| decode_override(b, cfg.override_byte, cfg.override_fan_percent))
    {
        None => OverrideStatus::None,
        Some(cmd) => match pipeline.commands.try_offer(cmd) {
            Ok(()) => OverrideStatus::Queued(cmd),
            Err(_) => {
                let total = pipeline.stats.override_dropped();
                debug!("reporting: command queue full, override dropped (total {})", total);
                OverrideStatus::Dropped(cmd)
            }
        },
    };

    ReportOutcome { report, override_cmd }
}

pub async fn reporting_task<Tx: SerialTx>(pipeline: &Pipeline<Tx>, mut rx: impl SerialRx) -> ! {
    let period = to_embassy(pipeline.config.reporting_period());
    info!("reporting task started (period {}ms)", period.as_millis());

    loop {
        reporting_cycle(pipeline, &mut rx).await;
        Timer::after(period).await;
    }
}
