//! Startup wiring: announce, then hand every task its ports and spawn it.

use futures_lite::future::block_on;
use log::{error, info, warn};

use crate::app::ports::{FanPort, FaultIndicator, IndicatorPort, SerialRx, SerialTx, TemperatureSource};
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::tasks::{self, TaskSpec};

/// First thing written to the serial link after init.
pub const BANNER: &str = "Sistema de Monitoreo iniciado\r\n";

/// Per-task hardware, moved into the task that owns it.
pub struct TaskPorts<S, F, I, P, R> {
    /// Sensing.
    pub sensor: S,
    /// Sensing (drop pulse).
    pub fault: F,
    /// Actuation.
    pub indicators: I,
    /// Actuation.
    pub fan: P,
    /// Reporting (override input).
    pub rx: R,
}

/// Write the boot banner. A failure here is logged, not fatal: the
/// pipeline is still useful without it.
pub fn announce_startup<Tx: SerialTx>(pipeline: &Pipeline<Tx>) {
    if let Err(e) = block_on(pipeline.announce(BANNER)) {
        warn!("startup banner not sent: {}", e);
    }
}

/// Spawn the four tasks, highest priority first.
///
/// Each task runs its async loop under `block_on` on its own thread, all
/// pinned to the APP core. Returns the first spawn failure; the caller is
/// expected to halt.
pub fn spawn_all<Tx, S, F, I, P, R>(
    pipeline: &'static Pipeline<Tx>,
    ports: TaskPorts<S, F, I, P, R>,
) -> Result<()>
where
    Tx: SerialTx + Send + 'static,
    S: TemperatureSource + Send + 'static,
    F: FaultIndicator + Send + 'static,
    I: IndicatorPort + Send + 'static,
    P: FanPort + Send + 'static,
    R: SerialRx + Send + 'static,
{
    let TaskPorts { sensor, fault, indicators, fan, rx } = ports;

    spawn(&tasks::ACTUATION, move || {
        block_on(tasks::actuation_task(pipeline, indicators, fan));
    })?;
    spawn(&tasks::DECISION, move || {
        block_on(tasks::decision_task(pipeline));
    })?;
    spawn(&tasks::SENSING, move || {
        block_on(tasks::sensing_task(pipeline, sensor, fault));
    })?;
    spawn(&tasks::REPORTING, move || {
        block_on(tasks::reporting_task(pipeline, rx));
    })?;

    info!("all {} tasks running", tasks::ALL.len());
    Ok(())
}

fn spawn(task: &TaskSpec, f: impl FnOnce() + Send + 'static) -> Result<()> {
    spawn_on_core(Core::App, task, f).map(drop).map_err(|e| {
        error!("task '{}' could not be created: {}", task.display_name(), e);
        Error::Init("task creation failed")
    })
}
