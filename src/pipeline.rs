//! The shared resources of the four-task pipeline.
//!
//! One [`Pipeline`] is built at startup and leaked to `'static` so every
//! task thread can borrow it. It holds nothing task-local: each task keeps
//! its own ports and loop state.

use log::debug;

use crate::app::commands::ControlCommand;
use crate::app::ports::SerialTx;
use crate::app::shared::SharedRuntimeState;
use crate::app::state::SensorSample;
use crate::config::{COMMAND_QUEUE_CAP, SAMPLE_QUEUE_CAP, SystemConfig};
use crate::error::SerialError;
use crate::queue::{BoundedQueue, SerialGuard};
use crate::stats::PipelineStats;

pub type SampleQueue = BoundedQueue<SensorSample, SAMPLE_QUEUE_CAP>;
pub type CommandQueue = BoundedQueue<ControlCommand, COMMAND_QUEUE_CAP>;

pub struct Pipeline<Tx> {
    pub config: SystemConfig,
    /// Sensing → decision.
    pub samples: SampleQueue,
    /// Decision and reporting → actuation.
    pub commands: CommandQueue,
    /// Serial transmit half; held only for the duration of one write.
    pub serial: SerialGuard<Tx>,
    pub shared: SharedRuntimeState,
    pub stats: PipelineStats,
}

impl<Tx> Pipeline<Tx> {
    pub fn new(config: SystemConfig, tx: Tx) -> Self {
        Self {
            config,
            samples: BoundedQueue::new(),
            commands: BoundedQueue::new(),
            serial: SerialGuard::new(tx),
            shared: SharedRuntimeState::new(),
            stats: PipelineStats::new(),
        }
    }
}

impl<Tx: SerialTx> Pipeline<Tx> {
    /// Write a one-off message through the serial guard, giving up if the
    /// guard or the transmitter is busy for longer than configured.
    pub async fn announce(&self, text: &str) -> Result<(), SerialError> {
        let Some(mut tx) = self.serial.lock_within(self.config.serial_lock_timeout()).await else {
            debug!("announce: serial guard busy, message dropped");
            return Err(SerialError::Busy);
        };
        tx.write_all(text.as_bytes(), self.config.serial_tx_timeout())
    }
}
