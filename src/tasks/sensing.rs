//! Sensing task: one temperature sample per period.
//!
//! The period is measured from the previous wake time, not from the end
//! of the loop body, so a slow cycle does not push later samples back.

use embassy_time::{Instant, Timer};
use log::{debug, info};

use crate::app::ports::{FaultIndicator, TemperatureSource};
use crate::app::state::{SensorSample, ValidRange};
use crate::pipeline::Pipeline;
use crate::queue::QueueFull;
use crate::time::{tick_count, to_embassy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensingOutcome {
    Queued(SensorSample),
    /// The Sample Queue stayed full; the sample is gone for good.
    Dropped(SensorSample),
}

/// Read, stamp, validate, enqueue. On a full queue, pulse the fault
/// indicator and discard the sample.
pub async fn sensing_cycle<Tx>(
    pipeline: &Pipeline<Tx>,
    sensor: &mut impl TemperatureSource,
    fault: &mut impl FaultIndicator,
) -> SensingOutcome {
    let cfg = &pipeline.config;
    let sample = SensorSample::new(sensor.read(), tick_count(), &ValidRange::from(cfg));

    match pipeline.samples.offer(sample, cfg.sample_send_timeout()).await {
        Ok(()) => SensingOutcome::Queued(sample),
        Err(QueueFull(sample)) => {
            let total = pipeline.stats.sample_dropped();
            debug!("sensing: sample queue full, dropped sample @{} (total {})", sample.timestamp, total);
            fault.set_fault(true);
            Timer::after(to_embassy(cfg.drop_pulse())).await;
            fault.set_fault(false);
            SensingOutcome::Dropped(sample)
        }
    }
}

pub async fn sensing_task<Tx>(
    pipeline: &Pipeline<Tx>,
    mut sensor: impl TemperatureSource,
    mut fault: impl FaultIndicator,
) -> ! {
    let period = to_embassy(pipeline.config.sensing_period());
    info!("sensing task started (period {}ms)", period.as_millis());

    let mut next_wake = Instant::now();
    loop {
        sensing_cycle(pipeline, &mut sensor, &mut fault).await;
        next_wake += period;
        Timer::at(next_wake).await;
    }
}
