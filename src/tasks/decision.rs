//! Decision task: classifies samples and emits state-change commands.

use embassy_time::Timer;
use log::{debug, info, warn};

use crate::app::commands::ControlCommand;
use crate::app::decision::DecisionEngine;
use crate::app::state::{SystemState, Thresholds};
use crate::pipeline::Pipeline;
use crate::queue::QueueFull;
use crate::time::to_embassy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Nothing arrived within the receive timeout.
    NoSample,
    /// Valid sample, same state as currently held: nothing sent.
    Unchanged(SystemState),
    Sent(ControlCommand),
    /// The Command Queue stayed full; the command is lost.
    Dropped(ControlCommand),
}

pub async fn decision_cycle<Tx>(pipeline: &Pipeline<Tx>, engine: &DecisionEngine) -> DecisionOutcome {
    let cfg = &pipeline.config;
    let Ok(sample) = pipeline.samples.poll(cfg.decision_receive_timeout()).await else {
        return DecisionOutcome::NoSample;
    };

    match sample.checked() {
        Ok(t) => pipeline.shared.set_temperature(t),
        Err(e) => {
            pipeline.stats.invalid_sample();
            warn!("decision: {} ({:.1}\u{00b0}C @{})", e, sample.temperature_c, sample.timestamp);
        }
    }

    let current = pipeline.shared.current_state();
    let Some(cmd) = engine.evaluate(&sample, current) else {
        return DecisionOutcome::Unchanged(current);
    };

    match pipeline.commands.offer(cmd, cfg.command_send_timeout()).await {
        Ok(()) => DecisionOutcome::Sent(cmd),
        Err(QueueFull(cmd)) => {
            let total = pipeline.stats.command_dropped();
            debug!("decision: command queue full, dropped {:?} (total {})", cmd, total);
            DecisionOutcome::Dropped(cmd)
        }
    }
}

pub async fn decision_task<Tx>(pipeline: &Pipeline<Tx>) -> ! {
    let engine = DecisionEngine::new(Thresholds::from(&pipeline.config));
    let sleep = to_embassy(pipeline.config.decision_sleep());
    info!(
        "decision task started (warning>={:.1}, critical>={:.1})",
        engine.thresholds().warning_c,
        engine.thresholds().critical_c
    );

    loop {
        decision_cycle(pipeline, &engine).await;
        Timer::after(sleep).await;
    }
}
