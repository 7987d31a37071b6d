//! Actuation task: highest priority; drains the Command Queue.

use embassy_time::Timer;
use log::info;

use crate::app::actuation::apply_command;
use crate::app::commands::ControlCommand;
use crate::app::ports::{FanPort, IndicatorPort};
use crate::pipeline::Pipeline;
use crate::time::to_embassy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuationOutcome {
    NoCommand,
    Applied(ControlCommand),
}

pub async fn actuation_cycle<Tx>(
    pipeline: &Pipeline<Tx>,
    indicators: &mut impl IndicatorPort,
    fan: &mut impl FanPort,
) -> ActuationOutcome {
    match pipeline.commands.poll(pipeline.config.actuation_receive_timeout()).await {
        Ok(cmd) => {
            apply_command(cmd, indicators, fan, &pipeline.shared);
            ActuationOutcome::Applied(cmd)
        }
        Err(_) => ActuationOutcome::NoCommand,
    }
}

pub async fn actuation_task<Tx>(
    pipeline: &Pipeline<Tx>,
    mut indicators: impl IndicatorPort,
    mut fan: impl FanPort,
) -> ! {
    let sleep = to_embassy(pipeline.config.actuation_sleep());
    info!("actuation task started");

    loop {
        actuation_cycle(pipeline, &mut indicators, &mut fan).await;
        Timer::after(sleep).await;
    }
}
