//! Sensing → decision → actuation, one cycle at a time.

use std::time::{Duration, Instant};

use futures_lite::future::block_on;

use thermowatch::app::commands::ControlCommand;
use thermowatch::app::decision::DecisionEngine;
use thermowatch::app::ports::Indicator;
use thermowatch::app::state::{SystemState, Thresholds};
use thermowatch::config::{COMMAND_QUEUE_CAP, SAMPLE_QUEUE_CAP};
use thermowatch::pipeline::Pipeline;
use thermowatch::tasks::{
    ActuationOutcome, DecisionOutcome, SensingOutcome, actuation_cycle, decision_cycle, sensing_cycle,
};

use crate::mock_hw::{MockFan, MockFault, MockIndicators, MockSerialTx, ScriptedSensor, pipeline};

struct Rig {
    pipeline: Pipeline<MockSerialTx>,
    engine: DecisionEngine,
    sensor: ScriptedSensor,
    fault: MockFault,
    indicators: MockIndicators,
    fan: MockFan,
}

impl Rig {
    fn new(readings: &[f32]) -> Self {
        let (pipeline, _tx) = pipeline();
        let engine = DecisionEngine::new(Thresholds::from(&pipeline.config));
        Self {
            pipeline,
            engine,
            sensor: ScriptedSensor::new(readings),
            fault: MockFault::default(),
            indicators: MockIndicators::default(),
            fan: MockFan::default(),
        }
    }

    fn sense(&mut self) -> SensingOutcome {
        block_on(sensing_cycle(&self.pipeline, &mut self.sensor, &mut self.fault))
    }

    fn decide(&self) -> DecisionOutcome {
        block_on(decision_cycle(&self.pipeline, &self.engine))
    }

    fn actuate(&mut self) -> ActuationOutcome {
        block_on(actuation_cycle(&self.pipeline, &mut self.indicators, &mut self.fan))
    }

    /// One reading all the way through.
    fn step(&mut self) -> DecisionOutcome {
        assert!(matches!(self.sense(), SensingOutcome::Queued(_)));
        let decision = self.decide();
        if matches!(decision, DecisionOutcome::Sent(_)) {
            assert!(matches!(self.actuate(), ActuationOutcome::Applied(_)));
        }
        decision
    }
}

#[test]
fn reference_sequence_drives_states_and_fan() {
    let mut rig = Rig::new(&[20.0, 26.0, 29.0, 26.0]);

    assert_eq!(rig.step(), DecisionOutcome::Unchanged(SystemState::Idle));

    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Warning, 0)));
    assert_eq!(rig.indicators.lit(), vec![Indicator::Warning]);
    assert_eq!(rig.fan.current(), Some(0));

    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Critical, 100)));
    assert_eq!(rig.indicators.lit(), vec![Indicator::Critical]);
    assert_eq!(rig.fan.current(), Some(100));

    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Warning, 0)));
    assert_eq!(rig.indicators.lit(), vec![Indicator::Warning]);
    assert_eq!(rig.fan.current(), Some(0));

    let snap = rig.pipeline.shared.snapshot();
    assert_eq!(snap.current_state, SystemState::Warning);
    assert_eq!(snap.current_temperature_c, 26.0);
    assert_eq!(snap.fan_speed, 0);
}

#[test]
fn steady_temperature_sends_nothing_after_first_change() {
    let mut rig = Rig::new(&[26.5]);
    assert!(matches!(rig.step(), DecisionOutcome::Sent(_)));
    for _ in 0..3 {
        assert_eq!(rig.step(), DecisionOutcome::Unchanged(SystemState::Warning));
    }
    assert!(rig.pipeline.commands.is_empty());
}

#[test]
fn threshold_boundaries_are_inclusive() {
    let mut rig = Rig::new(&[25.0, 28.0]);
    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Warning, 0)));
    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Critical, 100)));
}

#[test]
fn invalid_reading_forces_error_every_time() {
    let mut rig = Rig::new(&[150.0]);

    for _ in 0..2 {
        assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Error, 0)));
    }

    // Error lights nothing and stops the fan.
    assert!(rig.indicators.lit().is_empty());
    assert_eq!(rig.fan.current(), Some(0));

    let snap = rig.pipeline.shared.snapshot();
    assert_eq!(snap.current_state, SystemState::Error);
    assert_eq!(snap.current_temperature_c, 20.0, "invalid readings never reach shared state");
    assert_eq!(rig.pipeline.stats.snapshot().invalid_samples, 2);
}

#[test]
fn nan_reading_is_invalid() {
    let mut rig = Rig::new(&[f32::NAN]);
    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Error, 0)));
}

#[test]
fn valid_reading_recovers_from_error() {
    let mut rig = Rig::new(&[-60.0, 22.0]);
    assert!(matches!(rig.step(), DecisionOutcome::Sent(_)));
    assert_eq!(rig.step(), DecisionOutcome::Sent(ControlCommand::set_state(SystemState::Idle, 0)));
    assert_eq!(rig.indicators.lit(), vec![Indicator::Idle]);
}

#[test]
fn sixth_sample_is_dropped_with_fault_pulse() {
    let mut rig = Rig::new(&[22.0]);

    for _ in 0..SAMPLE_QUEUE_CAP {
        assert!(matches!(rig.sense(), SensingOutcome::Queued(_)));
    }
    assert!(rig.fault.history().is_empty());

    // Blocked for the enqueue timeout plus the pulse, and no longer.
    let started = Instant::now();
    assert!(matches!(rig.sense(), SensingOutcome::Dropped(_)));
    let blocked = started.elapsed();
    let cfg = &rig.pipeline.config;
    let floor = cfg.sample_send_timeout() + cfg.drop_pulse();
    assert!(blocked + Duration::from_millis(1) >= floor, "returned after {blocked:?}, expected at least {floor:?}");
    assert!(blocked < floor + Duration::from_millis(100), "blocked for {blocked:?}");
    assert_eq!(rig.fault.history(), vec![true, false]);
    assert_eq!(rig.pipeline.samples.len(), SAMPLE_QUEUE_CAP);
    assert_eq!(rig.pipeline.stats.snapshot().samples_dropped, 1);
}

#[test]
fn samples_are_consumed_in_order() {
    let mut rig = Rig::new(&[21.0, 22.0, 23.0]);
    for _ in 0..3 {
        rig.sense();
    }
    for expected in [21.0, 22.0, 23.0] {
        let sample = rig.pipeline.samples.try_poll().unwrap();
        assert_eq!(sample.temperature_c, expected);
        assert!(sample.valid);
    }
}

#[test]
fn sample_timestamps_do_not_go_backwards() {
    let mut rig = Rig::new(&[22.0]);
    rig.sense();
    rig.sense();
    let a = rig.pipeline.samples.try_poll().unwrap();
    let b = rig.pipeline.samples.try_poll().unwrap();
    assert!(b.timestamp >= a.timestamp);
}

#[test]
fn decision_times_out_without_samples() {
    let rig = Rig::new(&[]);
    assert_eq!(rig.decide(), DecisionOutcome::NoSample);
}

#[test]
fn decision_drops_command_when_queue_stays_full() {
    let mut rig = Rig::new(&[29.0]);
    for _ in 0..COMMAND_QUEUE_CAP {
        rig.pipeline.commands.try_offer(ControlCommand::refresh_indicators()).unwrap();
    }

    rig.sense();
    assert_eq!(rig.decide(), DecisionOutcome::Dropped(ControlCommand::set_state(SystemState::Critical, 100)));
    assert_eq!(rig.pipeline.stats.snapshot().commands_dropped, 1);
    // Temperature is still recorded even though the command was lost.
    assert_eq!(rig.pipeline.shared.snapshot().current_temperature_c, 29.0);
}

#[test]
fn actuation_idles_on_empty_queue() {
    let mut rig = Rig::new(&[]);
    assert_eq!(rig.actuate(), ActuationOutcome::NoCommand);
    assert_eq!(rig.indicators.call_count(), 0);
    assert_eq!(rig.fan.current(), None);
}

#[test]
fn actuation_drains_commands_fifo() {
    let mut rig = Rig::new(&[]);
    let first = ControlCommand::set_state(SystemState::Critical, 100);
    let second = ControlCommand::set_fan_speed(50);
    rig.pipeline.commands.try_offer(first).unwrap();
    rig.pipeline.commands.try_offer(second).unwrap();

    assert_eq!(rig.actuate(), ActuationOutcome::Applied(first));
    assert_eq!(rig.actuate(), ActuationOutcome::Applied(second));
    assert_eq!(rig.fan.history(), vec![100, 50]);
    // Fan override leaves the state alone.
    assert_eq!(rig.pipeline.shared.current_state(), SystemState::Critical);
    assert_eq!(rig.indicators.lit(), vec![Indicator::Critical]);
}
