//! Status line output, the serial guard, and the `F` override path.

use std::time::Duration;

use futures_lite::future::block_on;

use thermowatch::app::commands::ControlCommand;
use thermowatch::app::report::parse_status_line;
use thermowatch::app::state::SystemState;
use thermowatch::config::COMMAND_QUEUE_CAP;
use thermowatch::error::SerialError;
use thermowatch::pipeline::Pipeline;
use thermowatch::runtime::{BANNER, announce_startup};
use thermowatch::tasks::{
    ActuationOutcome, OverrideStatus, ReportStatus, actuation_cycle, reporting_cycle,
};

use crate::mock_hw::{MockFan, MockIndicators, MockSerialRx, MockSerialTx, pipeline};

#[test]
fn status_line_reflects_shared_state() {
    let (pipeline, tx) = pipeline();
    pipeline.shared.set_temperature(26.34);
    pipeline.shared.set_state_and_fan(SystemState::Warning, 0);

    let outcome = block_on(reporting_cycle(&pipeline, &mut MockSerialRx::default()));
    assert_eq!(outcome.report, ReportStatus::Sent);
    assert_eq!(outcome.override_cmd, OverrideStatus::None);

    let lines = tx.lines();
    assert_eq!(lines.len(), 1);
    assert!(
        lines[0].starts_with("Estado: 1, Temp: 26.3\u{00b0}C, Fan: 0%, Time: "),
        "{:?}",
        lines[0]
    );
    let report = parse_status_line(&lines[0]).unwrap();
    assert_eq!(report.state, SystemState::Warning);
}

#[test]
fn initial_report_shows_defaults() {
    let (pipeline, tx) = pipeline();
    block_on(reporting_cycle(&pipeline, &mut MockSerialRx::default()));
    assert!(tx.text().starts_with("Estado: 0, Temp: 20.0\u{00b0}C, Fan: 0%, Time: "));
}

#[test]
fn busy_guard_skips_report() {
    let (pipeline, tx) = pipeline();

    let held = block_on(pipeline.serial.lock_within(Duration::from_millis(10))).unwrap();
    let outcome = block_on(reporting_cycle(&pipeline, &mut MockSerialRx::default()));
    drop(held);

    assert_eq!(outcome.report, ReportStatus::Skipped);
    assert!(tx.text().is_empty());
    assert_eq!(pipeline.stats.snapshot().reports_skipped, 1);

    // Next period goes through again.
    let outcome = block_on(reporting_cycle(&pipeline, &mut MockSerialRx::default()));
    assert_eq!(outcome.report, ReportStatus::Sent);
}

#[test]
fn transmit_failure_is_reported_not_retried() {
    let pipeline = Pipeline::new(Default::default(), MockSerialTx::failing(SerialError::TxTimeout));
    let outcome = block_on(reporting_cycle(&pipeline, &mut MockSerialRx::default()));
    assert_eq!(outcome.report, ReportStatus::TxFailed(SerialError::TxTimeout));
    assert_eq!(pipeline.stats.snapshot().reports_skipped, 0);
}

#[test]
fn override_byte_sets_fan_to_half_and_keeps_state() {
    let (pipeline, _tx) = pipeline();
    pipeline.shared.set_state_and_fan(SystemState::Critical, 100);
    let mut rx = MockSerialRx::with_bytes(b"F");

    let outcome = block_on(reporting_cycle(&pipeline, &mut rx));
    assert_eq!(outcome.override_cmd, OverrideStatus::Queued(ControlCommand::set_fan_speed(50)));

    let (mut leds, mut fan) = (MockIndicators::default(), MockFan::default());
    assert!(matches!(
        block_on(actuation_cycle(&pipeline, &mut leds, &mut fan)),
        ActuationOutcome::Applied(_)
    ));
    assert_eq!(fan.current(), Some(50));
    assert_eq!(leds.call_count(), 0);

    let snap = pipeline.shared.snapshot();
    assert_eq!(snap.current_state, SystemState::Critical);
    assert_eq!(snap.fan_speed, 50);
}

#[test]
fn other_bytes_are_ignored_silently() {
    let (pipeline, tx) = pipeline();
    for byte in [b'f', b'x', b'\r', 0x00, 0xff] {
        let mut rx = MockSerialRx::with_bytes(&[byte]);
        let outcome = block_on(reporting_cycle(&pipeline, &mut rx));
        assert_eq!(outcome.override_cmd, OverrideStatus::None, "byte {byte:#04x}");
    }
    assert!(pipeline.commands.is_empty());
    // Only status lines, no acknowledgement.
    assert!(tx.lines().iter().all(|l| parse_status_line(l).is_some()));
}

#[test]
fn one_override_byte_per_period() {
    let (pipeline, _tx) = pipeline();
    let mut rx = MockSerialRx::with_bytes(b"FF");

    block_on(reporting_cycle(&pipeline, &mut rx));
    assert_eq!(pipeline.commands.len(), 1);
    block_on(reporting_cycle(&pipeline, &mut rx));
    assert_eq!(pipeline.commands.len(), 2);
}

#[test]
fn override_dropped_when_command_queue_full() {
    let (pipeline, _tx) = pipeline();
    for _ in 0..COMMAND_QUEUE_CAP {
        pipeline.commands.try_offer(ControlCommand::refresh_indicators()).unwrap();
    }

    let outcome = block_on(reporting_cycle(&pipeline, &mut MockSerialRx::with_bytes(b"F")));
    assert_eq!(outcome.override_cmd, OverrideStatus::Dropped(ControlCommand::set_fan_speed(50)));
    assert_eq!(pipeline.stats.snapshot().overrides_dropped, 1);
    assert_eq!(pipeline.commands.len(), COMMAND_QUEUE_CAP);
}

#[test]
fn banner_goes_through_guard() {
    let (pipeline, tx) = pipeline();
    announce_startup(&pipeline);
    assert_eq!(tx.text(), BANNER);
    assert_eq!(BANNER, "Sistema de Monitoreo iniciado\r\n");
}

#[test]
fn banner_dropped_when_guard_busy() {
    let (pipeline, tx) = pipeline();
    let held = block_on(pipeline.serial.lock_within(Duration::from_millis(10))).unwrap();
    assert_eq!(block_on(pipeline.announce(BANNER)), Err(SerialError::Busy));
    drop(held);
    assert!(tx.text().is_empty());
}
