//! All four tasks on real threads against mock hardware.

use std::time::{Duration, Instant};

use thermowatch::analysis::ReportAnalyzer;
use thermowatch::app::ports::Indicator;
use thermowatch::app::state::SystemState;
use thermowatch::config::SystemConfig;
use thermowatch::pipeline::Pipeline;
use thermowatch::runtime::{BANNER, TaskPorts, announce_startup, spawn_all};
use thermowatch::tasks::sensing_task;

use crate::mock_hw::{MockFan, MockFault, MockIndicators, MockSerialRx, MockSerialTx, ScriptedSensor, TimedSensor};

fn fast_config() -> SystemConfig {
    SystemConfig {
        sensing_period_ms: 20,
        decision_sleep_ms: 10,
        actuation_sleep_ms: 5,
        reporting_period_ms: 100,
        ..SystemConfig::default()
    }
}

fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    done()
}

#[test]
fn pipeline_reaches_critical_and_reports_it() {
    let tx = MockSerialTx::default();
    let pipeline: &'static Pipeline<MockSerialTx> = Box::leak(Box::new(Pipeline::new(fast_config(), tx.clone())));

    let indicators = MockIndicators::default();
    let fan = MockFan::default();
    let rx = MockSerialRx::default();

    announce_startup(pipeline);
    spawn_all(
        pipeline,
        TaskPorts {
            sensor: ScriptedSensor::new(&[20.0, 26.0, 29.0]),
            fault: MockFault::default(),
            indicators: indicators.clone(),
            fan: fan.clone(),
            rx: rx.clone(),
        },
    )
    .unwrap();

    assert!(
        wait_until(Duration::from_secs(3), || pipeline.shared.current_state() == SystemState::Critical),
        "never reached Critical"
    );
    assert_eq!(indicators.lit(), vec![Indicator::Critical]);
    assert_eq!(fan.current(), Some(100));

    assert!(
        wait_until(Duration::from_secs(3), || tx.lines().iter().any(|l| l.starts_with("Estado: 2, Temp: 29.0"))),
        "no Critical status line in {:?}",
        tx.lines()
    );

    let lines = tx.lines();
    assert_eq!(lines[0], BANNER);

    let mut analyzer = ReportAnalyzer::new();
    for line in &lines[1..] {
        assert!(analyzer.push_line(line), "unparseable: {line:?}");
    }
    assert!(analyzer.intervals().all(|i| i >= 90), "reports faster than the period");

    // Manual override reaches the fan while the state stays Critical.
    rx.push(b'F');
    assert!(wait_until(Duration::from_secs(3), || fan.current() == Some(50)), "override not applied");
    assert_eq!(pipeline.shared.current_state(), SystemState::Critical);
}

#[test]
fn sensing_period_holds_while_every_sample_drops() {
    const PERIOD_MS: u32 = 200;
    let config = SystemConfig { sensing_period_ms: PERIOD_MS, ..SystemConfig::default() };
    // Each drop costs the enqueue timeout plus the fault pulse.
    let drop_cost_ms = config.sample_send_timeout_ms + config.drop_pulse_ms;
    let pipeline: &'static Pipeline<MockSerialTx> =
        Box::leak(Box::new(Pipeline::new(config, MockSerialTx::default())));

    // No decision task: the queue fills after five samples and stays full.
    let sensor = TimedSensor::new(22.0);
    let fault = MockFault::default();
    {
        let (sensor, fault) = (sensor.clone(), fault.clone());
        std::thread::spawn(move || {
            futures_lite::future::block_on(sensing_task(pipeline, sensor, fault));
        });
    }

    assert!(
        wait_until(Duration::from_millis(2600), || sensor.reads.lock().unwrap().len() >= 11),
        "only {} reads",
        sensor.reads.lock().unwrap().len()
    );
    assert!(pipeline.stats.snapshot().samples_dropped >= 5);
    assert!(fault.history().contains(&true));

    let tolerance = u128::from(drop_cost_ms / 4);
    for interval in sensor.intervals_ms().into_iter().take(10) {
        assert!(
            interval.abs_diff(u128::from(PERIOD_MS)) <= tolerance,
            "read-to-read interval {interval}ms, period {PERIOD_MS}ms: {:?}",
            sensor.intervals_ms()
        );
    }
}
