//! Integration tests for gain calibration through the ControlLoop.
//!
//! Covers the startup path (mode button held through the grace window),
//! the calibration button, and the underrange guard.

use crate::mock_hw::{FakeDelay, MockHardware, RecordingSink};

use wellpump::app::commands::AppCommand;
use wellpump::app::events::AppEvent;
use wellpump::app::service::ControlLoop;
use wellpump::config::SystemConfig;
use wellpump::fsm::context::ChannelId;
use wellpump::fsm::WellState;
use wellpump::sensors::calibration::{CalibrationOutcome, CalibrationResult};

fn calibrations(sink: &RecordingSink) -> Vec<CalibrationResult> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Calibrated(r) => Some(*r),
            _ => None,
        })
        .collect()
}

fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() < tol
}

// ── Calibration button ────────────────────────────────────────

#[test]
fn calibrate_button_equalises_gains() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut delay, &mut sink);

    hw.set_both(100.0, 300.0);
    hw.calibrate_level = false;
    for t in (10..=100).step_by(10) {
        app.tick(t, &mut hw, &mut delay, &mut sink);
    }
    hw.calibrate_level = true;

    let runs = calibrations(&sink);
    assert_eq!(runs.len(), 1, "one press, one calibration");
    let r = runs[0];
    assert!(r.fully_applied());
    assert!(close(r.target_volts, 200.0, 1.0), "target {}", r.target_volts);
    assert!(close(r.min.gain, 2.0, 1e-2), "gain_min {}", r.min.gain);
    assert!(close(r.max.gain, 2.0 / 3.0, 1e-2), "gain_max {}", r.max.gain);

    assert_eq!(delay.total_ms(), 2000, "settle wait only");
    assert_eq!(hw.adc_reads(ChannelId::Min), 8 * 500);
    assert_eq!(hw.adc_reads(ChannelId::Max), 8 * 500);

    let s = app.status();
    assert_eq!((s.gain_min, s.gain_max), r.gains());
}

#[test]
fn button_calibration_restarts_cadence() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut delay, &mut sink);

    // Press commits at t=70; the calibration then blocks for the settle.
    hw.calibrate_level = false;
    for t in (10..=70).step_by(10) {
        app.tick(t, &mut hw, &mut delay, &mut sink);
    }
    assert_eq!(calibrations(&sink).len(), 1);
    assert_eq!(app.status().cycle_count, 0);
    hw.calibrate_level = true;

    // Wall clock after the 2000 ms settle.
    let resumed = 70 + delay.total_ms() as u32 + 10;
    app.tick(resumed, &mut hw, &mut delay, &mut sink);
    assert_eq!(app.status().cycle_count, 0, "no catch-up cycle");
    app.tick(resumed + 299, &mut hw, &mut delay, &mut sink);
    assert_eq!(app.status().cycle_count, 0);
    app.tick(resumed + 300, &mut hw, &mut delay, &mut sink);
    assert_eq!(app.status().cycle_count, 1);
    assert_eq!(sink.plots(), 1);
}

#[test]
fn calibrated_gains_feed_classification() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut delay, &mut sink);

    // Uncorrected, this pair reads as lower dry / upper wet.
    hw.set_both(60.0, 240.0);
    app.handle_command(AppCommand::Calibrate, &mut hw, &mut delay, &mut sink);

    let mut now = 0;
    for _ in 0..10 {
        now += 300;
        app.tick(now, &mut hw, &mut delay, &mut sink);
    }
    assert_eq!(app.state(), WellState::Full);
    assert!(app.status().pump_on);
}

// ── Underrange ────────────────────────────────────────────────

#[test]
fn underrange_channel_keeps_gain() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut delay, &mut sink);

    hw.set_both(0.0, 200.0);
    app.handle_command(AppCommand::Calibrate, &mut hw, &mut delay, &mut sink);

    let r = calibrations(&sink)[0];
    assert_eq!(r.min.outcome, CalibrationOutcome::Underrange);
    assert_eq!(r.min.gain, 1.0);
    assert_eq!(r.max.outcome, CalibrationOutcome::Applied);
    assert!(close(r.max.gain, 0.5, 1e-3), "gain_max {}", r.max.gain);
    assert_eq!(app.status().gain_min, 1.0);
}

#[test]
fn both_underrange_changes_nothing() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();
    app.start(0, &mut hw, &mut delay, &mut sink);

    app.handle_command(AppCommand::Calibrate, &mut hw, &mut delay, &mut sink);

    let r = calibrations(&sink)[0];
    assert_eq!(r.min.outcome, CalibrationOutcome::Underrange);
    assert_eq!(r.max.outcome, CalibrationOutcome::Underrange);
    assert_eq!(app.status().gain_min, 1.0);
    assert_eq!(app.status().gain_max, 1.0);
}

// ── Startup path ──────────────────────────────────────────────

#[test]
fn mode_held_through_boot_calibrates() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();

    hw.set_both(150.0, 150.0);
    hw.mode_level = false;
    app.start(0, &mut hw, &mut delay, &mut sink);

    assert_eq!(calibrations(&sink).len(), 1);
    // 3000 ms grace window plus the 2000 ms settle.
    assert_eq!(delay.total_ms(), 5000);
    assert!(matches!(sink.events[0], AppEvent::Started { .. }));

    // Releasing the held button afterwards is not a press.
    hw.mode_level = true;
    for t in (10..500).step_by(10) {
        app.tick(t, &mut hw, &mut delay, &mut sink);
    }
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        0
    );
    assert!(!app.status().mode_enabled);
}

#[test]
fn early_release_cancels_startup_calibration() {
    let mut app = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut delay = FakeDelay::default();
    let mut sink = RecordingSink::new();

    // Seed read, two held polls, then released.
    hw.mode_script.extend([false, false, false, true]);
    app.start(0, &mut hw, &mut delay, &mut sink);

    assert!(calibrations(&sink).is_empty());
    assert_eq!(delay.total_ms(), 20);
}
