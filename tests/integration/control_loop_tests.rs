//! Integration tests for the ControlLoop → sampler → FSM → pump pipeline.
//!
//! Probe voltages are synthesised by [`MockHardware`]; time is driven
//! explicitly so cadence and debounce behaviour are deterministic.

use crate::mock_hw::{ActuatorCall, FakeDelay, MockHardware, RecordingSink};

use wellpump::app::commands::AppCommand;
use wellpump::app::events::AppEvent;
use wellpump::app::service::ControlLoop;
use wellpump::config::SystemConfig;
use wellpump::error::Fault;
use wellpump::fsm::context::ChannelId;
use wellpump::fsm::WellState;

const CYCLE_MS: u32 = 300;
const WET: f32 = 200.0;
const DRY: f32 = 0.0;

struct Rig {
    app: ControlLoop,
    hw: MockHardware,
    delay: FakeDelay,
    sink: RecordingSink,
    now: u32,
}

impl Rig {
    fn started() -> Self {
        let mut rig = Self {
            app: ControlLoop::new(SystemConfig::default()),
            hw: MockHardware::new(),
            delay: FakeDelay::default(),
            sink: RecordingSink::new(),
            now: 0,
        };
        rig.app
            .start(rig.now, &mut rig.hw, &mut rig.delay, &mut rig.sink);
        rig
    }

    fn tick_at(&mut self, now: u32) {
        self.now = now;
        self.app
            .tick(now, &mut self.hw, &mut self.delay, &mut self.sink);
    }

    /// Advance exactly one sampling interval.
    fn cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.tick_at(self.now + CYCLE_MS);
        }
    }

    /// Both probes wet long enough for the filters to settle near `WET`.
    fn settle_full(&mut self) {
        self.hw.set_both(WET, WET);
        self.cycles(20);
        assert_eq!(self.app.state(), WellState::Full);
        self.sink.clear();
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn start_forces_outputs_off_and_reports() {
    let rig = Rig::started();
    assert_eq!(
        rig.hw.calls,
        vec![ActuatorCall::SetPump(false), ActuatorCall::SetIndicator(false)]
    );
    assert_eq!(
        rig.sink.events,
        vec![AppEvent::Started {
            state: WellState::Empty
        }]
    );
    assert_eq!(rig.delay.total_ms(), 0, "released mode button skips the grace wait");
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn sampling_runs_every_interval_only() {
    let mut rig = Rig::started();
    rig.sink.clear();
    for t in (10..=3000).step_by(10) {
        rig.tick_at(t);
    }
    assert_eq!(rig.app.status().cycle_count, 10);
    assert_eq!(rig.sink.plots(), 10, "exactly one plot per cycle");
    assert_eq!(rig.hw.adc_reads(ChannelId::Min), 10 * 500);
    assert_eq!(rig.hw.adc_reads(ChannelId::Max), 10 * 500);
}

#[test]
fn plot_carries_filtered_voltages() {
    let mut rig = Rig::started();
    rig.hw.set_both(WET, DRY);
    rig.sink.clear();
    rig.cycles(1);

    let plot = rig
        .sink
        .events
        .iter()
        .find_map(|e| match e {
            AppEvent::Plot(p) => Some(*p),
            _ => None,
        })
        .unwrap();
    // First update from 0.0 with alpha 0.2.
    assert!((plot.min_volts - 0.2 * WET).abs() < 0.5, "got {}", plot.min_volts);
    assert!(plot.max_volts.abs() < 1e-3);
}

// ── Level scenarios ───────────────────────────────────────────

#[test]
fn empty_to_full_turns_pump_on() {
    let mut rig = Rig::started();
    rig.hw.set_both(WET, WET);
    rig.sink.clear();

    // 200 * (1 - 0.8^k) first exceeds 100 V at k = 4.
    rig.cycles(3);
    assert_eq!(rig.app.state(), WellState::Empty);
    rig.cycles(1);
    assert_eq!(rig.app.state(), WellState::Full);
    assert!(rig.hw.pump_on());
    assert_eq!(rig.sink.transitions(), vec![(WellState::Empty, WellState::Full)]);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::PumpChanged { on: true }), 1);
}

#[test]
fn rising_water_fills_before_full() {
    let mut rig = Rig::started();
    rig.hw.set_both(WET, DRY);
    rig.cycles(6);
    assert_eq!(rig.app.state(), WellState::Filling);
    assert!(!rig.hw.pump_on());

    rig.hw.set_volts(ChannelId::Max, WET);
    rig.cycles(6);
    assert_eq!(rig.app.state(), WellState::Full);
    assert_eq!(
        rig.sink.transitions(),
        vec![
            (WellState::Empty, WellState::Filling),
            (WellState::Filling, WellState::Full)
        ]
    );
}

#[test]
fn full_to_draining_keeps_pump_running() {
    let mut rig = Rig::started();
    rig.settle_full();
    let writes_before = rig.hw.pump_writes().len();

    rig.hw.set_volts(ChannelId::Max, DRY);
    rig.cycles(6);

    assert_eq!(rig.app.state(), WellState::Draining);
    assert!(rig.hw.pump_on());
    assert_eq!(rig.hw.pump_writes().len(), writes_before, "no redundant relay write");
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::PumpChanged { .. })), 0);
    assert_eq!(rig.sink.transitions(), vec![(WellState::Full, WellState::Draining)]);
}

#[test]
fn draining_to_empty_stops_pump() {
    let mut rig = Rig::started();
    rig.settle_full();
    rig.hw.set_volts(ChannelId::Max, DRY);
    rig.cycles(6);
    rig.hw.set_volts(ChannelId::Min, DRY);
    rig.cycles(10);

    assert_eq!(rig.app.state(), WellState::Empty);
    assert!(!rig.hw.pump_on());
    assert_eq!(
        rig.sink.transitions(),
        vec![
            (WellState::Full, WellState::Draining),
            (WellState::Draining, WellState::Empty)
        ]
    );
}

#[test]
fn inconsistent_probes_force_sensor_fault() {
    let mut rig = Rig::started();
    rig.settle_full();
    assert!(rig.hw.pump_on());

    rig.hw.set_both(DRY, WET);
    rig.cycles(6);

    assert_eq!(rig.app.state(), WellState::SensorFault);
    assert!(!rig.hw.pump_on(), "fault must force the pump off");
    assert_eq!(
        rig.sink.transitions(),
        vec![(WellState::Full, WellState::SensorFault)]
    );
    assert_eq!(
        rig.sink
            .count(|e| *e == AppEvent::FaultDetected(Fault::SensorInconsistency)),
        1
    );
    assert_eq!(rig.sink.count(|e| *e == AppEvent::PumpChanged { on: false }), 1);
}

#[test]
fn sensor_fault_recovers_through_empty() {
    let mut rig = Rig::started();
    rig.settle_full();
    rig.hw.set_both(DRY, WET);
    rig.cycles(6);
    assert_eq!(rig.app.state(), WellState::SensorFault);
    rig.sink.clear();

    // The lower probe's filter climbs back from about 52 V: still dry after
    // one cycle, wet after two.
    rig.hw.set_both(WET, WET);
    rig.cycles(1);
    assert_eq!(rig.app.state(), WellState::SensorFault);
    rig.cycles(1);
    assert_eq!(rig.app.state(), WellState::Empty, "recovery never jumps to FULL");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::FaultCleared), 1);

    rig.cycles(1);
    assert_eq!(rig.app.state(), WellState::Full);
    assert_eq!(
        rig.sink.transitions(),
        vec![
            (WellState::SensorFault, WellState::Empty),
            (WellState::Empty, WellState::Full)
        ]
    );
}

#[test]
fn holding_state_emits_no_transition() {
    let mut rig = Rig::started();
    rig.settle_full();
    rig.cycles(10);
    assert!(rig.sink.transitions().is_empty());
    assert_eq!(rig.sink.plots(), 10);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn forced_electrical_fault_latches_pump_off() {
    let mut rig = Rig::started();
    rig.settle_full();

    rig.app.handle_command(
        AppCommand::ForceState(WellState::ElectricalFault),
        &mut rig.hw,
        &mut rig.delay,
        &mut rig.sink,
    );
    assert!(!rig.hw.pump_on());
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::FaultDetected(Fault::Electrical)),
        1
    );

    rig.cycles(10);
    assert_eq!(rig.app.state(), WellState::ElectricalFault);
    assert!(!rig.hw.pump_on());
}

#[test]
fn status_reflects_loop() {
    let mut rig = Rig::started();
    rig.settle_full();
    let s = rig.app.status();
    assert_eq!(s.state, WellState::Full);
    assert_eq!(s.previous_state, WellState::Empty);
    assert!(s.pump_on);
    assert!(s.min_volts > 190.0 && s.max_volts > 190.0);
    assert_eq!(s.cycle_count, 20);
}

// ── Buttons ───────────────────────────────────────────────────

#[test]
fn mode_press_toggles_once_per_press() {
    let mut rig = Rig::started();
    rig.sink.clear();

    rig.hw.mode_level = false;
    for t in (1000..1200).step_by(10) {
        rig.tick_at(t);
    }
    rig.hw.mode_level = true;
    for t in (1200..1400).step_by(10) {
        rig.tick_at(t);
    }

    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        1
    );
    assert!(rig.app.status().mode_enabled);
    assert!(rig.hw.indicator_on());

    rig.hw.mode_level = false;
    for t in (1400..1600).step_by(10) {
        rig.tick_at(t);
    }
    assert!(!rig.app.status().mode_enabled);
    assert!(!rig.hw.indicator_on());
}

#[test]
fn bouncing_mode_button_is_ignored() {
    let mut rig = Rig::started();
    rig.sink.clear();
    for (i, t) in (1000..2000).step_by(10).enumerate() {
        rig.hw.mode_level = i % 2 == 0;
        rig.tick_at(t);
    }
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        0
    );
}

#[test]
fn mode_flag_does_not_drive_pump() {
    let mut rig = Rig::started();
    rig.hw.mode_level = false;
    for t in (10..200).step_by(10) {
        rig.tick_at(t);
    }
    assert!(rig.app.status().mode_enabled);
    assert!(!rig.hw.pump_on());
    assert_eq!(rig.app.state(), WellState::Empty);
}
