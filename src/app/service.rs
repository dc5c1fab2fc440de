//! Application service: the hexagonal core.
//!
//! [`ControlLoop`] owns the controller context, the state machine, the pump
//! policy and both button debouncers.  It exposes a hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire loop testable with mock adapters.
//!
//! ```text
//!  AnalogInput  ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  DigitalInput ──▶ │        ControlLoop        │
//!  ActuatorPort ◀── │  Sampler · FSM · Policy   │
//!                   └──────────────────────────┘
//! ```
//!
//! `tick` is meant to be called as often as the main loop can manage.  The
//! buttons are serviced on every call; sampling and state evaluation run
//! on the configured cadence only.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::drivers::button::Debouncer;
use crate::error::Fault;
use crate::fsm::context::{ChannelId, ControllerContext};
use crate::fsm::{Transition, WellState, WellStateMachine, WetPair};
use crate::safety::PumpPolicy;
use crate::sensors::calibration::{CalibrationResult, Calibrator};
use crate::sensors::sample_pair;
use crate::sensors::voltage::VoltageSampler;

use super::commands::AppCommand;
use super::events::{AppEvent, ControllerStatus, PlotSample};
use super::ports::{ActuatorPort, AnalogInput, ButtonId, DigitalInput, EventSink};

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

/// The control loop orchestrates all domain logic.
pub struct ControlLoop {
    ctx: ControllerContext,
    sampler: VoltageSampler,
    calibrator: Calibrator,
    fsm: WellStateMachine,
    pump: PumpPolicy,
    mode_button: Debouncer,
    calibrate_button: Debouncer,
    /// Timestamp of the last sampling cycle (or of `start`).
    last_cycle_ms: u32,
    /// A calibration blocked the loop; restart the cadence on the next tick.
    resync_cadence: bool,
}

impl ControlLoop {
    /// Construct the loop from an already validated configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let sampler = VoltageSampler::new(&config);
        let calibrator = Calibrator::new(&config);
        let debounce_ms = config.debounce_ms;
        let ctx = ControllerContext::new(config);

        Self {
            ctx,
            sampler,
            calibrator,
            fsm: WellStateMachine::new(WellState::Empty),
            pump: PumpPolicy::new(),
            mode_button: Debouncer::new(true, 0, debounce_ms),
            calibrate_button: Debouncer::new(true, 0, debounce_ms),
            last_cycle_ms: 0,
            resync_cadence: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring outputs to a safe state and run the boot sequence.
    ///
    /// 1. pump off (unconditional write), mode indicator off;
    /// 2. debouncers seeded with the levels read now;
    /// 3. `Started` emitted;
    /// 4. if the mode button is held for the whole grace window, calibrate.
    ///
    /// The first sampling cycle runs one interval after `now_ms`, or one
    /// interval after the first `tick` when a startup calibration ran.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut (impl AnalogInput + DigitalInput + ActuatorPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        self.pump.force_off(hw);
        self.ctx.mode_enabled = false;
        hw.set_mode_indicator(false);

        let debounce_ms = self.ctx.config.debounce_ms;
        self.mode_button = Debouncer::new(hw.read_level(ButtonId::Mode), now_ms, debounce_ms);
        self.calibrate_button =
            Debouncer::new(hw.read_level(ButtonId::Calibrate), now_ms, debounce_ms);
        self.last_cycle_ms = now_ms;

        let state = self.fsm.current_state();
        info!("ControlLoop started in {}", self.fsm.name(state));
        sink.emit(&AppEvent::Started { state });

        if self.startup_calibration_requested(hw, delay) {
            info!("Mode button held through startup, calibrating");
            self.calibrate(hw, delay, sink);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Service the buttons and, when the cadence has elapsed, run one
    /// sampling cycle.
    ///
    /// A calibration blocks for the settle time, so `now_ms` is stale once
    /// it returns.  The tick that ran it skips the cycle and the cadence
    /// restarts from the next tick's timestamp.
    ///
    /// The `hw` parameter satisfies every hardware port at once; this avoids
    /// a double mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl AnalogInput + DigitalInput + ActuatorPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        if self.resync_cadence {
            self.resync_cadence = false;
            self.last_cycle_ms = now_ms;
        }

        // 1. Buttons, every call
        let mode = self.mode_button.poll(hw.read_level(ButtonId::Mode), now_ms);
        if mode.pressed() {
            self.handle_command(AppCommand::ToggleMode, hw, delay, sink);
        }
        let cal = self
            .calibrate_button
            .poll(hw.read_level(ButtonId::Calibrate), now_ms);
        if cal.pressed() {
            self.handle_command(AppCommand::Calibrate, hw, delay, sink);
        }

        // 2. Cadence gate
        if self.resync_cadence {
            return;
        }
        let interval = self.ctx.config.control_loop_interval_ms;
        if now_ms.wrapping_sub(self.last_cycle_ms) < interval {
            return;
        }
        self.last_cycle_ms = now_ms;

        // 3. Sampling cycle
        self.run_cycle(hw, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a command (from a button press, or injected for debugging).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut (impl AnalogInput + ActuatorPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::ToggleMode => {
                let enabled = !self.ctx.mode_enabled;
                self.ctx.mode_enabled = enabled;
                hw.set_mode_indicator(enabled);
                info!("Mode {}", if enabled { "enabled" } else { "disabled" });
                sink.emit(&AppEvent::ModeChanged { enabled });
            }
            AppCommand::Calibrate => {
                self.calibrate(hw, delay, sink);
            }
            AppCommand::ForceState(target) => {
                let transition = self.fsm.force_transition(target);
                self.report_transition(transition, sink);
                self.apply_pump(hw, sink);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot from the current context.
    pub fn status(&self) -> ControllerStatus {
        let (gain_min, gain_max) = self.ctx.gains();
        ControllerStatus {
            state: self.fsm.current_state(),
            previous_state: self.fsm.previous_state(),
            pump_on: self.pump.is_on(),
            mode_enabled: self.ctx.mode_enabled,
            min_volts: self.ctx.channel(ChannelId::Min).filtered(),
            max_volts: self.ctx.channel(ChannelId::Max).filtered(),
            gain_min,
            gain_max,
            cycle_count: self.ctx.cycle_count,
        }
    }

    /// Current well state.
    pub fn state(&self) -> WellState {
        self.fsm.current_state()
    }

    // ── Internal ──────────────────────────────────────────────

    fn run_cycle(&mut self, hw: &mut (impl AnalogInput + ActuatorPort), sink: &mut impl EventSink) {
        let (min, max) = sample_pair(&self.sampler, hw);
        let min_volts = self.ctx.channel_mut(ChannelId::Min).process(min.volts);
        let max_volts = self.ctx.channel_mut(ChannelId::Max).process(max.volts);
        sink.emit(&AppEvent::Plot(PlotSample {
            min_volts,
            max_volts,
        }));

        let wet = WetPair::classify(min_volts, max_volts, self.ctx.config.wet_threshold_volts);
        let transition = self.fsm.step(wet);
        self.report_transition(transition, sink);
        self.apply_pump(hw, sink);

        self.ctx.cycle_count += 1;
    }

    /// Poll the mode button across the grace window.  Any released reading
    /// cancels the request.
    fn startup_calibration_requested(
        &self,
        hw: &mut impl DigitalInput,
        delay: &mut impl DelayNs,
    ) -> bool {
        let grace_ms = self.ctx.config.startup_grace_ms;
        let poll_ms = self.ctx.config.startup_poll_ms.max(1);
        let mut waited_ms = 0u32;
        while waited_ms < grace_ms {
            // Active-low: HIGH means released.
            if hw.read_level(ButtonId::Mode) {
                debug!("Startup calibration skipped after {} ms", waited_ms);
                return false;
            }
            delay.delay_ms(poll_ms);
            waited_ms = waited_ms.saturating_add(poll_ms);
        }
        !hw.read_level(ButtonId::Mode)
    }

    fn calibrate(
        &mut self,
        adc: &mut impl AnalogInput,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> CalibrationResult {
        let result = self
            .calibrator
            .auto_calibrate(&mut self.ctx, &self.sampler, adc, delay);
        self.resync_cadence = true;
        sink.emit(&AppEvent::Calibrated(result));
        result
    }

    fn report_transition(&self, transition: Transition, sink: &mut impl EventSink) {
        if !transition.changed() {
            return;
        }
        sink.emit(&AppEvent::StateChanged {
            from: transition.from,
            to: transition.to,
        });

        match (
            Fault::from_state(transition.from),
            Fault::from_state(transition.to),
        ) {
            (_, Some(fault)) => {
                warn!("Fault detected: {}", fault);
                sink.emit(&AppEvent::FaultDetected(fault));
            }
            (Some(fault), None) => {
                info!("Fault cleared: {}", fault);
                sink.emit(&AppEvent::FaultCleared);
            }
            (None, None) => {}
        }
    }

    fn apply_pump(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if let Some(on) = self.pump.apply(self.fsm.current_state(), hw) {
            sink.emit(&AppEvent::PumpChanged { on });
        }
    }
}
