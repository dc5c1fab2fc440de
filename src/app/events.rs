//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: print a plotter line, log to serial.

use crate::error::Fault;
use crate::fsm::WellState;
use crate::sensors::calibration::CalibrationResult;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control loop has started (carries initial state).
    Started { state: WellState },

    /// Filtered voltages of one sampling cycle.  Exactly one per cycle.
    Plot(PlotSample),

    /// The well state machine moved.
    StateChanged { from: WellState, to: WellState },

    /// A calibration run finished (applied or underrange).
    Calibrated(CalibrationResult),

    /// The pump output changed.
    PumpChanged { on: bool },

    /// A fault state was entered.
    FaultDetected(Fault),

    /// The controller left a fault state.
    FaultCleared,

    /// The mode flag was toggled.
    ModeChanged { enabled: bool },
}

/// One plotter sample: filtered, gain-corrected probe voltages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSample {
    pub min_volts: f32,
    pub max_volts: f32,
}

/// A point-in-time snapshot of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerStatus {
    pub state: WellState,
    pub previous_state: WellState,
    pub pump_on: bool,
    pub mode_enabled: bool,
    pub min_volts: f32,
    pub max_volts: f32,
    pub gain_min: f32,
    pub gain_max: f32,
    pub cycle_count: u64,
}
