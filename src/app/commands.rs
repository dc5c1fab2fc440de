//! Inbound commands to the control loop.
//!
//! Button presses are translated into these by the loop itself; tests and
//! debug tooling can inject them directly through
//! [`ControlLoop::handle_command`](super::service::ControlLoop::handle_command).

use crate::fsm::WellState;

/// Commands the application core acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Flip the mode flag and its indicator.
    ToggleMode,

    /// Run a gain calibration now (probes must be submerged).
    Calibrate,

    /// Force the state machine into a specific state (debug / testing only).
    ForceState(WellState),
}
