//! Pump safety / drive policy.
//!
//! The policy runs **after the state machine** each sampling cycle and is
//! the only place the pump state is mutated.
//!
//! | Well state                     | Pump |
//! |--------------------------------|------|
//! | FULL, DRAINING                 | ON   |
//! | EMPTY, FILLING                 | OFF  |
//! | SENSOR_FAULT, ELECTRICAL_FAULT | OFF (forced, regardless of prior state) |
//!
//! Applying a decision is idempotent: if the pump is already in the
//! decided state, no actuator write happens and no edge is reported.

use log::{info, warn};

use crate::app::ports::ActuatorPort;
use crate::fsm::WellState;

/// Pump on/off decision for a well state.
pub const fn decide(state: WellState) -> bool {
    if state.is_fault() {
        return false;
    }
    matches!(state, WellState::Full | WellState::Draining)
}

pub struct PumpPolicy {
    pump_on: bool,
}

impl Default for PumpPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PumpPolicy {
    pub fn new() -> Self {
        Self { pump_on: false }
    }

    /// Unconditionally drive the pump off (boot path).
    pub fn force_off(&mut self, hw: &mut impl ActuatorPort) {
        hw.set_pump(false);
        self.pump_on = false;
    }

    /// Apply the decision for `state`.  Returns `Some(on)` only when the
    /// pump actually changed.
    pub fn apply(&mut self, state: WellState, hw: &mut impl ActuatorPort) -> Option<bool> {
        let on = decide(state);
        if on == self.pump_on {
            return None;
        }

        hw.set_pump(on);
        self.pump_on = on;

        if on {
            info!("PUMP: on ({:?})", state);
        } else if state.is_fault() {
            warn!("PUMP: forced off by {:?}", state);
        } else {
            info!("PUMP: off ({:?})", state);
        }
        Some(on)
    }

    pub fn is_on(&self) -> bool {
        self.pump_on
    }
}
