//! Pump relay driver.
//!
//! The pump contactor is switched through one or more relay inputs that
//! must always carry the same level (e.g. one relay per line leg).  The
//! driver mirrors every command onto all of them.
//!
//! ## Safety contract
//!
//! The pump must never run in a fault state. That is enforced by the pump
//! policy; this driver is a dumb actuator.
//!
//! ## Polarity
//!
//! Some relay boards energise on a LOW input.  `active_low` inverts the
//! electrical level so callers always speak in terms of pump on/off.

use embedded_hal::digital::OutputPin;

use crate::error::PinError;

/// Electrical relay level for a pump command under the given polarity.
pub const fn relay_level(on: bool, active_low: bool) -> bool {
    on != active_low
}

pub struct PumpDriver<O: OutputPin, const N: usize> {
    relays: [O; N],
    active_low: bool,
    on: bool,
}

impl<O: OutputPin, const N: usize> PumpDriver<O, N> {
    pub fn new(relays: [O; N], active_low: bool) -> Self {
        Self {
            relays,
            active_low,
            on: false,
        }
    }

    /// Drive every relay to the level meaning `on`.  All outputs are
    /// written even if an earlier one fails; the first error is returned.
    pub fn set(&mut self, on: bool) -> Result<(), PinError> {
        let high = relay_level(on, self.active_low);
        let mut result = Ok(());
        for relay in &mut self.relays {
            let written = if high {
                relay.set_high()
            } else {
                relay.set_low()
            };
            if written.is_err() && result.is_ok() {
                result = Err(PinError::WriteFailed);
            }
        }
        self.on = on;
        result
    }

    pub fn stop(&mut self) -> Result<(), PinError> {
        self.set(false)
    }

    pub fn is_running(&self) -> bool {
        self.on
    }

    pub fn relay_count(&self) -> usize {
        N
    }
}
