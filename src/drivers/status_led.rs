//! Mode indicator LED driver.
//!
//! A single digital output mirroring the controller's mode flag.

use embedded_hal::digital::OutputPin;

use crate::error::PinError;

pub struct StatusLed<O: OutputPin> {
    pin: O,
    lit: bool,
}

impl<O: OutputPin> StatusLed<O> {
    pub fn new(pin: O) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, lit: bool) -> Result<(), PinError> {
        self.pin
            .set_state(lit.into())
            .map_err(|_| PinError::WriteFailed)?;
        self.lit = lit;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
