//! embedded-hal digital pins over the raw `hw_init` GPIO helpers.
//!
//! The drivers are written against [`embedded_hal::digital`] so they can be
//! exercised with fakes; this type is what they get on the board.  The
//! underlying sys calls cannot fail once `init_peripherals` has run, so the
//! error type is [`Infallible`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::drivers::hw_init;

/// A GPIO configured by [`hw_init::init_peripherals`].
#[derive(Debug)]
pub struct GpioPin {
    gpio: i32,
    /// Last level written (outputs only).
    level: bool,
}

impl GpioPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, level: false }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioPin {
    type Error = Infallible;
}

impl InputPin for GpioPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        self.level = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        self.level = true;
        Ok(())
    }
}

impl StatefulOutputPin for GpioPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level)
    }
}
