//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the button inputs and all actuator drivers, exposing them through
//! [`AnalogInput`], [`DigitalInput`] and [`ActuatorPort`].  This is the
//! only module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying helpers are cfg-gated simulation stubs.
//!
//! The ports are infallible, so pin errors stop here: they are logged and
//! replaced by the safe reading (a button that cannot be read is released).

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ActuatorPort, AnalogInput, ButtonId, DigitalInput};
use crate::drivers::hw_init;
use crate::drivers::pump::PumpDriver;
use crate::drivers::status_led::StatusLed;
use crate::error::PinError;
use crate::fsm::context::ChannelId;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I: InputPin, O: OutputPin, const N: usize> {
    mode_button: I,
    calibrate_button: I,
    pump: PumpDriver<O, N>,
    led: StatusLed<O>,
}

impl<I: InputPin, O: OutputPin, const N: usize> HardwareAdapter<I, O, N> {
    pub fn new(
        mode_button: I,
        calibrate_button: I,
        pump: PumpDriver<O, N>,
        led: StatusLed<O>,
    ) -> Self {
        Self {
            mode_button,
            calibrate_button,
            pump,
            led,
        }
    }

    pub fn pump(&self) -> &PumpDriver<O, N> {
        &self.pump
    }

    pub fn led(&self) -> &StatusLed<O> {
        &self.led
    }
}

// ── AnalogInput implementation ────────────────────────────────

impl<I: InputPin, O: OutputPin, const N: usize> AnalogInput for HardwareAdapter<I, O, N> {
    fn read_raw(&mut self, channel: ChannelId) -> u16 {
        let adc_channel = match channel {
            ChannelId::Min => pins::PROBE_MIN_ADC_CHANNEL,
            ChannelId::Max => pins::PROBE_MAX_ADC_CHANNEL,
        };
        hw_init::adc1_read(adc_channel)
    }
}

// ── DigitalInput implementation ───────────────────────────────

impl<I: InputPin, O: OutputPin, const N: usize> DigitalInput for HardwareAdapter<I, O, N> {
    fn read_level(&mut self, button: ButtonId) -> bool {
        let pin = match button {
            ButtonId::Mode => &mut self.mode_button,
            ButtonId::Calibrate => &mut self.calibrate_button,
        };
        match pin.is_high() {
            Ok(high) => high,
            Err(_) => {
                warn!("{:?} button: {}, treating as released", button, PinError::ReadFailed);
                true
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I: InputPin, O: OutputPin, const N: usize> ActuatorPort for HardwareAdapter<I, O, N> {
    fn set_pump(&mut self, on: bool) {
        if let Err(e) = self.pump.set(on) {
            warn!("Pump relay write failed: {}", e);
        }
    }

    fn set_mode_indicator(&mut self, on: bool) {
        if let Err(e) = self.led.set(on) {
            warn!("Mode LED write failed: {}", e);
        }
    }
}
