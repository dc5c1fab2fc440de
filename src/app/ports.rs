//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (ADC, buttons, relays, event sinks) implement these
//! traits.  The [`ControlLoop`](super::service::ControlLoop) consumes them
//! via generics, so the domain core never touches hardware directly and
//! every component can be driven by injected fakes.
//!
//! Blocking waits use [`embedded_hal::delay::DelayNs`] directly rather than
//! a crate-local port.

use crate::fsm::context::ChannelId;

// ───────────────────────────────────────────────────────────────
// Analog input (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// One raw ADC conversion per call.
///
/// Reads are infallible at this boundary: an adapter that fails a
/// conversion returns 0, which the sampler sees as a dead (dry) probe.
pub trait AnalogInput {
    fn read_raw(&mut self, channel: ChannelId) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Digital input (driven adapter: GPIO → domain)
// ───────────────────────────────────────────────────────────────

/// The two operator buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Toggles the mode flag; held at boot it requests calibration.
    Mode,
    /// Requests an immediate gain calibration.
    Calibrate,
}

/// Raw electrical level of a button input (`true` = HIGH).
///
/// Buttons are wired active-low with pull-ups: released reads HIGH.
pub trait DigitalInput {
    fn read_level(&mut self, button: ButtonId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → GPIO)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command outputs.
pub trait ActuatorPort {
    /// Energise (`true`) or release every pump relay output.
    fn set_pump(&mut self, on: bool);

    /// Drive the mode indicator.
    fn set_mode_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / plotting)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, plotter).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic milliseconds since boot, wrapping at `u32::MAX`.
pub trait TimePort {
    fn now_ms(&self) -> u32;
}
