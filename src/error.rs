//! Unified error and fault types for the well-pump firmware.
//!
//! [`Error`] covers fallible setup paths (configuration, peripheral bring-up,
//! pin access). [`Fault`] names the runtime anomalies the control loop
//! detects every cycle; faults never halt the loop, they drive the state
//! machine into a fault state that self-heals once the condition resolves.
//! All variants are `Copy` so they can be passed through the loop and event
//! sink without allocation.

use core::fmt;

use crate::fsm::WellState;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// A GPIO read or write returned an error.
    Pin(PinError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Pin(e) => write!(f, "pin: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Reading a button input failed.
    ReadFailed,
    /// Driving a relay or indicator output failed.
    WriteFailed,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Runtime faults
// ---------------------------------------------------------------------------

/// Anomalies that force the pump off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Upper probe reads wet while the lower probe reads dry.
    SensorInconsistency,
    /// Hardware-level electrical fault (no detector is wired yet).
    Electrical,
}

impl Fault {
    /// The fault a well state represents, if any.
    pub const fn from_state(state: WellState) -> Option<Self> {
        match state {
            WellState::SensorFault => Some(Self::SensorInconsistency),
            WellState::ElectricalFault => Some(Self::Electrical),
            _ => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorInconsistency => write!(f, "sensor inconsistency (upper wet, lower dry)"),
            Self::Electrical => write!(f, "electrical fault"),
        }
    }
}
