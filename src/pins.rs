//! GPIO / peripheral pin assignments for the well-pump controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Level probes: AC voltage transformers, biased at mid-rail (ADC1)
// ---------------------------------------------------------------------------

/// Lower probe.  ADC1 channel 6 (GPIO 34, input-only).
pub const PROBE_MIN_GPIO: i32 = 34;
pub const PROBE_MIN_ADC_CHANNEL: u32 = 6;

/// Upper probe.  ADC1 channel 7 (GPIO 35, input-only).
pub const PROBE_MAX_GPIO: i32 = 35;
pub const PROBE_MAX_ADC_CHANNEL: u32 = 7;

// ---------------------------------------------------------------------------
// Operator buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Mode toggle.  Held through boot it requests a calibration.
pub const BUTTON_MODE_GPIO: i32 = 25;
/// Immediate calibration request.
pub const BUTTON_CALIBRATE_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Pump relays
// ---------------------------------------------------------------------------

/// Both relay inputs are driven with the same level (one per line leg).
pub const PUMP_RELAY_GPIOS: [i32; 2] = [16, 17];

// ---------------------------------------------------------------------------
// Indicator
// ---------------------------------------------------------------------------

/// Mode indicator LED (active HIGH).
pub const MODE_LED_GPIO: i32 = 2;
