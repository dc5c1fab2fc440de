//! System configuration parameters
//!
//! All tunable parameters for the well-pump controller. Values are volatile:
//! the firmware starts from [`SystemConfig::default`] and may be overridden
//! at build time with a JSON document (see `main.rs`).

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Level classification ---
    /// Filtered voltage (V) above which a probe is classified wet
    pub wet_threshold_volts: f32,
    /// Filtered voltage (V) below which a probe is considered dry.
    /// Carried for completeness; classification uses the wet threshold only.
    pub dry_threshold_volts: f32,

    // --- Acquisition ---
    /// Raw ADC reads per RMS pass (two passes per acquisition)
    pub samples_per_rms: u16,
    /// ADC reference voltage (V)
    pub adc_reference_volts: f32,
    /// ADC full-scale count (4095 for 12-bit)
    pub adc_full_scale_counts: u16,
    /// Empirical sensor voltage-transformation ratio
    pub sensor_ratio: f32,
    /// Exponential smoothing weight given to each new sample (0 < alpha <= 1)
    pub filter_alpha: f32,

    // --- Calibration ---
    /// Settle time before calibration sampling (milliseconds)
    pub calibration_settle_ms: u32,
    /// RMS samples averaged per channel during calibration
    pub calibration_samples: u8,
    /// Minimum measured voltage (V) for a channel's gain to be recomputed
    pub calibration_min_volts: f32,
    /// Mode button must be held this long at boot to trigger calibration (ms)
    pub startup_grace_ms: u32,
    /// Poll step while watching the mode button at boot (ms)
    pub startup_poll_ms: u32,

    // --- Timing ---
    /// Sampling / state evaluation cadence (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Button debounce window (milliseconds)
    pub debounce_ms: u32,

    // --- Outputs ---
    /// Relay inputs are energised by a LOW level
    pub relay_active_low: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Level classification
            wet_threshold_volts: 100.0,
            dry_threshold_volts: 30.0,

            // Acquisition
            samples_per_rms: 250,
            adc_reference_volts: 3.3,
            adc_full_scale_counts: 4095,
            sensor_ratio: 242.0,
            filter_alpha: 0.2,

            // Calibration
            calibration_settle_ms: 2000,
            calibration_samples: 8,
            calibration_min_volts: 0.1,
            startup_grace_ms: 3000,
            startup_poll_ms: 10,

            // Timing
            control_loop_interval_ms: 300,
            debounce_ms: 50,

            // Outputs
            relay_active_low: false,
        }
    }
}

impl SystemConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their
    /// defaults. The result is validated before being returned.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Volts represented by one ADC count.
    pub fn volts_per_count(&self) -> f32 {
        self.adc_reference_volts / f32::from(self.adc_full_scale_counts)
    }

    /// Reject values the control loop cannot operate with.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.filter_alpha > 0.0 && self.filter_alpha <= 1.0) {
            return Err(Error::Config("filter_alpha must be in (0, 1]"));
        }
        if self.samples_per_rms == 0 {
            return Err(Error::Config("samples_per_rms must be non-zero"));
        }
        if self.calibration_samples == 0 {
            return Err(Error::Config("calibration_samples must be non-zero"));
        }
        if self.adc_full_scale_counts == 0 || !(self.adc_reference_volts > 0.0) {
            return Err(Error::Config("ADC scale must be positive"));
        }
        if !(self.sensor_ratio > 0.0) {
            return Err(Error::Config("sensor_ratio must be positive"));
        }
        if !(self.wet_threshold_volts > 0.0) || !self.wet_threshold_volts.is_finite() {
            return Err(Error::Config("wet_threshold_volts must be positive"));
        }
        if self.dry_threshold_volts > self.wet_threshold_volts {
            return Err(Error::Config("dry threshold above wet threshold"));
        }
        if !(self.calibration_min_volts > 0.0) {
            return Err(Error::Config("calibration_min_volts must be positive"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be non-zero"));
        }
        if self.startup_grace_ms > 0 && self.startup_poll_ms == 0 {
            return Err(Error::Config("startup_poll_ms must be non-zero"));
        }
        Ok(())
    }
}
