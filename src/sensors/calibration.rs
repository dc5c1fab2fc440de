//! Probe gain calibration.
//!
//! The two probes are physically different transformers, so the same
//! water contact produces different voltages.  Calibration is run with
//! both probes submerged: each channel is averaged over several RMS
//! acquisitions, the mean of the two averages becomes the target, and each
//! channel's gain is set so that `measured * gain == target`.
//!
//! A channel whose average does not exceed the validity floor is left
//! untouched (disconnected or shorted probe).  That case is reported as
//! [`CalibrationOutcome::Underrange`] rather than an error.
//!
//! The settle wait is a deliberate blocking pause.  Calibration is operator
//! initiated and nothing else in the control loop runs while it is active.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::AnalogInput;
use crate::config::SystemConfig;
use crate::fsm::context::{ChannelId, ControllerContext};
use crate::sensors::voltage::VoltageSampler;

/// Per-channel result of a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationOutcome {
    /// Gain was recomputed from this run's measurement.
    Applied,
    /// Measurement was at or below the validity floor; prior gain kept.
    Underrange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelCalibration {
    /// Averaged un-gained RMS voltage.
    pub measured_volts: f32,
    /// Gain in effect after calibration.
    pub gain: f32,
    pub outcome: CalibrationOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    pub target_volts: f32,
    pub min: ChannelCalibration,
    pub max: ChannelCalibration,
}

impl CalibrationResult {
    pub fn channel(&self, id: ChannelId) -> &ChannelCalibration {
        match id {
            ChannelId::Min => &self.min,
            ChannelId::Max => &self.max,
        }
    }

    /// `(gain_min, gain_max)` after calibration.
    pub fn gains(&self) -> (f32, f32) {
        (self.min.gain, self.max.gain)
    }

    /// True when both channels were recomputed.
    pub fn fully_applied(&self) -> bool {
        self.min.outcome == CalibrationOutcome::Applied
            && self.max.outcome == CalibrationOutcome::Applied
    }
}

/// Pure gain computation from the two averaged measurements.
///
/// `prior` is `(gain_min, gain_max)` before the run; an underrange channel
/// keeps its prior gain.
pub fn compute_gains(
    vmin: f32,
    vmax: f32,
    prior: (f32, f32),
    min_valid_volts: f32,
) -> CalibrationResult {
    let target = (vmin + vmax) / 2.0;
    let channel = |measured: f32, prior_gain: f32| {
        if measured > min_valid_volts {
            ChannelCalibration {
                measured_volts: measured,
                gain: target / measured,
                outcome: CalibrationOutcome::Applied,
            }
        } else {
            ChannelCalibration {
                measured_volts: measured,
                gain: prior_gain,
                outcome: CalibrationOutcome::Underrange,
            }
        }
    };

    CalibrationResult {
        target_volts: target,
        min: channel(vmin, prior.0),
        max: channel(vmax, prior.1),
    }
}

pub struct Calibrator {
    settle_ms: u32,
    samples: u8,
    min_valid_volts: f32,
}

impl Calibrator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            settle_ms: config.calibration_settle_ms,
            samples: config.calibration_samples,
            min_valid_volts: config.calibration_min_volts,
        }
    }

    /// Settle, measure both probes and install the new gains into `ctx`.
    pub fn auto_calibrate(
        &self,
        ctx: &mut ControllerContext,
        sampler: &VoltageSampler,
        adc: &mut impl AnalogInput,
        delay: &mut impl DelayNs,
    ) -> CalibrationResult {
        info!("CAL: settling for {} ms", self.settle_ms);
        delay.delay_ms(self.settle_ms);

        let (vmin, vmax) = self.measure(sampler, adc);
        let result = compute_gains(vmin, vmax, ctx.gains(), self.min_valid_volts);

        for id in ChannelId::ALL {
            let ch = result.channel(id);
            match ch.outcome {
                CalibrationOutcome::Applied => ctx.channel_mut(id).set_gain(ch.gain),
                CalibrationOutcome::Underrange => warn!(
                    "CAL: {} probe underrange ({:.3} V), keeping gain {:.4}",
                    id.name(),
                    ch.measured_volts,
                    ch.gain
                ),
            }
        }

        info!(
            "CAL: target={:.2} V, gain_min={:.4}, gain_max={:.4}",
            result.target_volts, result.min.gain, result.max.gain
        );
        result
    }

    /// Average `samples` interleaved acquisitions per channel.
    fn measure(&self, sampler: &VoltageSampler, adc: &mut impl AnalogInput) -> (f32, f32) {
        let mut sum_min = 0.0f32;
        let mut sum_max = 0.0f32;
        for _ in 0..self.samples {
            sum_min += sampler.sample_volts(adc, ChannelId::Min);
            sum_max += sampler.sample_volts(adc, ChannelId::Max);
        }
        let n = f32::from(self.samples.max(1));
        (sum_min / n, sum_max / n)
    }
}
