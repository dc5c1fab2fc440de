//! AC voltage probe sampler.
//!
//! Each probe is a small voltage transformer feeding an ADC pin biased at
//! mid-rail.  One acquisition is two synchronous bursts of `N` reads:
//!
//! 1. the mean of the first burst is taken as the DC offset (ADC and bias
//!    drift cancel out without a calibrated zero point);
//! 2. the second burst is centred on that offset and reduced to an RMS
//!    value in counts.
//!
//! Counts are scaled to volts at the ADC pin, then multiplied by the
//! transformer ratio to recover the line voltage.  No failure is signalled:
//! a disconnected probe reads near-zero RMS.

use crate::app::ports::AnalogInput;
use crate::config::SystemConfig;
use crate::fsm::context::ChannelId;

/// Result of one acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsReading {
    /// Mean of the first burst (ADC counts).
    pub offset_counts: f32,
    /// RMS of the offset-centred second burst (ADC counts).
    pub rms_counts: f32,
    /// Line voltage estimate (V).
    pub volts: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct VoltageSampler {
    samples: u16,
    volts_per_count: f32,
    ratio: f32,
}

impl VoltageSampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            samples: config.samples_per_rms,
            volts_per_count: config.volts_per_count(),
            ratio: config.sensor_ratio,
        }
    }

    /// Perform `2 * N` reads on `channel` and return the RMS reading.
    pub fn sample(&self, adc: &mut impl AnalogInput, channel: ChannelId) -> RmsReading {
        let n = f32::from(self.samples.max(1));

        let mut sum = 0.0f32;
        for _ in 0..self.samples {
            sum += f32::from(adc.read_raw(channel));
        }
        let offset = sum / n;

        let mut sum_sq = 0.0f32;
        for _ in 0..self.samples {
            let centred = f32::from(adc.read_raw(channel)) - offset;
            sum_sq += centred * centred;
        }
        let rms_counts = (sum_sq / n).sqrt();

        RmsReading {
            offset_counts: offset,
            rms_counts,
            volts: rms_counts * self.volts_per_count * self.ratio,
        }
    }

    /// Shorthand for `sample(..).volts`.
    pub fn sample_volts(&self, adc: &mut impl AnalogInput, channel: ChannelId) -> f32 {
        self.sample(adc, channel).volts
    }
}
