//! Sensor subsystem: probe acquisition, smoothing and gain calibration.
//!
//! ```text
//!  AnalogInput ──▶ VoltageSampler ──▶ × gain ──▶ ExponentialFilter ──▶ WetPair
//!                        ▲
//!                   Calibrator (sets gain)
//! ```

pub mod calibration;
pub mod filter;
pub mod voltage;

use crate::app::ports::AnalogInput;
use crate::fsm::context::ChannelId;
use voltage::{RmsReading, VoltageSampler};

/// Acquire both probes back to back (MIN first).
pub fn sample_pair(
    sampler: &VoltageSampler,
    adc: &mut impl AnalogInput,
) -> (RmsReading, RmsReading) {
    let min = sampler.sample(adc, ChannelId::Min);
    let max = sampler.sample(adc, ChannelId::Max);
    (min, max)
}
