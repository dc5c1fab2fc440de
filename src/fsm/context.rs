//! Controller context owned by the control loop.
//!
//! `ControllerContext` is the single struct holding everything that
//! persists between cycles: per-channel gain and filter state, the latest
//! filtered voltages, and the mode flag.  It replaces process-wide globals;
//! the loop passes it by reference into each component call.

use crate::config::SystemConfig;
use crate::sensors::filter::ExponentialFilter;

// ---------------------------------------------------------------------------
// Channel identity
// ---------------------------------------------------------------------------

/// The two level probes.  `Min` sits low in the well, `Max` near the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Min,
    Max,
}

impl ChannelId {
    pub const ALL: [Self; 2] = [Self::Min, Self::Max];

    pub const fn index(self) -> usize {
        match self {
            Self::Min => 0,
            Self::Max => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-channel state
// ---------------------------------------------------------------------------

/// Gain and smoothing state for one probe.
#[derive(Debug, Clone)]
pub struct SensorChannel {
    pub id: ChannelId,
    /// Multiplicative correction; always > 0, only replaced by calibration.
    gain: f32,
    filter: ExponentialFilter,
}

impl SensorChannel {
    pub fn new(id: ChannelId, alpha: f32) -> Self {
        Self {
            id,
            gain: 1.0,
            filter: ExponentialFilter::new(alpha),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Install a freshly calibrated gain.  Non-positive or non-finite values
    /// are ignored so the gain invariant survives any caller.
    pub(crate) fn set_gain(&mut self, gain: f32) {
        if gain.is_finite() && gain > 0.0 {
            self.gain = gain;
        }
    }

    /// Apply gain then smoothing to an RMS reading; returns the filtered volts.
    pub fn process(&mut self, rms_volts: f32) -> f32 {
        self.filter.update(rms_volts * self.gain)
    }

    /// Latest filtered voltage.
    pub fn filtered(&self) -> f32 {
        self.filter.value()
    }
}

// ---------------------------------------------------------------------------
// ControllerContext
// ---------------------------------------------------------------------------

pub struct ControllerContext {
    pub channels: [SensorChannel; 2],
    /// Mode flag toggled by the mode button and mirrored on the indicator.
    pub mode_enabled: bool,
    /// Completed sampling cycles since start.
    pub cycle_count: u64,
    /// System configuration (tunable parameters).
    pub config: SystemConfig,
}

impl ControllerContext {
    pub fn new(config: SystemConfig) -> Self {
        let alpha = config.filter_alpha;
        Self {
            channels: [
                SensorChannel::new(ChannelId::Min, alpha),
                SensorChannel::new(ChannelId::Max, alpha),
            ],
            mode_enabled: false,
            cycle_count: 0,
            config,
        }
    }

    pub fn channel(&self, id: ChannelId) -> &SensorChannel {
        &self.channels[id.index()]
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> &mut SensorChannel {
        &mut self.channels[id.index()]
    }

    /// Current `(gain_min, gain_max)`.
    pub fn gains(&self) -> (f32, f32) {
        (
            self.channel(ChannelId::Min).gain(),
            self.channel(ChannelId::Max).gain(),
        )
    }
}
