//! Time-based button debouncer.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups: released reads HIGH,
//! pressed reads LOW.  The main loop polls every iteration (no cadence
//! gate) so the debounce timing stays accurate.
//!
//! ## Algorithm
//!
//! | Step | Condition                                   | Action                      |
//! |------|---------------------------------------------|-----------------------------|
//! | 1    | raw != last raw                             | restart timer at `now`      |
//! | 2    | `now - timer > window` and raw != stable    | commit raw, report `changed`|
//!
//! A level therefore has to stay unchanged for strictly longer than the
//! window before it is accepted.  Bounces inside the window keep
//! restarting the timer and never reach the stable output.

pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Result of one [`Debouncer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceOutput {
    /// Debounced electrical level (`true` = HIGH).
    pub stable: bool,
    /// The stable level changed on this poll.
    pub changed: bool,
}

impl DebounceOutput {
    /// A committed HIGH → LOW edge on an active-low input.
    pub fn pressed(&self) -> bool {
        self.changed && !self.stable
    }

    /// A committed LOW → HIGH edge on an active-low input.
    pub fn released(&self) -> bool {
        self.changed && self.stable
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    stable_level: bool,
    last_raw_level: bool,
    last_change_ms: u32,
    window_ms: u32,
}

impl Debouncer {
    /// Start with `initial_level` considered stable as of `now_ms`.
    pub fn new(initial_level: bool, now_ms: u32, window_ms: u32) -> Self {
        Self {
            stable_level: initial_level,
            last_raw_level: initial_level,
            last_change_ms: now_ms,
            window_ms,
        }
    }

    /// Feed one raw sample.  `now_ms` is monotonic and may wrap.
    pub fn poll(&mut self, raw_level: bool, now_ms: u32) -> DebounceOutput {
        if raw_level != self.last_raw_level {
            self.last_change_ms = now_ms;
            self.last_raw_level = raw_level;
        }

        let held_ms = now_ms.wrapping_sub(self.last_change_ms);
        let changed = held_ms > self.window_ms && raw_level != self.stable_level;
        if changed {
            self.stable_level = raw_level;
        }

        DebounceOutput {
            stable: self.stable_level,
            changed,
        }
    }

    pub fn stable_level(&self) -> bool {
        self.stable_level
    }
}
