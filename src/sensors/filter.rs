//! First-order exponential smoothing, one instance per probe.
//!
//! `y' = alpha * x + (1 - alpha) * y`, starting from `y = 0`.  There is no
//! reset: the state lives for the whole run so the level classification
//! never sees an undefined value.

#[derive(Debug, Clone, Copy)]
pub struct ExponentialFilter {
    alpha: f32,
    value: f32,
}

impl ExponentialFilter {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, value: 0.0 }
    }

    pub fn update(&mut self, raw: f32) -> f32 {
        self.value = self.alpha * raw + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
