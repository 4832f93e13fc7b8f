/// Decides on which ticks the live shape is stamped into the trail.
#[derive(Clone, Debug, Default)]
pub struct EmanationTimer {
    accum_sec: f32,
}

impl EmanationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt_sec` and report whether a capture is due at `rate_hz`.
    /// Fires at most once per call; a long stall keeps only the remainder.
    pub fn tick(&mut self, dt_sec: f32, rate_hz: f32) -> bool {
        if !rate_hz.is_finite() || rate_hz <= 0.0 || !dt_sec.is_finite() {
            return false;
        }
        let period = 1.0 / rate_hz;
        self.accum_sec += dt_sec.max(0.0);
        if self.accum_sec >= period {
            self.accum_sec %= period;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accum_sec = 0.0;
    }
}
