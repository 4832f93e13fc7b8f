//! Time sources for the interpolator.
//!
//! Eased transitions are measured against a [`Clock`] in milliseconds. The
//! host uses [`SystemClock`]; tests and offline drivers use [`ManualClock`] to
//! step time deterministically.

use std::cell::Cell;
use std::rc::Rc;

use instant::Instant;

pub trait Clock {
    /// Monotonic time in milliseconds since an arbitrary origin.
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * crate::MS_PER_SEC
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance_ms(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance_ms(secs * crate::MS_PER_SEC);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
