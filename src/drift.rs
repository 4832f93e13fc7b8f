use std::ops::RangeInclusive;

use rand::prelude::*;
use trail_core::{Clock, ParamId, ParameterInterpolator, TargetOptions};

#[derive(Clone, Debug, PartialEq)]
pub struct DriftConfig {
    pub seed: u64,
    pub retarget_secs: f32,
    /// Chance that a drifting parameter gets a new target on each retarget.
    pub change_probability: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            retarget_secs: 3.0,
            change_probability: 0.5,
        }
    }
}

/// Parameters the drift moves on its own, with the sub-range it picks from.
/// Narrower than the full ranges so the trail stays readable.
pub const DRIFT_RANGES: &[(ParamId, RangeInclusive<f32>)] = &[
    (ParamId::Hue, 0.0..=360.0),
    (ParamId::Scale, 0.15..=0.6),
    (ParamId::SpikeCount, 3.0..=12.0),
    (ParamId::SpikeSharpness, 0.2..=0.9),
    (ParamId::FillSize, 0.0..=0.6),
    (ParamId::FillOpacity, 0.2..=0.9),
    (ParamId::AutoRotationSpeed, -60.0..=60.0),
    (ParamId::ExpansionFactor, 1.005..=1.04),
    (ParamId::FadeAmount, 0.005..=0.05),
    (ParamId::HueShift, -3.0..=3.0),
];

/// Seeded generator of new parameter targets. Stands in for an external
/// control surface: it only ever talks to the interpolator through target writes.
pub struct Drift {
    config: DriftConfig,
    rng: StdRng,
    accum_sec: f64,
    retargets: u64,
}

impl Drift {
    pub fn new(config: DriftConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            accum_sec: 0.0,
            retargets: 0,
        }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Number of retargets performed so far.
    pub fn retargets(&self) -> u64 {
        self.retargets
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        let new_seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = StdRng::seed_from_u64(new_seed);
    }

    /// Advance by `dt_sec`; retargets at most once per call.
    pub fn tick<C: Clock>(&mut self, dt_sec: f32, interp: &mut ParameterInterpolator<C>) -> bool {
        let period = self.config.retarget_secs as f64;
        if !period.is_finite() || period <= 0.0 {
            return false;
        }
        self.accum_sec += dt_sec.max(0.0) as f64;
        if self.accum_sec < period {
            return false;
        }
        self.accum_sec %= period;
        self.retarget(interp);
        true
    }

    pub fn retarget<C: Clock>(&mut self, interp: &mut ParameterInterpolator<C>) {
        let mut changed = 0;
        for (id, range) in DRIFT_RANGES {
            if self.rng.gen::<f32>() >= self.config.change_probability {
                continue;
            }
            let mut value = self.rng.gen_range(range.clone());
            if *id == ParamId::SpikeCount {
                value = value.round();
            }
            interp.set_target(*id, value, TargetOptions::default());
            changed += 1;
        }
        let rotation = self.rng.gen_range(0.0..360.0);
        interp.set_target_rotation(ParamId::Rotation, rotation, TargetOptions::default());
        self.retargets += 1;
        log::debug!(
            "[drift] retarget #{}: {} params, rotation -> {:.1}",
            self.retargets,
            changed,
            rotation
        );
    }
}
