//! Per-parameter smoothing engine.
//!
//! External writers call [`ParameterInterpolator::set_target`] whenever a value
//! changes; the tick loop calls [`ParameterInterpolator::update`] exactly once
//! per tick and then reads [`ParameterInterpolator::get_current`]. Each tracked
//! parameter is either eased over a fixed duration or driven by a damped spring.
//!
//! The instance is not synchronized. Writers on other threads must hand their
//! writes to the tick thread before `update` runs.

use crate::clock::{Clock, SystemClock};
use crate::easing::Easing;
use crate::frame::normalize_degrees;
use crate::params::ParamId;

#[derive(Clone, Debug, PartialEq)]
pub struct InterpolatorConfig {
    pub default_duration_sec: f32,
    pub default_easing: Easing,
    pub spring_constant: f32,
    pub damping: f32,
    /// Integration step applied on every `update`, regardless of wall time.
    pub spring_delta: f32,
    pub epsilon: f32,
    pub rotation_uses_spring: bool,
    pub enabled: bool,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            default_duration_sec: crate::DEFAULT_DURATION_SEC,
            default_easing: Easing::EaseInOut,
            spring_constant: crate::SPRING_CONSTANT,
            damping: crate::SPRING_DAMPING,
            spring_delta: crate::SPRING_TICK_DELTA,
            epsilon: crate::SETTLE_EPSILON,
            rotation_uses_spring: true,
            enabled: true,
        }
    }
}

/// Optional arguments of a target write. Unset fields use the configured defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TargetOptions {
    pub duration_sec: Option<f32>,
    pub easing: Option<Easing>,
    pub spring: bool,
}

impl TargetOptions {
    pub fn eased(duration_sec: f32, easing: Easing) -> Self {
        Self {
            duration_sec: Some(duration_sec),
            easing: Some(easing),
            spring: false,
        }
    }

    pub fn spring() -> Self {
        Self {
            spring: true,
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration_sec: f32) -> Self {
        self.duration_sec = Some(duration_sec);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Active interpolation mode of one parameter. Switching modes replaces the
/// variant, which drops the other mode's transient state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Eased {
        start_value: f64,
        start_ms: f64,
        duration_ms: f64,
        easing: Easing,
    },
    Spring {
        velocity: f64,
        spring_constant: f64,
        damping: f64,
    },
}

impl Motion {
    pub fn is_spring(&self) -> bool {
        matches!(self, Motion::Spring { .. })
    }
}

/// Stored in f64 so spring steps near large targets still move `current`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Channel {
    pub current: f64,
    pub target: f64,
    pub motion: Motion,
}

impl Channel {
    /// Jump to `value` and leave nothing in flight. Eased metadata is kept.
    fn settle(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        match &mut self.motion {
            Motion::Eased { start_value, .. } => *start_value = value,
            Motion::Spring { velocity, .. } => *velocity = 0.0,
        }
    }

    /// Shift every stored value by whole turns so `current` lands in [0, 360).
    fn wrap_angle(&mut self) -> f32 {
        let mut norm = self.current.rem_euclid(360.0);
        if norm >= 360.0 {
            norm = 0.0;
        }
        let shift = norm - self.current;
        self.current = norm;
        self.target += shift;
        if let Motion::Eased { start_value, .. } = &mut self.motion {
            *start_value += shift;
        }
        norm as f32
    }
}

pub struct ParameterInterpolator<C: Clock = SystemClock> {
    channels: [Option<Channel>; ParamId::COUNT],
    config: InterpolatorConfig,
    clock: C,
}

impl ParameterInterpolator<SystemClock> {
    pub fn with_system_clock(config: InterpolatorConfig) -> Self {
        Self::new(config, SystemClock::new())
    }
}

impl<C: Clock> ParameterInterpolator<C> {
    pub fn new(config: InterpolatorConfig, clock: C) -> Self {
        Self {
            channels: [None; ParamId::COUNT],
            config,
            clock,
        }
    }

    pub fn config(&self) -> &InterpolatorConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_target(&mut self, id: ParamId, value: f32, opts: TargetOptions) {
        if !self.config.enabled {
            self.snap_to(id, value);
            return;
        }
        let now = self.clock.now_ms();
        let duration_ms = self.resolve_duration_ms(opts.duration_sec);
        let easing = opts.easing.unwrap_or(self.config.default_easing);
        let spring = Motion::Spring {
            velocity: 0.0,
            spring_constant: self.config.spring_constant as f64,
            damping: self.config.damping as f64,
        };

        match self.channels[id.index()].as_mut() {
            Some(ch) => {
                ch.target = value as f64;
                if opts.spring {
                    // Velocity carries over so a retarget mid-flight stays smooth.
                    if !ch.motion.is_spring() {
                        ch.motion = spring;
                    }
                } else {
                    ch.motion = Motion::Eased {
                        start_value: ch.current,
                        start_ms: now,
                        duration_ms,
                        easing,
                    };
                }
            }
            None => {
                let motion = if opts.spring {
                    spring
                } else {
                    Motion::Eased {
                        start_value: value as f64,
                        start_ms: now,
                        duration_ms,
                        easing,
                    }
                };
                log::debug!("[interp] tracking {} at {:.3}", id, value);
                self.channels[id.index()] = Some(Channel {
                    current: value as f64,
                    target: value as f64,
                    motion,
                });
            }
        }
    }

    /// Shortest-path write for angular parameters. Uses spring motion when the
    /// config says so, overriding `opts.spring`.
    pub fn set_target_rotation(&mut self, id: ParamId, target_degrees: f32, opts: TargetOptions) {
        let target_norm = normalize_degrees(target_degrees);
        let current_norm = match self.channels[id.index()].as_mut() {
            Some(ch) => ch.wrap_angle(),
            None => target_norm,
        };
        let mut diff = target_norm - current_norm;
        if diff.abs() > 180.0 {
            if diff > 0.0 {
                diff -= 360.0;
            } else {
                diff += 360.0;
            }
        }
        let opts = TargetOptions {
            spring: self.config.rotation_uses_spring,
            ..opts
        };
        self.set_target(id, current_norm + diff, opts);
    }

    pub fn update(&mut self) {
        if !self.config.enabled {
            return;
        }
        let now = self.clock.now_ms();
        let delta = self.config.spring_delta as f64;
        let eps = self.config.epsilon as f64;
        for ch in self.channels.iter_mut().flatten() {
            match &mut ch.motion {
                Motion::Eased {
                    start_value,
                    start_ms,
                    duration_ms,
                    easing,
                } => {
                    let progress = if *duration_ms <= 0.0 {
                        1.0
                    } else {
                        ((now - *start_ms) / *duration_ms).clamp(0.0, 1.0)
                    };
                    if progress >= 1.0 {
                        ch.current = ch.target;
                    } else {
                        let t = easing.apply(progress as f32) as f64;
                        ch.current = *start_value + (ch.target - *start_value) * t;
                    }
                }
                Motion::Spring {
                    velocity,
                    spring_constant,
                    damping,
                } => {
                    let force = (ch.target - ch.current) * *spring_constant;
                    *velocity = (*velocity + force) * *damping;
                    ch.current += *velocity * delta;
                    if (ch.target - ch.current).abs() < eps && velocity.abs() < eps {
                        ch.current = ch.target;
                        *velocity = 0.0;
                    }
                }
            }
        }
    }

    pub fn get_current(&self, id: ParamId) -> Option<f32> {
        self.channels[id.index()].map(|ch| ch.current as f32)
    }

    pub fn get_target(&self, id: ParamId) -> Option<f32> {
        self.channels[id.index()].map(|ch| ch.target as f32)
    }

    pub fn channel(&self, id: ParamId) -> Option<&Channel> {
        self.channels[id.index()].as_ref()
    }

    pub fn is_tracked(&self, id: ParamId) -> bool {
        self.channels[id.index()].is_some()
    }

    pub fn tracked(&self) -> impl Iterator<Item = ParamId> + '_ {
        ParamId::ALL.into_iter().filter(|id| self.is_tracked(*id))
    }

    pub fn snap_to(&mut self, id: ParamId, value: f32) {
        match self.channels[id.index()].as_mut() {
            Some(ch) => ch.settle(value as f64),
            None => {
                let value = value as f64;
                let now = self.clock.now_ms();
                self.channels[id.index()] = Some(Channel {
                    current: value,
                    target: value,
                    motion: Motion::Eased {
                        start_value: value,
                        start_ms: now,
                        duration_ms: self.config.default_duration_sec as f64 * crate::MS_PER_SEC,
                        easing: self.config.default_easing,
                    },
                });
            }
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.config.enabled == enabled {
            return;
        }
        self.config.enabled = enabled;
        if !enabled {
            for ch in self.channels.iter_mut().flatten() {
                let target = ch.target;
                ch.settle(target);
            }
        }
        log::info!("[interp] interpolation {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn is_interpolating(&self, id: ParamId) -> bool {
        self.channels[id.index()]
            .map(|ch| (ch.current - ch.target).abs() > self.config.epsilon as f64)
            .unwrap_or(false)
    }

    fn resolve_duration_ms(&self, duration_sec: Option<f32>) -> f64 {
        let secs = match duration_sec {
            Some(d) if d.is_finite() && d >= 0.0 => d,
            Some(d) => {
                log::debug!("[interp] invalid duration {}, using default", d);
                self.config.default_duration_sec
            }
            None => self.config.default_duration_sec,
        };
        secs as f64 * crate::MS_PER_SEC
    }
}
