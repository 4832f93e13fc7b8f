use trail_core::{
    BlendMode, Clock, EmanationTimer, FrameDrawState, InterpolatorConfig, ParamId,
    ParameterInterpolator, SystemClock, DEFAULT_EMANATION_RATE_HZ, MS_PER_SEC,
};

use crate::drift::{Drift, DriftConfig};

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub interpolator: InterpolatorConfig,
    pub blend_mode: BlendMode,
    pub emanation_rate_hz: f32,
    pub drift: Option<DriftConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interpolator: InterpolatorConfig::default(),
            blend_mode: BlendMode::default(),
            emanation_rate_hz: DEFAULT_EMANATION_RATE_HZ,
            drift: Some(DriftConfig::default()),
        }
    }
}

/// Everything one visualizer instance owns on the CPU side. Produces one
/// [`FrameDrawState`] per tick for the renderer.
pub struct Session<C: Clock = SystemClock> {
    interp: ParameterInterpolator<C>,
    emanation: EmanationTimer,
    drift: Option<Drift>,
    blend_mode: BlendMode,
    start_ms: f64,
    last_ms: Option<f64>,
    ticks: u64,
}

impl Session<SystemClock> {
    pub fn with_system_clock(config: SessionConfig) -> Self {
        Self::new(config, SystemClock::new())
    }
}

impl<C: Clock> Session<C> {
    /// Every parameter starts tracked at its default, so the first frame is
    /// fully specified and the first drift write animates.
    pub fn new(config: SessionConfig, clock: C) -> Self {
        let start_ms = clock.now_ms();
        let mut interp = ParameterInterpolator::new(config.interpolator, clock);
        for id in ParamId::ALL {
            interp.snap_to(id, id.default_value());
        }
        interp.snap_to(ParamId::EmanationRate, config.emanation_rate_hz);
        log::info!(
            "[session] blend={} emanation={}Hz drift={}",
            config.blend_mode.name(),
            config.emanation_rate_hz,
            config.drift.is_some()
        );
        Self {
            interp,
            emanation: EmanationTimer::new(),
            drift: config.drift.map(Drift::new),
            blend_mode: config.blend_mode,
            start_ms,
            last_ms: None,
            ticks: 0,
        }
    }

    pub fn interpolator(&self) -> &ParameterInterpolator<C> {
        &self.interp
    }

    /// Write access for external controllers. Writes take effect on the next tick.
    pub fn interpolator_mut(&mut self) -> &mut ParameterInterpolator<C> {
        &mut self.interp
    }

    pub fn drift(&self) -> Option<&Drift> {
        self.drift.as_ref()
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        if self.blend_mode != mode {
            log::info!("[session] blend mode -> {}", mode.name());
            self.blend_mode = mode;
        }
    }

    pub fn cycle_blend_mode(&mut self) -> BlendMode {
        let next = BlendMode::ALL[(self.blend_mode.index() + 1) % BlendMode::ALL.len()];
        self.set_blend_mode(next);
        next
    }

    pub fn toggle_interpolation(&mut self) -> bool {
        let enabled = !self.interp.is_enabled();
        self.interp.set_enabled(enabled);
        enabled
    }

    /// New random seed for the drift, if there is one.
    pub fn reseed_drift(&mut self) {
        if let Some(drift) = self.drift.as_mut() {
            drift.reseed(None);
            log::info!("[session] drift reseeded");
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds since the session started, by the session clock.
    pub fn elapsed_sec(&self) -> f32 {
        ((self.interp.clock().now_ms() - self.start_ms) / MS_PER_SEC) as f32
    }

    /// One tick: drift writes targets, the interpolator advances, the emanation
    /// timer decides on a capture, then the draw state is sampled.
    pub fn tick(&mut self) -> FrameDrawState {
        let now_ms = self.interp.clock().now_ms();
        let dt_sec = match self.last_ms.replace(now_ms) {
            Some(prev) => ((now_ms - prev) / MS_PER_SEC).max(0.0) as f32,
            None => 0.0,
        };

        if let Some(drift) = self.drift.as_mut() {
            drift.tick(dt_sec, &mut self.interp);
        }
        self.interp.update();

        let rate = self
            .interp
            .get_current(ParamId::EmanationRate)
            .unwrap_or(DEFAULT_EMANATION_RATE_HZ);
        let capture = self.emanation.tick(dt_sec, rate);
        self.ticks += 1;

        let elapsed_sec = ((now_ms - self.start_ms) / MS_PER_SEC) as f32;
        FrameDrawState::sample(&self.interp, self.blend_mode, elapsed_sec, capture)
    }

    /// Restart the emanation schedule, e.g. after the trail was cleared.
    pub fn reset_emanation(&mut self) {
        self.emanation.reset();
    }
}
