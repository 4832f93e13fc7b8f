//! Command-line argument parsing.

use clap::Parser;

use trail_core::{BlendMode, Easing, InterpolatorConfig, DEFAULT_DURATION_SEC, DEFAULT_EMANATION_RATE_HZ};

use crate::drift::DriftConfig;
use crate::session::SessionConfig;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "trail-viz")]
#[command(about = "Emanating shape with a persistent, expanding trail", long_about = None)]
pub struct Args {
    /// Initial window width (physical pixels)
    #[arg(long, value_name = "PX", default_value_t = 1024)]
    pub width: u32,

    /// Initial window height (physical pixels)
    #[arg(long, value_name = "PX", default_value_t = 768)]
    pub height: u32,

    /// Trail stamps per second
    #[arg(long, value_name = "HZ", default_value_t = DEFAULT_EMANATION_RATE_HZ)]
    pub emanation_rate: f32,

    /// Blend mode: additive, alpha, multiply, screen, overlay
    #[arg(long, value_name = "MODE", default_value = "additive")]
    pub blend: String,

    /// Default easing: linear, easeIn, easeOut, easeInOut
    #[arg(long, value_name = "EASING", default_value = "easeInOut")]
    pub easing: String,

    /// Default transition duration
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_DURATION_SEC)]
    pub duration: f32,

    /// Apply parameter changes immediately
    #[arg(long)]
    pub no_interpolation: bool,

    /// Ease rotation like any other parameter instead of using the spring
    #[arg(long)]
    pub no_spring_rotation: bool,

    /// Seed for the parameter drift
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Seconds between drift retargets (0 disables drift)
    #[arg(long, value_name = "SECONDS", default_value_t = 3.0)]
    pub retarget_secs: f32,
}

impl Args {
    /// Unknown names fall back to additive with a warning.
    pub fn blend_mode(&self) -> BlendMode {
        match self.blend.parse::<BlendMode>() {
            Ok(mode) => mode,
            Err(e) => {
                log::warn!("[cli] {}, using additive", e);
                BlendMode::Additive
            }
        }
    }

    /// `--duration`, or the default when it is negative or not finite.
    pub fn duration_sec(&self) -> f32 {
        if self.duration.is_finite() && self.duration >= 0.0 {
            self.duration
        } else {
            log::warn!("[cli] invalid duration {}, using {}", self.duration, DEFAULT_DURATION_SEC);
            DEFAULT_DURATION_SEC
        }
    }

    pub fn interpolator_config(&self) -> InterpolatorConfig {
        InterpolatorConfig {
            default_duration_sec: self.duration_sec(),
            default_easing: Easing::parse_or(&self.easing, Easing::EaseInOut),
            rotation_uses_spring: !self.no_spring_rotation,
            enabled: !self.no_interpolation,
            ..InterpolatorConfig::default()
        }
    }

    pub fn drift_config(&self) -> Option<DriftConfig> {
        if !self.retarget_secs.is_finite() || self.retarget_secs <= 0.0 {
            log::info!("[cli] drift disabled");
            return None;
        }
        Some(DriftConfig {
            seed: self.seed,
            retarget_secs: self.retarget_secs,
            ..DriftConfig::default()
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            interpolator: self.interpolator_config(),
            blend_mode: self.blend_mode(),
            emanation_rate_hz: self.emanation_rate,
            drift: self.drift_config(),
        }
    }
}
