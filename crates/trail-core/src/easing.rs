use std::str::FromStr;

use crate::error::CoreError;

/// Shape of an eased transition. `apply` maps progress in \[0, 1\] to blend weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInOut => "easeInOut",
        }
    }

    /// Accepts camelCase, snake_case and kebab-case spellings.
    pub fn from_name(name: &str) -> Option<Easing> {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "linear" => Some(Easing::Linear),
            "easein" => Some(Easing::EaseIn),
            "easeout" => Some(Easing::EaseOut),
            "easeinout" => Some(Easing::EaseInOut),
            _ => None,
        }
    }

    /// Unrecognized names fall back instead of failing.
    pub fn parse_or(name: &str, fallback: Easing) -> Easing {
        match Easing::from_name(name) {
            Some(e) => e,
            None => {
                log::warn!("[interp] unknown easing {:?}, using {}", name, fallback.name());
                fallback
            }
        }
    }
}

impl FromStr for Easing {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s).ok_or_else(|| CoreError::UnknownEasing(s.to_string()))
    }
}
