pub mod clock;
pub mod constants;
pub mod easing;
pub mod emanation;
pub mod error;
pub mod frame;
pub mod interpolator;
pub mod params;
pub mod uniforms;

pub use clock::*;
pub use constants::*;
pub use easing::*;
pub use emanation::*;
pub use error::*;
pub use frame::*;
pub use interpolator::*;
pub use params::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static SHAPE_WGSL: &str = include_str!("../shaders/shape.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
