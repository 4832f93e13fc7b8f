// Shared tuning constants for the interpolator, the host tick loop and the renderer.

// Interpolation defaults
pub const DEFAULT_DURATION_SEC: f32 = 0.5; // eased transition length when none is given
pub const SPRING_CONSTANT: f32 = 0.1; // force per unit of remaining distance
pub const SPRING_DAMPING: f32 = 0.8; // velocity retained per tick
pub const SPRING_TICK_DELTA: f32 = 1.0 / NOMINAL_TICK_HZ; // fixed integration step, not measured
pub const SETTLE_EPSILON: f32 = 0.001; // |target - current| below this counts as arrived

// Engine time unit
pub const MS_PER_SEC: f64 = 1000.0;

// Tick loop
pub const NOMINAL_TICK_HZ: f32 = 60.0; // rate the spring step assumes
pub const DEFAULT_EMANATION_RATE_HZ: f32 = 4.0; // captures per second

// Trail surfaces
pub const CENTER_CLEAR_SIZE_PX: u32 = 2; // side of the square re-cleared at the dilation fixed point
