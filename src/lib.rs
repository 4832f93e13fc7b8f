//! Host side of the trail visualizer: command line, per-tick session and the
//! autonomous parameter drift. The window and GPU surface live in `main.rs`.

pub mod cli;
pub mod drift;
pub mod keys;
pub mod session;

pub use cli::Args;
pub use drift::{Drift, DriftConfig};
pub use keys::HostCommand;
pub use session::{Session, SessionConfig};
