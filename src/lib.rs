//! Charged-particle tracking in uniform, time-varying electromagnetic fields.
//!
//! The member crates hold the numerics; this crate re-exports them under one
//! roof and wires run manifests into trajectories through [`scenario`], so
//! the CLI and tests share a single front door.

pub use lorentz_config as config;
pub use lorentz_core as primitives;
pub use lorentz_export as export;
pub use lorentz_fields as fields;
pub use lorentz_steppers as steppers;
pub use lorentz_trajectory as trajectory;

pub mod scenario;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
