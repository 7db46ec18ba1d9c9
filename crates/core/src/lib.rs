//! Core units, constants, and shared primitives for the Lorentz Tracker workspace.

pub mod particle;
pub mod state;
pub mod vector;

pub use particle::{Particle, ParticleError};
pub use state::{PhaseState, StateDerivative};
pub use vector::{Vector3, VectorError};

/// Physical constants expressed in SI units.
pub mod constants {
    /// Speed of light in vacuum (m/s).
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
    /// Electron rest mass (kg), to the precision used by the reference scenarios.
    pub const ELECTRON_MASS: f64 = 9.109e-31;
    /// Elementary charge (C).
    pub const ELEMENTARY_CHARGE: f64 = 1.602e-19;
}
