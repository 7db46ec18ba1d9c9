//! Particle parameters threaded through every stepper call.

use serde::Serialize;
use thiserror::Error;

use crate::constants::{ELECTRON_MASS, ELEMENTARY_CHARGE};
use crate::vector::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParticleError {
    #[error("particle mass must be non-zero and finite (got {0})")]
    InvalidMass(f64),
    #[error("particle charge must be finite (got {0})")]
    InvalidCharge(f64),
}

/// Rest mass (kg) and charge (C) of a point particle.
///
/// The mass is validated on construction, so division by it is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    mass: f64,
    charge: f64,
}

impl Particle {
    pub fn new(mass: f64, charge: f64) -> Result<Self, ParticleError> {
        if mass == 0.0 || !mass.is_finite() {
            return Err(ParticleError::InvalidMass(mass));
        }
        if !charge.is_finite() {
            return Err(ParticleError::InvalidCharge(charge));
        }
        Ok(Self { mass, charge })
    }

    /// Electron-mass particle carrying `+e`, matching the legacy demo setup.
    pub fn electron() -> Self {
        Self {
            mass: ELECTRON_MASS,
            charge: ELEMENTARY_CHARGE,
        }
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Charge-to-mass ratio q/m (C/kg).
    #[inline]
    pub fn charge_to_mass(&self) -> f64 {
        self.charge / self.mass
    }

    #[inline]
    pub fn velocity(&self, momentum: Vector3) -> Vector3 {
        momentum / self.mass
    }

    #[inline]
    pub fn momentum(&self, velocity: Vector3) -> Vector3 {
        velocity * self.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mass_is_rejected() {
        assert_eq!(
            Particle::new(0.0, 1.0),
            Err(ParticleError::InvalidMass(0.0))
        );
        assert!(Particle::new(f64::NAN, 1.0).is_err());
        assert!(Particle::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn error_names_the_precondition() {
        let err = Particle::new(0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("mass must be non-zero"));
    }

    #[test]
    fn velocity_and_momentum_are_inverse() {
        let p = Particle::new(2.0, -3.0).unwrap();
        let v = Vector3::new(1.0, -4.0, 0.5);
        assert_eq!(p.velocity(p.momentum(v)), v);
        assert_eq!(p.charge_to_mass(), -1.5);
    }
}
