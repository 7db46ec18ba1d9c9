//! Lorentz-force right-hand side shared by the explicit schemes.

use lorentz_core::{Particle, PhaseState, StateDerivative, Vector3};
use lorentz_fields::{FieldFunction, sample};

use crate::error::StepperError;

/// Lorentz force `q (E + v × B)` for already-sampled fields.
#[inline]
pub fn lorentz_force(particle: &Particle, velocity: Vector3, electric: Vector3, magnetic: Vector3) -> Vector3 {
    (electric + Vector3::cross(&velocity, &magnetic)) * particle.charge()
}

/// Time derivative of the phase-space state at time `t`.
///
/// Returns `(v, F)` with `v = p / m` and `F = q (E(t) + v × B(t))`. This is the
/// contract an external reference integrator should evaluate so that its
/// trajectories compare directly with the built-in schemes.
pub fn lorentz_derivative(
    particle: &Particle,
    state: &PhaseState,
    t: f64,
    electric: &dyn FieldFunction,
    magnetic: &dyn FieldFunction,
) -> Result<StateDerivative, StepperError> {
    let e = sample(electric, t)?;
    let b = sample(magnetic, t)?;
    let velocity = particle.velocity(state.momentum());
    Ok(StateDerivative::new(
        velocity,
        lorentz_force(particle, velocity, e, b),
    ))
}
