//! Boris rotation pusher.

use lorentz_core::{Particle, PhaseState, Vector3};
use lorentz_fields::{FieldFunction, sample};

use crate::error::{StepperError, check_times};
use crate::Stepper;

/// Boris velocity update over an interval `tau` with fields already sampled.
///
/// Half electric kick, magnetic rotation, half electric kick. The rotation
/// preserves |v| exactly (up to roundoff) for any `tau`, including negative
/// sub-steps used by composition schemes.
pub(crate) fn boris_kick(
    particle: &Particle,
    velocity: Vector3,
    electric: Vector3,
    magnetic: Vector3,
    tau: f64,
) -> Vector3 {
    let half = 0.5 * particle.charge_to_mass() * tau;
    let h = magnetic * half;
    let s = h * (2.0 / (1.0 + h.length_squared()));

    let v_minus = velocity + electric * half;
    let v_prime = v_minus + Vector3::cross(&v_minus, &h);
    let v_plus = v_minus + Vector3::cross(&v_prime, &s);
    v_plus + electric * half
}

/// Boris leapfrog integrator
///
/// One field evaluation per step at the step start time:
///
/// ```text
/// h  = (q / 2m) B dt
/// s  = 2 h / (1 + |h|²)
/// v⁻ = v + (q / 2m) E dt
/// v' = v⁻ + v⁻ × h
/// v⁺ = v⁻ + v' × s
/// v  = v⁺ + (q / 2m) E dt
/// x  = x + v dt
/// ```
///
/// With E = 0 and static B the speed is conserved exactly, and the sampled
/// positions are vertices of a regular polygon inscribed in a circle of radius
/// `r · sqrt(1 + (ω dt / 2)²)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boris;

impl Stepper for Boris {
    fn name(&self) -> &'static str {
        "boris"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["leapfrog", "boris-leapfrog"]
    }

    fn order(&self) -> usize {
        2
    }

    fn is_symplectic(&self) -> bool {
        true
    }

    fn step(
        &self,
        particle: &Particle,
        state: &PhaseState,
        t: f64,
        dt: f64,
        electric: &dyn FieldFunction,
        magnetic: &dyn FieldFunction,
    ) -> Result<PhaseState, StepperError> {
        check_times(t, dt)?;
        let e = sample(electric, t)?;
        let b = sample(magnetic, t)?;

        let velocity = particle.velocity(state.momentum());
        let v_final = boris_kick(particle, velocity, e, b, dt);

        Ok(PhaseState::from_parts(
            state.position() + v_final * dt,
            particle.momentum(v_final),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorentz_fields::UniformField;

    #[test]
    fn rotation_preserves_speed() {
        let particle = Particle::new(1.0, 1.0).unwrap();
        let v = Vector3::new(3.0, -1.0, 2.0);
        let b = Vector3::new(0.3, 0.0, 1.0);
        for tau in [0.01, 0.5, 3.0, -1.7] {
            let rotated = boris_kick(&particle, v, Vector3::ZERO, b, tau);
            assert!((rotated.length() - v.length()).abs() < 1e-12);
        }
    }

    #[test]
    fn parallel_velocity_is_unchanged() {
        let particle = Particle::new(1.0, -2.0).unwrap();
        let v = Vector3::new(0.0, 0.0, 5.0);
        let rotated = boris_kick(&particle, v, Vector3::ZERO, Vector3::new(0.0, 0.0, 4.0), 0.1);
        assert_eq!(rotated, v);
    }

    #[test]
    fn pure_electric_field_gives_full_kick() {
        let particle = Particle::new(2.0, 4.0).unwrap();
        let e = UniformField(Vector3::new(1.0, 0.0, 0.0));
        let b = UniformField::ZERO;
        let next = Boris
            .step(&particle, &PhaseState::default(), 0.0, 0.5, &e, &b)
            .unwrap();
        // Δv = (q/m) E dt = 1.0; x = v_final dt
        assert_eq!(next.momentum(), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(next.position(), Vector3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn rejects_non_finite_field() {
        let particle = Particle::electron();
        let e = UniformField::ZERO;
        let b = |_t: f64| Vector3::new(0.0, 0.0, f64::INFINITY);
        let err = Boris
            .step(&particle, &PhaseState::default(), 1.0, 1e-12, &e, &b)
            .unwrap_err();
        assert!(matches!(err, StepperError::Field(_)));
    }
}
