//! Fourth-order Yoshida composition.

use lorentz_core::{Particle, PhaseState};
use lorentz_fields::{FieldFunction, sample};

use crate::boris::boris_kick;
use crate::error::{StepperError, check_times};
use crate::Stepper;

/// Yoshida 4th-order symplectic integrator
///
/// Triple-jump composition of drift-kick-drift leapfrog steps with weights
/// `w1, w0, w1` where `w1 = 1 / (2 - 2^(1/3))` and `w0 = -2^(1/3) w1`:
///
/// ```text
/// x += c1 v dt ; v <- kick(d1 dt)
/// x += c2 v dt ; v <- kick(d2 dt)
/// x += c3 v dt ; v <- kick(d3 dt)
/// x += c4 v dt
/// ```
///
/// The first kick samples E and B at the step start `t`; the two later kicks
/// sample them at `t + dt`. Every kick applies the Lorentz force as a Boris
/// rotation, so the speed is preserved in a static magnetic field even though
/// the force depends on velocity. The middle kick runs backwards in time
/// (`d2 < 0`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Yoshida;

impl Yoshida {
    pub const C1: f64 = 0.675603595979829;
    pub const C2: f64 = -0.175603595979829;
    pub const C3: f64 = -0.175603595979829;
    pub const C4: f64 = 0.675603595979829;
    pub const D1: f64 = 1.35120719195966;
    pub const D2: f64 = -1.70241438391932;
    pub const D3: f64 = 1.35120719195966;
}

impl Stepper for Yoshida {
    fn name(&self) -> &'static str {
        "yoshida"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["yoshida4", "yoshida-4"]
    }

    fn order(&self) -> usize {
        4
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

        let stages = [
            (Yoshida::C1, Yoshida::D1, t),
            (Yoshida::C2, Yoshida::D2, t + dt),
            (Yoshida::C3, Yoshida::D3, t + dt),
        ];

        let mut position = state.position();
        let mut velocity = particle.velocity(state.momentum());

        for (c, d, kick_time) in stages {
            position += velocity * (c * dt);
            let e = sample(electric, kick_time)?;
            let b = sample(magnetic, kick_time)?;
            velocity = boris_kick(particle, velocity, e, b, d * dt);
        }
        position += velocity * (Yoshida::C4 * dt);

        Ok(PhaseState::from_parts(position, particle.momentum(velocity)))
    }
}
