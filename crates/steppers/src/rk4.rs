//! Classical fourth-order Runge-Kutta.

use lorentz_core::{Particle, PhaseState};
use lorentz_fields::FieldFunction;

use crate::derivative::lorentz_derivative;
use crate::error::{StepperError, check_times};
use crate::Stepper;

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// Four derivative evaluations per step, with the fields sampled at
/// `t`, `t + h/2` (twice) and `t + h`:
///
/// ```text
/// k1 = f(s, t)
/// k2 = f(s + h/2 · k1, t + h/2)
/// k3 = f(s + h/2 · k2, t + h/2)
/// k4 = f(s + h · k3, t + h)
/// s' = s + h/6 · (k1 + 2 k2 + 2 k3 + k4)
/// ```
///
/// Not symplectic: in a static magnetic field |p| decays slowly every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Stepper for RungeKuttaFourthOrder {
    fn name(&self) -> &'static str {
        "rk4"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["runge-kutta", "runge_kutta_fourth_order"]
    }

    fn order(&self) -> usize {
        4
    }

    fn is_symplectic(&self) -> bool {
        false
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
        let half = 0.5 * dt;

        let k1 = lorentz_derivative(particle, state, t, electric, magnetic)?;
        let k2 = lorentz_derivative(particle, &state.advanced(&k1, half), t + half, electric, magnetic)?;
        let k3 = lorentz_derivative(particle, &state.advanced(&k2, half), t + half, electric, magnetic)?;
        let k4 = lorentz_derivative(particle, &state.advanced(&k3, dt), t + dt, electric, magnetic)?;

        let slope = k1 + 2.0 * k2 + 2.0 * k3 + k4;
        Ok(state.advanced(&slope, dt / 6.0))
    }
}
