//! Trajectory driver: repeated application of a [`Stepper`] on a fixed time grid.

use log::debug;
use lorentz_core::{Particle, PhaseState};
use lorentz_fields::FieldFunction;
use lorentz_steppers::{Stepper, StepperError};
use thiserror::Error;

pub mod diagnostics;

pub use diagnostics::Summary;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("trajectory start time must be finite (got {0})")]
    NonFiniteStart(f64),
    #[error("time step must be finite (got {0})")]
    NonFiniteStep(f64),
    #[error("step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: StepperError,
    },
}

/// Uniform sampling grid `t_i = t0 + i · dt` for `i = 0..=steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    pub t0: f64,
    pub dt: f64,
    pub steps: usize,
}

impl TimeGrid {
    pub fn new(t0: f64, dt: f64, steps: usize) -> Self {
        Self { t0, dt, steps }
    }

    /// Time of sample `index`. Computed directly so rounding does not accumulate.
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        self.t0 + index as f64 * self.dt
    }

    /// Time column matching the output of [`integrate`].
    pub fn times(&self) -> Vec<f64> {
        (0..=self.steps).map(|i| self.time_at(i)).collect()
    }

    pub fn duration(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    /// Index of the sample closest to `t`, clamped to the grid.
    pub fn nearest_index(&self, t: f64) -> usize {
        if self.dt == 0.0 || !self.dt.is_finite() {
            return 0;
        }
        let raw = ((t - self.t0) / self.dt).round();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.steps)
        }
    }
}

/// Integrate `initial` across `grid` with `stepper`.
///
/// The result holds `grid.steps + 1` states: element 0 is `initial` as given,
/// element `i` is the stepper applied to element `i - 1` at `grid.time_at(i - 1)`.
/// The first failing step aborts the whole trajectory.
pub fn integrate<S: Stepper + ?Sized>(
    particle: &Particle,
    initial: PhaseState,
    grid: &TimeGrid,
    electric: &dyn FieldFunction,
    magnetic: &dyn FieldFunction,
    stepper: &S,
) -> Result<Vec<PhaseState>, TrajectoryError> {
    if !grid.t0.is_finite() {
        return Err(TrajectoryError::NonFiniteStart(grid.t0));
    }
    if !grid.dt.is_finite() {
        return Err(TrajectoryError::NonFiniteStep(grid.dt));
    }

    debug!(
        "integrating {} steps of {:e} s with {}",
        grid.steps,
        grid.dt,
        stepper.name()
    );

    let mut states = Vec::with_capacity(grid.steps + 1);
    states.push(initial);
    let mut current = initial;
    for index in 0..grid.steps {
        current = stepper
            .step(particle, &current, grid.time_at(index), grid.dt, electric, magnetic)
            .map_err(|source| TrajectoryError::Step { index, source })?;
        states.push(current);
    }

    debug!("{} finished at t = {:e} s", stepper.name(), grid.time_at(grid.steps));
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorentz_core::Vector3;
    use lorentz_fields::UniformField;
    use lorentz_steppers::{Boris, StepperKind};

    #[test]
    fn zero_steps_returns_initial_state_only() {
        let particle = Particle::electron();
        let start = PhaseState::new(1.0, 2.0, 3.0, 4.0e-22, 5.0e-22, 6.0e-22);
        let field = UniformField(Vector3::new(0.0, 0.0, 1.0));
        for kind in StepperKind::ALL {
            let states = integrate(
                &particle,
                start,
                &TimeGrid::new(0.0, 1e-12, 0),
                &UniformField::ZERO,
                &field,
                &kind,
            )
            .unwrap();
            assert_eq!(states, vec![start]);
        }
    }

    #[test]
    fn each_sample_is_one_step_of_the_previous() {
        let particle = Particle::new(1.0, 1.0).unwrap();
        let e = |t: f64| Vector3::new(t.sin(), 0.0, 0.0);
        let b = UniformField(Vector3::new(0.0, 0.0, 2.0));
        let grid = TimeGrid::new(0.5, 0.1, 5);
        let start = PhaseState::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0);

        let states = integrate(&particle, start, &grid, &e, &b, &Boris).unwrap();
        assert_eq!(states.len(), 6);
        assert_eq!(states[0], start);
        for i in 1..states.len() {
            let expected = Boris
                .step(&particle, &states[i - 1], grid.time_at(i - 1), grid.dt, &e, &b)
                .unwrap();
            assert_eq!(states[i], expected);
        }
    }

    #[test]
    fn stepper_failure_reports_the_step_index() {
        let particle = Particle::new(1.0, 1.0).unwrap();
        let e = |t: f64| {
            if t > 0.25 {
                Vector3::new(f64::NAN, 0.0, 0.0)
            } else {
                Vector3::ZERO
            }
        };
        let b = UniformField::ZERO;
        let err = integrate(
            &particle,
            PhaseState::default(),
            &TimeGrid::new(0.0, 0.1, 10),
            &e,
            &b,
            &Boris,
        )
        .unwrap_err();
        assert!(matches!(err, TrajectoryError::Step { index: 3, .. }));
    }

    #[test]
    fn non_finite_step_fails_before_stepping() {
        let particle = Particle::electron();
        let field = UniformField::ZERO;
        let err = integrate(
            &particle,
            PhaseState::default(),
            &TimeGrid::new(0.0, f64::INFINITY, 0),
            &field,
            &field,
            &Boris,
        )
        .unwrap_err();
        assert_eq!(err, TrajectoryError::NonFiniteStep(f64::INFINITY));
    }

    #[test]
    fn grid_times_and_nearest_index() {
        let grid = TimeGrid::new(1.0, 0.25, 8);
        let times = grid.times();
        assert_eq!(times.len(), 9);
        assert_eq!(times[4], 2.0);
        assert_eq!(grid.nearest_index(2.1), 4);
        assert_eq!(grid.nearest_index(-5.0), 0);
        assert_eq!(grid.nearest_index(100.0), 8);
        assert_eq!(grid.duration(), 2.0);
    }
}
