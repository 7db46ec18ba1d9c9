//! Turns a [`RunConfig`] into one trajectory per requested scheme.

use log::{info, warn};
use thiserror::Error;

use crate::config::{ConfigError, FieldConfig, RunConfig};
use crate::fields::{FieldFunction, FieldLaw, OscillatingField, RampField, UniformField};
use crate::primitives::{Particle, ParticleError, PhaseState, Vector3};
use crate::steppers::{Stepper, StepperKind};
use crate::trajectory::{Summary, TimeGrid, TrajectoryError, integrate};

/// Momentum drift above which a symplectic run is reported as suspicious.
const SYMPLECTIC_DRIFT_WARNING: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Particle(#[from] ParticleError),
    #[error("{scheme} trajectory failed: {source}")]
    Trajectory {
        scheme: StepperKind,
        #[source]
        source: TrajectoryError,
    },
}

/// Validated, ready-to-integrate run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub particle: Particle,
    pub initial: PhaseState,
    pub grid: TimeGrid,
    pub electric: FieldLaw,
    pub magnetic: FieldLaw,
    pub schemes: Vec<StepperKind>,
}

/// Output of one scheme over the scenario's time grid.
#[derive(Debug, Clone)]
pub struct SchemeRun {
    pub scheme: StepperKind,
    pub states: Vec<PhaseState>,
    pub summary: Summary,
}

impl Scenario {
    /// Build a scenario from a manifest; duplicate schemes are run once.
    pub fn from_config(config: &RunConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        let particle = Particle::new(config.particle.mass_kg, config.particle.charge_c)?;
        let initial = PhaseState::from_parts(
            Vector3::from(config.initial.position_m),
            Vector3::from(config.initial_momentum()),
        );

        let mut schemes = Vec::new();
        for &scheme in &config.schemes {
            if !schemes.contains(&scheme) {
                schemes.push(scheme);
            }
        }

        Ok(Scenario {
            particle,
            initial,
            grid: TimeGrid::new(config.time.t0_s, config.time.step_s, config.time.steps),
            electric: field_from_config(&config.fields.electric),
            magnetic: field_from_config(&config.fields.magnetic),
            schemes,
        })
    }

    /// Integrate every scheme in order. The first failing scheme aborts the run.
    pub fn run(&self) -> Result<Vec<SchemeRun>, ScenarioError> {
        let magnetic_at_start = self.magnetic.at(self.grid.t0);
        let mut runs = Vec::with_capacity(self.schemes.len());
        for &scheme in &self.schemes {
            let states = integrate(
                &self.particle,
                self.initial,
                &self.grid,
                &self.electric,
                &self.magnetic,
                &scheme,
            )
            .map_err(|source| ScenarioError::Trajectory { scheme, source })?;

            let summary = Summary::from_states(scheme.name(), &self.particle, &states, magnetic_at_start);
            info!(
                "{scheme}: {} samples, max |p| drift {:.3e}",
                summary.samples, summary.max_relative_momentum_drift
            );
            if scheme.is_symplectic() && summary.max_relative_momentum_drift > SYMPLECTIC_DRIFT_WARNING {
                warn!(
                    "{scheme} drifted by {:.3e} in |p|; fields are not purely magnetic and static, or the step is too coarse",
                    summary.max_relative_momentum_drift
                );
            }

            runs.push(SchemeRun {
                scheme,
                states,
                summary,
            });
        }
        Ok(runs)
    }
}

/// Map a manifest field law onto the runtime field type.
pub fn field_from_config(config: &FieldConfig) -> FieldLaw {
    match *config {
        FieldConfig::Uniform { value } => FieldLaw::Uniform(UniformField(Vector3::from(value))),
        FieldConfig::Oscillating {
            amplitude,
            angular_frequency_rad_s,
            phase_rad,
        } => FieldLaw::Oscillating(OscillatingField {
            amplitude: Vector3::from(amplitude),
            angular_frequency_rad_s,
            phase_rad,
        }),
        FieldConfig::Ramp { initial, rate } => FieldLaw::Ramp(RampField {
            initial: Vector3::from(initial),
            rate: Vector3::from(rate),
        }),
    }
}
