//! Conservation and gyro-motion measurements over a computed trajectory.
//!
//! Numerical drift is not an error: these helpers quantify it so callers can
//! compare schemes against each other and against analytic gyro-motion.

use std::f64::consts::TAU;

use lorentz_core::{Particle, PhaseState, Vector3};
use serde::Serialize;

/// |p| at every sample.
pub fn momentum_magnitudes(states: &[PhaseState]) -> Vec<f64> {
    states.iter().map(|s| s.momentum().length()).collect()
}

/// Non-relativistic kinetic energy `|p|² / 2m` (J).
pub fn kinetic_energy(particle: &Particle, state: &PhaseState) -> f64 {
    state.momentum().length_squared() / (2.0 * particle.mass())
}

/// Largest `| |p_i| - |p_0| | / |p_0|` over the trajectory.
///
/// Falls back to the absolute deviation when the initial momentum is zero.
pub fn max_relative_momentum_drift(states: &[PhaseState]) -> f64 {
    let magnitudes = momentum_magnitudes(states);
    max_relative_deviation(&magnitudes)
}

/// Largest relative kinetic-energy deviation from the first sample.
pub fn max_relative_energy_drift(particle: &Particle, states: &[PhaseState]) -> f64 {
    let energies: Vec<f64> = states.iter().map(|s| kinetic_energy(particle, s)).collect();
    max_relative_deviation(&energies)
}

fn max_relative_deviation(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let scale = if first == 0.0 { 1.0 } else { first.abs() };
    values
        .iter()
        .map(|v| (v - first).abs() / scale)
        .fold(0.0_f64, f64::max)
}

/// Angular cyclotron frequency `|q| |B| / m` (rad/s).
pub fn cyclotron_frequency(particle: &Particle, field_magnitude: f64) -> f64 {
    (particle.charge_to_mass() * field_magnitude).abs()
}

/// Cyclotron period `2π m / (|q| |B|)`; `None` when the particle does not gyrate.
pub fn cyclotron_period(particle: &Particle, field_magnitude: f64) -> Option<f64> {
    let omega = cyclotron_frequency(particle, field_magnitude);
    (omega > 0.0).then(|| TAU / omega)
}

/// Larmor radius `|p⊥| / (|q| |B|)` for momentum `p` in field `B`.
pub fn gyro_radius(particle: &Particle, momentum: Vector3, magnetic: Vector3) -> Option<f64> {
    let b = magnetic.length();
    let qb = (particle.charge() * b).abs();
    if qb == 0.0 {
        return None;
    }
    let transverse = Vector3::cross(&momentum, &magnetic).length() / b;
    Some(transverse / qb)
}

/// Guiding centre `x + (p × B) / (q |B|²)` of the gyro-orbit through `state`.
pub fn gyro_center(particle: &Particle, state: &PhaseState, magnetic: Vector3) -> Option<Vector3> {
    let denom = particle.charge() * magnetic.length_squared();
    if denom == 0.0 {
        return None;
    }
    Some(state.position() + Vector3::cross(&state.momentum(), &magnetic) / denom)
}

/// Largest `| |x_i - center| - radius | / radius` over the trajectory.
pub fn max_relative_radius_error(states: &[PhaseState], center: Vector3, radius: f64) -> f64 {
    states
        .iter()
        .map(|s| ((s.position() - center).length() - radius).abs() / radius)
        .fold(0.0_f64, f64::max)
}

/// Conservation summary for one scheme's trajectory.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub scheme: String,
    pub samples: usize,
    pub max_relative_momentum_drift: f64,
    pub max_relative_energy_drift: f64,
    pub final_position_m: [f64; 3],
    pub final_momentum_kg_m_s: [f64; 3],
    pub gyro_radius_m: Option<f64>,
    pub cyclotron_period_s: Option<f64>,
    pub max_relative_radius_error: Option<f64>,
}

impl Summary {
    /// Summarise `states`, measuring gyro-motion against the field `magnetic`
    /// sampled at the start of the run.
    pub fn from_states(
        scheme: &str,
        particle: &Particle,
        states: &[PhaseState],
        magnetic: Vector3,
    ) -> Self {
        let first = states.first().copied().unwrap_or_default();
        let last = states.last().copied().unwrap_or_default();
        let gyro_radius_m = gyro_radius(particle, first.momentum(), magnetic);
        let radius_error = match (gyro_radius_m, gyro_center(particle, &first, magnetic)) {
            (Some(radius), Some(center)) if radius > 0.0 => {
                Some(max_relative_radius_error(states, center, radius))
            }
            _ => None,
        };

        Summary {
            scheme: scheme.to_string(),
            samples: states.len(),
            max_relative_momentum_drift: max_relative_momentum_drift(states),
            max_relative_energy_drift: max_relative_energy_drift(particle, states),
            final_position_m: last.position().to_array(),
            final_momentum_kg_m_s: last.momentum().to_array(),
            gyro_radius_m,
            cyclotron_period_s: cyclotron_period(particle, magnetic.length()),
            max_relative_radius_error: radius_error,
        }
    }
}
