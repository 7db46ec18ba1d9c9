//! Spatially-uniform, time-dependent field laws.
//!
//! Any electric or magnetic field is a pure function of time returning a
//! [`Vector3`]. Closures satisfy [`FieldFunction`] directly, so callers can
//! pass `|t| Vector3::new(0.0, 0.0, t.cos())` wherever a field is expected.

use lorentz_core::Vector3;
use thiserror::Error;

/// Pure field law `t -> Vector3`. Repeated calls with the same `t` must agree.
pub trait FieldFunction {
    fn at(&self, t: f64) -> Vector3;
}

impl<F> FieldFunction for F
where
    F: Fn(f64) -> Vector3,
{
    #[inline]
    fn at(&self, t: f64) -> Vector3 {
        self(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FieldError {
    #[error("field returned a non-finite value at t = {time} s")]
    NonFinite { time: f64 },
}

/// Sample `field` at `t`, rejecting NaN or infinite components.
pub fn sample(field: &dyn FieldFunction, t: f64) -> Result<Vector3, FieldError> {
    let value = field.at(t);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::NonFinite { time: t })
    }
}

/// Constant field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField(pub Vector3);

impl UniformField {
    pub const ZERO: UniformField = UniformField(Vector3::ZERO);
}

impl FieldFunction for UniformField {
    #[inline]
    fn at(&self, _t: f64) -> Vector3 {
        self.0
    }
}

/// Harmonic field `amplitude · cos(ω t + φ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatingField {
    pub amplitude: Vector3,
    pub angular_frequency_rad_s: f64,
    pub phase_rad: f64,
}

impl FieldFunction for OscillatingField {
    fn at(&self, t: f64) -> Vector3 {
        self.amplitude * (self.angular_frequency_rad_s * t + self.phase_rad).cos()
    }
}

/// Linearly ramped field `initial + rate · t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampField {
    pub initial: Vector3,
    pub rate: Vector3,
}

impl FieldFunction for RampField {
    fn at(&self, t: f64) -> Vector3 {
        self.initial + self.rate * t
    }
}

/// Closed set of stock laws, used for configuration-driven runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldLaw {
    Uniform(UniformField),
    Oscillating(OscillatingField),
    Ramp(RampField),
}

impl FieldFunction for FieldLaw {
    fn at(&self, t: f64) -> Vector3 {
        match self {
            FieldLaw::Uniform(field) => field.at(t),
            FieldLaw::Oscillating(field) => field.at(t),
            FieldLaw::Ramp(field) => field.at(t),
        }
    }
}

impl Default for FieldLaw {
    fn default() -> Self {
        FieldLaw::Uniform(UniformField::ZERO)
    }
}
