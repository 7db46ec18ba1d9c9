use lorentz_fields::FieldError;
use thiserror::Error;

/// Precondition violations raised by a single integration step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepperError {
    #[error("step start time must be finite (got {0})")]
    NonFiniteTime(f64),
    #[error("time step must be finite (got {0})")]
    NonFiniteStep(f64),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("unknown integration scheme '{name}'; available: {available}")]
    UnknownScheme { name: String, available: String },
}

pub(crate) fn check_times(t: f64, dt: f64) -> Result<(), StepperError> {
    if !t.is_finite() {
        return Err(StepperError::NonFiniteTime(t));
    }
    if !dt.is_finite() {
        return Err(StepperError::NonFiniteStep(dt));
    }
    Ok(())
}
