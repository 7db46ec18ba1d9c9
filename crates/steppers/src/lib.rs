//! Fixed-step integrators for a charged particle in uniform E and B fields.
//!
//! Every scheme implements [`Stepper`]: it takes the particle, the current
//! state and time, the step size, and the two field laws, and returns the next
//! state. [`StepperKind`] is the closed set of built-in schemes for callers
//! that select one by name.

use std::fmt;
use std::str::FromStr;

use lorentz_core::{Particle, PhaseState};
use lorentz_fields::FieldFunction;
use serde::{Deserialize, Deserializer};

pub mod boris;
pub mod derivative;
pub mod error;
pub mod rk4;
pub mod yoshida;

pub use boris::Boris;
pub use derivative::{lorentz_derivative, lorentz_force};
pub use error::StepperError;
pub use rk4::RungeKuttaFourthOrder;
pub use yoshida::Yoshida;

/// Base trait for all integrators
pub trait Stepper {
    /// Canonical lowercase name.
    fn name(&self) -> &'static str;

    /// Alternative names accepted when parsing.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Convergence order of the global error.
    fn order(&self) -> usize;

    fn is_symplectic(&self) -> bool;

    /// Advance `state` from `t` to `t + dt`.
    ///
    /// # Errors
    /// Returns [`StepperError`] when `t` or `dt` is not finite or a field
    /// returns a non-finite sample.
    fn step(
        &self,
        particle: &Particle,
        state: &PhaseState,
        t: f64,
        dt: f64,
        electric: &dyn FieldFunction,
        magnetic: &dyn FieldFunction,
    ) -> Result<PhaseState, StepperError>;
}

impl<S: Stepper + ?Sized> Stepper for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn aliases(&self) -> &'static [&'static str] {
        (**self).aliases()
    }

    fn order(&self) -> usize {
        (**self).order()
    }

    fn is_symplectic(&self) -> bool {
        (**self).is_symplectic()
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
        (**self).step(particle, state, t, dt, electric, magnetic)
    }
}

/// Built-in integration schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepperKind {
    Rk4,
    Boris,
    Yoshida,
}

impl StepperKind {
    pub const ALL: [StepperKind; 3] = [StepperKind::Rk4, StepperKind::Boris, StepperKind::Yoshida];

    fn as_stepper(&self) -> &'static dyn Stepper {
        match self {
            StepperKind::Rk4 => &RungeKuttaFourthOrder,
            StepperKind::Boris => &Boris,
            StepperKind::Yoshida => &Yoshida,
        }
    }

    /// Comma-separated canonical names, used in error messages and CLI help.
    pub fn available() -> String {
        StepperKind::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Stepper for StepperKind {
    fn name(&self) -> &'static str {
        self.as_stepper().name()
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.as_stepper().aliases()
    }

    fn order(&self) -> usize {
        self.as_stepper().order()
    }

    fn is_symplectic(&self) -> bool {
        self.as_stepper().is_symplectic()
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
        self.as_stepper()
            .step(particle, state, t, dt, electric, magnetic)
    }
}

impl FromStr for StepperKind {
    type Err = StepperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        StepperKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || kind.aliases().iter().any(|alias| *alias == wanted))
            .ok_or_else(|| StepperError::UnknownScheme {
                name: s.to_string(),
                available: StepperKind::available(),
            })
    }
}

impl fmt::Display for StepperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manifests name schemes with the same strings `FromStr` accepts.
impl<'de> Deserialize<'de> for StepperKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
