//! Six-component phase-space containers.
//!
//! [`PhaseState`] holds a physical `(position, momentum)` pair, while
//! [`StateDerivative`] holds its time derivative `(velocity, force)`. Both
//! support the same elementwise vector-space arithmetic, implemented on the two
//! [`Vector3`] halves so that six-wide operations are exactly two independent
//! three-wide ones.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::vector::Vector3;

/// Position (m) and momentum (kg·m/s) of a particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    position: Vector3,
    momentum: Vector3,
}

/// Time derivative of a [`PhaseState`]: velocity (m/s) and force (N).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDerivative {
    velocity: Vector3,
    force: Vector3,
}

impl PhaseState {
    pub const fn new(x: f64, y: f64, z: f64, px: f64, py: f64, pz: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            momentum: Vector3::new(px, py, pz),
        }
    }

    pub const fn from_parts(position: Vector3, momentum: Vector3) -> Self {
        Self { position, momentum }
    }

    #[inline]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    #[inline]
    pub fn momentum(&self) -> Vector3 {
        self.momentum
    }

    #[inline]
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    #[inline]
    pub fn set_momentum(&mut self, momentum: Vector3) {
        self.momentum = momentum;
    }

    pub fn to_array(&self) -> [f64; 6] {
        let [x, y, z] = self.position.to_array();
        let [px, py, pz] = self.momentum.to_array();
        [x, y, z, px, py, pz]
    }

    /// Advance the state along `rate` for `dt` seconds: `self + dt · rate`.
    #[inline]
    pub fn advanced(&self, rate: &StateDerivative, dt: f64) -> PhaseState {
        PhaseState {
            position: self.position + rate.velocity * dt,
            momentum: self.momentum + rate.force * dt,
        }
    }
}

impl StateDerivative {
    pub const fn new(velocity: Vector3, force: Vector3) -> Self {
        Self { velocity, force }
    }

    #[inline]
    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    #[inline]
    pub fn force(&self) -> Vector3 {
        self.force
    }

    pub fn to_array(&self) -> [f64; 6] {
        let [vx, vy, vz] = self.velocity.to_array();
        let [fx, fy, fz] = self.force.to_array();
        [vx, vy, vz, fx, fy, fz]
    }
}

impl From<[f64; 6]> for PhaseState {
    fn from(y: [f64; 6]) -> Self {
        PhaseState::new(y[0], y[1], y[2], y[3], y[4], y[5])
    }
}

impl From<PhaseState> for [f64; 6] {
    fn from(state: PhaseState) -> Self {
        state.to_array()
    }
}

macro_rules! six_vector_ops {
    ($ty:ident, $first:ident, $second:ident) => {
        impl Index<usize> for $ty {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                match index {
                    0..=2 => &self.$first[index],
                    3..=5 => &self.$second[index - 3],
                    _ => panic!("{} index out of range: {index}", stringify!($ty)),
                }
            }
        }

        impl Neg for $ty {
            type Output = $ty;

            #[inline]
            fn neg(self) -> $ty {
                $ty {
                    $first: -self.$first,
                    $second: -self.$second,
                }
            }
        }

        impl Add for $ty {
            type Output = $ty;

            #[inline]
            fn add(self, rhs: $ty) -> $ty {
                $ty {
                    $first: self.$first + rhs.$first,
                    $second: self.$second + rhs.$second,
                }
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            #[inline]
            fn sub(self, rhs: $ty) -> $ty {
                $ty {
                    $first: self.$first - rhs.$first,
                    $second: self.$second - rhs.$second,
                }
            }
        }

        impl Mul<f64> for $ty {
            type Output = $ty;

            #[inline]
            fn mul(self, s: f64) -> $ty {
                $ty {
                    $first: self.$first * s,
                    $second: self.$second * s,
                }
            }
        }

        impl Mul<$ty> for f64 {
            type Output = $ty;

            #[inline]
            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<f64> for $ty {
            type Output = $ty;

            #[inline]
            fn div(self, s: f64) -> $ty {
                $ty {
                    $first: self.$first / s,
                    $second: self.$second / s,
                }
            }
        }

        impl AddAssign for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: $ty) {
                *self = *self + rhs;
            }
        }

        impl SubAssign for $ty {
            #[inline]
            fn sub_assign(&mut self, rhs: $ty) {
                *self = *self - rhs;
            }
        }

        impl MulAssign<f64> for $ty {
            #[inline]
            fn mul_assign(&mut self, s: f64) {
                *self = *self * s;
            }
        }

        impl DivAssign<f64> for $ty {
            #[inline]
            fn div_assign(&mut self, s: f64) {
                *self = *self / s;
            }
        }
    };
}

six_vector_ops!(PhaseState, position, momentum);
six_vector_ops!(StateDerivative, velocity, force);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pair() -> (PhaseState, PhaseState) {
        (
            PhaseState::new(1.0, -2.0, 3.5, 0.25, 8.0, -1.0),
            PhaseState::from_parts(
                Vector3::new(-4.0, 0.5, 2.0),
                Vector3::new(3.0, -0.75, 6.0),
            ),
        )
    }

    #[test]
    fn addition_acts_on_halves_independently() {
        let (a, b) = sample_pair();
        let sum = a + b;
        assert_eq!(sum.position(), a.position() + b.position());
        assert_eq!(sum.momentum(), a.momentum() + b.momentum());
        let diff = a - b;
        assert_eq!(diff.position(), a.position() - b.position());
        assert_eq!(diff.momentum(), a.momentum() - b.momentum());
    }

    #[test]
    fn scaling_acts_on_halves_independently() {
        let (a, _) = sample_pair();
        let t = -1.75;
        assert_eq!((t * a).momentum(), t * a.momentum());
        assert_eq!((a * t).position(), a.position() * t);
        assert_eq!((a / 4.0).momentum(), a.momentum() / 4.0);
        assert_eq!((-a).position(), -a.position());
    }

    #[test]
    fn setters_replace_only_their_half() {
        let (mut a, _) = sample_pair();
        let momentum = a.momentum();
        a.set_position(Vector3::new(9.0, 9.0, 9.0));
        assert_eq!(a.position(), Vector3::new(9.0, 9.0, 9.0));
        assert_eq!(a.momentum(), momentum);
        a.set_momentum(Vector3::ZERO);
        assert_eq!(a.position(), Vector3::new(9.0, 9.0, 9.0));
        assert_eq!(a.momentum(), Vector3::ZERO);
    }

    #[test]
    fn array_layout_is_position_then_momentum() {
        let raw = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let state = PhaseState::from(raw);
        assert_eq!(state.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(state.momentum(), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(state.to_array(), raw);
        assert_eq!(state[4], 5.0);
    }

    #[test]
    fn advancing_along_a_derivative_is_an_euler_update() {
        let (a, _) = sample_pair();
        let rate = StateDerivative::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
        let next = a.advanced(&rate, 0.5);
        assert_eq!(next.position(), a.position() + Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(next.momentum(), a.momentum() + Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn derivative_combination_matches_componentwise_sum() {
        let k1 = StateDerivative::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        let k2 = StateDerivative::new(Vector3::new(-1.0, 0.0, 1.0), Vector3::new(0.5, 0.5, 0.5));
        let combined = k1 + 2.0 * k2;
        assert_eq!(combined.to_array(), [-1.0, 2.0, 5.0, 5.0, 6.0, 7.0]);
    }
}
