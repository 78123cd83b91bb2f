//! Exact spider phases as rational multiples of 2*π*.
//!
//! A [`Phase`] always holds its canonical representative in `[0, 1)` turns, so
//! equality, ordering, and hashing act on phases modulo 2*π* directly.

use std::{ f64::consts::TAU, fmt, ops };
use num_rational::Rational64 as R64;
use num_traits::{ One, Zero };

// reduce a number of turns into [0, 1)
fn reduce(turns: R64) -> R64 { turns - turns.floor() }

fn to_f64(a: R64) -> f64 { *a.numer() as f64 / *a.denom() as f64 }

/// A constant phase 2*π* × *φ*, with *φ* kept in `[0, 1)`.
///
/// ```
/// # use spider_calc::phase::Phase;
/// assert_eq!(Phase::new(3, 4), -Phase::new(1, 4));
/// assert_eq!(Phase::new(3, 4) / 2, Phase::new(3, 8));
/// assert_eq!(Phase::pi() + Phase::pi(), Phase::zero());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phase(R64);

impl Phase {
    /// Create the phase `(numer / denom) × 2π`.
    ///
    /// *Panics if `denom` is zero.*
    pub fn new(numer: i64, denom: i64) -> Self {
        Self::from_turns(R64::new(numer, denom))
    }

    /// Create the phase `turns × 2π`.
    pub fn from_turns(turns: R64) -> Self { Self(reduce(turns)) }

    /// Create the phase `n × π`.
    pub fn half_turns(n: i64) -> Self { Self::from_turns(R64::new(n, 2)) }

    /// Return *φ* in `[0, 1)`.
    pub fn turns(self) -> R64 { self.0 }

    /// Approximate a floating-point angle in radians, returning `None` for
    /// non-finite input.
    pub fn from_radians(rad: f64) -> Option<Self> {
        R64::approximate_float(rad / TAU).map(Self::from_turns)
    }

    /// Return the angle in radians, in `[0, 2π)`.
    pub fn radians(self) -> f64 { TAU * to_f64(self.0) }

    pub fn zero() -> Self { Self(R64::zero()) }

    pub fn pi() -> Self { Self(R64::new(1, 2)) }

    pub fn pi2() -> Self { Self(R64::new(1, 4)) }

    pub fn pi4() -> Self { Self(R64::new(1, 8)) }

    /// Return 2π/`n`.
    pub fn frac(n: i64) -> Self { Self::new(1, n) }

    pub fn is_zero(self) -> bool { self.0.is_zero() }

    /// Return `true` if `self` is an integer multiple of π.
    pub fn is_pauli(self) -> bool { (self.0 * 2).is_integer() }

    /// Return `true` if `self` is an integer multiple of π/2.
    pub fn is_clifford(self) -> bool { (self.0 * 4).is_integer() }

    /// Multiply by a rational factor.
    pub fn scale(self, by: R64) -> Self { Self::from_turns(self.0 * by) }

    // label in units of π; empty for zero
    pub(crate) fn label(&self) -> String {
        let halves = self.0 * 2;
        if halves.is_zero() {
            String::new()
        } else if halves.is_one() {
            "π".to_string()
        } else if *halves.numer() == 1 {
            format!("π/{}", halves.denom())
        } else {
            format!("({})π", halves)
        }
    }
}

impl From<R64> for Phase {
    fn from(turns: R64) -> Self { Self::from_turns(turns) }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() { write!(f, "0") } else { write!(f, "{}", self.label()) }
    }
}

impl ops::Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Phase { Self::from_turns(-self.0) }
}

impl ops::Add for Phase {
    type Output = Phase;

    fn add(self, rhs: Phase) -> Phase { Self::from_turns(self.0 + rhs.0) }
}

impl ops::Sub for Phase {
    type Output = Phase;

    fn sub(self, rhs: Phase) -> Phase { Self::from_turns(self.0 - rhs.0) }
}

impl ops::AddAssign for Phase {
    fn add_assign(&mut self, rhs: Phase) { *self = *self + rhs; }
}

impl ops::SubAssign for Phase {
    fn sub_assign(&mut self, rhs: Phase) { *self = *self - rhs; }
}

impl ops::Mul<i64> for Phase {
    type Output = Phase;

    fn mul(self, n: i64) -> Phase { Self::from_turns(self.0 * n) }
}

impl ops::Mul<Phase> for i64 {
    type Output = Phase;

    fn mul(self, ph: Phase) -> Phase { ph * self }
}

impl ops::Div<i64> for Phase {
    type Output = Phase;

    fn div(self, n: i64) -> Phase { Self::from_turns(self.0 / n) }
}

impl std::iter::Sum for Phase {
    fn sum<I>(iter: I) -> Self
    where I: Iterator<Item = Self>
    {
        iter.fold(Self::zero(), ops::Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction() {
        assert_eq!(Phase::new(5, 3), Phase::new(2, 3));
        assert_eq!(Phase::new(-1, 3), Phase::new(2, 3));
        assert_eq!(Phase::new(1, -3), Phase::new(2, 3));
        assert_eq!(Phase::frac(1), Phase::zero());
        assert_eq!(Phase::frac(2), Phase::pi());
        assert_eq!(Phase::half_turns(3), Phase::pi());
        assert_eq!(Phase::half_turns(-1), Phase::pi());
        assert_eq!(Phase::new(-1, 4).turns(), R64::new(3, 4));
        assert!(Phase::new(7, 8) > Phase::pi());
        assert!(Phase::new(-1, 8) > Phase::pi());
    }

    #[test]
    fn radians() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
        assert_eq!(Phase::from_radians(TAU), Some(Phase::zero()));
        assert_eq!(Phase::from_radians(-TAU / 4.0), Some(Phase::new(3, 4)));
        assert_eq!(Phase::from_radians(f64::INFINITY), None);
        assert!(close(Phase::pi().radians(), TAU / 2.0));
        assert!(close(Phase::frac(3).radians(), TAU / 3.0));
    }

    #[test]
    fn arith() {
        assert_eq!(Phase::new(2, 3) + Phase::new(2, 3), Phase::new(1, 3));
        assert_eq!(Phase::new(1, 3) - Phase::new(2, 3), Phase::new(2, 3));
        assert_eq!(-Phase::pi4(), Phase::new(7, 8));
        assert_eq!(Phase::new(1, 3) * 5, Phase::new(2, 3));
        assert_eq!(3 * Phase::pi2(), Phase::new(3, 4));
        assert_eq!(Phase::new(1, 3) / 2, Phase::new(1, 6));
        assert_eq!(Phase::pi2().scale(R64::new(1, 2)), Phase::pi4());
        let mut ph = Phase::pi4();
        ph -= Phase::pi2();
        assert_eq!(ph, Phase::new(7, 8));
        assert_eq!([Phase::pi2(), Phase::pi4(), Phase::pi4()].into_iter().sum::<Phase>(), Phase::pi());
    }

    #[test]
    fn classes_and_labels() {
        assert!(Phase::pi().is_pauli());
        assert!(!Phase::pi2().is_pauli());
        assert!(Phase::new(3, 4).is_clifford());
        assert!(!Phase::pi4().is_clifford());
        assert_eq!(Phase::zero().label(), "");
        assert_eq!(Phase::pi().label(), "π");
        assert_eq!(Phase::pi4().label(), "π/4");
        assert_eq!(Phase::new(3, 8).label(), "(3/4)π");
        assert_eq!(Phase::new(3, 8).to_string(), "(3/4)π");
        assert_eq!(Phase::zero().to_string(), "0");
    }
}
