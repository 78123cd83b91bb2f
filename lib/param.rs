//! Symbolic phases: affine combinations of named variables over a constant
//! [`Phase`].
//!
//! A `Param` stands for the phase *c* + Σ*ₖ* *aₖ* × *sₖ*, where *c* is an
//! exact constant phase, each *sₖ* is a free variable measured in turns, and
//! each *aₖ* is a nonzero rational coefficient. This is the value carried by
//! phased spiders and parameterized boxes.

use std::{ collections::{ BTreeMap, BTreeSet }, fmt };
use num_rational::Rational64 as R64;
use num_traits::{ One, Signed, Zero };
use crate::phase::Phase;

/// A constant phase plus a rational-linear combination of free variables.
///
/// ```
/// # use spider_calc::{ param::Param, phase::Phase };
/// let a = Param::symbol("a");
/// let p = a.clone() + Param::from(Phase::pi4());
/// assert_eq!(p.subs("a", &Param::from(Phase::pi4())), Param::from(Phase::pi2()));
/// assert_eq!(-(-p.clone()), p);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Param {
    constant: Phase,
    terms: BTreeMap<String, R64>,
}

impl From<Phase> for Param {
    fn from(constant: Phase) -> Self {
        Self { constant, terms: BTreeMap::new() }
    }
}

impl Param {
    /// The zero phase.
    pub fn zero() -> Self { Self::default() }

    /// A single free variable with unit coefficient.
    pub fn symbol(name: &str) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(name.to_string(), R64::one());
        Self { constant: Phase::zero(), terms }
    }

    /// Return the constant part.
    pub fn constant(&self) -> Phase { self.constant }

    /// Return the coefficient of `var`, zero if it does not occur.
    pub fn coeff(&self, var: &str) -> R64 {
        self.terms.get(var).copied().unwrap_or_else(R64::zero)
    }

    /// Return the constant phase if `self` has no free variables.
    pub fn as_phase(&self) -> Option<Phase> {
        self.terms.is_empty().then_some(self.constant)
    }

    /// Return `true` if `self` is identically zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty() && self.constant.is_zero()
    }

    /// Return the names of all free variables, in sorted order.
    pub fn free_symbols(&self) -> BTreeSet<&str> {
        self.terms.keys().map(String::as_str).collect()
    }

    /// Substitute `expr` for every occurrence of `var`.
    pub fn subs(&self, var: &str, expr: &Param) -> Self {
        let Some(a) = self.terms.get(var).copied() else { return self.clone(); };
        let mut out = self.clone();
        out.terms.remove(var);
        out.constant += expr.constant.scale(a);
        for (s, b) in expr.terms.iter() {
            out.add_term(s, a * *b);
        }
        out
    }

    /// Differentiate with respect to `var`, in turns per turn.
    ///
    /// Every `Param` is affine in its variables, so the derivative is the
    /// (constant) coefficient of `var`.
    pub fn diff(&self, var: &str) -> R64 { self.coeff(var) }

    fn add_term(&mut self, var: &str, a: R64) {
        let c = self.terms.entry(var.to_string()).or_insert_with(R64::zero);
        *c += a;
        if c.is_zero() { self.terms.remove(var); }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() { return write!(f, "0"); }
        let mut first = true;
        for (s, a) in self.terms.iter() {
            let neg = *a < R64::zero();
            let mag = a.abs();
            match (first, neg) {
                (true, true) => write!(f, "-")?,
                (true, false) => { },
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            if mag.is_one() { write!(f, "{}", s)?; } else { write!(f, "{}·{}", mag, s)?; }
            first = false;
        }
        if !self.constant.is_zero() {
            if !first { write!(f, " + ")?; }
            write!(f, "{}", self.constant.label())?;
        }
        Ok(())
    }
}

impl std::ops::Neg for Param {
    type Output = Param;

    fn neg(self) -> Self::Output {
        Self {
            constant: -self.constant,
            terms: self.terms.into_iter().map(|(s, a)| (s, -a)).collect(),
        }
    }
}

impl std::ops::Add<Param> for Param {
    type Output = Param;

    fn add(mut self, rhs: Param) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign<Param> for Param {
    fn add_assign(&mut self, rhs: Param) {
        self.constant += rhs.constant;
        for (s, a) in rhs.terms.iter() { self.add_term(s, *a); }
    }
}

impl std::ops::Sub<Param> for Param {
    type Output = Param;

    fn sub(self, rhs: Param) -> Self::Output { self + (-rhs) }
}

/// Subtract an integer number of half-turns, i.e. `n × π`.
impl std::ops::Sub<i64> for Param {
    type Output = Param;

    fn sub(mut self, n: i64) -> Self::Output {
        self.constant -= Phase::half_turns(n);
        self
    }
}

impl std::iter::Sum for Param {
    fn sum<I>(iter: I) -> Self
    where I: IntoIterator<Item = Self>
    {
        iter.into_iter().fold(Self::zero(), |acc, p| acc + p)
    }
}
