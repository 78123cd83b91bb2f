//! Atomic objects and the types built from them.
//!
//! A [`Ty`] is an ordered sequence of [`Ob`]s; tensoring types concatenates
//! them, and the empty type is the monoidal unit.

use std::{ fmt, ops::RangeBounds };
use itertools::Itertools;
use crate::diagram::{ DiagramError, DiagResult };

/// An atomic object.
///
/// Objects are either *self-dual* (the default, as required for spider legs),
/// in which case every adjoint of the object is the object itself, or *rigid*,
/// in which case the dual flips an adjoint marker so that `x.dual().dual() ==
/// x` but `x.dual() != x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ob {
    name: String,
    adjoint: bool,
    self_dual: bool,
}

impl Ob {
    /// Create a new self-dual object.
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), adjoint: false, self_dual: true }
    }

    /// Create a new object that is distinct from its dual.
    pub fn rigid(name: &str) -> Self {
        Self { name: name.to_string(), adjoint: false, self_dual: false }
    }

    /// Return the name of the object.
    pub fn name(&self) -> &str { &self.name }

    /// Return `true` if `self` is its own dual.
    pub fn is_self_dual(&self) -> bool { self.self_dual }

    /// Return `true` if `self` is the dual of a named rigid object.
    pub fn is_adjoint(&self) -> bool { self.adjoint }

    /// Return the dual object.
    pub fn dual(&self) -> Self {
        if self.self_dual {
            self.clone()
        } else {
            Self { adjoint: !self.adjoint, ..self.clone() }
        }
    }

    /// Return the left adjoint. Objects here are pivotal, so this coincides
    /// with [`dual`][Self::dual].
    pub fn l(&self) -> Self { self.dual() }

    /// Return the right adjoint. Objects here are pivotal, so this coincides
    /// with [`dual`][Self::dual].
    pub fn r(&self) -> Self { self.dual() }
}

impl fmt::Display for Ob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.adjoint { write!(f, "{}*", self.name) } else { write!(f, "{}", self.name) }
    }
}

/// An ordered, possibly empty sequence of objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ty(Vec<Ob>);

impl From<Ob> for Ty {
    fn from(ob: Ob) -> Self { Self(vec![ob]) }
}

impl From<&Ob> for Ty {
    fn from(ob: &Ob) -> Self { Self(vec![ob.clone()]) }
}

impl FromIterator<Ob> for Ty {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Ob>
    {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Ty {
    type Item = Ob;
    type IntoIter = std::vec::IntoIter<Ob>;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Ty {
    type Item = &'a Ob;
    type IntoIter = std::slice::Iter<'a, Ob>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl Ty {
    /// The empty type.
    pub fn unit() -> Self { Self(Vec::new()) }

    /// A type holding the single self-dual object `name`.
    pub fn new(name: &str) -> Self { Ob::new(name).into() }

    /// Return the number of objects.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if `self` is the unit.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return `true` if `self` holds exactly one object.
    pub fn is_atomic(&self) -> bool { self.0.len() == 1 }

    /// Return the single object of an atomic type.
    pub fn atom(&self) -> DiagResult<&Ob> {
        match self.0.as_slice() {
            [ob] => Ok(ob),
            _ => Err(DiagramError::NotAtomic(self.clone())),
        }
    }

    /// Return the `k`-th object.
    pub fn get(&self, k: usize) -> Option<&Ob> { self.0.get(k) }

    /// Return an iterator over references to all objects.
    pub fn iter(&self) -> std::slice::Iter<'_, Ob> { self.0.iter() }

    /// Return the objects as a slice.
    pub fn as_slice(&self) -> &[Ob] { &self.0 }

    /// Concatenate `self` with `other`.
    pub fn tensor(&self, other: &Ty) -> Self {
        self.0.iter().chain(other.0.iter()).cloned().collect()
    }

    /// Concatenate all types in order.
    pub fn tensor_all<'a, I>(tys: I) -> Self
    where I: IntoIterator<Item = &'a Ty>
    {
        tys.into_iter().flat_map(|ty| ty.0.iter().cloned()).collect()
    }

    /// Return the `n`-fold concatenation of `self`, the unit for `n == 0`.
    pub fn pow(&self, n: usize) -> Self {
        std::iter::repeat(self.0.iter()).take(n).flatten().cloned().collect()
    }

    /// Return the sub-type over a range of positions, clamped to the length of
    /// `self`.
    pub fn slice<R>(&self, range: R) -> Self
    where R: RangeBounds<usize>
    {
        use std::ops::Bound;
        let start =
            match range.start_bound() {
                Bound::Included(k) => *k,
                Bound::Excluded(k) => k.saturating_add(1),
                Bound::Unbounded => 0,
            }
            .min(self.len());
        let end =
            match range.end_bound() {
                Bound::Included(k) => k.saturating_add(1),
                Bound::Excluded(k) => *k,
                Bound::Unbounded => self.len(),
            }
            .min(self.len())
            .max(start);
        Self(self.0[start..end].to_vec())
    }

    /// Return the dual type: objects in reverse order, each dualized.
    pub fn dual(&self) -> Self {
        self.0.iter().rev().map(Ob::dual).collect()
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Ty()")
        } else {
            write!(f, "{}", self.0.iter().join(" @ "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duals() {
        let x = Ob::new("x");
        let a = Ob::rigid("a");
        assert_eq!(x.dual(), x);
        assert_eq!(x.l(), x.r());
        assert_ne!(a.dual(), a);
        assert_eq!(a.dual().dual(), a);
        assert!(a.dual().is_adjoint());
        let ty: Ty = [a.clone(), x.clone()].into_iter().collect();
        assert_eq!(ty.dual(), [x.clone(), a.dual()].into_iter().collect());
        assert_eq!(ty.dual().dual(), ty);
    }

    #[test]
    fn monoid() {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let z = Ty::new("z");
        assert_eq!(x.tensor(&y).tensor(&z), x.tensor(&y.tensor(&z)));
        assert_eq!(Ty::unit().tensor(&x), x);
        assert_eq!(x.tensor(&Ty::unit()), x);
        assert_eq!(x.pow(0), Ty::unit());
        assert_eq!(x.tensor(&y).pow(2), Ty::tensor_all([&x, &y, &x, &y]));
        assert_eq!(x.tensor(&y).pow(2).len(), 4);
    }

    #[test]
    fn slicing() {
        let ty = Ty::tensor_all([&Ty::new("a"), &Ty::new("b"), &Ty::new("c")]);
        assert_eq!(ty.slice(..1), Ty::new("a"));
        assert_eq!(ty.slice(1..), Ty::new("b").tensor(&Ty::new("c")));
        assert_eq!(ty.slice(1..=1), Ty::new("b"));
        assert_eq!(ty.slice(2..1), Ty::unit());
        assert_eq!(ty.slice(5..), Ty::unit());
    }

    #[test]
    fn slicing_extreme_bounds() {
        use std::ops::Bound;
        let ty = Ty::tensor_all([&Ty::new("a"), &Ty::new("b")]);
        assert_eq!(ty.slice(..=usize::MAX), ty);
        assert_eq!(ty.slice(1..=usize::MAX), Ty::new("b"));
        assert_eq!(ty.slice((Bound::Excluded(usize::MAX), Bound::Unbounded)), Ty::unit());
        assert_eq!(ty.slice((Bound::Excluded(0), Bound::Included(usize::MAX))), Ty::new("b"));
    }

    #[test]
    fn atoms() {
        assert_eq!(Ty::new("x").atom().unwrap(), &Ob::new("x"));
        assert!(matches!(Ty::unit().atom(), Err(DiagramError::NotAtomic(_))));
        assert!(Ty::new("x").pow(2).atom().is_err());
        assert_eq!(Ty::new("x").tensor(&Ty::new("y")).to_string(), "x @ y");
        assert_eq!(Ty::unit().to_string(), "Ty()");
    }
}
