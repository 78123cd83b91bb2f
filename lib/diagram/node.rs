use std::fmt;
use crate::{
    diagram::{ DiagramError, DiagResult },
    param::Param,
    ty::{ Ob, Ty },
};

/// The colour of a spider.
///
/// Spiders of different colours are generators of different Frobenius
/// algebras and never fuse with each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpiderKind {
    /// A spider of the free hypergraph category.
    Plain,
    /// A Z-spider of the ZX-calculus.
    Z,
    /// An X-spider of the ZX-calculus.
    X,
    /// A Y-spider of the ZX-calculus.
    Y,
}

impl fmt::Display for SpiderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Spider"),
            Self::Z => write!(f, "Z"),
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
        }
    }
}

/// A generic generator: a named box with a domain, a codomain, and an optional
/// parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxNode {
    pub(crate) name: String,
    pub(crate) dom: Ty,
    pub(crate) cod: Ty,
    pub(crate) data: Option<Param>,
    pub(crate) is_dagger: bool,
}

impl BoxNode {
    /// Create a new box.
    pub fn new(name: &str, dom: Ty, cod: Ty) -> Self {
        Self { name: name.to_string(), dom, cod, data: None, is_dagger: false }
    }

    /// Attach a parameter to the box.
    pub fn with_data(mut self, data: Param) -> Self {
        self.data = Some(data);
        self
    }

    /// Return the name of the box.
    pub fn name(&self) -> &str { &self.name }

    /// Return the domain.
    pub fn dom(&self) -> &Ty { &self.dom }

    /// Return the codomain.
    pub fn cod(&self) -> &Ty { &self.cod }

    /// Return the attached parameter, if any.
    pub fn data(&self) -> Option<&Param> { self.data.as_ref() }

    /// Return `true` if `self` is the formal dagger of a named box.
    pub fn is_dagger(&self) -> bool { self.is_dagger }

    /// Return the formal dagger, exchanging domain and codomain.
    pub fn dagger(&self) -> Self {
        Self {
            name: self.name.clone(),
            dom: self.cod.clone(),
            cod: self.dom.clone(),
            data: self.data.clone(),
            is_dagger: !self.is_dagger,
        }
    }
}

impl fmt::Display for BoxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(data) = &self.data { write!(f, "({})", data)?; }
        if self.is_dagger { write!(f, "†")?; }
        Ok(())
    }
}

/// A spider with `n_in` legs in and `n_out` legs out on one atomic object,
/// with an optional phase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpiderNode {
    pub(crate) kind: SpiderKind,
    pub(crate) n_in: usize,
    pub(crate) n_out: usize,
    pub(crate) ob: Ob,
    pub(crate) phase: Option<Param>,
}

impl SpiderNode {
    /// Create a new spider over an atomic, self-dual type.
    pub fn new(
        kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        ty: &Ty,
        phase: Option<Param>,
    ) -> DiagResult<Self>
    {
        let ob = ty.atom()?;
        if !ob.is_self_dual() { return Err(DiagramError::NotSelfDual(ob.clone())); }
        Ok(Self { kind, n_in, n_out, ob: ob.clone(), phase })
    }

    pub(crate) fn on_ob(
        kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        ob: &Ob,
        phase: Option<Param>,
    ) -> Self
    {
        Self { kind, n_in, n_out, ob: ob.clone(), phase }
    }

    /// Return the colour.
    pub fn kind(&self) -> SpiderKind { self.kind }

    /// Return the number of legs in.
    pub fn n_in(&self) -> usize { self.n_in }

    /// Return the number of legs out.
    pub fn n_out(&self) -> usize { self.n_out }

    /// Return the object on every leg.
    pub fn ob(&self) -> &Ob { &self.ob }

    /// Return the atomic type on every leg.
    pub fn ty(&self) -> Ty { Ty::from(&self.ob) }

    /// Return the phase, if any.
    pub fn phase(&self) -> Option<&Param> { self.phase.as_ref() }

    /// Return the domain, `ty ** n_in`.
    pub fn dom(&self) -> Ty { self.ty().pow(self.n_in) }

    /// Return the codomain, `ty ** n_out`.
    pub fn cod(&self) -> Ty { self.ty().pow(self.n_out) }

    /// Return a copy with the phase removed.
    pub fn without_phase(&self) -> Self {
        Self { phase: None, ..self.clone() }
    }

    /// Return the dagger: legs in and out are exchanged and the phase is
    /// negated.
    pub fn dagger(&self) -> Self {
        Self {
            n_in: self.n_out,
            n_out: self.n_in,
            phase: self.phase.clone().map(|ph| -ph),
            ..self.clone()
        }
    }

    /// Return the rotation of `self`, exchanging legs in and out while keeping
    /// the phase.
    pub fn rotate(&self) -> Self {
        Self { n_in: self.n_out, n_out: self.n_in, ..self.clone() }
    }
}

impl fmt::Display for SpiderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}, {}", self.kind, self.n_in, self.n_out, self.ob)?;
        if let Some(ph) = &self.phase { write!(f, ", {}", ph)?; }
        write!(f, ")")
    }
}

/// A single generator placed in a layer of a [`Diagram`][super::Diagram].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A generic named box.
    Box(BoxNode),
    /// Exchanges two adjacent wires: `a @ b -> b @ a`.
    Swap(Ob, Ob),
    /// Duality witness `a @ b -> Ty()` where `b == a.dual()`.
    Cup(Ob, Ob),
    /// Duality witness `Ty() -> a @ b` where `b == a.dual()`.
    Cap(Ob, Ob),
    /// A spider.
    Spider(SpiderNode),
}

impl From<BoxNode> for Node {
    fn from(b: BoxNode) -> Self { Self::Box(b) }
}

impl From<SpiderNode> for Node {
    fn from(s: SpiderNode) -> Self { Self::Spider(s) }
}

impl Node {
    /// Create a swap between two atomic types.
    pub fn swap(left: &Ty, right: &Ty) -> DiagResult<Self> {
        Ok(Self::Swap(left.atom()?.clone(), right.atom()?.clone()))
    }

    /// Create a cup, checking that `right` is the dual of `left`.
    pub fn cup(left: &Ob, right: &Ob) -> DiagResult<Self> {
        if left.dual() != *right {
            return Err(DiagramError::NotDualPair(left.clone(), right.clone()));
        }
        Ok(Self::Cup(left.clone(), right.clone()))
    }

    /// Create a cap, checking that `right` is the dual of `left`.
    pub fn cap(left: &Ob, right: &Ob) -> DiagResult<Self> {
        if left.dual() != *right {
            return Err(DiagramError::NotDualPair(left.clone(), right.clone()));
        }
        Ok(Self::Cap(left.clone(), right.clone()))
    }

    /// Check that a cup or cap joins a dual pair and that a spider's legs are
    /// self-dual.
    pub fn check(&self) -> DiagResult<()> {
        match self {
            Self::Cup(a, b) | Self::Cap(a, b) if a.dual() != *b => {
                Err(DiagramError::NotDualPair(a.clone(), b.clone()))
            },
            Self::Spider(s) if !s.ob.is_self_dual() => {
                Err(DiagramError::NotSelfDual(s.ob.clone()))
            },
            _ => Ok(()),
        }
    }

    /// Return the domain.
    pub fn dom(&self) -> Ty {
        match self {
            Self::Box(b) => b.dom.clone(),
            Self::Swap(a, b) | Self::Cup(a, b)
                => [a.clone(), b.clone()].into_iter().collect(),
            Self::Cap(..) => Ty::unit(),
            Self::Spider(s) => s.dom(),
        }
    }

    /// Return the codomain.
    pub fn cod(&self) -> Ty {
        match self {
            Self::Box(b) => b.cod.clone(),
            Self::Swap(a, b) => [b.clone(), a.clone()].into_iter().collect(),
            Self::Cup(..) => Ty::unit(),
            Self::Cap(a, b) => [a.clone(), b.clone()].into_iter().collect(),
            Self::Spider(s) => s.cod(),
        }
    }

    /// Return the number of wires entering the node.
    pub fn n_in(&self) -> usize {
        match self {
            Self::Box(b) => b.dom.len(),
            Self::Swap(..) | Self::Cup(..) => 2,
            Self::Cap(..) => 0,
            Self::Spider(s) => s.n_in,
        }
    }

    /// Return the number of wires leaving the node.
    pub fn n_out(&self) -> usize {
        match self {
            Self::Box(b) => b.cod.len(),
            Self::Swap(..) | Self::Cap(..) => 2,
            Self::Cup(..) => 0,
            Self::Spider(s) => s.n_out,
        }
    }

    /// Return the dagger of the node.
    pub fn dagger(&self) -> Self {
        match self {
            Self::Box(b) => Self::Box(b.dagger()),
            Self::Swap(a, b) => Self::Swap(b.clone(), a.clone()),
            Self::Cup(a, b) => Self::Cap(a.clone(), b.clone()),
            Self::Cap(a, b) => Self::Cup(a.clone(), b.clone()),
            Self::Spider(s) => Self::Spider(s.dagger()),
        }
    }

    /// Return `true` if `self` is one of the structural generators (swaps,
    /// cups, caps, and spiders) rather than a named box.
    pub fn is_structural(&self) -> bool { !matches!(self, Self::Box(_)) }

    /// Return `true` if `self` is `Spider`.
    pub fn is_spider(&self) -> bool { matches!(self, Self::Spider(_)) }

    /// Return `true` if `self` is `Spider` and satisfies some predicate.
    pub fn is_spider_and<F>(&self, pred: F) -> bool
    where F: FnOnce(&SpiderNode) -> bool
    {
        match self {
            Self::Spider(s) => pred(s),
            _ => false,
        }
    }

    /// Return the phase or parameter carried by the node, if any.
    pub fn param(&self) -> Option<&Param> {
        match self {
            Self::Box(b) => b.data.as_ref(),
            Self::Spider(s) => s.phase.as_ref(),
            _ => None,
        }
    }

    /// Apply a mapping function to the phase or parameter carried by the node.
    pub(crate) fn map_param<F>(&self, f: F) -> Self
    where F: FnOnce(&Param) -> Param
    {
        match self {
            Self::Box(b) => Self::Box(BoxNode { data: b.data.as_ref().map(f), ..b.clone() }),
            Self::Spider(s) => Self::Spider(SpiderNode { phase: s.phase.as_ref().map(f), ..s.clone() }),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box(b) => write!(f, "{}", b),
            Self::Swap(a, b) => write!(f, "Swap({}, {})", a, b),
            Self::Cup(a, b) => write!(f, "Cup({}, {})", a, b),
            Self::Cap(a, b) => write!(f, "Cap({}, {})", a, b),
            Self::Spider(s) => write!(f, "{}", s),
        }
    }
}
