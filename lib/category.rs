//! Target categories for diagrams and functors.
//!
//! A [`Category`] bundles the operations a [`Functor`][crate::functor::Functor]
//! needs from its codomain: identities, both compositions, daggers, and the
//! structural morphisms (swaps, cups, caps, and spiders). [`Hypergraph`] is the
//! category of [`Diagram`]s, configured by the [`Factories`] used to build its
//! structural morphisms; [`Pro`] forgets everything but wire counts.

use std::fmt;
use crate::{
    diagram::{
        Diagram,
        DiagramError,
        DiagResult,
        Node,
        SpiderKind,
        SpiderNode,
    },
    param::Param,
    ty::{ Ob, Ty },
};

/// A dagger compact category with chosen spiders.
pub trait Category {
    /// Objects of the category.
    type Ob: Clone + fmt::Debug + PartialEq;

    /// Morphisms of the category.
    type Ar: Clone + fmt::Debug + PartialEq;

    /// Return the monoidal unit.
    fn unit(&self) -> Self::Ob;

    /// Return the monoidal product of two objects.
    fn tensor_ob(&self, a: &Self::Ob, b: &Self::Ob) -> Self::Ob;

    /// Return the dual of an object.
    fn dual_ob(&self, a: &Self::Ob) -> Self::Ob;

    /// Return the identity on an object.
    fn id(&self, a: &Self::Ob) -> Self::Ar;

    /// Return the codomain of a morphism.
    fn cod_of(&self, f: &Self::Ar) -> Self::Ob;

    /// Compose `f` then `g`.
    fn then(&self, f: &Self::Ar, g: &Self::Ar) -> DiagResult<Self::Ar>;

    /// Place `g` to the right of `f`.
    fn tensor(&self, f: &Self::Ar, g: &Self::Ar) -> Self::Ar;

    /// Return the dagger of a morphism.
    fn dagger(&self, f: &Self::Ar) -> Self::Ar;

    /// Return the braid exchanging `a` and `b`.
    fn swap(&self, a: &Self::Ob, b: &Self::Ob) -> DiagResult<Self::Ar>;

    /// Return the cups on `a ⊗ b`, where `b` is the dual of `a`.
    fn cups(&self, a: &Self::Ob, b: &Self::Ob) -> DiagResult<Self::Ar>;

    /// Return the caps on `a ⊗ b`, where `b` is the dual of `a`.
    fn caps(&self, a: &Self::Ob, b: &Self::Ob) -> DiagResult<Self::Ar>;

    /// Return the spider with `n_in` legs in and `n_out` legs out on `a`, each
    /// atomic component of `a` carrying `phase`.
    fn spiders(
        &self,
        kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        a: &Self::Ob,
        phase: Option<&Param>,
    ) -> DiagResult<Self::Ar>;
}

/// Constructors for the atomic structural morphisms of a [`Hypergraph`].
#[derive(Copy, Clone)]
pub struct Factories {
    /// Exchange two atomic objects.
    pub swap: fn(&Ob, &Ob) -> DiagResult<Diagram>,
    /// Cup on an atomic object and its dual.
    pub cup: fn(&Ob, &Ob) -> DiagResult<Diagram>,
    /// Cap on an atomic object and its dual.
    pub cap: fn(&Ob, &Ob) -> DiagResult<Diagram>,
    /// Spider on a single atomic object.
    pub spider: fn(SpiderKind, usize, usize, &Ob, Option<Param>) -> Diagram,
}

impl fmt::Debug for Factories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factories").finish_non_exhaustive()
    }
}

fn literal_swap(a: &Ob, b: &Ob) -> DiagResult<Diagram> {
    Ok(Node::Swap(a.clone(), b.clone()).into())
}

fn literal_cup(a: &Ob, b: &Ob) -> DiagResult<Diagram> {
    Node::cup(a, b).map(Diagram::from)
}

fn literal_cap(a: &Ob, b: &Ob) -> DiagResult<Diagram> {
    Node::cap(a, b).map(Diagram::from)
}

fn literal_spider(
    kind: SpiderKind,
    n_in: usize,
    n_out: usize,
    ob: &Ob,
    phase: Option<Param>,
) -> Diagram
{
    SpiderNode::on_ob(kind, n_in, n_out, ob, phase).into()
}

fn z_cup(a: &Ob, b: &Ob) -> DiagResult<Diagram> {
    if a.dual() != *b {
        return Err(DiagramError::NotDualPair(a.clone(), b.clone()));
    }
    if !a.is_self_dual() { return Err(DiagramError::NotSelfDual(a.clone())); }
    Ok(SpiderNode::on_ob(SpiderKind::Z, 2, 0, a, None).into())
}

fn z_cap(a: &Ob, b: &Ob) -> DiagResult<Diagram> {
    if a.dual() != *b {
        return Err(DiagramError::NotDualPair(a.clone(), b.clone()));
    }
    if !a.is_self_dual() { return Err(DiagramError::NotSelfDual(a.clone())); }
    Ok(SpiderNode::on_ob(SpiderKind::Z, 0, 2, a, None).into())
}

fn zx_spider(
    kind: SpiderKind,
    n_in: usize,
    n_out: usize,
    ob: &Ob,
    phase: Option<Param>,
) -> Diagram
{
    let kind = if kind == SpiderKind::Plain { SpiderKind::Z } else { kind };
    SpiderNode::on_ob(kind, n_in, n_out, ob, phase).into()
}

impl Factories {
    /// Literal [`Node::Swap`], [`Node::Cup`], [`Node::Cap`], and
    /// [`Node::Spider`] generators.
    pub fn frobenius() -> Self {
        Self {
            swap: literal_swap,
            cup: literal_cup,
            cap: literal_cap,
            spider: literal_spider,
        }
    }

    /// Cups and caps as two-legged Z-spiders, with uncoloured spiders drawn as
    /// Z-spiders.
    pub fn zx() -> Self {
        Self {
            swap: literal_swap,
            cup: z_cup,
            cap: z_cap,
            spider: zx_spider,
        }
    }
}

/// The free hypergraph category: objects are [`Ty`]s and morphisms are
/// [`Diagram`]s.
#[derive(Copy, Clone, Debug)]
pub struct Hypergraph {
    factories: Factories,
}

impl Default for Hypergraph {
    fn default() -> Self { Self::frobenius() }
}

impl Hypergraph {
    /// Create a new category with the given structural constructors.
    pub fn new(factories: Factories) -> Self { Self { factories } }

    /// Diagrams with literal structural generators.
    pub fn frobenius() -> Self { Self::new(Factories::frobenius()) }

    /// ZX diagrams.
    pub fn zx() -> Self { Self::new(Factories::zx()) }

    /// Return the structural constructors.
    pub fn factories(&self) -> &Factories { &self.factories }

    /// Build a spider over a possibly composite type from one spider per
    /// object, optionally with one phase per object.
    ///
    /// The per-object spiders are placed side by side and their legs are then
    /// braided so that the domain is `ty ** n_in` and the codomain is
    /// `ty ** n_out`.
    ///
    /// Fails if `phases` does not hold exactly one entry per object of `ty`, or
    /// if any object of `ty` is not self-dual.
    pub fn spiders_with(
        &self,
        kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        ty: &Ty,
        phases: Option<&[Param]>,
    ) -> DiagResult<Diagram>
    {
        if let Some(ph) = phases {
            if ph.len() != ty.len() {
                return Err(DiagramError::PhaseCount(ty.len(), ph.len()));
            }
        }
        if let Some(ob) = ty.iter().find(|ob| !ob.is_self_dual()) {
            return Err(DiagramError::NotSelfDual(ob.clone()));
        }
        let blocks: Vec<Diagram> =
            ty.iter().enumerate()
            .map(|(i, ob)| {
                let phase = phases.map(|ph| ph[i].clone());
                (self.factories.spider)(kind, n_in, n_out, ob, phase)
            })
            .collect();
        let mut result = Diagram::tensor_all(blocks.iter());
        for (i, ob) in ty.iter().enumerate() {
            let t = Ty::from(ob);
            for j in 0..n_in.saturating_sub(1) {
                let dom = result.dom().clone();
                let a = i * j + i + j;
                let b = i * n_in + j;
                let braid =
                    Diagram::id(&dom.slice(..a))
                    .tensor(&self.swap(&t, &dom.slice(a..b))?)
                    .tensor(&Diagram::id(&dom.slice(b + 1..)));
                result = braid.then(&result)?;
            }
            for j in 0..n_out.saturating_sub(1) {
                let cod = result.cod().clone();
                let a = i * j + i + j;
                let b = i * n_out + j;
                let braid =
                    Diagram::id(&cod.slice(..a))
                    .tensor(&self.swap(&cod.slice(a..b), &t)?)
                    .tensor(&Diagram::id(&cod.slice(b + 1..)));
                result = result.then(&braid)?;
            }
        }
        Ok(result)
    }
}

impl Category for Hypergraph {
    type Ob = Ty;
    type Ar = Diagram;

    fn unit(&self) -> Ty { Ty::unit() }

    fn tensor_ob(&self, a: &Ty, b: &Ty) -> Ty { a.tensor(b) }

    fn dual_ob(&self, a: &Ty) -> Ty { a.dual() }

    fn id(&self, a: &Ty) -> Diagram { Diagram::id(a) }

    fn cod_of(&self, f: &Diagram) -> Ty { f.cod().clone() }

    fn then(&self, f: &Diagram, g: &Diagram) -> DiagResult<Diagram> {
        f.then(g)
    }

    fn tensor(&self, f: &Diagram, g: &Diagram) -> Diagram { f.tensor(g) }

    fn dagger(&self, f: &Diagram) -> Diagram { f.dagger() }

    fn swap(&self, left: &Ty, right: &Ty) -> DiagResult<Diagram> {
        let mut result = Diagram::id(&left.tensor(right));
        for (i, a) in left.iter().enumerate().rev() {
            for (k, b) in right.iter().enumerate() {
                let step =
                    Diagram::id(&left.slice(..i).tensor(&right.slice(..k)))
                    .tensor(&(self.factories.swap)(a, b)?)
                    .tensor(
                        &Diagram::id(
                            &right.slice(k + 1..).tensor(&left.slice(i + 1..)))
                    );
                result = result.then(&step)?;
            }
        }
        Ok(result)
    }

    fn cups(&self, left: &Ty, right: &Ty) -> DiagResult<Diagram> {
        if left.len() != right.len() {
            return Err(DiagramError::TypeMismatch(left.dual(), right.clone()));
        }
        let n = left.len();
        let mut result = Diagram::id(&left.tensor(right));
        for i in (0..n).rev() {
            let (a, b) = (&left.as_slice()[i], &right.as_slice()[n - 1 - i]);
            let step =
                Diagram::id(&left.slice(..i))
                .tensor(&(self.factories.cup)(a, b)?)
                .tensor(&Diagram::id(&right.slice(n - i..)));
            result = result.then(&step)?;
        }
        Ok(result)
    }

    fn caps(&self, left: &Ty, right: &Ty) -> DiagResult<Diagram> {
        if left.len() != right.len() {
            return Err(DiagramError::TypeMismatch(left.dual(), right.clone()));
        }
        let n = left.len();
        let mut result = Diagram::id(&Ty::unit());
        for i in 0..n {
            let (a, b) = (&left.as_slice()[i], &right.as_slice()[n - 1 - i]);
            let step =
                Diagram::id(&left.slice(..i))
                .tensor(&(self.factories.cap)(a, b)?)
                .tensor(&Diagram::id(&right.slice(n - i..)));
            result = result.then(&step)?;
        }
        Ok(result)
    }

    fn spiders(
        &self,
        kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        a: &Ty,
        phase: Option<&Param>,
    ) -> DiagResult<Diagram>
    {
        let phases: Option<Vec<Param>> =
            phase.map(|ph| vec![ph.clone(); a.len()]);
        self.spiders_with(kind, n_in, n_out, a, phases.as_deref())
    }
}

/// A pair of wire counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arity {
    pub dom: usize,
    pub cod: usize,
}

impl Arity {
    pub fn new(dom: usize, cod: usize) -> Self { Self { dom, cod } }
}

/// The category of wire counts: objects are natural numbers and a morphism
/// only records how many wires it takes and returns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pro;

impl Category for Pro {
    type Ob = usize;
    type Ar = Arity;

    fn unit(&self) -> usize { 0 }

    fn tensor_ob(&self, a: &usize, b: &usize) -> usize { a + b }

    fn dual_ob(&self, a: &usize) -> usize { *a }

    fn id(&self, a: &usize) -> Arity { Arity::new(*a, *a) }

    fn cod_of(&self, f: &Arity) -> usize { f.cod }

    fn then(&self, f: &Arity, g: &Arity) -> DiagResult<Arity> {
        if f.cod != g.dom {
            return Err(DiagramError::ArityMismatch(f.cod, g.dom));
        }
        Ok(Arity::new(f.dom, g.cod))
    }

    fn tensor(&self, f: &Arity, g: &Arity) -> Arity {
        Arity::new(f.dom + g.dom, f.cod + g.cod)
    }

    fn dagger(&self, f: &Arity) -> Arity { Arity::new(f.cod, f.dom) }

    fn swap(&self, a: &usize, b: &usize) -> DiagResult<Arity> {
        Ok(Arity::new(a + b, a + b))
    }

    fn cups(&self, a: &usize, b: &usize) -> DiagResult<Arity> {
        if a != b { return Err(DiagramError::ArityMismatch(*a, *b)); }
        Ok(Arity::new(a + b, 0))
    }

    fn caps(&self, a: &usize, b: &usize) -> DiagResult<Arity> {
        if a != b { return Err(DiagramError::ArityMismatch(*a, *b)); }
        Ok(Arity::new(0, a + b))
    }

    fn spiders(
        &self,
        _kind: SpiderKind,
        n_in: usize,
        n_out: usize,
        a: &usize,
        _phase: Option<&Param>,
    ) -> DiagResult<Arity>
    {
        Ok(Arity::new(n_in * a, n_out * a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frobenius_spiders() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let xy = x.tensor(&y);
        let cat = Hypergraph::frobenius();
        for (n, m) in [(0, 0), (1, 2), (2, 1), (3, 2), (2, 3)] {
            let s = cat.spiders(SpiderKind::Plain, n, m, &xy, None)?;
            assert_eq!(s.dom(), &xy.pow(n));
            assert_eq!(s.cod(), &xy.pow(m));
        }
        let single = cat.spiders(SpiderKind::Plain, 2, 1, &x, None)?;
        assert_eq!(single, Diagram::spider(2, 1, &x, None)?);
        assert_eq!(cat.spiders(SpiderKind::Plain, 2, 3, &Ty::unit(), None)?, Diagram::id(&Ty::unit()));
        Ok(())
    }

    #[test]
    fn phase_count() {
        let xy = Ty::new("x").tensor(&Ty::new("y"));
        let cat = Hypergraph::frobenius();
        let phases = [Param::symbol("a")];
        assert!(matches!(
            cat.spiders_with(SpiderKind::Z, 1, 1, &xy, Some(&phases)),
            Err(DiagramError::PhaseCount(2, 1))
        ));
        let phases = [Param::symbol("a"), Param::symbol("b")];
        let s = cat.spiders_with(SpiderKind::Z, 1, 1, &xy, Some(&phases)).unwrap();
        assert_eq!(s.free_symbols().len(), 2);
    }

    #[test]
    fn rigid_spiders() {
        let a = Ob::rigid("a");
        let ty = Ty::new("x").tensor(&Ty::from(a.clone()));
        let cat = Hypergraph::frobenius();
        assert!(matches!(
            cat.spiders(SpiderKind::Plain, 1, 2, &ty, None),
            Err(DiagramError::NotSelfDual(ob)) if ob == a
        ));
        let zx = Hypergraph::zx();
        let at = Ty::from(a.clone());
        assert!(matches!(
            zx.cups(&at, &at.dual()),
            Err(DiagramError::NotSelfDual(ob)) if ob == a
        ));
        assert!(matches!(
            zx.caps(&at, &at.dual()),
            Err(DiagramError::NotSelfDual(ob)) if ob == a
        ));
    }

    #[test]
    fn zx_factories() -> anyhow::Result<()> {
        let q = Ty::new("q");
        let cat = Hypergraph::zx();
        let cups = cat.cups(&q, &q)?;
        assert_eq!(cups, SpiderNode::new(SpiderKind::Z, 2, 0, &q, None)?.into());
        let caps = cat.caps(&q.pow(2), &q.pow(2))?;
        assert_eq!(caps.len(), 2);
        assert!(caps.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::Z)));
        let s = cat.spiders(SpiderKind::Plain, 1, 2, &q, None)?;
        assert!(s.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::Z)));
        let x = cat.spiders(SpiderKind::X, 1, 2, &q, None)?;
        assert!(x.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::X)));
        Ok(())
    }

    #[test]
    fn braids() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let z = Ty::new("z");
        let cat = Hypergraph::frobenius();
        let xy = x.tensor(&y);
        assert_eq!(cat.swap(&xy, &z)?, Diagram::swap(&xy, &z));
        assert_eq!(cat.swap(&z, &xy)?, Diagram::swap(&z, &xy));
        let there_and_back = cat.swap(&xy, &z)?.then(&cat.swap(&z, &xy)?)?;
        assert_eq!(there_and_back.fusion_form()?, Diagram::id(&xy.tensor(&z)).fusion_form()?);
        Ok(())
    }

    #[test]
    fn pro() -> anyhow::Result<()> {
        let f = Arity::new(2, 1);
        let g = Arity::new(1, 3);
        assert_eq!(Pro.then(&f, &g)?, Arity::new(2, 3));
        assert!(matches!(Pro.then(&g, &f), Err(DiagramError::ArityMismatch(3, 2))));
        assert_eq!(Pro.tensor(&f, &g), Arity::new(3, 4));
        assert_eq!(Pro.dagger(&f), Arity::new(1, 2));
        assert_eq!(Pro.cups(&2, &2)?, Arity::new(4, 0));
        assert_eq!(Pro.spiders(SpiderKind::Plain, 2, 1, &3, None)?, Arity::new(6, 3));
        Ok(())
    }
}
