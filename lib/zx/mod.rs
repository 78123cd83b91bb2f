//! Diagrams in the ZX-calculus.
//!
//! ZX diagrams are [`Diagram`]s over the self-dual qubit object `q`, built
//! from Z-, X-, and Y-coloured spiders, the Hadamard box, [scalars][Scalar],
//! and swaps. Cups and caps of the [ZX category][Hypergraph::zx] are
//! two-legged Z-spiders.
//!
//! ```
//! # use spider_calc::{ zx, phase::Phase, param::Param };
//! let d = zx::z(1, 2, None).then(&(zx::x(1, 1, Some(Param::from(Phase::pi()))).tensor(&zx::id(1)))).unwrap();
//! assert_eq!(d.dom(), &zx::qubits(1));
//! assert_eq!(d.cod(), &zx::qubits(2));
//! ```

use num_complex::Complex64 as C64;
use num_traits::ToPrimitive;
use crate::{
    category::{ Category, Hypergraph },
    diagram::{ BoxNode, Diagram, DiagResult, Node, SpiderKind, SpiderNode },
    param::Param,
    ty::{ Ob, Ty },
};

pub mod graph;
pub use graph::*;

/// Return the qubit object.
pub fn qubit() -> Ob { Ob::new("q") }

/// Return the type of `n` qubits.
pub fn qubits(n: usize) -> Ty { Ty::from(qubit()).pow(n) }

/// Create a Z-spider.
pub fn z(n_in: usize, n_out: usize, phase: Option<Param>) -> Diagram {
    SpiderNode::on_ob(SpiderKind::Z, n_in, n_out, &qubit(), phase).into()
}

/// Create an X-spider.
pub fn x(n_in: usize, n_out: usize, phase: Option<Param>) -> Diagram {
    SpiderNode::on_ob(SpiderKind::X, n_in, n_out, &qubit(), phase).into()
}

/// Create a Y-spider.
pub fn y(n_in: usize, n_out: usize, phase: Option<Param>) -> Diagram {
    SpiderNode::on_ob(SpiderKind::Y, n_in, n_out, &qubit(), phase).into()
}

/// Create a Hadamard box.
pub fn had() -> Diagram { Diagram::new_box("H", qubits(1), qubits(1)) }

/// Create the swap of two qubits.
pub fn swap() -> Diagram { Diagram::swap(&qubits(1), &qubits(1)) }

/// Create the identity on `n` qubits.
pub fn id(n: usize) -> Diagram { Diagram::id(&qubits(n)) }

/// Create the permutation of `perm.len()` qubits sending input `i` to output
/// `perm[i]`.
pub fn permutation(perm: &[usize]) -> DiagResult<Diagram> {
    Diagram::permutation(perm, &qubits(perm.len()))
}

/// A complex scalar factor, stored as a box on the empty type.
///
/// The box is named `scalar(value)`; its formal dagger is read back as the
/// complex conjugate.
///
/// ```
/// # use num_complex::Complex64 as C64;
/// # use spider_calc::zx::Scalar;
/// let s = Scalar(C64::new(0.0, 0.5));
/// assert_eq!(s.to_box().name(), "scalar(0+0.5i)");
/// assert_eq!(Scalar::from_box(&s.to_box().dagger()), Some(s.dagger()));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scalar(pub C64);

impl Scalar {
    /// Return the complex value.
    pub fn value(self) -> C64 { self.0 }

    /// Return the complex conjugate.
    pub fn dagger(self) -> Self { Self(self.0.conj()) }

    /// Convert to a box on the empty type.
    pub fn to_box(self) -> BoxNode {
        BoxNode::new(&format!("scalar({})", self.0), Ty::unit(), Ty::unit())
    }

    /// Convert to a single-box diagram.
    pub fn to_diagram(self) -> Diagram { self.to_box().into() }

    /// Read a scalar back from a box created by [`Self::to_box`] or its
    /// dagger.
    pub fn from_box(b: &BoxNode) -> Option<Self> {
        if b.is_dagger() { return Self::from_box(&b.dagger()).map(Self::dagger); }
        let value: C64 =
            b.name()
            .strip_prefix("scalar(")
            .and_then(|s| s.strip_suffix(')'))?
            .parse()
            .ok()?;
        let scalar = Self(value);
        (scalar.to_box() == *b).then_some(scalar)
    }
}

/// Create a scalar diagram.
pub fn scalar(value: C64) -> Diagram { Scalar(value).to_diagram() }

/// Differentiate a spider with respect to `var`.
///
/// Returns the factor `0.5i × ∂phase/∂var` and a spider of the same colour and
/// arity whose phase is shifted by -π, or `None` if `var` does not occur in
/// the phase.
pub fn spider_grad(spider: &SpiderNode, var: &str) -> Option<(Scalar, SpiderNode)> {
    let ph = spider.phase().filter(|ph| ph.free_symbols().contains(var))?;
    let d = ph.diff(var).to_f64()?;
    let shifted = SpiderNode { phase: Some(ph.clone() - 1_i64), ..spider.clone() };
    Some((Scalar(C64::new(0.0, 0.5 * d)), shifted))
}

/// Differentiate a diagram with respect to `var` by the product rule.
///
/// Each returned term replaces one spider whose phase depends on `var` by its
/// [gradient][spider_grad]; the derivative is the formal sum of the terms, and
/// an empty list is zero. Boxes are treated as constants.
pub fn grad(diagram: &Diagram, var: &str) -> DiagResult<Vec<Diagram>> {
    let layers = diagram.layers();
    let mut terms: Vec<Diagram> = Vec::new();
    for (i, layer) in layers.iter().enumerate() {
        let Node::Spider(s) = layer.node() else { continue; };
        let Some((coeff, shifted)) = spider_grad(s, var) else { continue; };
        let before = Diagram::new(diagram.dom().clone(), layers[..i].iter().cloned())?;
        let term =
            Diagram::id(layer.left())
            .tensor(&coeff.to_diagram().tensor(&shifted.into()))
            .tensor(&Diagram::id(layer.right()));
        let after = Diagram::new(layer.cod(), layers[i + 1..].iter().cloned())?;
        terms.push(before.then(&term)?.then(&after)?);
    }
    Ok(terms)
}

/// Create `n` nested cups, each a `Z(2, 0)` spider.
pub fn cups(n: usize) -> DiagResult<Diagram> {
    Hypergraph::zx().cups(&qubits(n), &qubits(n))
}

/// Create `n` nested caps, each a `Z(0, 2)` spider.
pub fn caps(n: usize) -> DiagResult<Diagram> {
    Hypergraph::zx().caps(&qubits(n), &qubits(n))
}

/// Create the left-hand side of the bialgebra rule,
/// `Z(1, 2) @ Z(1, 2) >> Id(1) @ SWAP @ Id(1) >> X(2, 1) @ X(2, 1)`.
pub fn bialgebra() -> DiagResult<Diagram> {
    z(1, 2, None).tensor(&z(1, 2, None))
        .then(&id(1).tensor(&swap()).tensor(&id(1)))?
        .then(&x(2, 1, None).tensor(&x(2, 1, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ diagram::DiagramError, phase::Phase };

    #[test]
    fn bialgebra_shape() -> anyhow::Result<()> {
        let bi = bialgebra()?;
        assert_eq!(bi.dom(), &qubits(2));
        assert_eq!(bi.cod(), &qubits(2));
        assert_eq!(bi.len(), 5);
        assert_eq!(bi.offsets(), vec![0, 2, 1, 0, 1]);
        assert!(matches!(bi.fusion_form(), Err(DiagramError::NotFusable(_))));
        Ok(())
    }

    #[test]
    fn bialgebra_normal_form() -> anyhow::Result<()> {
        let bi = bialgebra()?;
        assert_eq!(bi.normal_form(false)?, bi);
        let shuffled = bi.interchange(1, 0, false)?;
        assert_ne!(shuffled, bi);
        assert_eq!(shuffled.normal_form(false)?, bi);
        Ok(())
    }

    #[test]
    fn colours() -> anyhow::Result<()> {
        let ph = Param::from(Phase::pi2());
        let zp = z(2, 1, Some(ph.clone()));
        assert_eq!(zp.dagger(), z(1, 2, Some(-ph.clone())));
        assert_eq!(zp.dagger().dagger(), zp);
        assert!(zp.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::Z)));
        let fused = z(1, 1, Some(ph.clone())).then(&z(1, 1, Some(ph)))?;
        assert_eq!(fused.fusion_form()?, z(1, 1, Some(Param::from(Phase::pi()))).fusion_form()?);
        Ok(())
    }

    #[test]
    fn y_spiders() -> anyhow::Result<()> {
        let pi = Param::from(Phase::pi());
        let yp = y(1, 2, Some(pi.clone()));
        assert!(yp.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::Y)));
        assert_eq!(yp.dagger(), y(2, 1, Some(pi.clone())));
        let half = Param::from(Phase::pi2());
        let fused = y(1, 1, Some(half.clone())).then(&y(1, 1, Some(half)))?;
        assert_eq!(fused.fusion_form()?, y(1, 1, Some(pi)).fusion_form()?);
        assert!(matches!(
            y(1, 1, None).then(&z(1, 1, None))?.fusion_form(),
            Err(DiagramError::NotFusable(_))
        ));
        Ok(())
    }

    #[test]
    fn qubit_permutations() -> anyhow::Result<()> {
        let p = permutation(&[1, 2, 0])?;
        assert_eq!(p.dom(), &qubits(3));
        assert_eq!(p.cod(), &qubits(3));
        assert!(p.nodes().all(|n| matches!(n, Node::Swap(..))));
        assert_eq!(p.to_graph().wires(), &[(2, 3), (0, 4), (1, 5)]);
        assert_eq!(permutation(&[1, 0])?, swap());
        assert!(matches!(permutation(&[1, 1]), Err(DiagramError::NotPermutation(_))));
        Ok(())
    }

    #[test]
    fn scalars() {
        let s = Scalar(C64::new(0.25, -1.5));
        let b = s.to_box();
        assert_eq!(b.dom(), &Ty::unit());
        assert_eq!(b.cod(), &Ty::unit());
        assert_eq!(Scalar::from_box(&b), Some(s));
        assert_eq!(Scalar::from_box(&b.dagger()), Some(Scalar(C64::new(0.25, 1.5))));
        assert_eq!(Scalar::from_box(&BoxNode::new("scalar(x)", Ty::unit(), Ty::unit())), None);
        assert_eq!(Scalar::from_box(&BoxNode::new("scalar(1+0i)", qubits(1), qubits(1))), None);
        let d = scalar(C64::new(2.0, 0.0));
        assert_eq!(d.dagger().as_node(), Some(&Node::Box(Scalar(C64::new(2.0, 0.0)).to_box().dagger())));
        assert_eq!(d.to_graph().count_nodes(), 1);
    }

    #[test]
    fn gradients() -> anyhow::Result<()> {
        let a = Param::symbol("a");
        let pi = Param::from(Phase::pi());
        let s = SpiderNode::new(SpiderKind::X, 1, 2, &qubits(1), Some(a.clone() + a.clone()))?;
        let (coeff, shifted) = spider_grad(&s, "a").unwrap();
        assert_eq!(coeff.value(), C64::new(0.0, 1.0));
        assert_eq!(shifted, SpiderNode::new(SpiderKind::X, 1, 2, &qubits(1), Some(a.clone() + a.clone() + pi.clone()))?);
        assert!(spider_grad(&s, "b").is_none());
        assert!(spider_grad(&s.without_phase(), "a").is_none());

        let d = z(1, 1, Some(a.clone())).then(&x(1, 1, Some(a.clone())))?.then(&had())?;
        let terms = grad(&d, "a")?;
        assert_eq!(terms.len(), 2);
        let half_i = scalar(C64::new(0.0, 0.5));
        let first =
            half_i.tensor(&z(1, 1, Some(a.clone() + pi.clone())))
            .then(&x(1, 1, Some(a.clone())))?
            .then(&had())?;
        assert_eq!(terms[0], first);
        let second =
            z(1, 1, Some(a.clone()))
            .then(&half_i.tensor(&x(1, 1, Some(a.clone() + pi))))?
            .then(&had())?;
        assert_eq!(terms[1], second);
        assert!(terms.iter().all(|t| t.dom() == d.dom() && t.cod() == d.cod()));
        assert!(grad(&d, "b")?.is_empty());
        Ok(())
    }

    #[test]
    fn zx_cups() -> anyhow::Result<()> {
        let cup = cups(1)?;
        assert_eq!(cup, z(2, 0, None));
        let snake = caps(1)?.tensor(&id(1)).then(&id(1).tensor(&cups(1)?))?;
        assert_eq!(snake.fusion_form()?, id(1).fusion_form()?);
        assert!(had().nodes().all(|n| matches!(n, Node::Box(_))));
        Ok(())
    }
}
