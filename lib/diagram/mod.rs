//! Layered string diagrams and their composition.
//!
//! A [`Diagram`] is an ordered list of [`Layer`]s, each placing a single
//! [`Node`] between identity wires on its left and right. Diagrams are
//! immutable values: every operation returns a new diagram and leaves its
//! operands untouched.
//!
//! ```
//! # use spider_calc::{ diagram::*, ty::Ty };
//! let x = Ty::new("x");
//! let merge = Diagram::spider(2, 1, &x, None).unwrap();
//! let split = Diagram::spider(1, 2, &x, None).unwrap();
//! let d = merge.then(&split).unwrap();
//! assert_eq!(d.dom(), &x.pow(2));
//! assert_eq!(d.cod(), &x.pow(2));
//! assert!(d.fusion_form().unwrap() == Diagram::spider(2, 2, &x, None).unwrap().fusion_form().unwrap());
//! ```

use std::{ collections::BTreeSet, fmt };
use itertools::Itertools;
use thiserror::Error;
use crate::{
    category::{ Category, Hypergraph },
    param::Param,
    ty::{ Ob, Ty },
};

/// Errors for fallible operations on diagrams.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Returned when sequential composition is attempted with non-matching
    /// boundary types.
    #[error("cannot compose: codomain {0} does not match domain {1}")]
    TypeMismatch(Ty, Ty),

    /// Returned when a cup or cap is built from objects that are not duals.
    #[error("objects {0} and {1} are not a dual pair")]
    NotDualPair(Ob, Ob),

    /// Returned when a spider is built over an object that is not its own
    /// dual.
    #[error("spider legs must be self-dual, got {0}")]
    NotSelfDual(Ob),

    /// Returned when a list of indices is not a permutation of `0..n` for the
    /// expected `n`.
    #[error("{0:?} is not a permutation of the wires")]
    NotPermutation(Vec<usize>),

    /// Returned when an operation requiring a single object gets a composite
    /// type.
    #[error("expected an atomic type, got {0}")]
    NotAtomic(Ty),

    /// Returned when a functor has no image for an object.
    #[error("missing image for object {0}")]
    MissingObject(Ob),

    /// Returned when a functor has no image for a box.
    #[error("missing image for box {0}")]
    MissingBox(String),

    /// Returned when a gate has no image under the circuit translation table.
    #[error("no translation defined for gate {0}")]
    UnsupportedTranslation(String),

    /// Returned when two layers cannot be interchanged.
    #[error("layers {0} and {1} are not independent and cannot be interchanged")]
    Interchange(usize, usize),

    /// Returned when a layer index is out of range.
    #[error("missing layer {0} in diagram of {1} layer(s)")]
    MissingLayer(usize, usize),

    /// Returned when normalization revisits a previous diagram.
    #[error("normal form does not terminate: diagram is not connected")]
    NotConnected,

    /// Returned when the fusion form is requested for a diagram containing a
    /// non-fusable node.
    #[error("cannot fuse node {0}")]
    NotFusable(String),

    /// Returned when the number of per-object phases does not match the type.
    #[error("expected {0} phase(s), got {1}")]
    PhaseCount(usize, usize),

    /// Returned when composition of arity pairs is attempted with non-matching
    /// wire counts.
    #[error("cannot compose arrows: {0} output(s) do not match {1} input(s)")]
    ArityMismatch(usize, usize),
}
pub type DiagResult<T> = Result<T, DiagramError>;
use DiagramError::*;

pub(crate) mod node;
pub use node::*;

pub(crate) mod interchange;

pub(crate) mod fusion;
pub use fusion::*;

/// One horizontal slice of a diagram: identity on `left`, then a node, then
/// identity on `right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layer {
    pub(crate) left: Ty,
    pub(crate) node: Node,
    pub(crate) right: Ty,
}

impl Layer {
    /// Create a new layer.
    pub fn new(left: Ty, node: Node, right: Ty) -> Self {
        Self { left, node, right }
    }

    /// Return the type of identity wires to the left of the node.
    pub fn left(&self) -> &Ty { &self.left }

    /// Return the node.
    pub fn node(&self) -> &Node { &self.node }

    /// Return the type of identity wires to the right of the node.
    pub fn right(&self) -> &Ty { &self.right }

    /// Return the position of the node's first wire.
    pub fn offset(&self) -> usize { self.left.len() }

    /// Return the domain of the whole slice.
    pub fn dom(&self) -> Ty {
        Ty::tensor_all([&self.left, &self.node.dom(), &self.right])
    }

    /// Return the codomain of the whole slice.
    pub fn cod(&self) -> Ty {
        Ty::tensor_all([&self.left, &self.node.cod(), &self.right])
    }

    pub(crate) fn pad(&self, left: &Ty, right: &Ty) -> Self {
        Self {
            left: left.tensor(&self.left),
            node: self.node.clone(),
            right: self.right.tensor(right),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.left.is_empty() { write!(f, "{} @ ", self.left)?; }
        write!(f, "{}", self.node)?;
        if !self.right.is_empty() { write!(f, " @ {}", self.right)?; }
        Ok(())
    }
}

/// A morphism built from layers of generators.
///
/// The codomain of each layer is the domain of the next; this is checked by
/// every public constructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagram {
    pub(crate) dom: Ty,
    pub(crate) cod: Ty,
    pub(crate) layers: Vec<Layer>,
}

impl From<Node> for Diagram {
    fn from(node: Node) -> Self {
        Self {
            dom: node.dom(),
            cod: node.cod(),
            layers: vec![Layer::new(Ty::unit(), node, Ty::unit())],
        }
    }
}

impl From<BoxNode> for Diagram {
    fn from(b: BoxNode) -> Self { Node::Box(b).into() }
}

impl From<SpiderNode> for Diagram {
    fn from(s: SpiderNode) -> Self { Node::Spider(s).into() }
}

impl Diagram {
    /// Create a new diagram from a list of layers, checking that consecutive
    /// layers compose and that every structural node is well formed.
    ///
    /// The boundary of an empty list of layers is taken to be `dom`.
    pub fn new<I>(dom: Ty, layers: I) -> DiagResult<Self>
    where I: IntoIterator<Item = Layer>
    {
        let layers: Vec<Layer> = layers.into_iter().collect();
        let mut cod = dom.clone();
        for layer in layers.iter() {
            layer.node.check()?;
            let ldom = layer.dom();
            if ldom != cod { return Err(TypeMismatch(cod, ldom)); }
            cod = layer.cod();
        }
        Ok(Self { dom, cod, layers })
    }

    /// Create the identity on `ty`.
    pub fn id(ty: &Ty) -> Self {
        Self { dom: ty.clone(), cod: ty.clone(), layers: Vec::new() }
    }

    /// Create a single generic box.
    pub fn new_box(name: &str, dom: Ty, cod: Ty) -> Self {
        BoxNode::new(name, dom, cod).into()
    }

    /// Create a single plain spider over an atomic type.
    pub fn spider(n_in: usize, n_out: usize, ty: &Ty, phase: Option<Param>)
        -> DiagResult<Self>
    {
        SpiderNode::new(SpiderKind::Plain, n_in, n_out, ty, phase)
            .map(Self::from)
    }

    /// Return the domain.
    pub fn dom(&self) -> &Ty { &self.dom }

    /// Return the codomain.
    pub fn cod(&self) -> &Ty { &self.cod }

    /// Return the layers in order.
    pub fn layers(&self) -> &[Layer] { &self.layers }

    /// Return the number of layers.
    pub fn len(&self) -> usize { self.layers.len() }

    /// Return `true` if `self` has no layers, i.e. is an identity.
    pub fn is_id(&self) -> bool { self.layers.is_empty() }

    /// Return an iterator over all nodes, in layer order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.layers.iter().map(|layer| &layer.node)
    }

    /// Return the offset of every layer.
    pub fn offsets(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::offset).collect()
    }

    /// If `self` is a single node with no padding, return the node.
    pub fn as_node(&self) -> Option<&Node> {
        match self.layers.as_slice() {
            [layer] if layer.left.is_empty() && layer.right.is_empty()
                => Some(&layer.node),
            _ => None,
        }
    }

    /// Sequential composition: attach the outputs of `self` to the inputs of
    /// `other`.
    pub fn then(&self, other: &Self) -> DiagResult<Self> {
        if self.cod != other.dom {
            return Err(TypeMismatch(self.cod.clone(), other.dom.clone()));
        }
        Ok(Self {
            dom: self.dom.clone(),
            cod: other.cod.clone(),
            layers:
                self.layers.iter().chain(other.layers.iter()).cloned().collect(),
        })
    }

    /// Compose all diagrams in sequence, returning the identity on `dom` if
    /// there are none.
    pub fn then_all<'a, I>(dom: &Ty, diagrams: I) -> DiagResult<Self>
    where I: IntoIterator<Item = &'a Diagram>
    {
        diagrams.into_iter()
            .try_fold(Self::id(dom), |acc, d| acc.then(d))
    }

    /// Parallel composition: place `other` to the right of `self`.
    ///
    /// Layers of `self` come first, padded on the right by `other.dom`; layers
    /// of `other` follow, padded on the left by `self.cod`.
    pub fn tensor(&self, other: &Self) -> Self {
        let unit = Ty::unit();
        let layers =
            self.layers.iter()
            .map(|layer| layer.pad(&unit, &other.dom))
            .chain(other.layers.iter().map(|layer| layer.pad(&self.cod, &unit)))
            .collect();
        Self {
            dom: self.dom.tensor(&other.dom),
            cod: self.cod.tensor(&other.cod),
            layers,
        }
    }

    /// Tensor all diagrams left to right, returning the identity on the unit if
    /// there are none.
    pub fn tensor_all<'a, I>(diagrams: I) -> Self
    where I: IntoIterator<Item = &'a Diagram>
    {
        diagrams.into_iter()
            .fold(Self::id(&Ty::unit()), |acc, d| acc.tensor(d))
    }

    /// Return the dagger: layers in reverse order, each node replaced by its
    /// dagger.
    pub fn dagger(&self) -> Self {
        Self {
            dom: self.cod.clone(),
            cod: self.dom.clone(),
            layers:
                self.layers.iter().rev()
                .map(|layer| {
                    Layer::new(
                        layer.left.clone(),
                        layer.node.dagger(),
                        layer.right.clone(),
                    )
                })
                .collect(),
        }
    }

    /// Replace every node by the diagram returned for it by `f`, keeping the
    /// padding of its layer.
    pub fn substitute_nodes<F>(&self, mut f: F) -> DiagResult<Self>
    where F: FnMut(&Node) -> DiagResult<Diagram>
    {
        self.layers.iter()
            .try_fold(Self::id(&self.dom), |acc, layer| {
                let image =
                    Self::id(&layer.left)
                    .tensor(&f(&layer.node)?)
                    .tensor(&Self::id(&layer.right));
                acc.then(&image)
            })
    }

    /// Create the braid exchanging `left` and `right`, built from atomic
    /// swaps.
    ///
    /// Each object of `left`, last first, is moved across all of `right`.
    pub fn swap(left: &Ty, right: &Ty) -> Self {
        let n = left.len();
        let m = right.len();
        let mut layers: Vec<Layer> = Vec::with_capacity(n * m);
        for (i, a) in left.iter().enumerate().rev() {
            for (k, b) in right.iter().enumerate() {
                layers.push(Layer::new(
                    left.slice(..i).tensor(&right.slice(..k)),
                    Node::Swap(a.clone(), b.clone()),
                    right.slice(k + 1..).tensor(&left.slice(i + 1..)),
                ));
            }
        }
        Self { dom: left.tensor(right), cod: right.tensor(left), layers }
    }

    /// Create the permutation of the wires of `dom` sending input `i` to
    /// output `perm[i]`, built from swaps.
    ///
    /// Fails with `NotPermutation` if `perm` does not hold each of
    /// `0..dom.len()` exactly once.
    pub fn permutation(perm: &[usize], dom: &Ty) -> DiagResult<Self> {
        let n = dom.len();
        let mut inverse: Vec<Option<usize>> = vec![None; n];
        if perm.len() != n {
            return Err(NotPermutation(perm.to_vec()));
        }
        for (i, &k) in perm.iter().enumerate() {
            match inverse.get_mut(k) {
                Some(slot) if slot.is_none() => { *slot = Some(i); },
                _ => { return Err(NotPermutation(perm.to_vec())); },
            }
        }
        // cur[k] is the input currently on wire k
        let mut cur: Vec<usize> = (0..n).collect();
        let mut result = Self::id(dom);
        for (t, i) in inverse.into_iter().flatten().enumerate() {
            let Some(p) = cur.iter().position(|&j| j == i) else { continue; };
            if p == t { continue; }
            let cod = result.cod.clone();
            let step =
                Self::id(&cod.slice(..t))
                .tensor(&Self::swap(&cod.slice(t..p), &cod.slice(p..p + 1)))
                .tensor(&Self::id(&cod.slice(p + 1..)));
            result = result.then(&step)?;
            let moved = cur.remove(p);
            cur.insert(t, moved);
        }
        Ok(result)
    }

    /// Create nested cups on `left @ right`, where `right == left.dual()`.
    pub fn cups(left: &Ty, right: &Ty) -> DiagResult<Self> {
        Hypergraph::frobenius().cups(left, right)
    }

    /// Create nested caps on `left @ right`, where `right == left.dual()`.
    pub fn caps(left: &Ty, right: &Ty) -> DiagResult<Self> {
        Hypergraph::frobenius().caps(left, right)
    }

    /// Return the names of all free variables in phases and box parameters.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.nodes()
            .filter_map(Node::param)
            .flat_map(|p| p.free_symbols().into_iter().map(str::to_string))
            .collect()
    }

    /// Substitute `expr` for `var` in every phase and box parameter.
    pub fn subs(&self, var: &str, expr: &Param) -> Self {
        Self {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            layers:
                self.layers.iter()
                .map(|layer| {
                    Layer::new(
                        layer.left.clone(),
                        layer.node.map_param(|p| p.subs(var, expr)),
                        layer.right.clone(),
                    )
                })
                .collect(),
        }
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layers.is_empty() {
            write!(f, "Id({})", self.dom)
        } else {
            write!(f, "{}", self.layers.iter().join(" >> "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn setup() -> (Ty, Ty, Diagram, Diagram, Diagram) {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let f = Diagram::new_box("f", x.clone(), y.clone());
        let g = Diagram::new_box("g", y.clone(), x.tensor(&y));
        let h = Diagram::new_box("h", x.tensor(&y), Ty::unit());
        (x, y, f, g, h)
    }

    #[test]
    fn identity_laws() {
        let (x, y, f, g, _) = setup();
        assert_eq!(Diagram::id(&x).then(&f).unwrap(), f);
        assert_eq!(f.then(&Diagram::id(&y)).unwrap(), f);
        assert_eq!(Diagram::id(&y).then(&g).unwrap(), g);
        assert_eq!(Diagram::id(&x).dom(), Diagram::id(&x).cod());
        assert!(Diagram::id(&x).is_id());
    }

    #[test]
    fn associativity() {
        let (_, _, f, g, h) = setup();
        let fg_h = f.then(&g).unwrap().then(&h).unwrap();
        let f_gh = f.then(&g.then(&h).unwrap()).unwrap();
        assert_eq!(fg_h, f_gh);
        assert_eq!(fg_h.len(), 3);
        let t1 = f.tensor(&g).tensor(&h);
        let t2 = f.tensor(&g.tensor(&h));
        assert_eq!(t1, t2);
        assert_eq!(t1.offsets(), vec![0, 1, 3]);
    }

    #[test]
    fn composition_mismatch() {
        let (_, _, f, _, h) = setup();
        assert!(matches!(f.then(&h), Err(DiagramError::TypeMismatch(..))));
        assert!(matches!(f.then(&f), Err(DiagramError::TypeMismatch(..))));
    }

    #[test]
    fn tensor_boundaries() {
        let (x, y, f, g, _) = setup();
        let fg = f.tensor(&g);
        assert_eq!(fg.dom(), &x.tensor(&y));
        assert_eq!(fg.cod(), &Ty::tensor_all([&y, &x, &y]));
        assert_eq!(fg.layers()[0].right(), &y);
        assert_eq!(fg.layers()[1].left(), &y);
        assert_eq!(Diagram::tensor_all([&f, &g]), fg);
        assert_eq!(Diagram::tensor_all([]), Diagram::id(&Ty::unit()));
    }

    #[test]
    fn checked_layers() {
        let (x, y, _, _, _) = setup();
        let f = Node::Box(BoxNode::new("f", x.clone(), y.clone()));
        assert!(Diagram::new(x.tensor(&x), [Layer::new(x.clone(), f.clone(), Ty::unit())]).is_ok());
        assert!(matches!(
            Diagram::new(y.clone(), [Layer::new(Ty::unit(), f, Ty::unit())]),
            Err(DiagramError::TypeMismatch(..))
        ));

        let a = Ob::rigid("a");
        let aa: Ty = [a.clone(), a.clone()].into_iter().collect();
        assert!(matches!(
            Diagram::new(aa, [Layer::new(Ty::unit(), Node::Cup(a.clone(), a.clone()), Ty::unit())]),
            Err(DiagramError::NotDualPair(..))
        ));
        assert!(matches!(
            Diagram::new(Ty::unit(), [Layer::new(Ty::unit(), Node::Cap(a.clone(), a.dual()), Ty::unit())]),
            Ok(_)
        ));
    }

    #[test]
    fn dagger() {
        let (_, _, f, g, _) = setup();
        let fg = f.then(&g).unwrap();
        assert_eq!(fg.dagger().dagger(), fg);
        assert_eq!(fg.dagger(), g.dagger().then(&f.dagger()).unwrap());
        assert_eq!(fg.dagger().dom(), fg.cod());
    }

    #[test]
    fn swaps() {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let z = Ty::new("z");
        let sw = Diagram::swap(&x.tensor(&y), &z);
        assert_eq!(sw.dom(), &Ty::tensor_all([&x, &y, &z]));
        assert_eq!(sw.cod(), &Ty::tensor_all([&z, &x, &y]));
        assert_eq!(sw.len(), 2);
        assert_eq!(Diagram::swap(&Ty::unit(), &x), Diagram::id(&x));
    }

    #[test]
    fn permutations() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let y = Ty::new("y");
        let z = Ty::new("z");
        let xyz = Ty::tensor_all([&x, &y, &z]);
        let p = Diagram::permutation(&[2, 0, 1], &xyz)?;
        assert_eq!(p.cod(), &Ty::tensor_all([&y, &z, &x]));
        assert_eq!(p.len(), 2);
        let back = Diagram::permutation(&[1, 2, 0], p.cod())?;
        assert_eq!(back.cod(), &xyz);
        assert_eq!(p.then(&back)?.fusion_form()?, Diagram::id(&xyz).fusion_form()?);
        assert_eq!(Diagram::permutation(&[0, 1, 2], &xyz)?, Diagram::id(&xyz));
        assert_eq!(Diagram::permutation(&[1, 0], &x.tensor(&y))?, Diagram::swap(&x, &y));
        assert_eq!(Diagram::permutation(&[], &Ty::unit())?, Diagram::id(&Ty::unit()));
        for bad in [&[0, 0, 1][..], &[0, 1], &[0, 3, 1]] {
            assert!(matches!(
                Diagram::permutation(bad, &xyz),
                Err(DiagramError::NotPermutation(v)) if v == bad
            ));
        }
        Ok(())
    }

    #[test]
    fn cups_caps() {
        let a = Ob::rigid("a");
        let b = Ob::rigid("b");
        let ab: Ty = [a.clone(), b.clone()].into_iter().collect();
        let cups = Diagram::cups(&ab, &ab.dual()).unwrap();
        assert_eq!(cups.dom(), &ab.tensor(&ab.dual()));
        assert_eq!(cups.cod(), &Ty::unit());
        assert_eq!(cups.len(), 2);
        assert_eq!(cups.offsets(), vec![1, 0]);
        let caps = Diagram::caps(&ab, &ab.dual()).unwrap();
        assert_eq!(caps.cod(), &ab.tensor(&ab.dual()));
        assert!(matches!(Diagram::cups(&ab, &ab), Err(DiagramError::NotDualPair(..))));
    }

    #[test]
    fn symbols() {
        let x = Ty::new("x");
        let a = Param::symbol("a");
        let s = Diagram::spider(1, 1, &x, Some(a.clone())).unwrap();
        let f = Diagram::from(BoxNode::new("f", x.clone(), x.clone()).with_data(Param::symbol("b")));
        let d = s.then(&f).unwrap();
        assert_eq!(d.free_symbols().into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
        let d2 = d.subs("a", &Param::from(Phase::pi()));
        assert_eq!(d2.free_symbols().len(), 1);
        assert_eq!(d2.nodes().next().and_then(Node::param), Some(&Param::from(Phase::pi())));
    }

    #[test]
    fn display() {
        let (x, _, f, g, _) = setup();
        assert_eq!(Diagram::id(&x).to_string(), "Id(x)");
        assert_eq!(f.tensor(&g).to_string(), "f @ y >> y @ g");
    }
}
