//! Structure-preserving maps from diagrams into a [`Category`].
//!
//! A [`Functor`] is given by an image for every atomic object and every
//! generic box, and is extended over identities, both compositions, and
//! duals. Structural nodes are never looked up: swaps, cups, and caps map to
//! the target's own swaps, cups, and caps, and every spider maps to the
//! target's spider on the image of its object.

use rustc_hash::FxHashMap;
use tracing::{ debug, trace };
use crate::{
    category::Category,
    diagram::{ BoxNode, Diagram, DiagramError, DiagResult, Node },
    ty::{ Ob, Ty },
};

type ObMap<'a, O> = Box<dyn Fn(&Ob) -> DiagResult<O> + 'a>;
type ArMap<'a, A> = Box<dyn Fn(&BoxNode) -> DiagResult<A> + 'a>;

/// A functor from diagrams into the category `C`.
///
/// ```
/// # use spider_calc::{ category::*, diagram::*, functor::Functor, ty::* };
/// let x = Ty::new("x");
/// let f = Diagram::new_box("f", x.clone(), x.pow(2));
/// let to_pro = Functor::new(Pro, |_| Ok(1), |b| Ok(Arity::new(b.dom().len(), b.cod().len())));
/// assert_eq!(to_pro.map_diagram(&f.then(&Diagram::spider(2, 0, &x, None).unwrap()).unwrap()).unwrap(), Arity::new(1, 0));
/// ```
pub struct Functor<'a, C>
where C: Category
{
    cod: C,
    ob: ObMap<'a, C::Ob>,
    ar: ArMap<'a, C::Ar>,
}

impl<'a, C> Functor<'a, C>
where C: Category
{
    /// Create a new functor from mapping functions.
    ///
    /// `ob` should return [`DiagramError::MissingObject`] for objects it does
    /// not cover, and `ar` [`DiagramError::MissingBox`] for boxes it does not
    /// cover, so that images of duals and daggers can fall back on the images
    /// of their originals.
    pub fn new<O, A>(cod: C, ob: O, ar: A) -> Self
    where
        O: Fn(&Ob) -> DiagResult<C::Ob> + 'a,
        A: Fn(&BoxNode) -> DiagResult<C::Ar> + 'a,
    {
        Self { cod, ob: Box::new(ob), ar: Box::new(ar) }
    }

    /// Create a new functor from lookup tables.
    pub fn from_maps(
        cod: C,
        obs: FxHashMap<Ob, C::Ob>,
        ars: FxHashMap<BoxNode, C::Ar>,
    ) -> Self
    where C::Ob: 'a, C::Ar: 'a
    {
        Self::new(
            cod,
            move |ob| {
                obs.get(ob).cloned()
                    .ok_or_else(|| DiagramError::MissingObject(ob.clone()))
            },
            move |b| {
                ars.get(b).cloned()
                    .ok_or_else(|| DiagramError::MissingBox(b.to_string()))
            },
        )
    }

    /// Return the target category.
    pub fn cod(&self) -> &C { &self.cod }

    /// Return the image of an atomic object.
    ///
    /// An adjoint object with no image of its own is mapped to the dual of the
    /// image of its dual.
    pub fn map_ob(&self, ob: &Ob) -> DiagResult<C::Ob> {
        match (self.ob)(ob) {
            Err(DiagramError::MissingObject(_)) if ob.is_adjoint() => {
                let image = (self.ob)(&ob.dual())?;
                Ok(self.cod.dual_ob(&image))
            },
            res => res,
        }
    }

    /// Return the image of a type, the tensor of the images of its objects.
    pub fn map_ty(&self, ty: &Ty) -> DiagResult<C::Ob> {
        ty.iter()
            .try_fold(self.cod.unit(), |acc, ob| {
                Ok(self.cod.tensor_ob(&acc, &self.map_ob(ob)?))
            })
    }

    /// Return the image of a generic box.
    ///
    /// A dagger box with no image of its own is mapped to the dagger of the
    /// image of its original.
    pub fn map_box(&self, b: &BoxNode) -> DiagResult<C::Ar> {
        match (self.ar)(b) {
            Err(DiagramError::MissingBox(_)) if b.is_dagger() => {
                let image = (self.ar)(&b.dagger())?;
                Ok(self.cod.dagger(&image))
            },
            res => res,
        }
    }

    /// Return the image of a single node.
    pub fn map_node(&self, node: &Node) -> DiagResult<C::Ar> {
        match node {
            Node::Box(b) => self.map_box(b),
            Node::Swap(a, b) => {
                self.cod.swap(&self.map_ob(a)?, &self.map_ob(b)?)
            },
            Node::Cup(a, b) => {
                self.cod.cups(&self.map_ob(a)?, &self.map_ob(b)?)
            },
            Node::Cap(a, b) => {
                self.cod.caps(&self.map_ob(a)?, &self.map_ob(b)?)
            },
            Node::Spider(s) => {
                trace!("functor: spider {} mapped through target spiders", s);
                self.cod.spiders(
                    s.kind(),
                    s.n_in(),
                    s.n_out(),
                    &self.map_ob(s.ob())?,
                    s.phase(),
                )
            },
        }
    }

    /// Return the image of a diagram.
    ///
    /// Each layer becomes the image of its node with identities on the images
    /// of its padding, and layers are composed in order.
    pub fn map_diagram(&self, diagram: &Diagram) -> DiagResult<C::Ar> {
        debug!("functor: mapping diagram of {} layer(s)", diagram.len());
        let init = self.cod.id(&self.map_ty(diagram.dom())?);
        diagram.layers().iter()
            .try_fold(init, |acc, layer| {
                let left = self.cod.id(&self.map_ty(layer.left())?);
                let right = self.cod.id(&self.map_ty(layer.right())?);
                let image =
                    self.cod.tensor(
                        &self.cod.tensor(&left, &self.map_node(layer.node())?),
                        &right,
                    );
                self.cod.then(&acc, &image)
            })
    }
}
