//! Decomposition of spiders into networks of low-arity spiders.
//!
//! Any spider can be written using only the generators of arity (0, 1),
//! (1, 0), (2, 1), and (1, 2), identity wires, and, if phased, a single (1, 1)
//! phase shifter. [`SpiderNode::unfuse`] computes one such network; the result
//! keeps the colour of the original spider and has the same fusion form.

use tracing::{ debug, trace };
use crate::diagram::{ Diagram, DiagResult, Node, SpiderNode };

impl SpiderNode {
    // copy of `self` with different arities and no phase
    fn with_arity(&self, n_in: usize, n_out: usize) -> Self {
        Self { n_in, n_out, phase: None, ..self.clone() }
    }

    /// Return `true` if `self` is one of the three-legged or one-legged
    /// generators, which are left as-is by [`unfuse`][Self::unfuse].
    pub fn is_minimal(&self) -> bool {
        self.phase.is_none()
            && matches!((self.n_in, self.n_out), (0, 1) | (1, 0) | (2, 1) | (1, 2))
    }

    /// Decompose `self` into spiders of arity at most three.
    ///
    /// A phased spider `(a, b)` becomes `(a, 1) >> (1, 1, phase) >> (1, b)`,
    /// with both unphased halves decomposed in turn. Unphased spiders are
    /// handled as follows:
    /// - `(0, 1)`, `(1, 0)`, `(2, 1)`, and `(1, 2)` are kept;
    /// - `(1, 1)` is the identity wire;
    /// - `a < b` is the dagger of the decomposition of `(b, a)`;
    /// - `b > 1` is `(a, 1) >> (1, b)`;
    /// - `(a, 1)` for odd `a` is `((a - 1, 1) @ id) >> (2, 1)`;
    /// - `(a, 1)` for even `a` is `((a / 2, 1) @ (a / 2, 1)) >> (2, 1)`.
    pub fn unfuse(&self) -> DiagResult<Diagram> {
        let (a, b) = (self.n_in, self.n_out);
        trace!("unfuse: {}", self);
        if let Some(ph) = &self.phase {
            let shift =
                Diagram::from(Self { n_in: 1, n_out: 1, phase: Some(ph.clone()), ..self.clone() });
            let fan_in = self.with_arity(a, 1).unfuse()?;
            let fan_out = self.with_arity(1, b).unfuse()?;
            return fan_in.then(&shift)?.then(&fan_out);
        }
        match (a, b) {
            (0, 1) | (1, 0) | (2, 1) | (1, 2) => Ok(self.clone().into()),
            (1, 1) => Ok(Diagram::id(&self.ty())),
            _ if a < b => Ok(self.dagger().unfuse()?.dagger()),
            _ if b != 1 => {
                self.with_arity(a, 1).unfuse()?
                    .then(&self.with_arity(1, b).unfuse()?)
            },
            _ if a % 2 == 1 => {
                self.with_arity(a - 1, 1).unfuse()?
                    .tensor(&Diagram::id(&self.ty()))
                    .then(&self.with_arity(2, 1).into())
            },
            _ => {
                let half = self.with_arity(a / 2, 1).unfuse()?;
                half.tensor(&half)
                    .then(&self.with_arity(2, 1).into())
            },
        }
    }
}

impl Diagram {
    /// Replace every spider in `self` by its [unfused][SpiderNode::unfuse]
    /// decomposition, leaving all other nodes in place.
    pub fn unfuse(&self) -> DiagResult<Self> {
        debug!("unfuse: diagram of {} layer(s)", self.len());
        self.substitute_nodes(|node| {
            match node {
                Node::Spider(s) => s.unfuse(),
                other => Ok(other.clone().into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{ rngs::StdRng, Rng, SeedableRng };
    use crate::{
        category::{ Category, Hypergraph },
        diagram::*,
        param::Param,
        phase::Phase,
        ty::Ty,
    };

    fn spider(n: usize, m: usize, phase: Option<Param>) -> SpiderNode {
        SpiderNode::new(SpiderKind::Plain, n, m, &Ty::new("x"), phase).unwrap()
    }

    fn only_minimal(d: &Diagram) -> bool {
        d.nodes().all(|node| {
            node.is_spider_and(|s| {
                s.is_minimal() || (s.n_in() == 1 && s.n_out() == 1 && s.phase().is_some())
            })
        })
    }

    #[test]
    fn boundaries() {
        let x = Ty::new("x");
        let s = Diagram::spider(1, 2, &x, None).unwrap();
        assert_eq!(s.dom(), &x);
        assert_eq!(s.cod(), &x.tensor(&x));
    }

    #[test]
    fn fusion_law() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let lhs = Diagram::spider(2, 1, &x, None)?.then(&Diagram::spider(1, 2, &x, None)?)?;
        assert_eq!(lhs.fusion_form()?, Diagram::spider(2, 2, &x, None)?.fusion_form()?);
        Ok(())
    }

    #[test]
    fn unfuse_base_cases() -> anyhow::Result<()> {
        let x = Ty::new("x");
        for (n, m) in [(0, 1), (1, 0), (2, 1), (1, 2)] {
            assert_eq!(spider(n, m, None).unfuse()?, Diagram::from(spider(n, m, None)));
        }
        assert_eq!(spider(1, 1, None).unfuse()?, Diagram::id(&x));
        let ph = Param::from(Phase::pi4());
        assert_eq!(spider(1, 1, Some(ph.clone())).unfuse()?, Diagram::from(spider(1, 1, Some(ph))));
        Ok(())
    }

    #[test]
    fn unfuse_structure() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let s21: Diagram = spider(2, 1, None).into();
        let four = spider(4, 1, None).unfuse()?;
        assert_eq!(four, s21.tensor(&s21).then(&s21)?);
        let three = spider(3, 1, None).unfuse()?;
        assert_eq!(three, s21.tensor(&Diagram::id(&x)).then(&s21)?);
        let one_three = spider(1, 3, None).unfuse()?;
        assert_eq!(one_three, three.dagger());
        let two_two = spider(2, 2, None).unfuse()?;
        assert_eq!(two_two, s21.then(&s21.dagger())?);
        Ok(())
    }

    #[test]
    fn unfuse_correct() -> anyhow::Result<()> {
        let phases = [None, Some(Param::from(Phase::pi4())), Some(Param::symbol("a"))];
        for phase in phases.iter() {
            for (n, m) in [(3, 1), (4, 1), (5, 1), (1, 3), (3, 3), (0, 0), (0, 4)] {
                let s = spider(n, m, phase.clone());
                let unfused = s.unfuse()?;
                assert_eq!(unfused.dom(), &s.dom());
                assert_eq!(unfused.cod(), &s.cod());
                assert!(only_minimal(&unfused), "{}", unfused);
                assert_eq!(unfused.fusion_form()?, Diagram::from(s).fusion_form()?);
            }
        }
        Ok(())
    }

    #[test]
    fn unfuse_keeps_colour() -> anyhow::Result<()> {
        let q = Ty::new("q");
        let s = SpiderNode::new(SpiderKind::X, 5, 2, &q, Some(Param::from(Phase::pi())))?;
        let unfused = s.unfuse()?;
        assert!(unfused.nodes().all(|n| n.is_spider_and(|s| s.kind() == SpiderKind::X)));
        assert_eq!(unfused.fusion_form()?, Diagram::from(s).fusion_form()?);
        Ok(())
    }

    #[test]
    fn unfuse_diagram() -> anyhow::Result<()> {
        let x = Ty::new("x");
        let f = Diagram::new_box("f", x.clone(), x.clone());
        let d = Diagram::from(spider(4, 1, None)).then(&f)?.then(&Diagram::from(spider(1, 3, None)))?;
        let unfused = d.unfuse()?;
        assert_eq!(unfused.dom(), d.dom());
        assert_eq!(unfused.cod(), d.cod());
        assert_eq!(unfused.nodes().filter(|n| !n.is_structural()).count(), 1);
        assert_eq!(unfused.len(), 3 + 1 + 2);
        Ok(())
    }

    #[test]
    fn random_arities() -> anyhow::Result<()> {
        let mut rng = StdRng::seed_from_u64(10546);
        for _ in 0..50 {
            let n: usize = rng.gen_range(0..8);
            let m: usize = rng.gen_range(0..8);
            let phase =
                rng.gen_bool(0.5).then(|| Param::from(Phase::new(rng.gen_range(1..16), 16)));
            let s = spider(n, m, phase);
            let unfused = s.unfuse()?;
            assert!(only_minimal(&unfused));
            assert_eq!(unfused.fusion_form()?, Diagram::from(s.clone()).fusion_form()?);
            assert_eq!(unfused.dagger().fusion_form()?, Diagram::from(s.dagger()).fusion_form()?);
        }
        Ok(())
    }

    #[test]
    fn composite_spiders() -> anyhow::Result<()> {
        let xy = Ty::new("x").tensor(&Ty::new("y"));
        let cat = Hypergraph::frobenius();
        let lhs =
            cat.spiders(SpiderKind::Plain, 2, 1, &xy, None)?
            .then(&cat.spiders(SpiderKind::Plain, 1, 2, &xy, None)?)?;
        let rhs = cat.spiders(SpiderKind::Plain, 2, 2, &xy, None)?;
        assert_eq!(lhs.fusion_form()?, rhs.fusion_form()?);

        let form = cat.spiders(SpiderKind::Plain, 3, 2, &xy, None)?.fusion_form()?;
        assert_eq!(form.components.len(), 2);
        assert_eq!(form.components[0].inputs, vec![0, 2, 4]);
        assert_eq!(form.components[0].outputs, vec![0, 2]);
        assert_eq!(form.components[1].inputs, vec![1, 3, 5]);
        assert_eq!(form.components[1].outputs, vec![1, 3]);
        Ok(())
    }
}
