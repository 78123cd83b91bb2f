//! Connected-component normal form for networks of spiders.
//!
//! In a hypergraph category, any connected network of same-coloured spiders
//! (together with the swaps, cups, and caps between them) is equal to a single
//! spider whose phase is the sum of all phases in the network and whose legs
//! are the network's boundary wires. Diagrams built only from such generators
//! are therefore determined up to equality by which boundary wires are
//! connected, and by the colour and phase of each connected component.

use std::collections::BTreeMap;
use crate::{
    diagram::{ Diagram, DiagramError, DiagResult, Node, SpiderKind },
    param::Param,
    ty::{ Ob, Ty },
};

#[derive(Clone, Debug)]
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new() -> Self { Self { parent: Vec::new(), size: Vec::new() } }

    fn add(&mut self) -> usize {
        let k = self.parent.len();
        self.parent.push(k);
        self.size.push(1);
        k
    }

    fn find(&self, x: usize) -> usize {
        let mut node = x;
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y { return; }
        let (root, parent) =
            if self.size[root_x] >= self.size[root_y] {
                (root_y, root_x)
            } else {
                (root_x, root_y)
            };
        self.parent[root] = parent;
        self.size[parent] += self.size[root];
    }
}

/// A single connected component touching the boundary of a diagram.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    /// Object carried by the component's first boundary wire.
    pub ob: Ob,
    /// Colour of the component, or `None` for a bare wire.
    pub kind: Option<SpiderKind>,
    /// Total phase of the component, or `None` if zero.
    pub phase: Option<Param>,
    /// Positions of the component's wires in the domain.
    pub inputs: Vec<usize>,
    /// Positions of the component's wires in the codomain.
    pub outputs: Vec<usize>,
}

/// A component with no boundary wires.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Closed {
    pub ob: Ob,
    pub kind: SpiderKind,
    pub phase: Option<Param>,
}

/// The connected-component normal form of a spider network.
///
/// Two networks are equal morphisms iff their `SpiderForm`s are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpiderForm {
    pub dom: Ty,
    pub cod: Ty,
    /// Components in order of first appearance over the domain, then the
    /// codomain.
    pub components: Vec<Component>,
    /// Closed components, sorted.
    pub closed: Vec<Closed>,
}

fn new_elem(uf: &mut UnionFind, obs: &mut Vec<Ob>, ob: &Ob) -> usize {
    obs.push(ob.clone());
    uf.add()
}

#[derive(Clone, Debug, Default)]
struct Accum {
    kind: Option<SpiderKind>,
    phase: Param,
}

impl Diagram {
    /// Compute the connected-component normal form of `self`.
    ///
    /// Fails with [`DiagramError::NotFusable`] if `self` contains a generic
    /// box, or if spiders of different colours are connected.
    pub fn fusion_form(&self) -> DiagResult<SpiderForm> {
        let mut uf = UnionFind::new();
        let mut obs: Vec<Ob> = Vec::new();
        let dom_ports: Vec<usize> =
            self.dom.iter().map(|ob| new_elem(&mut uf, &mut obs, ob)).collect();
        let mut scan: Vec<usize> = dom_ports.clone();
        let mut spiders: Vec<(usize, SpiderKind, Option<Param>)> = Vec::new();

        for layer in self.layers.iter() {
            let off = layer.offset();
            match &layer.node {
                Node::Box(b) => {
                    return Err(DiagramError::NotFusable(b.to_string()));
                },
                Node::Swap(..) => { scan.swap(off, off + 1); },
                Node::Cup(..) => {
                    uf.union(scan[off], scan[off + 1]);
                    scan.drain(off..off + 2);
                },
                Node::Cap(a, _) => {
                    let e = new_elem(&mut uf, &mut obs, a);
                    scan.splice(off..off, [e, e]);
                },
                Node::Spider(s) => {
                    let v = new_elem(&mut uf, &mut obs, &s.ob);
                    for &e in scan[off..off + s.n_in].iter() {
                        uf.union(v, e);
                    }
                    scan.splice(
                        off..off + s.n_in,
                        std::iter::repeat(v).take(s.n_out),
                    );
                    spiders.push((v, s.kind, s.phase.clone()));
                },
            }
        }
        let cod_ports = scan;

        let mut accums: BTreeMap<usize, Accum> = BTreeMap::new();
        for (v, kind, phase) in spiders.into_iter() {
            let acc = accums.entry(uf.find(v)).or_default();
            match acc.kind {
                Some(k) if k != kind => {
                    return Err(DiagramError::NotFusable(
                        format!("{} spider connected to {} spider", kind, k)));
                },
                _ => { acc.kind = Some(kind); },
            }
            if let Some(ph) = phase { acc.phase += ph; }
        }

        let mut labels: BTreeMap<usize, usize> = BTreeMap::new();
        let mut components: Vec<Component> = Vec::new();
        let ports =
            dom_ports.iter().map(|e| (true, e))
            .chain(cod_ports.iter().map(|e| (false, e)));
        let mut counters = (0_usize, 0_usize);
        for (is_input, &e) in ports {
            let root = uf.find(e);
            let idx =
                *labels.entry(root).or_insert_with(|| {
                    let acc = accums.get(&root).cloned().unwrap_or_default();
                    components.push(Component {
                        ob: obs[e].clone(),
                        kind: acc.kind,
                        phase: (!acc.phase.is_zero()).then_some(acc.phase),
                        inputs: Vec::new(),
                        outputs: Vec::new(),
                    });
                    components.len() - 1
                });
            if is_input {
                components[idx].inputs.push(counters.0);
                counters.0 += 1;
            } else {
                components[idx].outputs.push(counters.1);
                counters.1 += 1;
            }
        }
        for comp in components.iter_mut() {
            let legs = comp.inputs.len() + comp.outputs.len();
            if legs == 2 && comp.phase.is_none() { comp.kind = None; }
        }

        let mut closed: Vec<Closed> = Vec::new();
        let mut seen_roots: Vec<usize> = Vec::new();
        for e in 0..obs.len() {
            let root = uf.find(e);
            if labels.contains_key(&root) || seen_roots.contains(&root) {
                continue;
            }
            seen_roots.push(root);
            let acc = accums.get(&root).cloned().unwrap_or_default();
            closed.push(Closed {
                ob: obs[e].clone(),
                kind: acc.kind.unwrap_or(SpiderKind::Plain),
                phase: (!acc.phase.is_zero()).then_some(acc.phase),
            });
        }
        closed.sort();

        Ok(SpiderForm {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            components,
            closed,
        })
    }
}
