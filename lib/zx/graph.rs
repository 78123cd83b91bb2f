//! Export of diagrams to an undirected node/wire graph.
//!
//! The export sweeps the diagram's layers in order, tracking which graph node
//! currently occupies each wire position. Every boundary wire becomes an
//! `Input` or `Output` node; every spider or box becomes a node positioned at
//! its offset and row, wired to the current occupants of its input positions,
//! and then occupies its output positions.

use std::fmt;
use crate::{
    diagram::{ Diagram, Node, SpiderKind },
    param::Param,
};

/// Index of a node in a [`ZxGraph`].
pub type NodeId = usize;

/// A single node in an exported graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZxNode {
    /// A Z-spider.
    Z(Option<Param>),
    /// An X-spider.
    X(Option<Param>),
    /// A Y-spider.
    Y(Option<Param>),
    /// A Hadamard box.
    H,
    /// Any other named box.
    Box(String),
    /// Termination of a wire as an input to the diagram.
    Input,
    /// Termination of a wire as an output of the diagram.
    Output,
}

impl ZxNode {
    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z(_)) }

    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X(_)) }

    /// Return `true` if `self` is `Y`.
    pub fn is_y(&self) -> bool { matches!(self, Self::Y(_)) }

    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H) }

    /// Return `true` if `self` is `Box`.
    pub fn is_box(&self) -> bool { matches!(self, Self::Box(_)) }

    /// Return `true` if `self` is `Input`.
    pub fn is_input(&self) -> bool { matches!(self, Self::Input) }

    /// Return `true` if `self` is `Output`.
    pub fn is_output(&self) -> bool { matches!(self, Self::Output) }

    /// Return the phase of a spider.
    pub fn phase(&self) -> Option<&Param> {
        match self {
            Self::Z(ph) | Self::X(ph) | Self::Y(ph) => ph.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for ZxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Z(ph) | Self::X(ph) | Self::Y(ph) => {
                match self {
                    Self::Z(_) => write!(f, "Z")?,
                    Self::X(_) => write!(f, "X")?,
                    _ => write!(f, "Y")?,
                }
                if let Some(ph) = ph { write!(f, "({})", ph)?; }
                Ok(())
            },
            Self::H => write!(f, "H"),
            Self::Box(name) => write!(f, "{}", name),
            Self::Input => write!(f, "Input"),
            Self::Output => write!(f, "Output"),
        }
    }
}

/// An undirected graph with parallel wires, with a position `(column, row)`
/// attached to every node.
#[derive(Clone, Debug, Default)]
pub struct ZxGraph {
    nodes: Vec<(ZxNode, (usize, usize))>,
    wires: Vec<(NodeId, NodeId)>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
}

impl ZxGraph {
    /// Create a new, empty graph.
    pub fn new() -> Self { Self::default() }

    /// Return the number of nodes.
    pub fn count_nodes(&self) -> usize { self.nodes.len() }

    /// Return the number of wires.
    pub fn count_wires(&self) -> usize { self.wires.len() }

    /// Return the number of input nodes.
    pub fn count_inputs(&self) -> usize { self.inputs.len() }

    /// Return the number of output nodes.
    pub fn count_outputs(&self) -> usize { self.outputs.len() }

    /// Get the node associated with a particular ID if it exists.
    pub fn get_node(&self, id: NodeId) -> Option<&ZxNode> {
        self.nodes.get(id).map(|(node, _)| node)
    }

    /// Get the position of a node.
    pub fn get_position(&self, id: NodeId) -> Option<(usize, usize)> {
        self.nodes.get(id).map(|(_, pos)| *pos)
    }

    /// Return the IDs of the input nodes, in order.
    pub fn inputs(&self) -> &[NodeId] { &self.inputs }

    /// Return the IDs of the output nodes, in order.
    pub fn outputs(&self) -> &[NodeId] { &self.outputs }

    /// Return all wires in order of creation.
    pub fn wires(&self) -> &[(NodeId, NodeId)] { &self.wires }

    /// Return an iterator over the IDs of all nodes wired to `id`, once per
    /// wire.
    pub fn neighbor_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.wires.iter()
            .filter_map(move |&(a, b)| {
                if a == id { Some(b) } else if b == id { Some(a) } else { None }
            })
    }

    /// Return the number of wires incident on `id`, counting self-loops twice.
    pub fn arity(&self, id: NodeId) -> usize {
        self.wires.iter()
            .map(|&(a, b)| (a == id) as usize + (b == id) as usize)
            .sum()
    }

    /// Add a node at a position, returning its ID.
    pub fn add_node(&mut self, node: ZxNode, pos: (usize, usize)) -> NodeId {
        let id = self.nodes.len();
        match &node {
            ZxNode::Input => { self.inputs.push(id); },
            ZxNode::Output => { self.outputs.push(id); },
            _ => { },
        }
        self.nodes.push((node, pos));
        id
    }

    /// Add a wire between two nodes.
    pub fn add_wire(&mut self, a: NodeId, b: NodeId) {
        self.wires.push((a, b));
    }
}

impl Diagram {
    /// Convert `self` to a [`ZxGraph`].
    ///
    /// Uncoloured spiders are exported as Z-spiders, and caps as phaseless
    /// two-legged Z-spiders. Zero phases are exported as no phase. Swaps only
    /// exchange the occupants of two positions, and cups wire their two
    /// occupants together directly.
    pub fn to_graph(&self) -> ZxGraph {
        let mut graph = ZxGraph::new();
        let mut scan: Vec<NodeId> =
            (0..self.dom().len())
            .map(|i| graph.add_node(ZxNode::Input, (i, 0)))
            .collect();
        for (row, layer) in self.layers().iter().enumerate() {
            let off = layer.offset();
            let pos = (off, row + 1);
            let (node, n_in, n_out) =
                match layer.node() {
                    Node::Swap(..) => {
                        scan.swap(off, off + 1);
                        continue;
                    },
                    Node::Cup(..) => {
                        graph.add_wire(scan[off], scan[off + 1]);
                        scan.drain(off..off + 2);
                        continue;
                    },
                    Node::Cap(..) => (ZxNode::Z(None), 0, 2),
                    Node::Spider(s) => {
                        let phase = s.phase().filter(|ph| !ph.is_zero()).cloned();
                        let node =
                            match s.kind() {
                                SpiderKind::X => ZxNode::X(phase),
                                SpiderKind::Y => ZxNode::Y(phase),
                                SpiderKind::Z | SpiderKind::Plain
                                    => ZxNode::Z(phase),
                            };
                        (node, s.n_in(), s.n_out())
                    },
                    Node::Box(b) => {
                        let node =
                            if b.name() == "H" {
                                ZxNode::H
                            } else {
                                ZxNode::Box(b.to_string())
                            };
                        (node, b.dom().len(), b.cod().len())
                    },
                };
            let id = graph.add_node(node, pos);
            for k in 0..n_in {
                graph.add_wire(scan[off + k], id);
            }
            scan.splice(off..off + n_in, std::iter::repeat(id).take(n_out));
        }
        let n_rows = self.len() + 1;
        for (i, occupant) in scan.into_iter().enumerate() {
            let out = graph.add_node(ZxNode::Output, (i, n_rows));
            graph.add_wire(occupant, out);
        }
        graph
    }
}
