//! Quantum circuits as diagrams of gate boxes, and their translation to the
//! ZX-calculus.
//!
//! Gates are stored in a [`Diagram`] as named boxes over the [qubit][zx::qubit]
//! object so that circuits compose like any other diagram. [`circuit_to_zx`]
//! maps such a diagram into the [ZX category][Hypergraph::zx] using a fixed
//! translation for each gate.

use thiserror::Error;
use tracing::debug;
use crate::{
    category::Hypergraph,
    diagram::{ BoxNode, Diagram, DiagramError, DiagResult },
    functor::Functor,
    param::Param,
    phase::Phase,
    ty::Ty,
    zx,
};

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("error in gate application: targeted qubit(s) up to {0}, but the circuit only has {1}")]
    GateDiagramTooManyTargets(usize, usize),

    #[error("error in gate application: circuits can only hold gates with equal numbers of inputs and outputs, but gate has {0} input(s) and {1} output(s)")]
    GateDiagramIO(usize, usize),

    #[error("error in composition: cannot match {0} free output(s) with {1} free input(s)")]
    NonMatchingIO(usize, usize),

    #[error("diagram error: {0}")]
    DiagramError(#[from] DiagramError),
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

/// A gate or single-qubit preparation/post-selection to place in a circuit.
///
/// Multi-qubit gates act on adjacent qubits, with controls first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Preparation of the computational basis state given by a bitstring.
    Ket(Vec<bool>),
    /// Post-selection onto the computational basis state given by a bitstring.
    Bra(Vec<bool>),
    /// Hadamard.
    H,
    /// π-rotation about *x*.
    X,
    /// π-rotation about *y*.
    Y,
    /// π-rotation about *z*.
    Z,
    /// Rotation about *x*.
    XRot(Param),
    /// Rotation about *z*.
    ZRot(Param),
    /// π-rotation about *x* on the second qubit, controlled by the first.
    CX,
    /// π-rotation about *z* on the second qubit, controlled by the first.
    CZ,
    /// Rotation about *x* on the second qubit, controlled by the first.
    CXRot(Param),
    /// Rotation about *z* on the second qubit, controlled by the first.
    CZRot(Param),
    /// Mølmer-Sørensen gate. This gate uses the *xx* definition.
    MS,
    /// Toffoli gate: π-rotation about *x* on the third qubit, controlled by the
    /// first and second.
    Toff,
}

fn bitstring(bits: &[bool]) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

fn parse_bits(s: &str) -> Option<Vec<bool>> {
    s.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

fn bit_phase(bit: bool) -> Option<Param> {
    bit.then(|| Param::from(Phase::pi()))
}

impl Gate {
    /// Return `true` if `self` is `Ket`.
    pub fn is_ket(&self) -> bool { matches!(self, Self::Ket(..)) }

    /// Return `true` if `self` is `Bra`.
    pub fn is_bra(&self) -> bool { matches!(self, Self::Bra(..)) }

    /// Return `true` if `self` is `XRot`.
    pub fn is_xrot(&self) -> bool { matches!(self, Self::XRot(..)) }

    /// Return `true` if `self` is `ZRot`.
    pub fn is_zrot(&self) -> bool { matches!(self, Self::ZRot(..)) }

    /// Return `true` if `self` is `CXRot`.
    pub fn is_cxrot(&self) -> bool { matches!(self, Self::CXRot(..)) }

    /// Return `true` if `self` is `CZRot`.
    pub fn is_czrot(&self) -> bool { matches!(self, Self::CZRot(..)) }

    /// Create a new X-rotation gate with π/2 phase.
    pub fn xrot_pi2() -> Self { Self::XRot(Phase::pi2().into()) }

    /// Create a new X-rotation gate with π/4 phase.
    pub fn xrot_pi4() -> Self { Self::XRot(Phase::pi4().into()) }

    /// Create a new X-rotation gate with phase `(a / b) × 2π`.
    pub fn xrot_frac(a: i64, b: i64) -> Self {
        Self::XRot(Phase::new(a, b).into())
    }

    /// Create a new Z-rotation gate with π/2 phase.
    pub fn zrot_pi2() -> Self { Self::ZRot(Phase::pi2().into()) }

    /// Create a new Z-rotation gate with π/4 phase.
    pub fn zrot_pi4() -> Self { Self::ZRot(Phase::pi4().into()) }

    /// Create a new Z-rotation gate with phase `(a / b) × 2π`.
    pub fn zrot_frac(a: i64, b: i64) -> Self {
        Self::ZRot(Phase::new(a, b).into())
    }

    /// Return the numbers of qubits entering and leaving the gate.
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Self::Ket(bits) => (0, bits.len()),
            Self::Bra(bits) => (bits.len(), 0),
            Self::H | Self::X | Self::Y | Self::Z
                | Self::XRot(_) | Self::ZRot(_) => (1, 1),
            Self::CX | Self::CZ | Self::CXRot(_) | Self::CZRot(_) | Self::MS
                => (2, 2),
            Self::Toff => (3, 3),
        }
    }

    /// Return the name of the box representing the gate.
    pub fn name(&self) -> String {
        match self {
            Self::Ket(bits) => format!("Ket({})", bitstring(bits)),
            Self::Bra(bits) => format!("Bra({})", bitstring(bits)),
            Self::H => "H".to_string(),
            Self::X => "X".to_string(),
            Self::Y => "Y".to_string(),
            Self::Z => "Z".to_string(),
            Self::XRot(_) => "Rx".to_string(),
            Self::ZRot(_) => "Rz".to_string(),
            Self::CX => "CX".to_string(),
            Self::CZ => "CZ".to_string(),
            Self::CXRot(_) => "CRx".to_string(),
            Self::CZRot(_) => "CRz".to_string(),
            Self::MS => "MS".to_string(),
            Self::Toff => "Toff".to_string(),
        }
    }

    /// Return the rotation angle of a parameterized gate.
    pub fn param(&self) -> Option<&Param> {
        match self {
            Self::XRot(p) | Self::ZRot(p) | Self::CXRot(p) | Self::CZRot(p)
                => Some(p),
            _ => None,
        }
    }

    /// Return the inverse of `self`.
    ///
    /// Preparations and post-selections are exchanged.
    pub fn inv(&self) -> Self {
        match self {
            Self::Ket(bits) => Self::Bra(bits.clone()),
            Self::Bra(bits) => Self::Ket(bits.clone()),
            Self::XRot(p) => Self::XRot(-p.clone()),
            Self::ZRot(p) => Self::ZRot(-p.clone()),
            Self::CXRot(p) => Self::CXRot(-p.clone()),
            Self::CZRot(p) => Self::CZRot(-p.clone()),
            other => other.clone(),
        }
    }

    /// Return the box representing the gate.
    pub fn to_box(&self) -> BoxNode {
        let (n_in, n_out) = self.arity();
        let b = BoxNode::new(&self.name(), zx::qubits(n_in), zx::qubits(n_out));
        match self.param() {
            Some(p) => b.with_data(p.clone()),
            None => b,
        }
    }

    /// Return the single-box diagram representing the gate.
    pub fn to_diagram(&self) -> Diagram { self.to_box().into() }

    /// Recover a gate from its box, if `b` represents one.
    ///
    /// A dagger box is read as the inverse of the gate it is the dagger of.
    pub fn from_box(b: &BoxNode) -> Option<Self> {
        if b.is_dagger() { return Self::from_box(&b.dagger()).map(|g| g.inv()); }
        let name = b.name();
        let gate =
            if let Some(bits) =
                name.strip_prefix("Ket(").and_then(|s| s.strip_suffix(')'))
            {
                Self::Ket(parse_bits(bits)?)
            } else if let Some(bits) =
                name.strip_prefix("Bra(").and_then(|s| s.strip_suffix(')'))
            {
                Self::Bra(parse_bits(bits)?)
            } else {
                match (name, b.data()) {
                    ("H", None) => Self::H,
                    ("X", None) => Self::X,
                    ("Y", None) => Self::Y,
                    ("Z", None) => Self::Z,
                    ("Rx", Some(p)) => Self::XRot(p.clone()),
                    ("Rz", Some(p)) => Self::ZRot(p.clone()),
                    ("CX", None) => Self::CX,
                    ("CZ", None) => Self::CZ,
                    ("CRx", Some(p)) => Self::CXRot(p.clone()),
                    ("CRz", Some(p)) => Self::CZRot(p.clone()),
                    ("MS", None) => Self::MS,
                    ("Toff", None) => Self::Toff,
                    _ => { return None; },
                }
            };
        (gate.to_box() == *b).then_some(gate)
    }

    /// Return the ZX diagram for the gate.
    ///
    /// Fails with [`DiagramError::UnsupportedTranslation`] for `MS` and `Toff`.
    pub fn to_zx(&self) -> DiagResult<Diagram> {
        let id = zx::id(1);
        match self {
            Self::Ket(bits) => {
                let spiders: Vec<Diagram> =
                    bits.iter().map(|b| zx::x(0, 1, bit_phase(*b))).collect();
                Ok(Diagram::tensor_all(spiders.iter()))
            },
            Self::Bra(bits) => {
                let spiders: Vec<Diagram> =
                    bits.iter().map(|b| zx::x(1, 0, bit_phase(*b))).collect();
                Ok(Diagram::tensor_all(spiders.iter()))
            },
            Self::H => Ok(zx::had()),
            Self::X => Ok(zx::x(1, 1, bit_phase(true))),
            Self::Z => Ok(zx::z(1, 1, bit_phase(true))),
            Self::Y => Ok(zx::y(1, 1, bit_phase(true))),
            Self::XRot(p) => Ok(zx::x(1, 1, Some(p.clone()))),
            Self::ZRot(p) => Ok(zx::z(1, 1, Some(p.clone()))),
            Self::CX => {
                zx::z(1, 2, None).tensor(&id)
                    .then(&id.tensor(&zx::x(2, 1, None)))
            },
            Self::CZ => {
                zx::z(1, 2, None).tensor(&id)
                    .then(&id.tensor(&zx::had()).tensor(&id))?
                    .then(&id.tensor(&zx::z(2, 1, None)))
            },
            Self::CZRot(p) => {
                let coupling =
                    zx::x(2, 1, None).then(&zx::z(1, 0, Some(-p.clone())))?;
                zx::z(1, 2, None).tensor(&zx::z(1, 2, Some(p.clone())))
                    .then(&id.tensor(&coupling).tensor(&id))
            },
            Self::CXRot(p) => {
                let coupling =
                    zx::z(2, 1, None).then(&zx::x(1, 0, Some(-p.clone())))?;
                zx::x(1, 2, None).tensor(&zx::x(1, 2, Some(p.clone())))
                    .then(&id.tensor(&coupling).tensor(&id))
            },
            Self::MS | Self::Toff => {
                Err(DiagramError::UnsupportedTranslation(self.name()))
            },
        }
    }
}

/// Policy for boxes that have no ZX translation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Translation {
    /// Fail with [`DiagramError::UnsupportedTranslation`].
    Strict,
    /// Keep the box unchanged in the output.
    #[default]
    PassThrough,
}

/// Translate a diagram of gate boxes into a ZX diagram.
///
/// Objects are mapped to themselves, while swaps, cups, caps, and spiders are
/// mapped to their counterparts in the ZX category. [Scalars][zx::Scalar] are
/// kept as they are. Other boxes that are not gates, or are gates without a
/// translation, are handled according to `policy`.
pub fn circuit_to_zx(diagram: &Diagram, policy: Translation)
    -> DiagResult<Diagram>
{
    let translate = move |b: &BoxNode| -> DiagResult<Diagram> {
        let res =
            match Gate::from_box(b) {
                Some(gate) => gate.to_zx(),
                None if zx::Scalar::from_box(b).is_some() => Ok(b.clone().into()),
                None => Err(DiagramError::UnsupportedTranslation(b.to_string())),
            };
        match res {
            Err(DiagramError::UnsupportedTranslation(name))
                if policy == Translation::PassThrough =>
            {
                debug!("circuit_to_zx: passing through untranslated box {}", name);
                Ok(b.clone().into())
            },
            res => res,
        }
    };
    Functor::new(Hypergraph::zx(), |ob| Ok(Ty::from(ob)), translate)
        .map_diagram(diagram)
}

/// A quantum circuit on a fixed number of qubits, backed by a [`Diagram`] of
/// gate boxes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    n: usize,
    diagram: Diagram,
}

impl Circuit {
    /// Create a new, empty circuit on `n` qubits.
    pub fn new(n: usize) -> Self { Self { n, diagram: zx::id(n) } }

    /// Return the number of qubits.
    pub fn n_qubits(&self) -> usize { self.n }

    /// Return the number of gates.
    pub fn len(&self) -> usize { self.diagram.len() }

    /// Return `true` if no gates have been applied.
    pub fn is_empty(&self) -> bool { self.diagram.is_id() }

    /// Return the backing diagram.
    pub fn diagram(&self) -> &Diagram { &self.diagram }

    /// Consume `self`, returning the backing diagram.
    pub fn into_diagram(self) -> Diagram { self.diagram }

    /// Apply a gate whose first qubit is `k`.
    ///
    /// Fails if the gate does not have equal numbers of inputs and outputs, or
    /// extends past the last qubit.
    pub fn apply(&mut self, gate: Gate, k: usize) -> CircuitResult<&mut Self> {
        let (n_in, n_out) = gate.arity();
        if n_in != n_out { return Err(GateDiagramIO(n_in, n_out)); }
        let end =
            k.checked_add(n_in)
            .filter(|&end| end <= self.n)
            .ok_or(GateDiagramTooManyTargets(k.saturating_add(n_in), self.n))?;
        let layer =
            zx::id(k)
            .tensor(&gate.to_diagram())
            .tensor(&zx::id(self.n - end));
        self.diagram = self.diagram.then(&layer)?;
        Ok(self)
    }

    /// Append all gates of `other` after those of `self`.
    pub fn append(&mut self, other: &Circuit) -> CircuitResult<&mut Self> {
        if self.n != other.n { return Err(NonMatchingIO(self.n, other.n)); }
        self.diagram = self.diagram.then(&other.diagram)?;
        Ok(self)
    }

    /// Return the inverse circuit.
    pub fn inv(&self) -> Self {
        Self { n: self.n, diagram: self.diagram.dagger() }
    }

    /// Translate `self` into a ZX diagram.
    pub fn to_zx(&self, policy: Translation) -> DiagResult<Diagram> {
        circuit_to_zx(&self.diagram, policy)
    }
}
