//! This package contains tools for working with string diagrams in hypergraph
//! categories, with a focus on [spiders][wiki-frob] and the
//! [ZX-calculus][wiki].
//!
//! - [`ty`] and [`diagram`] define objects, types, and layered diagrams with
//! sequential and parallel composition, daggers, interchange, and a canonical
//! [fusion form][diagram::SpiderForm] for networks of spiders.
//! - [`spider`] decomposes arbitrary spiders into low-arity generators.
//! - [`category`] and [`functor`] describe target categories for diagrams and
//! structure-preserving maps into them.
//! - [`zx`] provides ZX-calculus generators and export to a node/wire graph.
//! - [`circuit`] builds quantum circuits from gate boxes and translates them
//! to ZX diagrams.
//!
//! Phases are stored exactly as rational multiples of 2π ([`phase::Phase`]),
//! optionally with symbolic terms ([`param::Param`]).
//!
//! [wiki]: https://en.wikipedia.org/wiki/ZX-calculus
//! [wiki-frob]: https://en.wikipedia.org/wiki/Frobenius_algebra
//!
//! # Further reading
//! - B. Coecke, "Basic ZX-calculus for students and professionals."
//! [arXiv:2303.03163](https://arxiv.org/abs/2303.03163)
//! - J. van de Wetering, "ZX-calculus for the working quantum computer
//! scientist." [arXiv:2012.13966](https://arxiv.org/abs/2012.13966)
//! - B. Coecke, A. Kissinger, "Picturing Quantum Processes." Cambridge
//! University Press, 2017.
//!

pub mod phase;
pub mod param;
pub mod ty;
pub mod diagram;
pub mod spider;
pub mod category;
pub mod functor;
pub mod zx;
pub mod circuit;

pub use diagram::{ Diagram, DiagramError, DiagResult };
pub use functor::Functor;
pub use ty::{ Ob, Ty };
