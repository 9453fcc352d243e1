//! Declare process specifications
//!
//! Declare constraints are composed into one LTLf formula, handed to a
//! formula-to-automaton backend, and the resulting DFA is adapted into the
//! same shape as an explicit target automaton.

pub mod adapter;
pub mod backend;
pub mod compiler;
pub mod dfa;
pub mod error;
pub mod ltlf;
pub mod progression;
pub mod templates;

pub use adapter::from_dfa_to_declare_automaton;
pub use backend::LtlfCompiler;
pub use compiler::{DeclareAutomaton, DeclareCompiler, DeclareSpecification};
pub use dfa::Dfa;
pub use error::{CompilationError, Result};
pub use ltlf::Ltlf;
pub use progression::{BackendLimits, ProgressionBackend};
pub use templates::{closure_assumption, DeclareConstraint};
