//! Stochastic service models
//!
//! Services are probabilistic transition systems with a reward per action.
//! Targets are deterministic automata over the same actions. Together they
//! are the input of a composition planner.

pub mod action;
pub mod builders;
pub mod error;
pub mod service;
pub mod target;

pub use action::{Action, Role, Symbol};
pub use builders::{
    breakable_service, complex_breakable_service, one_state_service, BreakableParams,
    ComplexBreakableParams,
};
pub use error::{ModelError, Result};
pub use service::{Service, ServiceTransition, TransitionTable, PROBABILITY_EPSILON};
pub use target::{TargetAutomaton, TargetAutomatonBuilder, TargetEntry, TargetTransition};
