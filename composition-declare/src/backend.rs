use crate::dfa::Dfa;
use crate::error::Result;
use crate::ltlf::Ltlf;
use composition_services::Action;
use std::collections::BTreeSet;

/// Formula-to-automaton synthesis
///
/// One blocking call per request: compile `formula` over `alphabet` into a
/// deterministic automaton whose transitions are labelled with actions of
/// the alphabet. Implementations keep no state between calls.
pub trait LtlfCompiler: Send + Sync {
    fn compile(&self, formula: &Ltlf, alphabet: &BTreeSet<Action>) -> Result<Dfa>;
}
