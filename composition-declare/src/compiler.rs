use crate::adapter::from_dfa_to_declare_automaton;
use crate::backend::LtlfCompiler;
use crate::error::{CompilationError, Result};
use crate::ltlf::Ltlf;
use crate::templates::{closure_assumption, DeclareConstraint};
use composition_services::{Action, TargetAutomaton};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A set of Declare constraints over a closed alphabet of actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareSpecification {
    pub constraints: Vec<DeclareConstraint>,
    pub alphabet: BTreeSet<Action>,
}

impl DeclareSpecification {
    pub fn new<I>(constraints: Vec<DeclareConstraint>, alphabet: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        Self {
            constraints,
            alphabet: alphabet.into_iter().collect(),
        }
    }

    /// Conjunction of every constraint's encoding and the closure assumption
    pub fn formula(&self) -> Ltlf {
        let fragments = self
            .constraints
            .iter()
            .map(DeclareConstraint::formula)
            .chain(std::iter::once(closure_assumption(&self.alphabet)));
        Ltlf::all(fragments)
    }

    fn check_symbols(&self) -> Result<()> {
        for constraint in &self.constraints {
            if let Some(unknown) = constraint
                .symbols()
                .into_iter()
                .find(|a| !self.alphabet.contains(*a))
            {
                return Err(CompilationError::UnknownSymbol(unknown.to_string()));
            }
        }
        Ok(())
    }
}

/// Target automaton synthesised from a Declare specification
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareAutomaton {
    formula: Ltlf,
    automaton: TargetAutomaton,
}

impl DeclareAutomaton {
    pub fn formula(&self) -> &Ltlf {
        &self.formula
    }

    pub fn automaton(&self) -> &TargetAutomaton {
        &self.automaton
    }

    pub fn into_target(self) -> TargetAutomaton {
        self.automaton
    }
}

/// Composes constraints into one formula and delegates synthesis to a
/// backend
pub struct DeclareCompiler<'a> {
    backend: &'a dyn LtlfCompiler,
}

impl<'a> DeclareCompiler<'a> {
    pub fn new(backend: &'a dyn LtlfCompiler) -> Self {
        Self { backend }
    }

    pub fn compile(&self, specification: &DeclareSpecification) -> Result<DeclareAutomaton> {
        if specification.alphabet.is_empty() {
            return Err(CompilationError::EmptyAlphabet);
        }
        specification.check_symbols()?;

        let formula = specification.formula();
        log::debug!("Compiling declare formula: {}", formula);

        let dfa = self
            .backend
            .compile(&formula, &specification.alphabet)
            .map_err(|err| {
                log::warn!(
                    "Declare compilation of {} constraints failed: {}",
                    specification.constraints.len(),
                    err
                );
                err
            })?;
        let automaton = from_dfa_to_declare_automaton(&dfa, &specification.alphabet)?;

        log::info!(
            "Compiled {} declare constraints into an automaton with {} states and {} transitions",
            specification.constraints.len(),
            automaton.states().len(),
            automaton.num_transitions()
        );
        Ok(DeclareAutomaton { formula, automaton })
    }
}
