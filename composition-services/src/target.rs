//! Deterministic target automata
//!
//! The target describes the process the composition has to realise. It is
//! built from an ordered table of `(state, action) -> (next, probability,
//! reward)` entries; probability is always 1.0.

use crate::action::Action;
use crate::error::{ModelError, Result};
use crate::service::PROBABILITY_EPSILON;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetTransition {
    pub next_state: String,
    pub probability: f64,
    pub reward: f64,
}

/// One row of a target transition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub from: String,
    pub action: Action,
    pub to: String,
    #[serde(default = "certain")]
    pub probability: f64,
    #[serde(default)]
    pub reward: f64,
}

fn certain() -> f64 {
    1.0
}

impl TargetEntry {
    pub fn new(from: impl Into<String>, action: Action, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            action,
            to: to.into(),
            probability: 1.0,
            reward: 0.0,
        }
    }

    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = reward;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAutomaton {
    states: BTreeSet<String>,
    alphabet: BTreeSet<Action>,
    transitions: BTreeMap<String, BTreeMap<Action, TargetTransition>>,
    initial_state: String,
    final_states: BTreeSet<String>,
}

impl TargetAutomaton {
    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Action> {
        &self.alphabet
    }

    pub fn transitions(&self) -> &BTreeMap<String, BTreeMap<Action, TargetTransition>> {
        &self.transitions
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &BTreeSet<String> {
        &self.final_states
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    pub fn next(&self, state: &str, action: &Action) -> Option<&TargetTransition> {
        self.transitions.get(state)?.get(action)
    }

    /// Follow `trace` from the initial state. `None` when some action has no
    /// transition.
    pub fn run<'a, I>(&self, trace: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let mut state = self.initial_state.as_str();
        for action in trace {
            state = self.next(state, action)?.next_state.as_str();
        }
        Some(state)
    }

    pub fn accepts<'a, I>(&self, trace: I) -> bool
    where
        I: IntoIterator<Item = &'a Action>,
    {
        self.run(trace).map_or(false, |state| self.is_final(state))
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(|by_action| by_action.len()).sum()
    }
}

/// Builds a [`TargetAutomaton`] from an ordered transition table
#[derive(Debug, Clone)]
pub struct TargetAutomatonBuilder {
    initial_state: String,
    final_states: BTreeSet<String>,
    entries: Vec<TargetEntry>,
    extra_alphabet: BTreeSet<Action>,
}

impl TargetAutomatonBuilder {
    pub fn new(initial_state: impl Into<String>) -> Self {
        Self {
            initial_state: initial_state.into(),
            final_states: BTreeSet::new(),
            entries: Vec::new(),
            extra_alphabet: BTreeSet::new(),
        }
    }

    pub fn final_state(mut self, state: impl Into<String>) -> Self {
        self.final_states.insert(state.into());
        self
    }

    pub fn final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn transition(
        self,
        from: impl Into<String>,
        action: Action,
        to: impl Into<String>,
    ) -> Self {
        self.entry(TargetEntry::new(from, action, to))
    }

    pub fn entry(mut self, entry: TargetEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries<I: IntoIterator<Item = TargetEntry>>(mut self, entries: I) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Append a no-op step from the natural last state to an absorbing final
    /// state.
    pub fn trailing_no_op(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.transition(from, Action::no_op(), to)
    }

    /// Declare alphabet symbols that no transition uses
    pub fn alphabet<I: IntoIterator<Item = Action>>(mut self, actions: I) -> Self {
        self.extra_alphabet.extend(actions);
        self
    }

    pub fn build(self) -> Result<TargetAutomaton> {
        let mut states = BTreeSet::from([self.initial_state.clone()]);
        let mut alphabet = self.extra_alphabet;
        let mut transitions: BTreeMap<String, BTreeMap<Action, TargetTransition>> =
            BTreeMap::new();

        for entry in self.entries {
            if entry.probability.is_nan()
                || (entry.probability - 1.0).abs() > PROBABILITY_EPSILON
            {
                return Err(ModelError::InconsistentDistribution {
                    state: entry.from,
                    action: entry.action.to_string(),
                    total: entry.probability,
                });
            }
            let by_action = transitions.entry(entry.from.clone()).or_default();
            if by_action.contains_key(&entry.action) {
                return Err(ModelError::NonDeterministicTarget {
                    state: entry.from,
                    action: entry.action.to_string(),
                });
            }
            states.insert(entry.from);
            states.insert(entry.to.clone());
            alphabet.insert(entry.action.clone());
            by_action.insert(
                entry.action,
                TargetTransition {
                    next_state: entry.to,
                    probability: entry.probability,
                    reward: entry.reward,
                },
            );
        }

        if self.final_states.is_empty() {
            return Err(ModelError::EmptyFinalStates);
        }
        if let Some(unknown) = self.final_states.iter().find(|s| !states.contains(*s)) {
            return Err(ModelError::UnknownState(unknown.clone()));
        }

        let automaton = TargetAutomaton {
            states,
            alphabet,
            transitions,
            initial_state: self.initial_state,
            final_states: self.final_states,
        };
        if !reaches_final(&automaton) {
            return Err(ModelError::UnreachableFinalState(automaton.initial_state));
        }

        log::debug!(
            "Built target automaton with {} states and {} transitions",
            automaton.states.len(),
            automaton.num_transitions()
        );
        Ok(automaton)
    }
}

fn reaches_final(automaton: &TargetAutomaton) -> bool {
    let mut seen = BTreeSet::from([automaton.initial_state.as_str()]);
    let mut queue = VecDeque::from([automaton.initial_state.as_str()]);
    while let Some(state) = queue.pop_front() {
        if automaton.is_final(state) {
            return true;
        }
        for transition in automaton.transitions.get(state).into_iter().flat_map(|t| t.values()) {
            if seen.insert(transition.next_state.as_str()) {
                queue.push_back(transition.next_state.as_str());
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_and_accepts() {
        let target = TargetAutomatonBuilder::new("s0")
            .transition("s0", Action::operate("a"), "s1")
            .transition("s1", Action::check("a"), "s2")
            .final_state("s2")
            .build()
            .unwrap();

        let trace = [Action::operate("a"), Action::check("a")];
        assert_eq!(target.run(&trace), Some("s2"));
        assert!(target.accepts(&trace));
        assert!(!target.accepts(&trace[..1]));
        assert!(!target.accepts(&[Action::check("a")]));
    }

    #[test]
    fn test_rejects_probability_other_than_one() {
        let mut entry = TargetEntry::new("s0", Action::operate("a"), "s1");
        entry.probability = 0.5;
        let err = TargetAutomatonBuilder::new("s0")
            .entry(entry)
            .final_state("s1")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::InconsistentDistribution { .. }));

        let mut entry = TargetEntry::new("s0", Action::operate("a"), "s1");
        entry.probability = f64::NAN;
        let err = TargetAutomatonBuilder::new("s0")
            .entry(entry)
            .final_state("s1")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::InconsistentDistribution { .. }));
    }

    #[test]
    fn test_initial_state_may_be_final() {
        let target = TargetAutomatonBuilder::new("s0").final_state("s0").build().unwrap();
        assert!(target.accepts(&[]));
        assert_eq!(target.num_transitions(), 0);
    }
}
