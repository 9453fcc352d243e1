use crate::action::Action;
use crate::error::{ModelError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tolerance used when checking that a distribution sums to one
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// Outcome of performing an action in a state: a distribution over next
/// states and one reward for the action itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceTransition {
    pub outcomes: BTreeMap<String, f64>,
    pub reward: f64,
}

impl ServiceTransition {
    pub fn new(outcomes: BTreeMap<String, f64>, reward: f64) -> Self {
        Self { outcomes, reward }
    }

    /// Deterministic transition to `next_state`
    pub fn certain(next_state: impl Into<String>, reward: f64) -> Self {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(next_state.into(), 1.0);
        Self { outcomes, reward }
    }

    pub fn total_probability(&self) -> f64 {
        self.outcomes.values().sum()
    }
}

/// `state -> action -> transition`
pub type TransitionTable = BTreeMap<String, BTreeMap<Action, ServiceTransition>>;

/// A probabilistic model of one operation provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    name: String,
    states: BTreeSet<String>,
    actions: BTreeSet<Action>,
    transitions: TransitionTable,
    initial_state: String,
    final_states: BTreeSet<String>,
}

impl Service {
    /// Build a service from its transition table, checking every distribution.
    pub fn from_transitions(
        name: impl Into<String>,
        transitions: TransitionTable,
        initial_state: impl Into<String>,
        final_states: BTreeSet<String>,
    ) -> Result<Self> {
        let name = name.into();
        let initial_state = initial_state.into();

        let mut states = BTreeSet::new();
        let mut actions = BTreeSet::new();
        for (state, by_action) in &transitions {
            states.insert(state.clone());
            for (action, transition) in by_action {
                for (next_state, probability) in &transition.outcomes {
                    if !(0.0..=1.0).contains(probability) {
                        return Err(ModelError::Validation {
                            parameter: format!("probability of {} -> {}", state, next_state),
                            value: *probability,
                        });
                    }
                    states.insert(next_state.clone());
                }
                let total = transition.total_probability();
                if (total - 1.0).abs() > PROBABILITY_EPSILON {
                    return Err(ModelError::InconsistentDistribution {
                        state: state.clone(),
                        action: action.to_string(),
                        total,
                    });
                }
                actions.insert(action.clone());
            }
        }

        if !states.contains(&initial_state) {
            return Err(ModelError::UnknownState(initial_state));
        }
        if final_states.is_empty() {
            return Err(ModelError::EmptyFinalStates);
        }
        if let Some(unknown) = final_states.iter().find(|s| !states.contains(*s)) {
            return Err(ModelError::UnknownState(unknown.clone()));
        }

        log::debug!(
            "Built service {} with {} states and {} actions",
            name,
            states.len(),
            actions.len()
        );

        Ok(Self {
            name,
            states,
            actions,
            transitions,
            initial_state,
            final_states,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn actions(&self) -> &BTreeSet<Action> {
        &self.actions
    }

    pub fn transitions(&self) -> &TransitionTable {
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

    pub fn transition(&self, state: &str, action: &Action) -> Option<&ServiceTransition> {
        self.transitions.get(state)?.get(action)
    }

    /// Actions that have a distribution defined in `state`
    pub fn enabled_actions<'a>(&'a self, state: &str) -> impl Iterator<Item = &'a Action> + 'a {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|by_action| by_action.keys())
    }

    /// Possible next states with their probabilities
    pub fn successors<'a>(
        &'a self,
        state: &str,
        action: &Action,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.transition(state, action)
            .into_iter()
            .flat_map(|t| t.outcomes.iter().map(|(s, p)| (s.as_str(), *p)))
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(|by_action| by_action.len()).sum()
    }
}
