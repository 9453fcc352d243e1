//! Scenario tables
//!
//! A scenario is described by data only: its base symbols, failure
//! defaults, a provider table tagged with the smallest scale that includes
//! each provider, an explicit target table and a Declare constraint list.
//! The built-in ceramic and motor scenarios are values of this type, and
//! the same shape can be loaded from JSON.

use crate::error::{Result, ScenarioError};
use crate::scale::Scale;
use anyhow::Context;
use composition_declare::{DeclareConstraint, DeclareSpecification};
use composition_services::{
    breakable_service, complex_breakable_service, one_state_service, Action, BreakableParams,
    ComplexBreakableParams, Role, Service, Symbol, TargetAutomaton, TargetAutomatonBuilder,
    TargetEntry,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

pub const LOW_PROB: f64 = 0.05;
pub const DEFAULT_BROKEN_REWARD: f64 = -20.0;

const QUALIFIED_ROLES: [Role; 6] = [
    Role::Operate,
    Role::Check,
    Role::Configure,
    Role::CheckConfigure,
    Role::Reset,
    Role::Repair,
];

/// Failure parameters used by providers that don't override them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureDefaults {
    pub broken_prob: f64,
    pub unemployable_prob: f64,
    pub broken_reward: f64,
}

impl Default for FailureDefaults {
    fn default() -> Self {
        Self {
            broken_prob: LOW_PROB,
            unemployable_prob: LOW_PROB,
            broken_reward: DEFAULT_BROKEN_REWARD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleShape {
    OneState,
    Breakable,
    ComplexBreakable,
}

/// One row of a provider table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    pub shape: LifecycleShape,
    pub operations: Vec<Symbol>,
    pub reward: f64,
    /// Smallest scale whose catalog includes this provider
    #[serde(default)]
    pub since: Scale,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken_prob: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unemployable_prob: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken_reward: Option<f64>,
}

impl ProviderSpec {
    fn new(name: &str, shape: LifecycleShape, operations: Vec<Symbol>, reward: f64) -> Self {
        Self {
            name: name.to_string(),
            shape,
            operations,
            reward,
            since: Scale::XSmall,
            broken_prob: None,
            unemployable_prob: None,
            broken_reward: None,
        }
    }

    pub fn one_state<I, S>(name: &str, operations: I, reward: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let operations = operations.into_iter().map(Into::into).collect();
        Self::new(name, LifecycleShape::OneState, operations, reward)
    }

    pub fn breakable(name: &str, operation: impl Into<Symbol>, reward: f64) -> Self {
        Self::new(name, LifecycleShape::Breakable, vec![operation.into()], reward)
    }

    pub fn complex_breakable(name: &str, operation: impl Into<Symbol>, reward: f64) -> Self {
        Self::new(
            name,
            LifecycleShape::ComplexBreakable,
            vec![operation.into()],
            reward,
        )
    }

    pub fn since(mut self, scale: Scale) -> Self {
        self.since = scale;
        self
    }

    pub fn with_broken_prob(mut self, broken_prob: f64) -> Self {
        self.broken_prob = Some(broken_prob);
        self
    }

    pub fn with_unemployable_prob(mut self, unemployable_prob: f64) -> Self {
        self.unemployable_prob = Some(unemployable_prob);
        self
    }

    pub fn with_broken_reward(mut self, broken_reward: f64) -> Self {
        self.broken_reward = Some(broken_reward);
        self
    }

    fn single_operation(&self) -> Result<&Symbol> {
        match self.operations.as_slice() {
            [operation] => Ok(operation),
            _ => Err(ScenarioError::InvalidConfig(format!(
                "provider {} has shape {:?} and needs exactly one operation, found {}",
                self.name,
                self.shape,
                self.operations.len()
            ))),
        }
    }

    pub fn build(&self, defaults: &FailureDefaults) -> Result<Service> {
        let broken_prob = self.broken_prob.unwrap_or(defaults.broken_prob);
        let broken_reward = self.broken_reward.unwrap_or(defaults.broken_reward);
        let service = match self.shape {
            LifecycleShape::OneState => {
                one_state_service(&self.name, &self.operations, self.reward)?
            }
            LifecycleShape::Breakable => breakable_service(
                &self.name,
                self.single_operation()?,
                &BreakableParams {
                    broken_prob,
                    broken_reward,
                    action_reward: self.reward,
                },
            )?,
            LifecycleShape::ComplexBreakable => complex_breakable_service(
                &self.name,
                self.single_operation()?,
                &ComplexBreakableParams {
                    broken_prob,
                    unemployable_prob: self
                        .unemployable_prob
                        .unwrap_or(defaults.unemployable_prob),
                    broken_reward,
                    action_reward: self.reward,
                },
            )?,
        };
        Ok(service)
    }
}

/// Final `no_op` step that makes the target's last state absorbing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoOpStep {
    pub from: String,
    pub to: String,
}

/// Explicit target automaton as a table of transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetTable {
    pub initial_state: String,
    pub final_states: Vec<String>,
    pub entries: Vec<TargetEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_no_op: Option<NoOpStep>,
}

impl TargetTable {
    pub fn new(initial_state: &str) -> Self {
        Self {
            initial_state: initial_state.to_string(),
            final_states: Vec::new(),
            entries: Vec::new(),
            trailing_no_op: None,
        }
    }

    pub fn build(&self) -> composition_services::Result<TargetAutomaton> {
        let mut builder = TargetAutomatonBuilder::new(self.initial_state.as_str())
            .final_states(&self.final_states)
            .entries(self.entries.iter().cloned());
        if let Some(step) = &self.trailing_no_op {
            builder = builder.trailing_no_op(step.from.as_str(), step.to.as_str());
        }
        builder.build()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub symbols: Vec<Symbol>,
    #[serde(default)]
    pub defaults: FailureDefaults,
    pub providers: Vec<ProviderSpec>,
    pub target: TargetTable,
    #[serde(default)]
    pub constraints: Vec<DeclareConstraint>,
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario config: {}", path.display()))?;
        let config: ScenarioConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scenario config: {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write scenario config: {}", path.display()))?;
        Ok(())
    }

    /// Every role-qualified action over the declared symbols, plus `no_op`
    pub fn alphabet(&self) -> BTreeSet<Action> {
        self.symbols
            .iter()
            .flat_map(|symbol| {
                QUALIFIED_ROLES
                    .into_iter()
                    .map(move |role| Action::new(role, symbol))
            })
            .chain(std::iter::once(Action::no_op()))
            .collect()
    }

    /// Constraints over the plain operations of the declared symbols
    pub fn declare_specification(&self) -> DeclareSpecification {
        DeclareSpecification::new(
            self.constraints.clone(),
            self.symbols.iter().map(Action::operate),
        )
    }

    pub fn providers_for(&self, scale: Scale) -> impl Iterator<Item = &ProviderSpec> {
        self.providers.iter().filter(move |p| p.since <= scale)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ScenarioError::InvalidConfig(msg));

        if self.symbols.is_empty() {
            return invalid(format!("scenario {} declares no symbols", self.name));
        }
        let symbols: HashSet<&Symbol> = self.symbols.iter().collect();
        if symbols.len() != self.symbols.len() {
            return invalid(format!("scenario {} declares a symbol twice", self.name));
        }

        check_probability("defaults.broken_prob", self.defaults.broken_prob)?;
        check_probability("defaults.unemployable_prob", self.defaults.unemployable_prob)?;

        let mut names = HashSet::new();
        for provider in &self.providers {
            if !names.insert(provider.name.as_str()) {
                return invalid(format!("duplicate provider name {}", provider.name));
            }
            if provider.operations.is_empty() {
                return invalid(format!("provider {} offers no operations", provider.name));
            }
            if provider.shape != LifecycleShape::OneState {
                provider.single_operation()?;
            }
            if let Some(op) = provider.operations.iter().find(|op| !symbols.contains(op)) {
                return invalid(format!(
                    "provider {} operates on undeclared symbol {}",
                    provider.name, op
                ));
            }
            if let Some(p) = provider.broken_prob {
                check_probability(&format!("{}.broken_prob", provider.name), p)?;
            }
            if let Some(p) = provider.unemployable_prob {
                check_probability(&format!("{}.unemployable_prob", provider.name), p)?;
            }
        }

        for scale in Scale::ALL {
            if !self.providers.iter().any(|p| p.since == scale) {
                return invalid(format!(
                    "scale {} adds no provider to scenario {}",
                    scale, self.name
                ));
            }
        }

        let target_actions = self
            .target
            .entries
            .iter()
            .map(|entry| &entry.action)
            .filter(|action| action.role != Role::Idle);
        let constraint_actions = self.constraints.iter().flat_map(|c| c.symbols());
        if let Some(action) = target_actions
            .chain(constraint_actions)
            .find(|action| !symbols.contains(&&action.base))
        {
            return invalid(format!("action {} uses an undeclared symbol", action));
        }

        Ok(())
    }
}

fn check_probability(parameter: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScenarioError::InvalidConfig(format!(
            "{} = {} is outside [0, 1]",
            parameter, value
        )))
    }
}
