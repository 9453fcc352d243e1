//! Templated service constructors
//!
//! | Shape              | States                                              |
//! |--------------------|-----------------------------------------------------|
//! | one-state          | ready                                               |
//! | breakable          | available, done, broken                             |
//! | complex breakable  | ready, configured, executing, broken, repaired      |
//!
//! Branches with probability zero are left out of a distribution instead of
//! being encoded with weight zero.

use crate::action::{Action, Symbol};
use crate::error::{ModelError, Result};
use crate::service::{Service, ServiceTransition, TransitionTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const READY: &str = "ready";
pub const AVAILABLE: &str = "available";
pub const DONE: &str = "done";
pub const BROKEN: &str = "broken";
pub const CONFIGURED: &str = "configured";
pub const EXECUTING: &str = "executing";
pub const REPAIRED: &str = "repaired";

/// Parameters of a breakable service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakableParams {
    /// Chance that performing the operation breaks the provider
    pub broken_prob: f64,
    /// Reward of checking a broken provider
    pub broken_reward: f64,
    /// Reward of the operation itself
    pub action_reward: f64,
}

/// Parameters of a complex breakable service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexBreakableParams {
    pub broken_prob: f64,
    /// Chance that the configuration check finds the provider unusable
    pub unemployable_prob: f64,
    /// Reward of resetting a broken provider
    pub broken_reward: f64,
    pub action_reward: f64,
}

fn check_probability(parameter: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::Validation {
            parameter: parameter.to_string(),
            value,
        })
    }
}

/// Success/failure split, omitting whichever branch has probability zero
fn branching(success: &str, failure: &str, failure_prob: f64) -> BTreeMap<String, f64> {
    let mut outcomes = BTreeMap::new();
    let success_prob = 1.0 - failure_prob;
    if success_prob > 0.0 {
        outcomes.insert(success.to_string(), success_prob);
    }
    if failure_prob > 0.0 {
        outcomes.insert(failure.to_string(), failure_prob);
    }
    outcomes
}

fn add(table: &mut TransitionTable, state: &str, action: Action, transition: ServiceTransition) {
    table
        .entry(state.to_string())
        .or_default()
        .insert(action, transition);
}

/// Always available provider offering interchangeable operations at a fixed
/// reward. Every operation self-loops on `ready`.
pub fn one_state_service<I, S>(name: &str, operations: I, action_reward: f64) -> Result<Service>
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    let mut table = TransitionTable::new();
    for operation in operations {
        add(
            &mut table,
            READY,
            Action::operate(operation),
            ServiceTransition::certain(READY, action_reward),
        );
    }
    if table.is_empty() {
        return Err(ModelError::NoOperations(name.to_string()));
    }
    Service::from_transitions(name, table, READY, BTreeSet::from([READY.to_string()]))
}

/// Provider that may break while operating; a check step always brings it
/// back to `available`.
pub fn breakable_service(
    name: &str,
    operation: impl Into<Symbol>,
    params: &BreakableParams,
) -> Result<Service> {
    check_probability("broken_prob", params.broken_prob)?;
    let base = operation.into();

    let mut table = TransitionTable::new();
    add(
        &mut table,
        AVAILABLE,
        Action::operate(&base),
        ServiceTransition::new(
            branching(DONE, BROKEN, params.broken_prob),
            params.action_reward,
        ),
    );
    add(
        &mut table,
        BROKEN,
        Action::check(&base),
        ServiceTransition::certain(AVAILABLE, params.broken_reward),
    );
    add(
        &mut table,
        DONE,
        Action::check(&base),
        ServiceTransition::certain(AVAILABLE, 0.0),
    );

    Service::from_transitions(name, table, AVAILABLE, BTreeSet::from([AVAILABLE.to_string()]))
}

/// Provider that is configured and checked before every use. It can fail at
/// the check (unemployable) or while operating (broken); a broken provider is
/// reset and repaired before it is ready again.
pub fn complex_breakable_service(
    name: &str,
    operation: impl Into<Symbol>,
    params: &ComplexBreakableParams,
) -> Result<Service> {
    check_probability("broken_prob", params.broken_prob)?;
    check_probability("unemployable_prob", params.unemployable_prob)?;
    let base = operation.into();

    let mut table = TransitionTable::new();
    add(
        &mut table,
        READY,
        Action::configure(&base),
        ServiceTransition::certain(CONFIGURED, 0.0),
    );
    add(
        &mut table,
        CONFIGURED,
        Action::check_configure(&base),
        ServiceTransition::new(branching(EXECUTING, BROKEN, params.unemployable_prob), 0.0),
    );
    add(
        &mut table,
        EXECUTING,
        Action::operate(&base),
        ServiceTransition::new(
            branching(READY, BROKEN, params.broken_prob),
            params.action_reward,
        ),
    );
    add(
        &mut table,
        BROKEN,
        Action::reset(&base),
        ServiceTransition::certain(REPAIRED, params.broken_reward),
    );
    add(
        &mut table,
        REPAIRED,
        Action::repair(&base),
        ServiceTransition::certain(READY, 0.0),
    );

    Service::from_transitions(name, table, READY, BTreeSet::from([READY.to_string()]))
}
