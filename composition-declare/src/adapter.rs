use crate::dfa::Dfa;
use crate::error::{CompilationError, Result};
use composition_services::{Action, TargetAutomaton, TargetAutomatonBuilder};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Adapt a synthesised DFA into the target-automaton shape.
///
/// Transitions outside `alphabet` are dropped, as are states that are
/// unreachable or cannot reach an accepting state. The remaining states are
/// named `q0, q1, ...` in breadth-first order, every transition gets
/// probability 1.0 and reward 0.
pub fn from_dfa_to_declare_automaton(
    dfa: &Dfa,
    alphabet: &BTreeSet<Action>,
) -> Result<TargetAutomaton> {
    let live = dfa.live_states_over(alphabet);
    if !live.contains(&dfa.initial()) {
        return Err(CompilationError::Unsatisfiable);
    }

    let mut names: BTreeMap<usize, String> = BTreeMap::from([(dfa.initial(), "q0".to_string())]);
    let mut queue = VecDeque::from([dfa.initial()]);
    let mut builder = TargetAutomatonBuilder::new("q0").alphabet(alphabet.iter().cloned());

    while let Some(state) = queue.pop_front() {
        let from = names[&state].clone();
        if dfa.is_accepting(state) {
            builder = builder.final_state(from.clone());
        }
        for action in alphabet {
            let Some(next) = dfa.next(state, action) else {
                continue;
            };
            if !live.contains(&next) {
                continue;
            }
            let to = match names.get(&next) {
                Some(name) => name.clone(),
                None => {
                    let name = format!("q{}", names.len());
                    names.insert(next, name.clone());
                    queue.push_back(next);
                    name
                }
            };
            builder = builder.transition(from.clone(), action.clone(), to);
        }
    }

    Ok(builder.build()?)
}
