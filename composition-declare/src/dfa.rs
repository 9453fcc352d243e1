use crate::error::{CompilationError, Result};
use composition_services::Action;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Explicit deterministic automaton with numbered states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Vec<Action>,
    initial: usize,
    accepting: BTreeSet<usize>,
    transitions: Vec<BTreeMap<Action, usize>>,
}

impl Dfa {
    /// `transitions[s]` holds the outgoing edges of state `s`. A missing
    /// edge rejects.
    pub fn new(
        alphabet: impl IntoIterator<Item = Action>,
        initial: usize,
        accepting: BTreeSet<usize>,
        transitions: Vec<BTreeMap<Action, usize>>,
    ) -> Result<Self> {
        let n = transitions.len();
        let out_of_range = std::iter::once(initial)
            .chain(accepting.iter().copied())
            .chain(transitions.iter().flat_map(|edges| edges.values().copied()))
            .find(|s| *s >= n);
        if let Some(state) = out_of_range {
            return Err(CompilationError::Backend(format!(
                "state {} out of range for an automaton with {} states",
                state, n
            )));
        }

        let alphabet: BTreeSet<Action> = alphabet.into_iter().collect();
        Ok(Self {
            alphabet: alphabet.into_iter().collect(),
            initial,
            accepting,
            transitions,
        })
    }

    pub fn alphabet(&self) -> &[Action] {
        &self.alphabet
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn accepting(&self) -> &BTreeSet<usize> {
        &self.accepting
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting.contains(&state)
    }

    pub fn edges(&self, state: usize) -> impl Iterator<Item = (&Action, usize)> {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(a, t)| (a, *t)))
    }

    pub fn next(&self, state: usize, action: &Action) -> Option<usize> {
        self.transitions.get(state)?.get(action).copied()
    }

    pub fn accepts<'a, I>(&self, trace: I) -> bool
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let mut state = self.initial;
        for action in trace {
            match self.next(state, action) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    pub fn reachable_states(&self) -> BTreeSet<usize> {
        self.reachable_where(&|_: &Action| true)
    }

    /// States that are reachable and can still reach an accepting state
    pub fn live_states(&self) -> BTreeSet<usize> {
        self.live_where(&|_: &Action| true)
    }

    /// Like `live_states`, following only edges labelled with `alphabet`
    pub fn live_states_over(&self, alphabet: &BTreeSet<Action>) -> BTreeSet<usize> {
        self.live_where(&|action: &Action| alphabet.contains(action))
    }

    fn reachable_where<F: Fn(&Action) -> bool>(&self, keep: &F) -> BTreeSet<usize> {
        let mut seen = BTreeSet::from([self.initial]);
        let mut queue = VecDeque::from([self.initial]);
        while let Some(state) = queue.pop_front() {
            for (_, next) in self.edges(state).filter(|(a, _)| keep(*a)) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn live_where<F: Fn(&Action) -> bool>(&self, keep: &F) -> BTreeSet<usize> {
        let reachable = self.reachable_where(keep);
        let mut predecessors: HashMap<usize, Vec<usize>> = HashMap::new();
        for &state in &reachable {
            for (_, next) in self.edges(state).filter(|(a, _)| keep(*a)) {
                predecessors.entry(next).or_default().push(state);
            }
        }

        let mut live: BTreeSet<usize> = self
            .accepting
            .iter()
            .copied()
            .filter(|s| reachable.contains(s))
            .collect();
        let mut queue: VecDeque<usize> = live.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            for &pred in predecessors.get(&state).into_iter().flatten() {
                if live.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }
        live
    }

    /// Minimal equivalent automaton (Moore partition refinement), states
    /// numbered in breadth-first order from the initial state.
    pub fn minimize(&self) -> Dfa {
        let n = self.num_states();
        let mut block: Vec<usize> = (0..n).map(|s| usize::from(self.is_accepting(s))).collect();
        let mut num_blocks = block.iter().collect::<BTreeSet<_>>().len();

        loop {
            let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
            let refined: Vec<usize> = (0..n)
                .map(|s| {
                    let successors = self
                        .alphabet
                        .iter()
                        .map(|a| self.next(s, a).map(|t| block[t]))
                        .collect();
                    let fresh = signatures.len();
                    *signatures.entry((block[s], successors)).or_insert(fresh)
                })
                .collect();
            block = refined;
            if signatures.len() == num_blocks {
                break;
            }
            num_blocks = signatures.len();
        }

        let mut representative: HashMap<usize, usize> = HashMap::new();
        for (state, b) in block.iter().enumerate() {
            representative.entry(*b).or_insert(state);
        }

        let mut renumbered: HashMap<usize, usize> = HashMap::from([(block[self.initial], 0)]);
        let mut queue = VecDeque::from([block[self.initial]]);
        let mut transitions: Vec<BTreeMap<Action, usize>> = vec![BTreeMap::new()];
        let mut accepting = BTreeSet::new();
        while let Some(b) = queue.pop_front() {
            let id = renumbered[&b];
            let rep = representative[&b];
            if self.is_accepting(rep) {
                accepting.insert(id);
            }
            for action in &self.alphabet {
                if let Some(target) = self.next(rep, action) {
                    let target_block = block[target];
                    let target_id = match renumbered.get(&target_block) {
                        Some(existing) => *existing,
                        None => {
                            let fresh = transitions.len();
                            renumbered.insert(target_block, fresh);
                            transitions.push(BTreeMap::new());
                            queue.push_back(target_block);
                            fresh
                        }
                    };
                    transitions[id].insert(action.clone(), target_id);
                }
            }
        }

        Dfa {
            alphabet: self.alphabet.clone(),
            initial: 0,
            accepting,
            transitions,
        }
    }
}
