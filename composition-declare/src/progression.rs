//! Built-in LTLf backend based on formula progression
//!
//! A state is a canonical disjunction of clauses; a clause is a set of
//! obligations on the rest of the trace. `Strong(φ)` means "there is a next
//! step and φ holds there", `Weak(φ)` means "if there is a next step, φ holds
//! there". Reading an action unrolls every pending obligation one step; a
//! state is accepting when some clause holds only weak obligations, because
//! the trace may stop there.

use crate::backend::LtlfCompiler;
use crate::dfa::Dfa;
use crate::error::{CompilationError, Result};
use crate::ltlf::Ltlf;
use composition_services::Action;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Bounds on one compilation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendLimits {
    /// Largest automaton (before minimisation) the backend will explore
    pub max_states: usize,
    pub timeout: Option<Duration>,
}

impl Default for BackendLimits {
    fn default() -> Self {
        Self {
            max_states: 100_000,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressionBackend {
    limits: BackendLimits,
}

impl ProgressionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: BackendLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &BackendLimits {
        &self.limits
    }
}

impl LtlfCompiler for ProgressionBackend {
    fn compile(&self, formula: &Ltlf, alphabet: &BTreeSet<Action>) -> Result<Dfa> {
        if alphabet.is_empty() {
            return Err(CompilationError::EmptyAlphabet);
        }
        if let Some(unknown) = formula.atoms().into_iter().find(|a| !alphabet.contains(*a)) {
            return Err(CompilationError::UnknownSymbol(unknown.to_string()));
        }

        let started = Instant::now();
        let initial = Dnf::obligation(Obligation::Strong(nnf(formula, false)));
        let mut index: HashMap<Dnf, usize> = HashMap::from([(initial.clone(), 0)]);
        let mut states = vec![initial];
        let mut transitions: Vec<BTreeMap<Action, usize>> = vec![BTreeMap::new()];
        let mut queue = VecDeque::from([0usize]);

        while let Some(current) = queue.pop_front() {
            if let Some(timeout) = self.limits.timeout {
                if started.elapsed() >= timeout {
                    return Err(CompilationError::Timeout(timeout));
                }
            }
            for action in alphabet {
                let next = states[current].step(action);
                let next_id = match index.get(&next) {
                    Some(id) => *id,
                    None => {
                        let id = states.len();
                        if id >= self.limits.max_states {
                            return Err(CompilationError::StateLimitExceeded(
                                self.limits.max_states,
                            ));
                        }
                        index.insert(next.clone(), id);
                        states.push(next);
                        transitions.push(BTreeMap::new());
                        queue.push_back(id);
                        id
                    }
                };
                transitions[current].insert(action.clone(), next_id);
            }
        }

        let accepting: BTreeSet<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_accepting())
            .map(|(id, _)| id)
            .collect();
        let explored = states.len();
        let dfa = Dfa::new(alphabet.iter().cloned(), 0, accepting, transitions)?.minimize();
        log::debug!(
            "Progression explored {} states, minimal automaton has {} ({:?})",
            explored,
            dfa.num_states(),
            started.elapsed()
        );

        if dfa.accepting().is_empty() {
            return Err(CompilationError::Unsatisfiable);
        }
        Ok(dfa)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Obligation {
    Strong(Ltlf),
    Weak(Ltlf),
}

impl Obligation {
    fn formula(&self) -> &Ltlf {
        match self {
            Obligation::Strong(f) | Obligation::Weak(f) => f,
        }
    }
}

type Clause = BTreeSet<Obligation>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Dnf(BTreeSet<Clause>);

impl Dnf {
    fn truth() -> Self {
        Dnf(BTreeSet::from([Clause::new()]))
    }

    fn falsity() -> Self {
        Dnf(BTreeSet::new())
    }

    fn boolean(value: bool) -> Self {
        if value {
            Self::truth()
        } else {
            Self::falsity()
        }
    }

    fn obligation(obligation: Obligation) -> Self {
        Self::from_clauses([Clause::from([obligation])])
    }

    fn is_false(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical form: simplified clauses, no clause subsumed by another
    fn from_clauses<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        let mut simplified: Vec<Clause> = clauses.into_iter().filter_map(simplify).collect();
        simplified.sort_by_key(|clause| clause.len());

        let mut kept: Vec<Clause> = Vec::new();
        for clause in simplified {
            if !kept.iter().any(|smaller| smaller.is_subset(&clause)) {
                kept.push(clause);
            }
        }
        Dnf(kept.into_iter().collect())
    }

    fn or(self, other: Dnf) -> Dnf {
        Self::from_clauses(self.0.into_iter().chain(other.0))
    }

    fn and(&self, other: &Dnf) -> Dnf {
        let mut product = Vec::with_capacity(self.0.len() * other.0.len());
        for left in &self.0 {
            for right in &other.0 {
                product.push(left.union(right).cloned().collect());
            }
        }
        Self::from_clauses(product)
    }

    fn is_accepting(&self) -> bool {
        self.0.iter().any(|clause| {
            clause
                .iter()
                .all(|obligation| matches!(obligation, Obligation::Weak(_)))
        })
    }

    /// Consume one action: every obligation is unrolled at the new step.
    fn step(&self, action: &Action) -> Dnf {
        let mut result = Dnf::falsity();
        for clause in &self.0 {
            let mut conjunction = Dnf::truth();
            for obligation in clause {
                conjunction = conjunction.and(&expand(obligation.formula(), action));
                if conjunction.is_false() {
                    break;
                }
            }
            result = result.or(conjunction);
        }
        result
    }
}

/// `None` when the clause is unsatisfiable
fn simplify(mut clause: Clause) -> Option<Clause> {
    if clause.contains(&Obligation::Strong(Ltlf::False)) {
        return None;
    }
    clause.remove(&Obligation::Weak(Ltlf::True));
    let strong: Vec<Ltlf> = clause
        .iter()
        .filter_map(|obligation| match obligation {
            Obligation::Strong(f) => Some(f.clone()),
            Obligation::Weak(_) => None,
        })
        .collect();
    for f in strong {
        clause.remove(&Obligation::Weak(f));
    }
    Some(clause)
}

/// Evaluate `formula` at a step where `action` happens, leaving next-step
/// obligations pending. Expects negation normal form.
fn expand(formula: &Ltlf, action: &Action) -> Dnf {
    match formula {
        Ltlf::True => Dnf::truth(),
        Ltlf::False => Dnf::falsity(),
        Ltlf::Atom(a) => Dnf::boolean(a == action),
        Ltlf::Not(inner) => match inner.as_ref() {
            Ltlf::Atom(a) => Dnf::boolean(a != action),
            _ => expand(&nnf(formula, false), action),
        },
        Ltlf::Implies(..) => expand(&nnf(formula, false), action),
        Ltlf::And(l, r) => {
            let left = expand(l, action);
            if left.is_false() {
                return left;
            }
            left.and(&expand(r, action))
        }
        Ltlf::Or(l, r) => expand(l, action).or(expand(r, action)),
        Ltlf::Next(inner) => Dnf::obligation(Obligation::Strong(inner.as_ref().clone())),
        Ltlf::WeakNext(inner) => Dnf::obligation(Obligation::Weak(inner.as_ref().clone())),
        Ltlf::Eventually(inner) => {
            expand(inner, action).or(Dnf::obligation(Obligation::Strong(formula.clone())))
        }
        Ltlf::Always(inner) => {
            expand(inner, action).and(&Dnf::obligation(Obligation::Weak(formula.clone())))
        }
        Ltlf::Until(l, r) => {
            let pending = expand(l, action).and(&Dnf::obligation(Obligation::Strong(formula.clone())));
            expand(r, action).or(pending)
        }
        Ltlf::Release(l, r) => {
            let released = expand(l, action).or(Dnf::obligation(Obligation::Weak(formula.clone())));
            expand(r, action).and(&released)
        }
    }
}

/// Negation normal form of `formula`, negated when `negated` is set
fn nnf(formula: &Ltlf, negated: bool) -> Ltlf {
    match (formula, negated) {
        (Ltlf::True, false) | (Ltlf::False, true) => Ltlf::True,
        (Ltlf::False, false) | (Ltlf::True, true) => Ltlf::False,
        (Ltlf::Atom(a), false) => Ltlf::Atom(a.clone()),
        (Ltlf::Atom(a), true) => Ltlf::negate(Ltlf::Atom(a.clone())),
        (Ltlf::Not(inner), _) => nnf(inner, !negated),
        (Ltlf::And(l, r), false) => Ltlf::and(nnf(l, false), nnf(r, false)),
        (Ltlf::And(l, r), true) => Ltlf::or(nnf(l, true), nnf(r, true)),
        (Ltlf::Or(l, r), false) => Ltlf::or(nnf(l, false), nnf(r, false)),
        (Ltlf::Or(l, r), true) => Ltlf::and(nnf(l, true), nnf(r, true)),
        (Ltlf::Implies(l, r), false) => Ltlf::or(nnf(l, true), nnf(r, false)),
        (Ltlf::Implies(l, r), true) => Ltlf::and(nnf(l, false), nnf(r, true)),
        (Ltlf::Next(inner), false) => Ltlf::next(nnf(inner, false)),
        (Ltlf::Next(inner), true) => Ltlf::weak_next(nnf(inner, true)),
        (Ltlf::WeakNext(inner), false) => Ltlf::weak_next(nnf(inner, false)),
        (Ltlf::WeakNext(inner), true) => Ltlf::next(nnf(inner, true)),
        (Ltlf::Until(l, r), false) => Ltlf::until(nnf(l, false), nnf(r, false)),
        (Ltlf::Until(l, r), true) => Ltlf::release(nnf(l, true), nnf(r, true)),
        (Ltlf::Release(l, r), false) => Ltlf::release(nnf(l, false), nnf(r, false)),
        (Ltlf::Release(l, r), true) => Ltlf::until(nnf(l, true), nnf(r, true)),
        (Ltlf::Eventually(inner), false) => Ltlf::eventually(nnf(inner, false)),
        (Ltlf::Eventually(inner), true) => Ltlf::always(nnf(inner, true)),
        (Ltlf::Always(inner), false) => Ltlf::always(nnf(inner, false)),
        (Ltlf::Always(inner), true) => Ltlf::eventually(nnf(inner, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Action {
        Action::operate("a")
    }

    fn b() -> Action {
        Action::operate("b")
    }

    fn compile(formula: &Ltlf) -> Result<Dfa> {
        ProgressionBackend::new().compile(formula, &BTreeSet::from([a(), b()]))
    }

    #[test]
    fn test_nnf_pushes_negation_to_atoms() {
        let formula = Ltlf::negate(Ltlf::always(Ltlf::implies(
            Ltlf::atom(&a()),
            Ltlf::next(Ltlf::atom(&b())),
        )));
        assert_eq!(
            nnf(&formula, false).to_string(),
            "F((a & WX(!b)))"
        );
    }

    #[test]
    fn test_empty_trace_is_rejected() {
        let dfa = compile(&Ltlf::True).unwrap();
        assert!(!dfa.accepts(&[]));
        assert!(dfa.accepts(&[a()]));
        assert!(dfa.accepts(&[b(), a(), b()]));
    }

    #[test]
    fn test_strong_and_weak_next_at_the_end() {
        let strong = compile(&Ltlf::next(Ltlf::always(Ltlf::atom(&a())))).unwrap();
        assert!(!strong.accepts(&[b()]));
        assert!(strong.accepts(&[b(), a()]));

        let weak = compile(&Ltlf::weak_next(Ltlf::atom(&a()))).unwrap();
        assert!(weak.accepts(&[b()]));
        assert!(weak.accepts(&[b(), a()]));
        assert!(!weak.accepts(&[b(), b()]));
    }

    #[test]
    fn test_until() {
        let dfa = compile(&Ltlf::until(
            Ltlf::negate(Ltlf::atom(&b())),
            Ltlf::atom(&a()),
        ))
        .unwrap();
        assert!(dfa.accepts(&[a()]));
        assert!(dfa.accepts(&[a(), b()]));
        assert!(!dfa.accepts(&[b(), a()]));
    }

    #[test]
    fn test_eventually_minimal_automaton() {
        let dfa = compile(&Ltlf::eventually(Ltlf::atom(&a()))).unwrap();
        assert_eq!(dfa.num_states(), 2);
        assert!(dfa.accepts(&[b(), b(), a()]));
        assert!(!dfa.accepts(&[b(), b()]));
    }

    #[test]
    fn test_unsatisfiable_formula() {
        let formula = Ltlf::and(
            Ltlf::eventually(Ltlf::atom(&a())),
            Ltlf::always(Ltlf::negate(Ltlf::atom(&a()))),
        );
        assert_eq!(compile(&formula).unwrap_err(), CompilationError::Unsatisfiable);
    }

    #[test]
    fn test_unknown_symbol_and_empty_alphabet() {
        let formula = Ltlf::atom(&Action::operate("c"));
        assert_eq!(
            compile(&formula).unwrap_err(),
            CompilationError::UnknownSymbol("c".to_string())
        );
        assert_eq!(
            ProgressionBackend::new()
                .compile(&Ltlf::True, &BTreeSet::new())
                .unwrap_err(),
            CompilationError::EmptyAlphabet
        );
    }

    #[test]
    fn test_state_limit() {
        let backend = ProgressionBackend::with_limits(BackendLimits {
            max_states: 2,
            timeout: None,
        });
        // a then b then a: needs more than two states
        let formula = Ltlf::and(
            Ltlf::atom(&a()),
            Ltlf::next(Ltlf::and(Ltlf::atom(&b()), Ltlf::next(Ltlf::atom(&a())))),
        );
        let err = backend
            .compile(&formula, &BTreeSet::from([a(), b()]))
            .unwrap_err();
        assert_eq!(err, CompilationError::StateLimitExceeded(2));
    }

    #[test]
    fn test_timeout() {
        let limits = BackendLimits {
            max_states: 100,
            timeout: Some(Duration::ZERO),
        };
        let backend = ProgressionBackend::with_limits(limits);
        assert_eq!(backend.limits(), &limits);
        assert_eq!(ProgressionBackend::new().limits(), &BackendLimits::default());

        let formula = Ltlf::eventually(Ltlf::atom(&a()));
        let err = backend
            .compile(&formula, &BTreeSet::from([a(), b()]))
            .unwrap_err();
        assert_eq!(err, CompilationError::Timeout(Duration::ZERO));
    }
}
