//! The compiler only talks to its backend through `LtlfCompiler`.

use composition_declare::{
    CompilationError, DeclareCompiler, DeclareConstraint, DeclareSpecification, Dfa, Ltlf,
    LtlfCompiler, Result,
};
use composition_services::Action;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

/// Returns a canned answer and records every request
struct MockBackend {
    answer: Result<Dfa>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl MockBackend {
    fn new(answer: Result<Dfa>) -> Self {
        Self {
            answer,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl LtlfCompiler for MockBackend {
    fn compile(&self, formula: &Ltlf, alphabet: &BTreeSet<Action>) -> Result<Dfa> {
        self.requests
            .lock()
            .unwrap()
            .push((formula.to_string(), alphabet.len()));
        self.answer.clone()
    }
}

fn specification() -> DeclareSpecification {
    DeclareSpecification::new(
        vec![DeclareConstraint::existence(Action::operate("a"))],
        [Action::operate("a"), Action::operate("b")],
    )
}

/// "eventually a", with an explicit rejecting sink that is never entered
fn eventually_a() -> Dfa {
    let a = Action::operate("a");
    let b = Action::operate("b");
    Dfa::new(
        [a.clone(), b.clone()],
        0,
        BTreeSet::from([1]),
        vec![
            BTreeMap::from([(a.clone(), 1), (b.clone(), 0)]),
            BTreeMap::from([(a.clone(), 1), (b.clone(), 1)]),
            BTreeMap::from([(a, 2), (b, 2)]),
        ],
    )
    .unwrap()
}

#[test]
fn test_backend_receives_formula_and_alphabet() {
    let backend = MockBackend::new(Ok(eventually_a()));
    let compiled = DeclareCompiler::new(&backend)
        .compile(&specification())
        .unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, compiled.formula().to_string());
    assert_eq!(requests[0].1, 2);

    let target = compiled.automaton();
    assert_eq!(target.states().len(), 2);
    assert!(target.accepts(&[Action::operate("b"), Action::operate("a")]));
}

#[test]
fn test_backend_failures_are_fatal() {
    for failure in [
        CompilationError::Unsatisfiable,
        CompilationError::Timeout(Duration::from_secs(5)),
        CompilationError::Backend("malformed formula".to_string()),
    ] {
        let backend = MockBackend::new(Err(failure.clone()));
        let err = DeclareCompiler::new(&backend)
            .compile(&specification())
            .unwrap_err();
        assert_eq!(err, failure);
        assert_eq!(backend.requests().len(), 1, "no retry expected");
    }
}

#[test]
fn test_unknown_symbol_is_rejected_before_backend_call() {
    let backend = MockBackend::new(Ok(eventually_a()));
    let specification = DeclareSpecification::new(
        vec![DeclareConstraint::response(
            Action::operate("a"),
            Action::operate("z"),
        )],
        [Action::operate("a"), Action::operate("b")],
    );
    let err = DeclareCompiler::new(&backend)
        .compile(&specification)
        .unwrap_err();
    assert_eq!(err, CompilationError::UnknownSymbol("z".to_string()));
    assert!(backend.requests().is_empty());
}

#[test]
fn test_empty_alphabet() {
    let backend = MockBackend::new(Ok(eventually_a()));
    let specification = DeclareSpecification::new(Vec::new(), Vec::<Action>::new());
    let err = DeclareCompiler::new(&backend)
        .compile(&specification)
        .unwrap_err();
    assert_eq!(err, CompilationError::EmptyAlphabet);
}
