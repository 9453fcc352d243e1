use composition_declare::{
    DeclareAutomaton, DeclareCompiler, DeclareConstraint, DeclareSpecification, ProgressionBackend,
};
use composition_services::{Action, TargetAutomaton};

fn act(name: &str) -> Action {
    Action::operate(name)
}

fn trace(names: &[&str]) -> Vec<Action> {
    names.iter().map(|n| act(n)).collect()
}

fn compile(constraints: Vec<DeclareConstraint>, alphabet: &[&str]) -> DeclareAutomaton {
    let backend = ProgressionBackend::new();
    let specification = DeclareSpecification::new(constraints, alphabet.iter().map(|n| act(n)));
    DeclareCompiler::new(&backend)
        .compile(&specification)
        .unwrap()
}

fn accepts(target: &TargetAutomaton, names: &[&str]) -> bool {
    target.accepts(&trace(names))
}

#[test]
fn test_exactly_once() {
    let compiled = compile(vec![DeclareConstraint::exactly_once(act("a"))], &["a", "b"]);
    let target = compiled.automaton();
    assert!(accepts(target, &["a"]));
    assert!(accepts(target, &["b", "a", "b"]));
    assert!(!accepts(target, &["b"]));
    assert!(!accepts(target, &["b", "b"]));
    assert!(!accepts(target, &["a", "a"]));
    assert!(!accepts(target, &["a", "b", "a"]));
}

#[test]
fn test_absence_2() {
    let compiled = compile(vec![DeclareConstraint::absence_2(act("a"))], &["a", "b"]);
    let target = compiled.automaton();
    assert!(accepts(target, &["b"]));
    assert!(accepts(target, &["a", "b"]));
    assert!(!accepts(target, &["a", "b", "a"]));
}

#[test]
fn test_alt_succession() {
    let compiled = compile(
        vec![DeclareConstraint::alt_succession(act("a"), act("b"))],
        &["a", "b"],
    );
    let target = compiled.automaton();
    assert!(accepts(target, &["a", "b", "a", "b"]));
    assert!(accepts(target, &["a", "b"]));
    assert!(!accepts(target, &["a", "a", "b"]));
    assert!(!accepts(target, &["b", "a", "b"]));
    assert!(!accepts(target, &["a", "b", "a"]));
    assert!(!accepts(target, &["a", "b", "b"]));
}

#[test]
fn test_alt_precedence() {
    let compiled = compile(
        vec![DeclareConstraint::alt_precedence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    let target = compiled.automaton();
    assert!(accepts(target, &["a", "b", "a", "b"]));
    assert!(accepts(target, &["c", "a"]));
    assert!(accepts(target, &["a", "a", "b"]));
    assert!(!accepts(target, &["b"]));
    assert!(!accepts(target, &["a", "b", "b"]));
    assert!(!accepts(target, &["a", "b", "c", "b"]));
}

#[test]
fn test_not_coexistence() {
    let compiled = compile(
        vec![DeclareConstraint::not_coexistence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    let target = compiled.automaton();
    assert!(accepts(target, &["a", "c", "a"]));
    assert!(accepts(target, &["b"]));
    assert!(accepts(target, &["c"]));
    assert!(!accepts(target, &["a", "c", "b"]));
    assert!(!accepts(target, &["b", "a"]));
}

#[test]
fn test_existence_absence_and_init() {
    let existence = compile(vec![DeclareConstraint::existence(act("a"))], &["a", "b"]);
    assert!(accepts(existence.automaton(), &["b", "a"]));
    assert!(!accepts(existence.automaton(), &["b", "b"]));

    let absence = compile(vec![DeclareConstraint::absence(act("a"))], &["a", "b"]);
    assert!(accepts(absence.automaton(), &["b", "b"]));
    assert!(!accepts(absence.automaton(), &["b", "a"]));

    let init = compile(vec![DeclareConstraint::init(act("a"))], &["a", "b"]);
    assert!(accepts(init.automaton(), &["a", "b"]));
    assert!(!accepts(init.automaton(), &["b", "a"]));
}

#[test]
fn test_response_and_precedence() {
    let response = compile(
        vec![DeclareConstraint::response(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(response.automaton(), &["a", "a", "c", "b"]));
    assert!(accepts(response.automaton(), &["c"]));
    assert!(!accepts(response.automaton(), &["a", "b", "a"]));

    let precedence = compile(
        vec![DeclareConstraint::precedence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(precedence.automaton(), &["c", "a", "b", "b"]));
    assert!(!accepts(precedence.automaton(), &["c", "b", "a"]));

    let succession = compile(
        vec![DeclareConstraint::succession(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(succession.automaton(), &["a", "c", "b"]));
    assert!(!accepts(succession.automaton(), &["a", "c"]));
    assert!(!accepts(succession.automaton(), &["b", "a", "b"]));
}

#[test]
fn test_existence_relations() {
    let responded = compile(
        vec![DeclareConstraint::responded_existence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(responded.automaton(), &["b", "a"]));
    assert!(accepts(responded.automaton(), &["c"]));
    assert!(!accepts(responded.automaton(), &["a", "c"]));

    let co_existence = compile(
        vec![DeclareConstraint::co_existence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(co_existence.automaton(), &["b", "c", "a"]));
    assert!(!accepts(co_existence.automaton(), &["b", "c"]));
    assert!(!accepts(co_existence.automaton(), &["a"]));
}

#[test]
fn test_chain_templates() {
    let chain_response = compile(
        vec![DeclareConstraint::chain_response(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(chain_response.automaton(), &["a", "b", "c"]));
    assert!(!accepts(chain_response.automaton(), &["a", "c", "b"]));
    assert!(!accepts(chain_response.automaton(), &["c", "a"]));

    let chain_precedence = compile(
        vec![DeclareConstraint::chain_precedence(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(chain_precedence.automaton(), &["c", "a", "b"]));
    assert!(!accepts(chain_precedence.automaton(), &["c", "b"]));

    let alt_response = compile(
        vec![DeclareConstraint::alt_response(act("a"), act("b"))],
        &["a", "b", "c"],
    );
    assert!(accepts(alt_response.automaton(), &["a", "b", "b", "a", "b"]));
    assert!(!accepts(alt_response.automaton(), &["a", "a", "b"]));
}

#[test]
fn test_linear_process_has_a_single_trace() {
    let symbols = ["pro", "moul", "dry", "ship"];
    let mut constraints: Vec<DeclareConstraint> = symbols
        .iter()
        .map(|s| DeclareConstraint::exactly_once(act(s)))
        .collect();
    for pair in symbols.windows(2) {
        constraints.push(DeclareConstraint::alt_succession(act(pair[0]), act(pair[1])));
    }

    let compiled = compile(constraints, &symbols);
    let target = compiled.automaton();
    assert_eq!(target.states().len(), symbols.len() + 1);
    assert_eq!(target.num_transitions(), symbols.len());
    assert!(accepts(target, &symbols));
    assert!(!accepts(target, &["pro", "dry", "moul", "ship"]));
    assert!(!accepts(target, &["pro", "moul", "dry"]));
    assert_eq!(target.run(&trace(&symbols)), Some("q4"));
    for by_action in target.transitions().values() {
        for transition in by_action.values() {
            assert_eq!(transition.probability, 1.0);
            assert_eq!(transition.reward, 0.0);
        }
    }
}

#[test]
fn test_formula_conjoins_constraints_and_closure() {
    let compiled = compile(
        vec![
            DeclareConstraint::exactly_once(act("a")),
            DeclareConstraint::not_coexistence(act("a"), act("b")),
        ],
        &["a", "b"],
    );
    let formula = compiled.formula().to_string();
    assert!(formula.contains("F(a)"));
    assert!(formula.contains("!((F(a) & F(b)))"));
    assert!(formula.contains("G((a | b))"));
}
