use composition_declare::{CompilationError, ProgressionBackend};
use composition_scenarios::{
    build_scenario, build_target, ceramic, motor, Scale, ScenarioError, TargetMode,
};
use composition_services::Action;

fn op(name: &str) -> Action {
    Action::operate(name)
}

#[test]
fn test_ceramic_explicit_target() {
    let backend = ProgressionBackend::new();
    let target = build_target(&ceramic::config(), TargetMode::Automata, &backend).unwrap();
    assert_eq!(target.states().len(), 14);
    assert_eq!(target.num_transitions(), 14);

    let mut trace = vec![op("pro")];
    for stage in &ceramic::ALL_SYMBOLS[1..7] {
        trace.push(op(stage));
        trace.push(Action::check(*stage));
    }
    assert_eq!(target.run(&trace), Some("s13"));
    assert!(target.accepts(&trace));

    trace.push(op("ship"));
    assert_eq!(target.run(&trace), Some("s0"));
    assert!(!target.accepts(&trace));
}

#[test]
fn test_motor_explicit_target_ends_with_no_op() {
    let backend = ProgressionBackend::new();
    let target = build_target(&motor::config(), TargetMode::Automata, &backend).unwrap();
    assert_eq!(target.states().len(), 15);
    assert_eq!(target.initial_state(), "s0");
    assert!(target.is_final("s14"));

    let step = target.next("s13", &Action::no_op()).unwrap();
    assert_eq!(step.next_state, "s14");
    assert_eq!(step.probability, 1.0);
    assert_eq!(step.reward, 0.0);

    let configure = target.next("s3", &Action::configure("ass")).unwrap();
    assert_eq!(configure.next_state, "s4");
}

#[test]
fn test_ceramic_declare_target() {
    let backend = ProgressionBackend::new();
    let target = build_target(&ceramic::config(), TargetMode::Declare, &backend).unwrap();
    assert_eq!(target.states().len(), 9);
    assert_eq!(target.final_states().len(), 1);

    let trace: Vec<Action> = ceramic::ALL_SYMBOLS.iter().map(|s| op(s)).collect();
    assert!(target.accepts(&trace));
    assert!(!target.accepts(&trace[..7]));

    let mut swapped = trace.clone();
    swapped.swap(1, 2);
    assert!(!target.accepts(&swapped));
}

#[test]
fn test_motor_declare_target() {
    let backend = ProgressionBackend::new();
    let target = build_target(&motor::config(), TargetMode::Declare, &backend).unwrap();

    let accepted = ["ret_s", "ret_r", "ret_i", "ass", "run", "pai", "el_t"];
    let trace: Vec<Action> = accepted.iter().map(|s| op(s)).collect();
    assert!(target.accepts(&trace));

    let minimal: Vec<Action> = ["ret_i", "ret_r", "ret_s", "ass", "run"]
        .iter()
        .map(|s| op(s))
        .collect();
    assert!(target.accepts(&minimal));

    let both_tests: Vec<Action> = ["ret_s", "ret_r", "ret_i", "ass", "run", "el_t", "st_t"]
        .iter()
        .map(|s| op(s))
        .collect();
    assert!(!target.accepts(&both_tests));

    let missing_run: Vec<Action> = ["ret_s", "ret_r", "ret_i", "ass", "pai"]
        .iter()
        .map(|s| op(s))
        .collect();
    assert!(!target.accepts(&missing_run));

    let painted_before_assembly: Vec<Action> = ["ret_s", "ret_r", "ret_i", "pai", "ass", "run"]
        .iter()
        .map(|s| op(s))
        .collect();
    assert!(!target.accepts(&painted_before_assembly));

    for by_action in target.transitions().values() {
        for transition in by_action.values() {
            assert_eq!(transition.probability, 1.0);
            assert_eq!(transition.reward, 0.0);
        }
    }
}

#[test]
fn test_build_scenario() {
    let backend = ProgressionBackend::new();
    let scenario = build_scenario(
        &motor::config(),
        Scale::Medium,
        TargetMode::Automata,
        &backend,
    )
    .unwrap();
    assert_eq!(scenario.name, "motor");
    assert_eq!(scenario.num_services(), 16);
    assert_eq!(scenario.target.states().len(), 15);
}

#[test]
fn test_unsatisfiable_declare_target() {
    let mut config = ceramic::config();
    config
        .constraints
        .push(composition_declare::DeclareConstraint::absence(op("ship")));
    let backend = ProgressionBackend::new();
    let err = build_scenario(&config, Scale::XSmall, TargetMode::Declare, &backend).unwrap_err();
    assert_eq!(
        err,
        ScenarioError::Compilation(CompilationError::Unsatisfiable)
    );

    // the explicit form of the same scenario is unaffected
    assert!(build_scenario(&config, Scale::XSmall, TargetMode::Automata, &backend).is_ok());
}
