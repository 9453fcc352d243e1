use composition_services::{Action, ModelError, TargetAutomatonBuilder, TargetEntry};

#[test]
fn test_duplicate_state_action_is_non_deterministic() {
    let err = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::operate("pro"), "s1")
        .transition("s0", Action::operate("pro"), "s2")
        .final_state("s1")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::NonDeterministicTarget {
            state: "s0".to_string(),
            action: "pro".to_string()
        }
    );
}

#[test]
fn test_same_action_from_different_states_is_fine() {
    let target = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::operate("pro"), "s1")
        .transition("s1", Action::operate("pro"), "s2")
        .final_state("s2")
        .build()
        .unwrap();
    assert_eq!(target.num_transitions(), 2);
}

#[test]
fn test_final_state_must_be_reachable() {
    let err = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::operate("pro"), "s1")
        .transition("s2", Action::operate("ship"), "s3")
        .final_state("s3")
        .build()
        .unwrap_err();
    assert_eq!(err, ModelError::UnreachableFinalState("s0".to_string()));
}

#[test]
fn test_final_states_must_exist() {
    let err = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::operate("pro"), "s1")
        .build()
        .unwrap_err();
    assert_eq!(err, ModelError::EmptyFinalStates);

    let err = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::operate("pro"), "s1")
        .final_state("s9")
        .build()
        .unwrap_err();
    assert_eq!(err, ModelError::UnknownState("s9".to_string()));
}

#[test]
fn test_configure_check_operate_triplet_with_trailing_no_op() {
    let target = TargetAutomatonBuilder::new("s0")
        .transition("s0", Action::configure("ass"), "s1")
        .transition("s1", Action::check_configure("ass"), "s2")
        .transition("s2", Action::operate("ass"), "s3")
        .trailing_no_op("s3", "s4")
        .final_state("s4")
        .build()
        .unwrap();

    let trace = [
        Action::configure("ass"),
        Action::check_configure("ass"),
        Action::operate("ass"),
        Action::no_op(),
    ];
    assert!(target.accepts(&trace));
    assert!(!target.accepts(&trace[..3]));
    assert!(target.alphabet().contains(&Action::no_op()));
    for by_action in target.transitions().values() {
        for transition in by_action.values() {
            assert_eq!(transition.probability, 1.0);
        }
    }
}

#[test]
fn test_entries_keep_rewards() {
    let target = TargetAutomatonBuilder::new("s0")
        .entries(vec![
            TargetEntry::new("s0", Action::operate("ship"), "s1").with_reward(-2.5),
            TargetEntry::new("s1", Action::check("ship"), "s0"),
        ])
        .final_state("s1")
        .build()
        .unwrap();
    assert_eq!(target.next("s0", &Action::operate("ship")).unwrap().reward, -2.5);
    assert_eq!(target.next("s1", &Action::check("ship")).unwrap().next_state, "s0");
}
