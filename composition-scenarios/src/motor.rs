//! Electric motor assembly scenario
//!
//! Stator, rotor and inverter are retrieved from warehouses, assembled,
//! run in, then painted and tested. Assembly and the electric test need a
//! configuration step before each use.

use crate::config::{FailureDefaults, NoOpStep, ProviderSpec, ScenarioConfig, TargetTable};
use crate::rewards::*;
use crate::scale::Scale;
use composition_declare::DeclareConstraint;
use composition_services::{Action, Symbol, TargetEntry};

pub const RETRIEVE_STATOR: &str = "ret_s";
pub const RETRIEVE_ROTOR: &str = "ret_r";
pub const RETRIEVE_INVERTER: &str = "ret_i";
pub const RUNNING: &str = "run";
pub const ASSEMBLE: &str = "ass";
pub const ELECTRIC_TEST: &str = "el_t";
pub const PAINTING: &str = "pai";
pub const STATIC_TEST: &str = "st_t";

pub const ALL_SYMBOLS: [&str; 8] = [
    RETRIEVE_STATOR,
    RETRIEVE_ROTOR,
    RETRIEVE_INVERTER,
    RUNNING,
    ASSEMBLE,
    ELECTRIC_TEST,
    PAINTING,
    STATIC_TEST,
];

fn providers() -> Vec<ProviderSpec> {
    vec![
        ProviderSpec::one_state("wh_i_usa", [RETRIEVE_INVERTER], USA_REWARD),
        ProviderSpec::one_state("wh_r_usa", [RETRIEVE_ROTOR], USA_REWARD),
        ProviderSpec::one_state("wh_s_usa", [RETRIEVE_STATOR], USA_REWARD),
        ProviderSpec::complex_breakable("ass_1", ASSEMBLE, USA_REWARD),
        ProviderSpec::breakable("run_1", RUNNING, USA_REWARD),
        ProviderSpec::breakable("pai_1", PAINTING, USA_REWARD),
        ProviderSpec::complex_breakable("el_t_1", ELECTRIC_TEST, USA_REWARD),
        ProviderSpec::breakable("st_t_1", STATIC_TEST, USA_REWARD),
        // small
        ProviderSpec::one_state("wh_i_cl", [RETRIEVE_INVERTER], CHILE_REWARD).since(Scale::Small),
        ProviderSpec::one_state("wh_r_ru", [RETRIEVE_ROTOR], RUSSIA_REWARD).since(Scale::Small),
        ProviderSpec::one_state("wh_s_uk", [RETRIEVE_STATOR], UK_REWARD).since(Scale::Small),
        ProviderSpec::breakable("run_2", RUNNING, USA_REWARD - 1.0).since(Scale::Small),
        // medium
        ProviderSpec::one_state("wh_i_br", [RETRIEVE_INVERTER], BRAZIL_REWARD)
            .since(Scale::Medium),
        ProviderSpec::one_state("wh_r_br", [RETRIEVE_ROTOR], BRAZIL_REWARD).since(Scale::Medium),
        ProviderSpec::breakable("pai_2", PAINTING, USA_REWARD - 1.0).since(Scale::Medium),
        ProviderSpec::breakable("st_t_2", STATIC_TEST, USA_REWARD - 1.0).since(Scale::Medium),
        // large
        ProviderSpec::one_state("wh_r_cn", [RETRIEVE_ROTOR], CHINA_REWARD).since(Scale::Large),
        ProviderSpec::one_state("wh_s_cn", [RETRIEVE_STATOR], CHINA_REWARD).since(Scale::Large),
        ProviderSpec::complex_breakable("ass_2", ASSEMBLE, USA_REWARD - 1.0).since(Scale::Large),
        ProviderSpec::breakable("run_3", RUNNING, USA_REWARD - 2.0).since(Scale::Large),
    ]
}

/// Retrieval, then configure/check/operate for the configured machines and
/// operate/check for the breakable ones, closed by a `no_op` into `s14`.
fn target() -> TargetTable {
    let chain = vec![
        Action::operate(RETRIEVE_INVERTER),
        Action::operate(RETRIEVE_ROTOR),
        Action::operate(RETRIEVE_STATOR),
        Action::configure(ASSEMBLE),
        Action::check_configure(ASSEMBLE),
        Action::operate(ASSEMBLE),
        Action::operate(RUNNING),
        Action::check(RUNNING),
        Action::operate(PAINTING),
        Action::check(PAINTING),
        Action::configure(ELECTRIC_TEST),
        Action::check_configure(ELECTRIC_TEST),
        Action::operate(ELECTRIC_TEST),
    ];
    let last = chain.len();
    let entries = chain
        .into_iter()
        .enumerate()
        .map(|(i, action)| TargetEntry::new(format!("s{}", i), action, format!("s{}", i + 1)))
        .collect();

    TargetTable {
        initial_state: "s0".to_string(),
        final_states: vec![format!("s{}", last + 1)],
        entries,
        trailing_no_op: Some(NoOpStep {
            from: format!("s{}", last),
            to: format!("s{}", last + 1),
        }),
    }
}

fn constraints() -> Vec<DeclareConstraint> {
    let op = |s: &str| Action::operate(s);
    let mut constraints = Vec::new();
    for s in [
        RETRIEVE_STATOR,
        RETRIEVE_ROTOR,
        RETRIEVE_INVERTER,
        RUNNING,
        ASSEMBLE,
    ] {
        constraints.push(DeclareConstraint::exactly_once(op(s)));
    }
    for s in [ELECTRIC_TEST, PAINTING, STATIC_TEST] {
        constraints.push(DeclareConstraint::absence_2(op(s)));
    }
    for s in [RETRIEVE_STATOR, RETRIEVE_ROTOR, RETRIEVE_INVERTER] {
        constraints.push(DeclareConstraint::alt_succession(op(s), op(ASSEMBLE)));
    }
    constraints.push(DeclareConstraint::alt_succession(op(ASSEMBLE), op(RUNNING)));
    for s in [PAINTING, ELECTRIC_TEST, STATIC_TEST] {
        constraints.push(DeclareConstraint::alt_precedence(op(ASSEMBLE), op(s)));
    }
    constraints.push(DeclareConstraint::not_coexistence(
        op(ELECTRIC_TEST),
        op(STATIC_TEST),
    ));
    constraints
}

pub fn config() -> ScenarioConfig {
    ScenarioConfig {
        name: "motor".to_string(),
        symbols: ALL_SYMBOLS.iter().map(|s| Symbol::from(*s)).collect(),
        defaults: FailureDefaults::default(),
        providers: providers(),
        target: target(),
        constraints: constraints(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_is_valid() {
        config().validate().unwrap();
    }

    #[test]
    fn test_constraint_list() {
        let names: Vec<String> = constraints().iter().map(|c| c.to_string()).collect();
        assert_eq!(names.len(), 16);
        assert_eq!(names[0], "exactly_once(ret_s)");
        assert_eq!(names[5], "absence_2(el_t)");
        assert_eq!(names[15], "not_coexistence(el_t, st_t)");
    }
}
