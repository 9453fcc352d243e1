//! Ceramic production scenario
//!
//! Raw material is provisioned, moulded, dried, baked, enamelled, painted,
//! baked a second time and shipped. Provisioning and shipping are one-state
//! suppliers; every middle stage is a breakable machine that is checked
//! after each use.

use crate::config::{FailureDefaults, ProviderSpec, ScenarioConfig, TargetTable};
use crate::rewards::*;
use crate::scale::Scale;
use composition_declare::DeclareConstraint;
use composition_services::{Action, Symbol, TargetEntry};

pub const PROVISIONING: &str = "pro";
pub const MOULDING: &str = "moul";
pub const DRYING: &str = "dry";
pub const FIRST_BAKING: &str = "f_bak";
pub const ENAMELLING: &str = "ena";
pub const PAINT: &str = "paint";
pub const SECOND_BAKING: &str = "s_bak";
pub const SHIPPING: &str = "ship";

/// Process order
pub const ALL_SYMBOLS: [&str; 8] = [
    PROVISIONING,
    MOULDING,
    DRYING,
    FIRST_BAKING,
    ENAMELLING,
    PAINT,
    SECOND_BAKING,
    SHIPPING,
];

fn providers() -> Vec<ProviderSpec> {
    vec![
        ProviderSpec::one_state("pro1_usa", [PROVISIONING], USA_REWARD),
        ProviderSpec::breakable("moul1_usa", MOULDING, USA_REWARD),
        ProviderSpec::breakable("dry1_usa", DRYING, USA_REWARD),
        ProviderSpec::breakable("f_bak1_usa", FIRST_BAKING, USA_REWARD),
        ProviderSpec::breakable("enam1_usa", ENAMELLING, USA_REWARD),
        ProviderSpec::breakable("pain1_usa", PAINT, USA_REWARD),
        ProviderSpec::breakable("s_bak1_usa", SECOND_BAKING, USA_REWARD),
        ProviderSpec::one_state("ship1_usa", [SHIPPING], USA_REWARD),
        // small
        ProviderSpec::one_state("pro2_uk", [PROVISIONING], UK_REWARD).since(Scale::Small),
        ProviderSpec::breakable("moul2_usa", MOULDING, USA_REWARD - 1.0).since(Scale::Small),
        ProviderSpec::breakable("dry2_usa", DRYING, USA_REWARD - 1.0).since(Scale::Small),
        ProviderSpec::one_state("ship2_canada", [SHIPPING], CANADA_REWARD).since(Scale::Small),
        // medium
        ProviderSpec::one_state("pro3_china", [PROVISIONING], CHINA_REWARD).since(Scale::Medium),
        ProviderSpec::breakable("f_bak2_usa", FIRST_BAKING, USA_REWARD - 1.0)
            .since(Scale::Medium),
        ProviderSpec::breakable("enam2_usa", ENAMELLING, USA_REWARD - 1.0).since(Scale::Medium),
        ProviderSpec::one_state("ship3_brazil", [SHIPPING], BRAZIL_REWARD).since(Scale::Medium),
        // large
        ProviderSpec::one_state("pro4_belgium", [PROVISIONING], BELGIUM_REWARD)
            .since(Scale::Large),
        ProviderSpec::breakable("pain2_usa", PAINT, USA_REWARD - 1.0).since(Scale::Large),
        ProviderSpec::breakable("s_bak2_usa", SECOND_BAKING, USA_REWARD - 1.0)
            .since(Scale::Large),
        ProviderSpec::one_state("ship4_austria", [SHIPPING], AUSTRIA_REWARD).since(Scale::Large),
    ]
}

/// Operate then check every stage; shipping closes the loop back to `s0`.
fn target() -> TargetTable {
    let mut chain = vec![Action::operate(PROVISIONING)];
    for stage in &ALL_SYMBOLS[1..7] {
        chain.push(Action::operate(*stage));
        chain.push(Action::check(*stage));
    }
    let mut entries: Vec<TargetEntry> = chain
        .into_iter()
        .enumerate()
        .map(|(i, action)| TargetEntry::new(format!("s{}", i), action, format!("s{}", i + 1)))
        .collect();
    let last = format!("s{}", entries.len());
    entries.push(TargetEntry::new(
        last.clone(),
        Action::operate(SHIPPING),
        "s0",
    ));

    TargetTable {
        initial_state: "s0".to_string(),
        final_states: vec![last],
        entries,
        trailing_no_op: None,
    }
}

fn constraints() -> Vec<DeclareConstraint> {
    let mut constraints: Vec<DeclareConstraint> = ALL_SYMBOLS
        .iter()
        .map(|s| DeclareConstraint::exactly_once(Action::operate(*s)))
        .collect();
    for pair in ALL_SYMBOLS.windows(2) {
        constraints.push(DeclareConstraint::alt_succession(
            Action::operate(pair[0]),
            Action::operate(pair[1]),
        ));
    }
    constraints
}

pub fn config() -> ScenarioConfig {
    ScenarioConfig {
        name: "ceramic".to_string(),
        symbols: ALL_SYMBOLS.iter().map(|s| Symbol::from(*s)).collect(),
        defaults: FailureDefaults::default(),
        providers: providers(),
        target: target(),
        constraints: constraints(),
    }
}
