//! Declare constraint templates and their LTLf encodings
//!
//! | Template                  | LTLf                                         |
//! |---------------------------|----------------------------------------------|
//! | `existence(a)`            | `F a`                                        |
//! | `absence(a)`              | `!F a`                                       |
//! | `absence_2(a)`            | `!F(a & X F a)`                              |
//! | `exactly_once(a)`         | `F a & !F(a & X F a)`                        |
//! | `init(a)`                 | `a`                                          |
//! | `responded_existence(a,b)`| `F a -> F b`                                 |
//! | `co_existence(a,b)`       | `(F a -> F b) & (F b -> F a)`                |
//! | `response(a,b)`           | `G(a -> F b)`                                |
//! | `precedence(a,b)`         | `(!b U a) \| G !b`                           |
//! | `succession(a,b)`         | `response(a,b) & precedence(a,b)`            |
//! | `alt_response(a,b)`       | `G(a -> X(!a U b))`                          |
//! | `alt_precedence(a,b)`     | `precedence(a,b) & G(b -> WX precedence(a,b))` |
//! | `alt_succession(a,b)`     | `alt_response(a,b) & alt_precedence(a,b)`    |
//! | `chain_response(a,b)`     | `G(a -> X b)`                                |
//! | `chain_precedence(a,b)`   | `G(X b -> a)`                                |
//! | `not_coexistence(a,b)`    | `!(F a & F b)`                               |

use crate::ltlf::Ltlf;
use composition_services::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum DeclareConstraint {
    Existence { a: Action },
    Absence { a: Action },
    /// At most one occurrence
    #[serde(rename = "absence_2")]
    Absence2 { a: Action },
    ExactlyOnce { a: Action },
    Init { a: Action },
    RespondedExistence { a: Action, b: Action },
    CoExistence { a: Action, b: Action },
    Response { a: Action, b: Action },
    Precedence { a: Action, b: Action },
    Succession { a: Action, b: Action },
    AltResponse { a: Action, b: Action },
    AltPrecedence { a: Action, b: Action },
    AltSuccession { a: Action, b: Action },
    ChainResponse { a: Action, b: Action },
    ChainPrecedence { a: Action, b: Action },
    NotCoexistence { a: Action, b: Action },
}

impl DeclareConstraint {
    pub fn existence(a: Action) -> Self {
        Self::Existence { a }
    }

    pub fn absence(a: Action) -> Self {
        Self::Absence { a }
    }

    pub fn absence_2(a: Action) -> Self {
        Self::Absence2 { a }
    }

    pub fn exactly_once(a: Action) -> Self {
        Self::ExactlyOnce { a }
    }

    pub fn init(a: Action) -> Self {
        Self::Init { a }
    }

    pub fn responded_existence(a: Action, b: Action) -> Self {
        Self::RespondedExistence { a, b }
    }

    pub fn co_existence(a: Action, b: Action) -> Self {
        Self::CoExistence { a, b }
    }

    pub fn response(a: Action, b: Action) -> Self {
        Self::Response { a, b }
    }

    pub fn precedence(a: Action, b: Action) -> Self {
        Self::Precedence { a, b }
    }

    pub fn succession(a: Action, b: Action) -> Self {
        Self::Succession { a, b }
    }

    pub fn alt_response(a: Action, b: Action) -> Self {
        Self::AltResponse { a, b }
    }

    pub fn alt_precedence(a: Action, b: Action) -> Self {
        Self::AltPrecedence { a, b }
    }

    pub fn alt_succession(a: Action, b: Action) -> Self {
        Self::AltSuccession { a, b }
    }

    pub fn chain_response(a: Action, b: Action) -> Self {
        Self::ChainResponse { a, b }
    }

    pub fn chain_precedence(a: Action, b: Action) -> Self {
        Self::ChainPrecedence { a, b }
    }

    pub fn not_coexistence(a: Action, b: Action) -> Self {
        Self::NotCoexistence { a, b }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Existence { .. } => "existence",
            Self::Absence { .. } => "absence",
            Self::Absence2 { .. } => "absence_2",
            Self::ExactlyOnce { .. } => "exactly_once",
            Self::Init { .. } => "init",
            Self::RespondedExistence { .. } => "responded_existence",
            Self::CoExistence { .. } => "co_existence",
            Self::Response { .. } => "response",
            Self::Precedence { .. } => "precedence",
            Self::Succession { .. } => "succession",
            Self::AltResponse { .. } => "alt_response",
            Self::AltPrecedence { .. } => "alt_precedence",
            Self::AltSuccession { .. } => "alt_succession",
            Self::ChainResponse { .. } => "chain_response",
            Self::ChainPrecedence { .. } => "chain_precedence",
            Self::NotCoexistence { .. } => "not_coexistence",
        }
    }

    /// Actions the constraint talks about, in argument order
    pub fn symbols(&self) -> Vec<&Action> {
        match self {
            Self::Existence { a }
            | Self::Absence { a }
            | Self::Absence2 { a }
            | Self::ExactlyOnce { a }
            | Self::Init { a } => vec![a],
            Self::RespondedExistence { a, b }
            | Self::CoExistence { a, b }
            | Self::Response { a, b }
            | Self::Precedence { a, b }
            | Self::Succession { a, b }
            | Self::AltResponse { a, b }
            | Self::AltPrecedence { a, b }
            | Self::AltSuccession { a, b }
            | Self::ChainResponse { a, b }
            | Self::ChainPrecedence { a, b }
            | Self::NotCoexistence { a, b } => vec![a, b],
        }
    }

    pub fn formula(&self) -> Ltlf {
        match self {
            Self::Existence { a } => eventually(a),
            Self::Absence { a } => Ltlf::negate(eventually(a)),
            Self::Absence2 { a } => at_most_once(a),
            Self::ExactlyOnce { a } => Ltlf::and(eventually(a), at_most_once(a)),
            Self::Init { a } => Ltlf::atom(a),
            Self::RespondedExistence { a, b } => responded_existence(a, b),
            Self::CoExistence { a, b } => {
                Ltlf::and(responded_existence(a, b), responded_existence(b, a))
            }
            Self::Response { a, b } => response(a, b),
            Self::Precedence { a, b } => precedence(a, b),
            Self::Succession { a, b } => Ltlf::and(response(a, b), precedence(a, b)),
            Self::AltResponse { a, b } => alt_response(a, b),
            Self::AltPrecedence { a, b } => alt_precedence(a, b),
            Self::AltSuccession { a, b } => Ltlf::and(alt_response(a, b), alt_precedence(a, b)),
            Self::ChainResponse { a, b } => Ltlf::always(Ltlf::implies(
                Ltlf::atom(a),
                Ltlf::next(Ltlf::atom(b)),
            )),
            Self::ChainPrecedence { a, b } => Ltlf::always(Ltlf::implies(
                Ltlf::next(Ltlf::atom(b)),
                Ltlf::atom(a),
            )),
            Self::NotCoexistence { a, b } => {
                Ltlf::negate(Ltlf::and(eventually(a), eventually(b)))
            }
        }
    }
}

impl fmt::Display for DeclareConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.symbols().iter().map(|s| s.to_string()).collect();
        write!(f, "{}({})", self.name(), symbols.join(", "))
    }
}

fn eventually(a: &Action) -> Ltlf {
    Ltlf::eventually(Ltlf::atom(a))
}

fn not_atom(a: &Action) -> Ltlf {
    Ltlf::negate(Ltlf::atom(a))
}

fn at_most_once(a: &Action) -> Ltlf {
    Ltlf::negate(Ltlf::eventually(Ltlf::and(
        Ltlf::atom(a),
        Ltlf::next(eventually(a)),
    )))
}

fn responded_existence(a: &Action, b: &Action) -> Ltlf {
    Ltlf::implies(eventually(a), eventually(b))
}

fn response(a: &Action, b: &Action) -> Ltlf {
    Ltlf::always(Ltlf::implies(Ltlf::atom(a), eventually(b)))
}

fn precedence(a: &Action, b: &Action) -> Ltlf {
    Ltlf::or(
        Ltlf::until(not_atom(b), Ltlf::atom(a)),
        Ltlf::always(not_atom(b)),
    )
}

fn alt_response(a: &Action, b: &Action) -> Ltlf {
    Ltlf::always(Ltlf::implies(
        Ltlf::atom(a),
        Ltlf::next(Ltlf::until(not_atom(a), Ltlf::atom(b))),
    ))
}

fn alt_precedence(a: &Action, b: &Action) -> Ltlf {
    Ltlf::and(
        precedence(a, b),
        Ltlf::always(Ltlf::implies(
            Ltlf::atom(b),
            Ltlf::weak_next(precedence(a, b)),
        )),
    )
}

/// Exactly one action of `alphabet` happens at every step
pub fn closure_assumption<'a, I>(alphabet: I) -> Ltlf
where
    I: IntoIterator<Item = &'a Action>,
{
    let actions: Vec<&Action> = alphabet.into_iter().collect();
    let at_least_one = Ltlf::any(actions.iter().map(|a| Ltlf::atom(a)));
    let mut exclusions = Vec::new();
    for (i, a) in actions.iter().enumerate() {
        for b in &actions[i + 1..] {
            exclusions.push(Ltlf::negate(Ltlf::and(Ltlf::atom(a), Ltlf::atom(b))));
        }
    }
    Ltlf::and(
        Ltlf::always(at_least_one),
        Ltlf::always(Ltlf::all(exclusions)),
    )
}
