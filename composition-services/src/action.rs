//! Action identifiers
//!
//! An action is a base operation symbol qualified by the role it plays in a
//! provider's lifecycle. The textual form keeps the conventional prefixes:
//!
//! | Role             | Text        |
//! |------------------|-------------|
//! | `Operate`        | `moul`      |
//! | `Check`          | `ch_moul`   |
//! | `Configure`      | `con_moul`  |
//! | `CheckConfigure` | `che_moul`  |
//! | `Reset`          | `res_moul`  |
//! | `Repair`         | `rep_moul`  |
//! | `Idle`           | `no_op`     |

use serde::{Deserialize, Serialize};
use std::fmt;

/// A base operation symbol, e.g. `moul` or `ret_s`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The lifecycle role an action plays for its base operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Operate,
    Check,
    Configure,
    CheckConfigure,
    Reset,
    Repair,
    /// Trailing no-op used to make a target's final state absorbing
    Idle,
}

impl Role {
    fn prefix(self) -> Option<&'static str> {
        match self {
            Role::Operate | Role::Idle => None,
            Role::Check => Some("ch"),
            Role::Configure => Some("con"),
            Role::CheckConfigure => Some("che"),
            Role::Reset => Some("res"),
            Role::Repair => Some("rep"),
        }
    }
}

/// A structured action identifier: `{ role, base }`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "ActionRepr")]
pub struct Action {
    pub role: Role,
    pub base: Symbol,
}

/// Accepted input forms: a bare symbol means the `Operate` role.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActionRepr {
    Bare(Symbol),
    Qualified { role: Role, base: Symbol },
}

impl From<ActionRepr> for Action {
    fn from(repr: ActionRepr) -> Self {
        match repr {
            ActionRepr::Bare(base) => Action::operate(base),
            ActionRepr::Qualified { role, base } => Action { role, base },
        }
    }
}

impl Action {
    pub fn new(role: Role, base: impl Into<Symbol>) -> Self {
        Self {
            role,
            base: base.into(),
        }
    }

    pub fn operate(base: impl Into<Symbol>) -> Self {
        Self::new(Role::Operate, base)
    }

    pub fn check(base: impl Into<Symbol>) -> Self {
        Self::new(Role::Check, base)
    }

    pub fn configure(base: impl Into<Symbol>) -> Self {
        Self::new(Role::Configure, base)
    }

    pub fn check_configure(base: impl Into<Symbol>) -> Self {
        Self::new(Role::CheckConfigure, base)
    }

    pub fn reset(base: impl Into<Symbol>) -> Self {
        Self::new(Role::Reset, base)
    }

    pub fn repair(base: impl Into<Symbol>) -> Self {
        Self::new(Role::Repair, base)
    }

    pub fn no_op() -> Self {
        Self::new(Role::Idle, "no_op")
    }

    pub fn is_operation(&self) -> bool {
        self.role == Role::Operate
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role.prefix() {
            Some(prefix) => write!(f, "{}_{}", prefix, self.base),
            None => write!(f, "{}", self.base),
        }
    }
}
