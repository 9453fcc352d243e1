use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Problem size class; each larger class adds service variants
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    XSmall,
    Small,
    Medium,
    Large,
}

impl Scale {
    pub const ALL: [Scale; 4] = [Scale::XSmall, Scale::Small, Scale::Medium, Scale::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::XSmall => "xsmall",
            Scale::Small => "small",
            Scale::Medium => "medium",
            Scale::Large => "large",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xsmall" => Ok(Scale::XSmall),
            "small" => Ok(Scale::Small),
            "medium" => Ok(Scale::Medium),
            "large" => Ok(Scale::Large),
            _ => Err(ScenarioError::UnknownScale(s.to_string())),
        }
    }
}

/// How the target process is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// Hand-built deterministic automaton
    Automata,
    /// Declare constraints compiled through LTLf
    #[serde(alias = "ltlf")]
    Declare,
}

impl TargetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMode::Automata => "automata",
            TargetMode::Declare => "ltlf",
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetMode {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "automata" => Ok(TargetMode::Automata),
            "ltlf" | "declare" => Ok(TargetMode::Declare),
            _ => Err(ScenarioError::UnknownMode(s.to_string())),
        }
    }
}
