use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid {parameter}: {value} is outside [0, 1]")]
    Validation { parameter: String, value: f64 },

    #[error("Distribution of ({state}, {action}) sums to {total}, expected 1.0")]
    InconsistentDistribution {
        state: String,
        action: String,
        total: f64,
    },

    #[error("Target defines more than one transition for ({state}, {action})")]
    NonDeterministicTarget { state: String, action: String },

    #[error("No final states declared")]
    EmptyFinalStates,

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("No final state is reachable from initial state {0}")]
    UnreachableFinalState(String),

    #[error("Service {0} offers no operations")]
    NoOperations(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
