use composition_services::ModelError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilationError {
    #[error("Formula is unsatisfiable over the given alphabet")]
    Unsatisfiable,

    #[error("Formula mentions {0}, which is not in the alphabet")]
    UnknownSymbol(String),

    #[error("Alphabet is empty")]
    EmptyAlphabet,

    #[error("Automaton exceeded {0} states")]
    StateLimitExceeded(usize),

    #[error("Compilation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CompilationError>;
