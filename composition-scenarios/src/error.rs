use composition_declare::CompilationError;
use composition_services::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("Unknown scale: {0} (expected xsmall, small, medium or large)")]
    UnknownScale(String),

    #[error("Unknown target mode: {0} (expected automata or ltlf)")]
    UnknownMode(String),

    #[error("Invalid scenario configuration: {0}")]
    InvalidConfig(String),

    #[error("Service {service} uses action {action} outside the scenario alphabet")]
    UndeclaredAction { service: String, action: String },

    #[error("Scenario build task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Compilation(#[from] CompilationError),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
