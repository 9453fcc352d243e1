//! Composition scenarios
//!
//! A scenario pairs a service catalog, sized by a scale class, with a
//! target model given either as an explicit automaton or as Declare
//! constraints. Two scenarios are built in: ceramic production and electric
//! motor assembly.

pub mod catalog;
pub mod ceramic;
pub mod config;
pub mod error;
pub mod logging;
pub mod motor;
pub mod rewards;
pub mod scale;
pub mod scenario;

pub use catalog::ServiceCatalogAssembler;
pub use config::{
    FailureDefaults, LifecycleShape, NoOpStep, ProviderSpec, ScenarioConfig, TargetTable,
};
pub use error::{Result, ScenarioError};
pub use logging::init_logging;
pub use scale::{Scale, TargetMode};
pub use scenario::{
    build_scenario, build_scenarios_concurrently, build_target, Scenario, ScenarioRequest,
};
