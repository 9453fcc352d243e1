use crate::catalog::ServiceCatalogAssembler;
use crate::config::ScenarioConfig;
use crate::error::{Result, ScenarioError};
use crate::scale::{Scale, TargetMode};
use composition_declare::{DeclareCompiler, LtlfCompiler};
use composition_services::{Service, TargetAutomaton};
use std::sync::Arc;

/// Everything the planner consumes: a service catalog and a target model
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub scale: Scale,
    pub mode: TargetMode,
    pub catalog: Vec<Service>,
    pub target: TargetAutomaton,
}

impl Scenario {
    pub fn num_services(&self) -> usize {
        self.catalog.len()
    }

    /// Total number of states over all services and the target
    pub fn num_states(&self) -> usize {
        self.catalog.iter().map(|s| s.states().len()).sum::<usize>() + self.target.states().len()
    }
}

/// Target model of `config` in the requested form
pub fn build_target(
    config: &ScenarioConfig,
    mode: TargetMode,
    backend: &dyn LtlfCompiler,
) -> Result<TargetAutomaton> {
    let target = match mode {
        TargetMode::Automata => config.target.build()?,
        TargetMode::Declare => DeclareCompiler::new(backend)
            .compile(&config.declare_specification())?
            .into_target(),
    };
    Ok(target)
}

pub fn build_scenario(
    config: &ScenarioConfig,
    scale: Scale,
    mode: TargetMode,
    backend: &dyn LtlfCompiler,
) -> Result<Scenario> {
    config.validate()?;
    let catalog = ServiceCatalogAssembler::new(config).assemble(scale)?;
    let target = build_target(config, mode, backend)?;

    let scenario = Scenario {
        name: config.name.clone(),
        scale,
        mode,
        catalog,
        target,
    };
    log::info!(
        "Scenario {} ({}, {}): {} services, target with {} states and {} transitions",
        scenario.name,
        scenario.mode,
        scenario.scale,
        scenario.num_services(),
        scenario.target.states().len(),
        scenario.target.num_transitions()
    );
    Ok(scenario)
}

#[derive(Debug, Clone)]
pub struct ScenarioRequest {
    pub config: Arc<ScenarioConfig>,
    pub scale: Scale,
    pub mode: TargetMode,
}

impl ScenarioRequest {
    pub fn new(config: Arc<ScenarioConfig>, scale: Scale, mode: TargetMode) -> Self {
        Self {
            config,
            scale,
            mode,
        }
    }
}

/// Builds every request on its own blocking task. Results come back in
/// request order; one failing request doesn't affect the others.
pub async fn build_scenarios_concurrently(
    requests: Vec<ScenarioRequest>,
    backend: Arc<dyn LtlfCompiler>,
) -> Vec<Result<Scenario>> {
    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let backend = Arc::clone(&backend);
            tokio::task::spawn_blocking(move || {
                build_scenario(
                    &request.config,
                    request.scale,
                    request.mode,
                    backend.as_ref(),
                )
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Scenario build task failed: {}", e);
                Err(ScenarioError::Task(e.to_string()))
            }
        };
        results.push(result);
    }
    results
}
