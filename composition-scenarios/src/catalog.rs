use crate::config::ScenarioConfig;
use crate::error::{Result, ScenarioError};
use crate::scale::Scale;
use composition_services::{Action, Service};
use std::collections::BTreeSet;

/// Builds the service catalog of a scenario for a given scale
pub struct ServiceCatalogAssembler<'a> {
    config: &'a ScenarioConfig,
    alphabet: BTreeSet<Action>,
}

impl<'a> ServiceCatalogAssembler<'a> {
    pub fn new(config: &'a ScenarioConfig) -> Self {
        Self {
            config,
            alphabet: config.alphabet(),
        }
    }

    pub fn alphabet(&self) -> &BTreeSet<Action> {
        &self.alphabet
    }

    /// Services of every provider included at `scale`, in table order
    pub fn assemble(&self, scale: Scale) -> Result<Vec<Service>> {
        let mut catalog = Vec::new();
        for provider in self.config.providers_for(scale) {
            let service = provider.build(&self.config.defaults)?;
            if let Some(action) = service
                .actions()
                .iter()
                .find(|a| !self.alphabet.contains(*a))
            {
                return Err(ScenarioError::UndeclaredAction {
                    service: service.name().to_string(),
                    action: action.to_string(),
                });
            }
            catalog.push(service);
        }

        log::info!(
            "Assembled {} services for scenario {} at scale {} ({} service states)",
            catalog.len(),
            self.config.name,
            scale,
            catalog.iter().map(|s| s.states().len()).sum::<usize>()
        );
        Ok(catalog)
    }
}
