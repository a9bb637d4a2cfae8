//! Coach configuration and builder

use std::path::PathBuf;

use super::{Coach, DuplicateBudget};
use crate::model_store::ModelStore;
use crate::registry::{JsonFileRegistry, RegistryPort};
use crate::Result;

/// Default directory for the registry file and model blobs.
pub const DEFAULT_SAVE_LOCATION: &str = "./models";

/// Coach settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Directory holding `models.json` and the model blobs
    pub save_location: PathBuf,
    /// Duplicate termination policy for `search_more`
    pub duplicate_budget: DuplicateBudget,
    /// Seed for the sampling RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            save_location: PathBuf::from(DEFAULT_SAVE_LOCATION),
            duplicate_budget: DuplicateBudget::default(),
            seed: None,
        }
    }
}

/// Coach builder
pub struct CoachBuilder<S> {
    store: S,
    config: CoachConfig,
}

impl<S: ModelStore> CoachBuilder<S> {
    pub(crate) fn new(store: S) -> Self {
        Self {
            store,
            config: CoachConfig::default(),
        }
    }

    /// Set the save location
    #[must_use]
    pub fn save_location(mut self, save_location: impl Into<PathBuf>) -> Self {
        self.config.save_location = save_location.into();
        self
    }

    /// Set the duplicate termination policy
    #[must_use]
    pub fn duplicate_budget(mut self, budget: DuplicateBudget) -> Self {
        self.config.duplicate_budget = budget;
        self
    }

    /// Seed the sampling RNG for reproducible searches
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: CoachConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a coach persisting to `<save_location>/models.json`
    ///
    /// # Errors
    ///
    /// Returns error if an existing registry file cannot be loaded
    pub fn build(self) -> Result<Coach<S>> {
        let port = JsonFileRegistry::new(&self.config.save_location);
        Coach::with_port(self.store, port, self.config)
    }

    /// Build a coach persisting through a custom port
    ///
    /// # Errors
    ///
    /// Returns error if the port fails to load
    pub fn build_with_port<P: RegistryPort>(self, port: P) -> Result<Coach<S, P>> {
        Coach::with_port(self.store, port, self.config)
    }
}
