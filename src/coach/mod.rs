//! Coach: search loop, registry ownership, ranking and model reload
//!
//! ## Search loop
//!
//! ```text
//! sample ──> duplicate? ──yes──> count against budget ──> next attempt
//!                 │
//!                 no
//!                 ▼
//!              train ──> save model blob ──> append record ──> rewrite registry
//! ```
//!
//! A record is only appended once its model blob is saved, so a failed save
//! never leaves the registry pointing at a missing blob. Each completed trial
//! is committed on its own; a failure later in the same call keeps earlier
//! trials.
//!
//! ## Example
//!
//! ```rust
//! use model_coach::coach::Coach;
//! use model_coach::model_store::MemoryModelStore;
//! use model_coach::recipe::RecipeBuilder;
//! use model_coach::record::{DataSetStatistics, ModelStatistics};
//! use model_coach::registry::MemoryRegistryPort;
//!
//! # fn main() -> model_coach::Result<()> {
//! let recipe = RecipeBuilder::new("widths")
//!     .sample(|s| s.integer_list("hidden", &[1..100]))
//!     .train(|hidden: Vec<i32>| {
//!         let f1 = f64::from(hidden[0]) / 100.0;
//!         let stats = DataSetStatistics::new(f1, f1, f1, f1);
//!         Ok((hidden, ModelStatistics::v1(stats, stats)))
//!     })
//!     .build()?;
//!
//! let mut coach = Coach::builder(MemoryModelStore::<Vec<i32>>::new())
//!     .seed(7)
//!     .build_with_port(MemoryRegistryPort::new())?;
//!
//! let summary = coach.search_more(5, &recipe)?;
//! assert_eq!(summary.trained, 5);
//! assert_eq!(coach.records().len(), 5);
//!
//! let best = coach.best_models(1)?;
//! let model = coach.restore_model(best[0])?;
//! assert_eq!(model.len(), 1);
//! # Ok(())
//! # }
//! ```

mod budget;
mod config;

pub use budget::{DuplicateBudget, DEFAULT_DUPLICATE_BUDGET};
pub use config::{CoachBuilder, CoachConfig, DEFAULT_SAVE_LOCATION};

use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::model_store::ModelStore;
use crate::recipe::{Recipe, Sampler};
use crate::record::{model_file_name, ModelStatistics, TrainedModelRecord};
use crate::registry::{JsonFileRegistry, Registry, RegistryPort};
use crate::{Error, Result};

/// Outcome of one `search_more` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// New models trained and committed
    pub trained: usize,
    /// Sampled configurations skipped as duplicates
    pub duplicates: usize,
    /// Whether the duplicate budget stopped the search early
    pub exhausted: bool,
}

/// Hyperparameter search orchestrator.
///
/// Owns the registry of every trial run at its save location. The registry
/// is loaded once at construction and rewritten in full through the
/// [`RegistryPort`] after every mutation.
pub struct Coach<S, P = JsonFileRegistry> {
    store: S,
    port: P,
    registry: Registry,
    config: CoachConfig,
    rng: StdRng,
}

impl<S: ModelStore> Coach<S> {
    /// Create a coach builder with default settings.
    #[must_use]
    pub fn builder(store: S) -> CoachBuilder<S> {
        CoachBuilder::new(store)
    }

    /// Open the registry at `save_location` with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if an existing registry file cannot be loaded.
    pub fn open(store: S, save_location: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(store).save_location(save_location).build()
    }
}

impl<S: ModelStore, P: RegistryPort> Coach<S, P> {
    /// Create a coach over an explicit persistence port, loading its records.
    ///
    /// # Errors
    ///
    /// Returns error if the port fails to load.
    pub fn with_port(store: S, port: P, config: CoachConfig) -> Result<Self> {
        let records = port.load()?;
        info!(
            records = records.len(),
            location = %config.save_location.display(),
            "Loaded model registry"
        );
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            store,
            port,
            registry: Registry::from_records(records),
            config,
            rng,
        })
    }

    /// Registry records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[TrainedModelRecord] {
        self.registry.records()
    }

    /// The in-memory registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Directory holding the registry file and model blobs.
    #[must_use]
    pub fn save_location(&self) -> &Path {
        &self.config.save_location
    }

    /// Path of a record's model blob.
    #[must_use]
    pub fn model_path(&self, record: &TrainedModelRecord) -> PathBuf {
        self.config.save_location.join(record.model_file_name())
    }

    /// Try to train `target_count` new models with `recipe`.
    ///
    /// Sampled configurations already in the registry are skipped and
    /// counted against the duplicate budget. The search stops at
    /// `target_count` new models or when the budget is exhausted.
    ///
    /// # Errors
    ///
    /// Sampling, training, model store and registry failures abort the call.
    /// Trials completed before the failure stay committed.
    pub fn search_more<R>(&mut self, target_count: usize, recipe: &R) -> Result<SearchSummary>
    where
        R: Recipe<Model = S::Model>,
    {
        let mut budget = self.config.duplicate_budget.tracker();
        let mut summary = SearchSummary::default();

        while summary.trained < target_count {
            if budget.exhausted() {
                warn!(
                    recipe = recipe.name(),
                    trained = summary.trained,
                    duplicates = summary.duplicates,
                    "Duplicate budget exhausted, stopping search"
                );
                summary.exhausted = true;
                break;
            }

            let mut sampler = Sampler::new(&mut self.rng);
            let params = recipe.sample(&mut sampler)?;
            let configuration = sampler.into_configuration();

            if self.registry.contains_configuration(&configuration) {
                debug!(%configuration, "Skipping duplicate configuration");
                budget.record_duplicate();
                summary.duplicates += 1;
                continue;
            }

            info!(recipe = recipe.name(), %configuration, "Trying configuration");
            let (model, statistics) = recipe.train(params).map_err(|source| Error::Training {
                recipe: recipe.name().to_string(),
                source,
            })?;
            info!(%statistics, "Trained model");

            let name = self.registry.unique_file_name(model_file_name(Utc::now()));
            let record = TrainedModelRecord::new(name, configuration, statistics);
            self.store.save(&self.model_path(&record), &model)?;
            self.commit(record)?;

            budget.record_success();
            summary.trained += 1;
        }

        Ok(summary)
    }

    fn commit(&mut self, record: TrainedModelRecord) -> Result<()> {
        self.registry.push(record);
        if let Err(e) = self.port.save(self.registry.records()) {
            self.registry.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Top `n` records by default metric, descending; ties keep registry order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best_models(&self, n: usize) -> Result<Vec<&TrainedModelRecord>> {
        self.registry.best(n)
    }

    /// Top `n` records by a scalar selector, descending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best_models_by<F>(&self, n: usize, selector: F) -> Result<Vec<&TrainedModelRecord>>
    where
        F: Fn(&TrainedModelRecord) -> f64,
    {
        self.registry.best_by(n, selector)
    }

    /// Top `n` records by a totally ordered key, descending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best_models_by_key<K, F>(&self, n: usize, selector: F) -> Result<Vec<&TrainedModelRecord>>
    where
        K: Ord,
        F: Fn(&TrainedModelRecord) -> K,
    {
        self.registry.best_by_key(n, selector)
    }

    /// Reload a record's model from the model store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`] if the blob is missing.
    pub fn restore_model(&self, record: &TrainedModelRecord) -> Result<S::Model> {
        self.store.restore(&self.model_path(record))
    }

    /// Recompute every record's statistics with `score_fn`.
    ///
    /// File names and configurations are untouched. The registry is written
    /// once, after all models are scored.
    ///
    /// # Errors
    ///
    /// Returns error if a model cannot be restored or the registry cannot be
    /// written; the registry is left unchanged in both cases.
    pub fn reevaluate_models<F>(&mut self, mut score_fn: F) -> Result<()>
    where
        F: FnMut(&S::Model) -> ModelStatistics,
    {
        info!(models = self.registry.len(), "Re-evaluating models");

        let mut statistics = Vec::with_capacity(self.registry.len());
        for record in self.registry.records() {
            let model = self.restore_model(record)?;
            let updated = score_fn(&model);
            debug!(model = record.model_file_name(), %updated, "Re-evaluated model");
            statistics.push(updated);
        }

        let previous = self.registry.replace_statistics(statistics);
        if let Err(e) = self.port.save(self.registry.records()) {
            self.registry.replace_statistics(previous);
            return Err(e);
        }
        Ok(())
    }
}
