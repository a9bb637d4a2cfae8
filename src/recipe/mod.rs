//! Recipes: named (sample, train) procedure pairs
//!
//! A recipe's sample phase draws a [`Configuration`](crate::record::Configuration)
//! through a [`Sampler`] and returns a typed parameter bundle. The train phase
//! consumes that bundle and returns the trained model plus its statistics.
//!
//! # Example
//!
//! ```rust
//! use model_coach::recipe::{Recipe, RecipeBuilder};
//! use model_coach::record::{DataSetStatistics, ModelStatistics};
//!
//! struct Params {
//!     seed: i64,
//!     hidden: Vec<i32>,
//! }
//!
//! let recipe = RecipeBuilder::new("simple")
//!     .sample(|s| {
//!         Ok(Params {
//!             seed: s.fixed_scalar("seed", 13),
//!             hidden: s.integer_list("hiddenLayerDims", &[20..50, 10..20, 5..15])?,
//!         })
//!     })
//!     .train(|p: Params| {
//!         let stats = DataSetStatistics::new(0.9, 0.9, 0.9, 0.9);
//!         Ok((p.hidden.len() as i64 + p.seed, ModelStatistics::v1(stats, stats)))
//!     })
//!     .build()?;
//!
//! assert_eq!(recipe.name(), "simple");
//! # Ok::<(), model_coach::Error>(())
//! ```

mod sampler;

pub use sampler::Sampler;

use crate::record::ModelStatistics;
use crate::{Error, Result};

/// Output of a train phase.
pub type Trained<M> = (M, ModelStatistics);

type SampleFn<P> = Box<dyn Fn(&mut Sampler<'_>) -> Result<P>>;
type TrainFn<P, M> = Box<dyn Fn(P) -> anyhow::Result<Trained<M>>>;

/// A reusable search procedure.
pub trait Recipe {
    /// Typed bundle handed from the sample phase to the train phase.
    type Params;
    /// Trained model object.
    type Model;

    /// Recipe name.
    fn name(&self) -> &str;

    /// Draw a configuration, returning the parameters the train phase needs.
    ///
    /// # Errors
    ///
    /// Returns error if a draw primitive rejects its arguments.
    fn sample(&self, sampler: &mut Sampler<'_>) -> Result<Self::Params>;

    /// Train a model with the sampled parameters.
    ///
    /// # Errors
    ///
    /// Any trainer failure. The coach wraps it in [`Error::Training`].
    fn train(&self, params: Self::Params) -> anyhow::Result<Trained<Self::Model>>;
}

/// Recipe assembled from two closures by [`RecipeBuilder`].
pub struct FnRecipe<P, M> {
    name: String,
    sample: SampleFn<P>,
    train: TrainFn<P, M>,
}

impl<P, M> Recipe for FnRecipe<P, M> {
    type Params = P;
    type Model = M;

    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self, sampler: &mut Sampler<'_>) -> Result<P> {
        (self.sample)(sampler)
    }

    fn train(&self, params: P) -> anyhow::Result<Trained<M>> {
        (self.train)(params)
    }
}

impl<P, M> std::fmt::Debug for FnRecipe<P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRecipe").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Builder for [`FnRecipe`].
pub struct RecipeBuilder<P, M> {
    name: String,
    sample: Option<SampleFn<P>>,
    train: Option<TrainFn<P, M>>,
}

impl<P, M> RecipeBuilder<P, M> {
    /// Start a recipe with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sample: None,
            train: None,
        }
    }

    /// Set the sample phase.
    #[must_use]
    pub fn sample<F>(mut self, sample: F) -> Self
    where
        F: Fn(&mut Sampler<'_>) -> Result<P> + 'static,
    {
        self.sample = Some(Box::new(sample));
        self
    }

    /// Set the train phase.
    #[must_use]
    pub fn train<F>(mut self, train: F) -> Self
    where
        F: Fn(P) -> anyhow::Result<Trained<M>> + 'static,
    {
        self.train = Some(Box::new(train));
        self
    }

    /// Build the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipeMisconfigured`] if either phase is missing.
    pub fn build(self) -> Result<FnRecipe<P, M>> {
        let Some(sample) = self.sample else {
            return Err(Error::RecipeMisconfigured {
                recipe: self.name,
                reason: "no sample phase defined".to_string(),
            });
        };
        let Some(train) = self.train else {
            return Err(Error::RecipeMisconfigured {
                recipe: self.name,
                reason: "no trainer defined".to_string(),
            });
        };
        Ok(FnRecipe {
            name: self.name,
            sample,
            train,
        })
    }
}
