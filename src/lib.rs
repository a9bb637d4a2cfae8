//! # model-coach: Hyperparameter Search Harness
//!
//! **Version**: 0.1.0
//!
//! model-coach repeatedly samples a configuration, trains a model with it
//! through a user-supplied recipe, and keeps a persistent, deduplicated
//! registry of every configuration tried together with its evaluation
//! statistics. The best configurations can later be ranked and their models
//! reloaded.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Muda elimination**: Duplicate configurations are never trained twice
//! - **Poka-Yoke safety**: Recipes are checked for both phases before a search starts
//! - **Jidoka**: Unknown record variants stop the load instead of dropping data
//! - **Genchi Genbutsu**: Every trial is written through to disk as it completes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use model_coach::coach::Coach;
//! use model_coach::model_store::JsonModelStore;
//! use model_coach::recipe::RecipeBuilder;
//! use model_coach::record::{DataSetStatistics, ModelStatistics};
//!
//! let recipe = RecipeBuilder::new("simple")
//!     .sample(|s| s.integer_list("hiddenLayerDims", &[20..50, 10..20, 5..15]))
//!     .train(|dims: Vec<i32>| {
//!         let stats = DataSetStatistics::new(0.9, 0.9, 0.9, 0.9);
//!         Ok((dims, ModelStatistics::v1(stats, stats)))
//!     })
//!     .build()?;
//!
//! let mut coach = Coach::open(JsonModelStore::<Vec<i32>>::new(), "./models")?;
//! coach.search_more(100, &recipe)?;
//!
//! for record in coach.best_models(10)? {
//!     println!("{record}");
//! }
//! # Ok::<(), model_coach::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod coach;
pub mod error;
pub mod logging;
pub mod model_store;
pub mod recipe;
pub mod record;
pub mod registry;

pub use coach::{Coach, CoachBuilder, CoachConfig, DuplicateBudget, SearchSummary};
pub use error::{Error, Result};
