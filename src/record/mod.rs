//! Trial Record Schema
//!
//! Data structures persisted in the registry.
//!
//! ## Schema Overview
//!
//! ```text
//! TrainedModelRecord (1) ──┬── Configuration (1) ──< HyperParameter (N) [tagged]
//!                          └── ModelStatistics (1) [tagged]
//! ```
//!
//! Every polymorphic value carries a `type` discriminator in its JSON form.
//!
//! ## Usage
//!
//! ```rust
//! use model_coach::record::{
//!     Configuration, DataSetStatistics, HyperParameter, ModelStatistics, TrainedModelRecord,
//! };
//!
//! let configuration = Configuration::from(vec![
//!     HyperParameter::scalar("seed", 13),
//!     HyperParameter::integer_list("hiddenLayerDims", vec![32, 16, 8]),
//! ]);
//! let statistics = ModelStatistics::v1(
//!     DataSetStatistics::new(0.97, 0.96, 0.98, 0.97),
//!     DataSetStatistics::new(0.86, 0.84, 0.88, 0.86),
//! );
//!
//! let record = TrainedModelRecord::new("model-2020-01-01T00:00:00Z", configuration, statistics);
//! assert!((record.default_metric() - 0.86).abs() < f64::EPSILON);
//! ```

mod configuration;
mod hyperparameter;
mod statistics;
mod trained_model;

pub use configuration::Configuration;
pub use hyperparameter::{HyperParameter, HYPERPARAMETER_TAGS};
pub use statistics::{DataSetStatistics, ModelStatistics, STATISTICS_TAGS};
pub use trained_model::{model_file_name, TrainedModelRecord, MODEL_FILE_PREFIX};
