//! Trained Model Record - one completed trial in the registry

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{Configuration, ModelStatistics};

/// Prefix of every generated model file name.
pub const MODEL_FILE_PREFIX: &str = "model-";

/// Generate a model file name from a wall-clock instant.
///
/// The format is `model-<ISO-8601 UTC>`, e.g. `model-2020-01-01T00:00:00Z`.
/// Sub-second digits are emitted only when non-zero.
#[must_use]
pub fn model_file_name(instant: DateTime<Utc>) -> String {
    format!(
        "{MODEL_FILE_PREFIX}{}",
        instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    )
}

/// Durable record of a trained model.
///
/// `model_file_name` and `configuration` are fixed for the lifetime of the
/// record; only `statistics` may be replaced, by re-evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainedModelRecord {
    model_file_name: String,
    configuration: Configuration,
    statistics: ModelStatistics,
}

impl TrainedModelRecord {
    /// Create a new trained model record.
    ///
    /// # Arguments
    ///
    /// * `model_file_name` - Name of the model blob, relative to the save location
    /// * `configuration` - Configuration that produced the model
    /// * `statistics` - Evaluation statistics of the model
    #[must_use]
    pub fn new(
        model_file_name: impl Into<String>,
        configuration: Configuration,
        statistics: ModelStatistics,
    ) -> Self {
        Self {
            model_file_name: model_file_name.into(),
            configuration,
            statistics,
        }
    }

    /// Get the model blob file name.
    #[must_use]
    pub fn model_file_name(&self) -> &str {
        &self.model_file_name
    }

    /// Get the configuration that produced this model.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Get the evaluation statistics.
    #[must_use]
    pub const fn statistics(&self) -> &ModelStatistics {
        &self.statistics
    }

    /// Shorthand for `statistics().default_metric()`.
    #[must_use]
    pub const fn default_metric(&self) -> f64 {
        self.statistics.default_metric()
    }

    pub(crate) fn replace_statistics(&mut self, statistics: ModelStatistics) -> ModelStatistics {
        std::mem::replace(&mut self.statistics, statistics)
    }
}

impl fmt::Display for TrainedModelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model_file_name)?;
        writeln!(f, "  {}", self.configuration)?;
        writeln!(f, "  {}", self.statistics)
    }
}
