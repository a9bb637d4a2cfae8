//! Model Statistics - scored summaries of a trained model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialized `type` discriminators understood by this build.
pub const STATISTICS_TAGS: &[&str] = &["v1"];

/// Classification quality on one data set. All values lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataSetStatistics {
    /// Fraction of correct predictions
    pub accuracy: f64,
    /// Positive predictive value
    pub precision: f64,
    /// True positive rate
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
}

impl DataSetStatistics {
    /// Create data set statistics.
    #[must_use]
    pub const fn new(accuracy: f64, precision: f64, recall: f64, f1: f64) -> Self {
        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

impl fmt::Display for DataSetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy={}, precision={}, recall={}, f1={}",
            Percent(self.accuracy),
            Percent(self.precision),
            Percent(self.recall),
            Percent(self.f1)
        )
    }
}

struct Percent(f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Versioned model statistics.
///
/// Each variant designates a [`default_metric`](Self::default_metric) used for
/// ranking when no explicit selector is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModelStatistics {
    /// Train/test classification statistics.
    #[serde(rename = "v1")]
    V1 {
        /// Statistics on the training set
        train: DataSetStatistics,
        /// Statistics on the held-out test set
        test: DataSetStatistics,
    },
}

impl ModelStatistics {
    /// Create V1 statistics.
    #[must_use]
    pub const fn v1(train: DataSetStatistics, test: DataSetStatistics) -> Self {
        Self::V1 { train, test }
    }

    /// Scalar used for default ranking. For V1 this is the test F1 score.
    #[must_use]
    pub const fn default_metric(&self) -> f64 {
        match self {
            Self::V1 { test, .. } => test.f1,
        }
    }

    /// Get the serialized `type` discriminator.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::V1 { .. } => "v1",
        }
    }
}

impl fmt::Display for ModelStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 { train, test } => write!(f, "Train: {train}; Test: {test}"),
        }
    }
}
