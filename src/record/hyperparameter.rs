//! Hyperparameter Value - one tagged draw from a recipe's sample phase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialized `type` discriminators understood by this build.
pub const HYPERPARAMETER_TAGS: &[&str] = &["long", "int-list"];

/// A single sampled hyperparameter.
///
/// Serialized with an explicit `type` discriminator so new variants can be
/// added without breaking stored registries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HyperParameter {
    /// Scalar integer draw (typically a seed).
    #[serde(rename = "long")]
    Scalar {
        /// Declared name
        name: String,
        /// Sampled value
        value: i64,
    },
    /// One draw per declared half-open range, in range order.
    #[serde(rename = "int-list")]
    IntegerList {
        /// Declared name
        name: String,
        /// Sampled values
        value: Vec<i32>,
    },
}

impl HyperParameter {
    /// Create a scalar hyperparameter.
    #[must_use]
    pub fn scalar(name: impl Into<String>, value: i64) -> Self {
        Self::Scalar {
            name: name.into(),
            value,
        }
    }

    /// Create an integer-list hyperparameter.
    #[must_use]
    pub fn integer_list(name: impl Into<String>, value: Vec<i32>) -> Self {
        Self::IntegerList {
            name: name.into(),
            value,
        }
    }

    /// Get the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar { name, .. } | Self::IntegerList { name, .. } => name,
        }
    }

    /// Get the serialized `type` discriminator.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "long",
            Self::IntegerList { .. } => "int-list",
        }
    }

    /// Get the value if this is a scalar.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<i64> {
        match self {
            Self::Scalar { value, .. } => Some(*value),
            Self::IntegerList { .. } => None,
        }
    }

    /// Get the values if this is an integer list.
    #[must_use]
    pub fn as_integer_list(&self) -> Option<&[i32]> {
        match self {
            Self::IntegerList { value, .. } => Some(value),
            Self::Scalar { .. } => None,
        }
    }
}

impl fmt::Display for HyperParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { name, value } => write!(f, "{name}: {value}"),
            Self::IntegerList { name, value } => write!(f, "{name}: {value:?}"),
        }
    }
}
