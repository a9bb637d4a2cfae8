//! Configuration - the ordered hyperparameter draws of one search attempt

use std::fmt;

use serde::{Deserialize, Serialize};

use super::HyperParameter;

/// Ordered sequence of hyperparameters produced by one sample phase.
///
/// Equality is structural and positional: two configurations are equal iff
/// they have the same length and matching name and value at every index.
/// This is the dedup key of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    parameters: Vec<HyperParameter>,
}

impl Configuration {
    /// Create an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    /// Append a hyperparameter in draw order.
    pub fn push(&mut self, parameter: HyperParameter) {
        self.parameters.push(parameter);
    }

    /// Get the hyperparameters in draw order.
    #[must_use]
    pub fn parameters(&self) -> &[HyperParameter] {
        &self.parameters
    }

    /// Look up the first hyperparameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HyperParameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Number of hyperparameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if no hyperparameter was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl From<Vec<HyperParameter>> for Configuration {
    fn from(parameters: Vec<HyperParameter>) -> Self {
        Self { parameters }
    }
}

impl FromIterator<HyperParameter> for Configuration {
    fn from_iter<I: IntoIterator<Item = HyperParameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str("]")
    }
}
