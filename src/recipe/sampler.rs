//! Draw primitives for a recipe's sample phase

use std::ops::Range;

use rand::{Rng, RngCore};

use crate::record::{Configuration, HyperParameter};
use crate::{Error, Result};

/// Records every draw of one sample phase, in call order.
///
/// Each primitive returns the drawn value to the caller and appends the
/// matching [`HyperParameter`] to the configuration under construction.
pub struct Sampler<'a> {
    rng: &'a mut dyn RngCore,
    configuration: Configuration,
}

impl<'a> Sampler<'a> {
    /// Create a sampler drawing from the given random source.
    pub fn new(rng: &'a mut dyn RngCore) -> Self {
        Self {
            rng,
            configuration: Configuration::new(),
        }
    }

    /// Draw an unbounded `i64` and record it as a scalar.
    pub fn scalar(&mut self, name: impl Into<String>) -> i64 {
        let value = self.rng.gen::<i64>();
        self.configuration.push(HyperParameter::scalar(name, value));
        value
    }

    /// Record a deliberately fixed scalar without consuming randomness.
    pub fn fixed_scalar(&mut self, name: impl Into<String>, value: i64) -> i64 {
        self.configuration.push(HyperParameter::scalar(name, value));
        value
    }

    /// Draw one value uniformly from each half-open range, in range order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if any range is empty. Nothing is
    /// recorded in that case.
    pub fn integer_list(&mut self, name: impl Into<String>, ranges: &[Range<i32>]) -> Result<Vec<i32>> {
        let name = name.into();
        if let Some(empty) = ranges.iter().find(|r| r.is_empty()) {
            return Err(Error::InvalidRange {
                name,
                low: empty.start,
                high: empty.end,
            });
        }

        let value: Vec<i32> = ranges
            .iter()
            .map(|range| self.rng.gen_range(range.clone()))
            .collect();
        self.configuration
            .push(HyperParameter::integer_list(name, value.clone()));
        Ok(value)
    }

    /// Configuration drawn so far.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Consume the sampler, yielding the drawn configuration.
    #[must_use]
    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }
}
