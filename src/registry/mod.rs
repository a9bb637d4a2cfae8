//! Registry: the ordered history of completed trials
//!
//! The in-memory [`Registry`] keeps records in insertion order plus a hash
//! index of their configurations for duplicate checks. Durability is the job
//! of a [`RegistryPort`]; the coach rewrites the full record list through the
//! port after every mutation.
//!
//! ## Ranking
//!
//! [`Registry::best_by`] returns the top `n` records in descending selector
//! order. The sort is stable, so ties keep registry order.

mod json_file;
mod port;

pub use json_file::{
    decode_records, encode_records, JsonFileRegistry, REGISTRY_FILE_NAME, REGISTRY_TEMP_FILE_NAME,
};
pub use port::{MemoryRegistryPort, RegistryPort};

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use crate::record::{Configuration, ModelStatistics, TrainedModelRecord};
use crate::{Error, Result};

/// Ordered, deduplicated list of trained model records.
#[derive(Debug, Default)]
pub struct Registry {
    records: Vec<TrainedModelRecord>,
    configurations: FxHashSet<Configuration>,
    file_names: FxHashSet<String>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records in their persisted order.
    #[must_use]
    pub fn from_records(records: Vec<TrainedModelRecord>) -> Self {
        let configurations = records.iter().map(|r| r.configuration().clone()).collect();
        let file_names = records
            .iter()
            .map(|r| r.model_file_name().to_string())
            .collect();
        Self {
            records,
            configurations,
            file_names,
        }
    }

    /// Records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[TrainedModelRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if some record was produced by an equal configuration.
    #[must_use]
    pub fn contains_configuration(&self, configuration: &Configuration) -> bool {
        self.configurations.contains(configuration)
    }

    /// Check if a model file name is taken.
    #[must_use]
    pub fn contains_file_name(&self, name: &str) -> bool {
        self.file_names.contains(name)
    }

    /// Return `candidate` if unused, otherwise the first free `candidate-<n>`.
    #[must_use]
    pub fn unique_file_name(&self, candidate: String) -> String {
        if !self.contains_file_name(&candidate) {
            return candidate;
        }
        let mut n = 1;
        loop {
            let name = format!("{candidate}-{n}");
            if !self.contains_file_name(&name) {
                return name;
            }
            n += 1;
        }
    }

    pub(crate) fn push(&mut self, record: TrainedModelRecord) {
        self.configurations.insert(record.configuration().clone());
        self.file_names.insert(record.model_file_name().to_string());
        self.records.push(record);
    }

    pub(crate) fn pop(&mut self) -> Option<TrainedModelRecord> {
        let record = self.records.pop()?;
        self.configurations.remove(record.configuration());
        self.file_names.remove(record.model_file_name());
        Some(record)
    }

    /// Replace every record's statistics, in order, returning the old ones.
    pub(crate) fn replace_statistics(
        &mut self,
        statistics: Vec<ModelStatistics>,
    ) -> Vec<ModelStatistics> {
        self.records
            .iter_mut()
            .zip(statistics)
            .map(|(record, s)| record.replace_statistics(s))
            .collect()
    }

    /// Top `n` records by default metric, descending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best(&self, n: usize) -> Result<Vec<&TrainedModelRecord>> {
        self.best_by(n, TrainedModelRecord::default_metric)
    }

    /// Top `n` records by a scalar selector, descending. NaN ranks last.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best_by<F>(&self, n: usize, selector: F) -> Result<Vec<&TrainedModelRecord>>
    where
        F: Fn(&TrainedModelRecord) -> f64,
    {
        let key = |record: &TrainedModelRecord| {
            let value = selector(record);
            if value.is_nan() {
                f64::NEG_INFINITY
            } else {
                value
            }
        };
        self.rank(n, key, |a: &f64, b: &f64| b.total_cmp(a))
    }

    /// Top `n` records by a totally ordered key, descending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientRecords`] if `n` exceeds the registry size.
    pub fn best_by_key<K, F>(&self, n: usize, selector: F) -> Result<Vec<&TrainedModelRecord>>
    where
        K: Ord,
        F: Fn(&TrainedModelRecord) -> K,
    {
        self.rank(n, selector, |a, b| b.cmp(a))
    }

    fn rank<K, F, C>(&self, n: usize, key: F, compare: C) -> Result<Vec<&TrainedModelRecord>>
    where
        F: Fn(&TrainedModelRecord) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        if n > self.records.len() {
            return Err(Error::InsufficientRecords {
                requested: n,
                available: self.records.len(),
            });
        }

        let mut keyed: Vec<(K, &TrainedModelRecord)> =
            self.records.iter().map(|r| (key(r), r)).collect();
        // Stable: equal keys keep registry order
        keyed.sort_by(|a, b| compare(&a.0, &b.0));
        keyed.truncate(n);

        Ok(keyed.into_iter().map(|(_, r)| r).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DataSetStatistics, HyperParameter};

    fn record(name: &str, seed: i64, f1: f64) -> TrainedModelRecord {
        let data = DataSetStatistics::new(f1, f1, f1, f1);
        TrainedModelRecord::new(
            name,
            Configuration::from(vec![HyperParameter::scalar("seed", seed)]),
            ModelStatistics::v1(data, data),
        )
    }

    fn registry(metrics: &[f64]) -> Registry {
        Registry::from_records(
            metrics
                .iter()
                .enumerate()
                .map(|(i, &m)| record(&format!("model-{i}"), i as i64, m))
                .collect(),
        )
    }

    #[test]
    fn test_best_orders_descending() {
        let registry = registry(&[0.5, 0.9, 0.7]);
        let best = registry.best(2).unwrap();

        assert_eq!(best.len(), 2);
        assert_eq!(best[0].model_file_name(), "model-1");
        assert_eq!(best[1].model_file_name(), "model-2");
    }

    #[test]
    fn test_best_ties_keep_registry_order() {
        let registry = registry(&[0.8, 0.8, 0.9, 0.8]);
        let names: Vec<_> = registry
            .best(4)
            .unwrap()
            .iter()
            .map(|r| r.model_file_name().to_string())
            .collect();
        assert_eq!(names, ["model-2", "model-0", "model-1", "model-3"]);
    }

    #[test]
    fn test_best_insufficient_records() {
        let registry = registry(&[0.5]);
        let err = registry.best(2).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientRecords {
                requested: 2,
                available: 1
            }
        ));
        assert!(registry.best(0).unwrap().is_empty());
    }

    #[test]
    fn test_best_by_custom_selector() {
        let registry = registry(&[0.5, 0.9, 0.7]);
        let lowest = registry.best_by(1, |r| -r.default_metric()).unwrap();
        assert_eq!(lowest[0].model_file_name(), "model-0");
    }

    #[test]
    fn test_best_by_nan_ranks_last() {
        let registry = registry(&[f64::NAN, 0.1]);
        let best = registry.best(2).unwrap();
        assert_eq!(best[0].model_file_name(), "model-1");
        assert_eq!(best[1].model_file_name(), "model-0");
    }

    #[test]
    fn test_best_by_key() {
        let registry = registry(&[0.5, 0.9, 0.7]);
        let by_name = registry
            .best_by_key(3, |r| r.model_file_name().to_string())
            .unwrap();
        assert_eq!(by_name[0].model_file_name(), "model-2");
    }

    #[test]
    fn test_dedup_index_tracks_push_and_pop() {
        let mut registry = Registry::new();
        let r = record("model-a", 1, 0.5);
        let config = r.configuration().clone();

        registry.push(r);
        assert!(registry.contains_configuration(&config));
        assert!(registry.contains_file_name("model-a"));

        registry.pop();
        assert!(!registry.contains_configuration(&config));
        assert!(!registry.contains_file_name("model-a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unique_file_name_suffix() {
        let registry = Registry::from_records(vec![
            record("model-t", 1, 0.1),
            record("model-t-1", 2, 0.1),
        ]);
        assert_eq!(registry.unique_file_name("model-u".into()), "model-u");
        assert_eq!(registry.unique_file_name("model-t".into()), "model-t-2");
    }

    #[test]
    fn test_replace_statistics_in_order() {
        let mut registry = registry(&[0.1, 0.2]);
        let data = DataSetStatistics::new(0.9, 0.9, 0.9, 0.9);
        let new = ModelStatistics::v1(data, data);

        let old = registry.replace_statistics(vec![new.clone(), new.clone()]);

        assert_eq!(old.len(), 2);
        assert!((old[1].default_metric() - 0.2).abs() < f64::EPSILON);
        assert!(registry.records().iter().all(|r| r.statistics() == &new));
    }
}
