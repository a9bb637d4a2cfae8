//! Coach integration tests against the on-disk registry and model store
//!
//! Every test runs in its own temporary save location.

use std::cell::Cell;
use std::path::Path;

use model_coach::coach::{Coach, DuplicateBudget, SearchSummary};
use model_coach::model_store::{JsonModelStore, ModelStore};
use model_coach::recipe::{Recipe, RecipeBuilder, Sampler, Trained};
use model_coach::record::{
    Configuration, DataSetStatistics, HyperParameter, ModelStatistics, TrainedModelRecord,
};
use model_coach::registry::{JsonFileRegistry, RegistryPort, REGISTRY_FILE_NAME};
use model_coach::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ToyModel {
    seed: i64,
    f1: f64,
}

fn stats(f1: f64) -> ModelStatistics {
    ModelStatistics::v1(
        DataSetStatistics::new(1.0, 1.0, 1.0, 1.0),
        DataSetStatistics::new(f1, f1, f1, f1),
    )
}

/// Replays `(seed, f1)` pairs, one per attempt.
struct Scripted {
    script: Vec<(i64, f64)>,
    next: Cell<usize>,
}

impl Scripted {
    fn seeds(seeds: &[i64]) -> Self {
        Self::new(&seeds.iter().map(|&s| (s, 0.5)).collect::<Vec<_>>())
    }

    fn new(script: &[(i64, f64)]) -> Self {
        Self {
            script: script.to_vec(),
            next: Cell::new(0),
        }
    }

    fn attempts(&self) -> usize {
        self.next.get()
    }
}

impl Recipe for Scripted {
    type Params = (i64, f64);
    type Model = ToyModel;

    fn name(&self) -> &str {
        "scripted"
    }

    fn sample(&self, sampler: &mut Sampler<'_>) -> Result<(i64, f64)> {
        let i = self.next.get();
        self.next.set(i + 1);
        let (seed, f1) = self.script[i];
        sampler.fixed_scalar("seed", seed);
        Ok((seed, f1))
    }

    fn train(&self, (seed, f1): (i64, f64)) -> anyhow::Result<Trained<ToyModel>> {
        Ok((ToyModel { seed, f1 }, stats(f1)))
    }
}

fn open(location: &Path) -> Coach<JsonModelStore<ToyModel>> {
    Coach::open(JsonModelStore::new(), location).expect("open coach")
}

// =============================================================================
// Search loop
// =============================================================================

#[test]
fn test_search_writes_registry_and_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());

    let summary = coach.search_more(3, &Scripted::seeds(&[1, 2, 3])).unwrap();

    assert_eq!(summary.trained, 3);
    assert!(dir.path().join(REGISTRY_FILE_NAME).is_file());
    for record in coach.records() {
        assert!(record.model_file_name().starts_with("model-"));
        assert!(dir.path().join(record.model_file_name()).is_file());
    }
}

#[test]
fn test_model_file_names_unique() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());

    coach
        .search_more(20, &Scripted::seeds(&(0..20).collect::<Vec<_>>()))
        .unwrap();

    let mut names: Vec<_> = coach.records().iter().map(TrainedModelRecord::model_file_name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 20);
}

#[test]
fn test_registry_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let first = {
        let mut coach = open(dir.path());
        coach.search_more(2, &Scripted::seeds(&[1, 2])).unwrap();
        coach.records().to_vec()
    };

    let mut reopened = open(dir.path());
    assert_eq!(reopened.records(), first.as_slice());

    // Seeds 1 and 2 are now duplicates of the persisted trials
    let recipe = Scripted::seeds(&[1, 2, 3]);
    let summary = reopened.search_more(1, &recipe).unwrap();
    assert_eq!(summary, SearchSummary { trained: 1, duplicates: 2, exhausted: false });
    assert_eq!(reopened.records().len(), 3);
    assert_eq!(&reopened.records()[..2], first.as_slice());
}

#[test]
fn test_nine_duplicates_still_reach_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach.search_more(1, &Scripted::seeds(&[0])).unwrap();

    // 9 duplicates spread between 4 new seeds
    let recipe = Scripted::seeds(&[0, 0, 1, 0, 0, 2, 0, 0, 3, 0, 0, 0, 4]);
    let summary = coach.search_more(4, &recipe).unwrap();

    assert_eq!(summary, SearchSummary { trained: 4, duplicates: 9, exhausted: false });
    assert_eq!(recipe.attempts(), 13);
}

#[test]
fn test_tenth_duplicate_stops_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach.search_more(1, &Scripted::seeds(&[0])).unwrap();

    // Duplicates are not consecutive; the global counter still hits 10
    let recipe = Scripted::seeds(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0, 3, 4]);
    let summary = coach.search_more(4, &recipe).unwrap();

    assert_eq!(summary, SearchSummary { trained: 2, duplicates: 10, exhausted: true });
    assert_eq!(recipe.attempts(), 12);
    assert_eq!(coach.records().len(), 3);
}

#[test]
fn test_consecutive_budget_survives_spread_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = Coach::builder(JsonModelStore::<ToyModel>::new())
        .save_location(dir.path())
        .duplicate_budget(DuplicateBudget::Consecutive(10))
        .build()
        .unwrap();
    coach.search_more(1, &Scripted::seeds(&[0])).unwrap();

    let recipe = Scripted::seeds(&[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0, 3, 4]);
    let summary = coach.search_more(4, &recipe).unwrap();

    assert_eq!(summary.trained, 4);
    assert!(!summary.exhausted);
}

#[test]
fn test_random_recipe_with_seeded_coach() {
    let dir = tempfile::tempdir().unwrap();
    let recipe = RecipeBuilder::new("random")
        .sample(|s| {
            let seed = s.fixed_scalar("seed", 13);
            let dims = s.integer_list("hiddenLayerDims", &[20..50, 10..20, 5..15])?;
            Ok((seed, dims))
        })
        .train(|(seed, dims): (i64, Vec<i32>)| {
            let f1 = f64::from(dims[0]) / 50.0;
            Ok((ToyModel { seed, f1 }, stats(f1)))
        })
        .build()
        .unwrap();

    let run = |location: &Path| {
        let mut coach = Coach::builder(JsonModelStore::<ToyModel>::new())
            .save_location(location)
            .seed(2024)
            .build()
            .unwrap();
        coach.search_more(5, &recipe).unwrap();
        coach
            .records()
            .iter()
            .map(|r| r.configuration().clone())
            .collect::<Vec<_>>()
    };

    let a = run(&dir.path().join("a"));
    let b = run(&dir.path().join("b"));
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
    for config in &a {
        let dims = config
            .get("hiddenLayerDims")
            .and_then(HyperParameter::as_integer_list)
            .unwrap();
        assert!((20..50).contains(&dims[0]));
        assert!((10..20).contains(&dims[1]));
        assert!((5..15).contains(&dims[2]));
    }
}

// =============================================================================
// Failure handling
// =============================================================================

struct FailingStore;

impl ModelStore for FailingStore {
    type Model = ToyModel;

    fn save(&self, path: &Path, _model: &ToyModel) -> Result<()> {
        Err(Error::StorageError(format!("disk full: {}", path.display())))
    }

    fn restore(&self, path: &Path) -> Result<ToyModel> {
        Err(Error::ModelNotFound(path.to_path_buf()))
    }
}

#[test]
fn test_failed_model_save_leaves_registry_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = Coach::open(FailingStore, dir.path()).unwrap();

    let err = coach.search_more(1, &Scripted::seeds(&[1])).unwrap_err();

    assert!(matches!(err, Error::StorageError(ref msg) if msg.contains("disk full")));
    assert!(coach.records().is_empty());
    assert!(!dir.path().join(REGISTRY_FILE_NAME).exists());
}

#[test]
fn test_sampling_error_aborts_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    let recipe = RecipeBuilder::new("bad-range")
        .sample(|s| s.integer_list("dims", &[10..5]))
        .train(|_: Vec<i32>| Ok((ToyModel { seed: 0, f1: 0.0 }, stats(0.0))))
        .build()
        .unwrap();

    let err = coach.search_more(1, &recipe).unwrap_err();
    assert!(matches!(err, Error::InvalidRange { low: 10, high: 5, .. }));
    assert!(coach.records().is_empty());
}

#[test]
fn test_unknown_variant_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(REGISTRY_FILE_NAME),
        r#"[{"modelFileName": "model-x", "configuration": [{"type": "float", "name": "lr", "value": 0.1}],
            "statistics": {"type": "v1",
                "train": {"accuracy": 1, "precision": 1, "recall": 1, "f1": 1},
                "test": {"accuracy": 1, "precision": 1, "recall": 1, "f1": 1}}}]"#,
    )
    .unwrap();

    let result = Coach::open(JsonModelStore::<ToyModel>::new(), dir.path());
    assert!(matches!(result, Err(Error::UnknownRecordVariant { .. })));
}

// =============================================================================
// Ranking, restore, re-evaluation
// =============================================================================

#[test]
fn test_best_models_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach
        .search_more(3, &Scripted::new(&[(1, 0.5), (2, 0.9), (3, 0.7)]))
        .unwrap();

    let best = coach.best_models(2).unwrap();
    let metrics: Vec<f64> = best.iter().map(|r| r.default_metric()).collect();
    assert_eq!(metrics, [0.9, 0.7]);

    let err = coach.best_models(4).unwrap_err();
    assert!(matches!(err, Error::InsufficientRecords { requested: 4, available: 3 }));
}

#[test]
fn test_best_models_by_train_accuracy_ties_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach
        .search_more(3, &Scripted::new(&[(1, 0.5), (2, 0.9), (3, 0.7)]))
        .unwrap();

    // Train accuracy is 1.0 everywhere: registry order is kept
    let best = coach
        .best_models_by(3, |r| match r.statistics() {
            ModelStatistics::V1 { train, .. } => train.accuracy,
        })
        .unwrap();
    let seeds: Vec<i64> = best
        .iter()
        .map(|r| r.configuration().get("seed").and_then(HyperParameter::as_scalar).unwrap())
        .collect();
    assert_eq!(seeds, [1, 2, 3]);
}

#[test]
fn test_restore_best_model() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach
        .search_more(3, &Scripted::new(&[(1, 0.5), (2, 0.9), (3, 0.7)]))
        .unwrap();

    let best = coach.best_models(1).unwrap()[0].clone();
    let model = coach.restore_model(&best).unwrap();
    assert_eq!(model, ToyModel { seed: 2, f1: 0.9 });
}

#[test]
fn test_restore_missing_blob() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach.search_more(1, &Scripted::seeds(&[1])).unwrap();

    let record = coach.records()[0].clone();
    std::fs::remove_file(coach.model_path(&record)).unwrap();

    assert!(matches!(coach.restore_model(&record), Err(Error::ModelNotFound(_))));
}

#[test]
fn test_reevaluate_persists_new_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let mut coach = open(dir.path());
    coach.search_more(1, &Scripted::new(&[(7, 0.3)])).unwrap();
    let before = coach.records()[0].clone();

    coach.reevaluate_models(|model| stats(model.f1 * 2.0)).unwrap();

    let after = &coach.records()[0];
    assert_eq!(after.model_file_name(), before.model_file_name());
    assert_eq!(after.configuration(), before.configuration());
    assert_eq!(after.statistics(), &stats(0.6));

    let persisted = JsonFileRegistry::new(dir.path()).load().unwrap();
    assert_eq!(persisted, coach.records());
}

#[test]
fn test_preexisting_record_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let record = TrainedModelRecord::new(
        "model-2020-01-01T00:00:00Z",
        Configuration::from(vec![HyperParameter::scalar("seed", 13)]),
        stats(0.86),
    );
    JsonFileRegistry::new(dir.path()).save(&[record.clone()]).unwrap();

    let coach = open(dir.path());
    assert_eq!(coach.records(), [record]);
    assert!(coach
        .registry()
        .contains_configuration(&Configuration::from(vec![HyperParameter::scalar("seed", 13)])));
}
