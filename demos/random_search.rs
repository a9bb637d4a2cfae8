//! Random Search Example
//!
//! Demonstrates a full search session: sample layer widths, "train" a toy
//! threshold classifier, keep the registry on disk, rank, reload and
//! re-evaluate.
//!
//! Run with: cargo run --example random_search
//! Verbose: RUST_LOG=debug cargo run --example random_search

use model_coach::coach::Coach;
use model_coach::model_store::JsonModelStore;
use model_coach::recipe::RecipeBuilder;
use model_coach::record::{DataSetStatistics, ModelStatistics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Two-feature points labelled by `x + y > 1`.
struct DataSet {
    points: Vec<([f64; 2], bool)>,
}

impl DataSet {
    fn generate(seed: u64, size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..size)
            .map(|_| {
                let p = [rng.gen::<f64>(), rng.gen::<f64>()];
                (p, p[0] + p[1] > 1.0)
            })
            .collect();
        Self { points }
    }
}

/// Linear threshold classifier standing in for a trained network.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThresholdModel {
    weights: [f64; 2],
    bias: f64,
}

impl ThresholdModel {
    /// Wider layers land closer to the true boundary in this toy setup.
    fn fit(seed: i64, hidden: &[i32]) -> Self {
        let capacity: i32 = hidden.iter().sum();
        let mut rng = StdRng::seed_from_u64(seed.unsigned_abs());
        let noise = 1.0 / f64::from(capacity.max(1));
        Self {
            weights: [
                1.0 + rng.gen_range(-noise..noise),
                1.0 + rng.gen_range(-noise..noise),
            ],
            bias: -1.0 + rng.gen_range(-noise..noise),
        }
    }

    fn predict(&self, p: [f64; 2]) -> bool {
        self.weights[0] * p[0] + self.weights[1] * p[1] + self.bias > 0.0
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, data: &DataSet) -> DataSetStatistics {
        let (mut tp, mut fp, mut tn, mut fn_) = (0.0, 0.0, 0.0, 0.0);
        for &(p, label) in &data.points {
            match (self.predict(p), label) {
                (true, true) => tp += 1.0,
                (true, false) => fp += 1.0,
                (false, false) => tn += 1.0,
                (false, true) => fn_ += 1.0,
            }
        }
        let ratio = |num: f64, den: f64| if den > 0.0 { num / den } else { 0.0 };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        DataSetStatistics::new(
            ratio(tp + tn, data.points.len() as f64),
            precision,
            recall,
            ratio(2.0 * precision * recall, precision + recall),
        )
    }
}

fn statistics(model: &ThresholdModel, train: &DataSet, test: &DataSet) -> ModelStatistics {
    ModelStatistics::v1(model.evaluate(train), model.evaluate(test))
}

fn main() -> anyhow::Result<()> {
    model_coach::logging::init();
    println!("=== model-coach Random Search ===\n");

    let save_location = tempfile::tempdir()?;
    let train_set = std::rc::Rc::new(DataSet::generate(1, 400));
    let test_set = std::rc::Rc::new(DataSet::generate(2, 100));

    // -------------------------------------------------------------------------
    // 1. Define the recipe
    // -------------------------------------------------------------------------
    let (train, test) = (train_set.clone(), test_set.clone());
    let recipe = RecipeBuilder::new("simple")
        .sample(|s| {
            let seed = s.scalar("seed");
            let hidden = s.integer_list("hiddenLayerDims", &[20..50, 10..20, 5..15])?;
            Ok((seed, hidden))
        })
        .train(move |(seed, hidden): (i64, Vec<i32>)| {
            let model = ThresholdModel::fit(seed, &hidden);
            let stats = statistics(&model, &train, &test);
            Ok((model, stats))
        })
        .build()?;

    // -------------------------------------------------------------------------
    // 2. Search
    // -------------------------------------------------------------------------
    println!("1. Searching in {}...", save_location.path().display());
    let mut coach = Coach::builder(JsonModelStore::<ThresholdModel>::new())
        .save_location(save_location.path())
        .seed(13)
        .build()?;

    let summary = coach.search_more(20, &recipe)?;
    println!(
        "   Trained: {}, duplicates: {}, budget exhausted: {}",
        summary.trained, summary.duplicates, summary.exhausted
    );

    // -------------------------------------------------------------------------
    // 3. Rank
    // -------------------------------------------------------------------------
    println!("\n2. Best models:");
    for record in coach.best_models(3)? {
        println!("{record}");
    }

    // -------------------------------------------------------------------------
    // 4. Reload and re-evaluate on a fresh test set
    // -------------------------------------------------------------------------
    let best = coach.best_models(1)?[0].clone();
    let model = coach.restore_model(&best)?;
    println!("3. Restored {}: {model:?}", best.model_file_name());

    let fresh_test = DataSet::generate(3, 100);
    coach.reevaluate_models(|m| statistics(m, &train_set, &fresh_test))?;

    println!("\n4. Best after re-evaluation:");
    for record in coach.best_models(3)? {
        println!("{record}");
    }

    // -------------------------------------------------------------------------
    // 5. Reopen: the registry is already on disk
    // -------------------------------------------------------------------------
    let reopened = Coach::open(JsonModelStore::<ThresholdModel>::new(), save_location.path())?;
    println!("5. Reopened registry holds {} records", reopened.records().len());

    println!("\n=== Random Search Complete ===");
    Ok(())
}
