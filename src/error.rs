//! Error types for model-coach
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// model-coach error types
#[derive(Error, Debug)]
pub enum Error {
    /// Recipe is missing one of its phases
    #[error("Recipe '{recipe}' is misconfigured: {reason}")]
    RecipeMisconfigured {
        /// Recipe name
        recipe: String,
        /// What is missing
        reason: String,
    },

    /// More records were requested than the registry holds
    #[error("Requested {requested} records but the registry only holds {available}")]
    InsufficientRecords {
        /// Number of records asked for
        requested: usize,
        /// Number of records in the registry
        available: usize,
    },

    /// Backing model blob is missing
    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Persisted registry carries a discriminator this build cannot decode
    #[error("Unknown {kind} variant '{tag}' in registry\nAdd decode support before loading files with new variants.")]
    UnknownRecordVariant {
        /// Which polymorphic record kind carried the tag
        kind: &'static str,
        /// The offending `type` discriminator
        tag: String,
    },

    /// Empty half-open integer range passed to a sampler
    #[error("Invalid range for hyperparameter '{name}': [{low}, {high}) is empty")]
    InvalidRange {
        /// Hyperparameter name
        name: String,
        /// Inclusive lower bound
        low: i32,
        /// Exclusive upper bound
        high: i32,
    },

    /// The train phase of a recipe failed
    #[error("Training failed for recipe '{recipe}': {source}")]
    Training {
        /// Recipe name
        recipe: String,
        /// Error reported by the trainer
        source: anyhow::Error,
    },

    /// Model store or registry port failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
