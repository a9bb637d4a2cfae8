//! In-memory model store.
//!
//! Models are cloned in and out; nothing survives the process. Useful for
//! tests and for recipes whose models are cheap to rebuild.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::ModelStore;
use crate::{Error, Result};

/// Model store backed by a hash map keyed on path.
#[derive(Debug)]
pub struct MemoryModelStore<M> {
    models: RefCell<FxHashMap<PathBuf, M>>,
}

impl<M> MemoryModelStore<M> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: RefCell::new(FxHashMap::default()),
        }
    }

    /// Number of stored models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.borrow().len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.borrow().is_empty()
    }

    /// Check if a model is stored at `path`.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.models.borrow().contains_key(path)
    }

    /// Drop the model at `path`, simulating external deletion of the blob.
    pub fn remove(&self, path: &Path) -> Option<M> {
        self.models.borrow_mut().remove(path)
    }
}

impl<M> Default for MemoryModelStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> ModelStore for MemoryModelStore<M> {
    type Model = M;

    fn save(&self, path: &Path, model: &M) -> Result<()> {
        self.models
            .borrow_mut()
            .insert(path.to_path_buf(), model.clone());
        Ok(())
    }

    fn restore(&self, path: &Path) -> Result<M> {
        self.models
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::ModelNotFound(path.to_path_buf()))
    }
}
