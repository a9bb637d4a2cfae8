//! Model Store: persist and restore opaque trained models by path
//!
//! The coach never inspects model objects. It hands them to a
//! [`ModelStore`] at `<save_location>/<modelFileName>` and asks for them back
//! when ranking results are reloaded or re-evaluated.
//!
//! # Example
//!
//! ```rust
//! use model_coach::model_store::{MemoryModelStore, ModelStore};
//! use std::path::Path;
//!
//! # fn main() -> model_coach::Result<()> {
//! let store = MemoryModelStore::<Vec<f64>>::new();
//! store.save(Path::new("models/model-a"), &vec![0.5_f64, 0.25])?;
//! assert_eq!(store.restore(Path::new("models/model-a"))?, vec![0.5, 0.25]);
//! # Ok(())
//! # }
//! ```

mod json;
mod memory;

pub use json::JsonModelStore;
pub use memory::MemoryModelStore;

use crate::Result;
use std::path::Path;

/// Save/restore capability for trained models.
///
/// Implementations must round-trip: `restore` after `save` yields a model
/// that evaluates identically. Failures are surfaced, never swallowed.
pub trait ModelStore {
    /// Model object type.
    type Model;

    /// Persist a model at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the model cannot be written.
    fn save(&self, path: &Path, model: &Self::Model) -> Result<()>;

    /// Restore the model persisted at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelNotFound`](crate::Error::ModelNotFound) if nothing
    /// is stored at `path`, or another error if it cannot be decoded.
    fn restore(&self, path: &Path) -> Result<Self::Model>;
}

impl<T: ModelStore + ?Sized> ModelStore for &T {
    type Model = T::Model;

    fn save(&self, path: &Path, model: &Self::Model) -> Result<()> {
        (**self).save(path, model)
    }

    fn restore(&self, path: &Path) -> Result<Self::Model> {
        (**self).restore(path)
    }
}
