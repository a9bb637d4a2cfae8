//! File-backed model store encoding models as JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ModelStore;
use crate::{Error, Result};

/// Stores any serde-serializable model as a JSON blob on disk.
///
/// Parent directories are created on save.
#[derive(Debug)]
pub struct JsonModelStore<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> JsonModelStore<M> {
    /// Create a JSON model store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for JsonModelStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Serialize + DeserializeOwned> ModelStore for JsonModelStore<M> {
    type Model = M;

    fn save(&self, path: &Path, model: &M) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, model)?;
        writer.flush()?;
        Ok(())
    }

    fn restore(&self, path: &Path) -> Result<M> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ModelNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
