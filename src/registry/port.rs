//! Persistence port for the registry.

use std::cell::{Cell, RefCell};

use crate::record::TrainedModelRecord;
use crate::{Error, Result};

/// Durable storage for the full record list.
///
/// The coach loads once at construction and saves the entire list after
/// every mutation (write-through). Ports are not expected to lock; one coach
/// per storage location.
pub trait RegistryPort {
    /// Load all records in persisted order. A missing store loads as empty.
    ///
    /// # Errors
    ///
    /// Returns error if the store exists but cannot be read or decoded.
    fn load(&self) -> Result<Vec<TrainedModelRecord>>;

    /// Replace the persisted records with `records`.
    ///
    /// # Errors
    ///
    /// Returns error if the records cannot be written.
    fn save(&self, records: &[TrainedModelRecord]) -> Result<()>;
}

impl<T: RegistryPort + ?Sized> RegistryPort for &T {
    fn load(&self) -> Result<Vec<TrainedModelRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[TrainedModelRecord]) -> Result<()> {
        (**self).save(records)
    }
}

/// In-memory port. Keeps the last saved snapshot and counts saves.
///
/// [`fail_next_save`](Self::fail_next_save) makes the following `save` fail
/// without touching the snapshot, for exercising rollback paths.
#[derive(Debug, Default)]
pub struct MemoryRegistryPort {
    records: RefCell<Vec<TrainedModelRecord>>,
    saves: Cell<usize>,
    fail_next: Cell<bool>,
}

impl MemoryRegistryPort {
    /// Create an empty port.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a port pre-populated with records, as if saved by an earlier run.
    #[must_use]
    pub fn with_records(records: Vec<TrainedModelRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Last saved snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TrainedModelRecord> {
        self.records.borrow().clone()
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Make the next `save` return [`Error::StorageError`].
    pub fn fail_next_save(&self) {
        self.fail_next.set(true);
    }
}

impl RegistryPort for MemoryRegistryPort {
    fn load(&self) -> Result<Vec<TrainedModelRecord>> {
        Ok(self.snapshot())
    }

    fn save(&self, records: &[TrainedModelRecord]) -> Result<()> {
        if self.fail_next.replace(false) {
            return Err(Error::StorageError("injected save failure".to_string()));
        }
        *self.records.borrow_mut() = records.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save_empty<P: RegistryPort>(port: P) {
        port.save(&[]).unwrap();
    }

    #[test]
    fn test_memory_port_counts_saves() {
        let port = MemoryRegistryPort::new();
        assert!(port.load().unwrap().is_empty());

        port.save(&[]).unwrap();
        save_empty(&port);
        assert_eq!(port.save_count(), 2);
    }

    #[test]
    fn test_fail_next_save_fails_once() {
        let port = MemoryRegistryPort::new();
        port.fail_next_save();

        assert!(matches!(port.save(&[]), Err(Error::StorageError(_))));
        assert_eq!(port.save_count(), 0);
        port.save(&[]).unwrap();
        assert_eq!(port.save_count(), 1);
    }
}
