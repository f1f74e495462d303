#![deny(unsafe_code)]

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::StoreError;
use crate::store::DrugStore;

/// Shared pointer to the active drug store snapshot.
///
/// Readers take an `Arc` to the current snapshot and keep using it for the
/// whole request. A reload builds the replacement store completely before
/// swapping the pointer, so no reader ever sees a partially loaded set.
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    current: Arc<RwLock<Arc<DrugStore>>>,
}

impl StoreHandle {
    pub fn new(store: DrugStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    pub fn snapshot(&self) -> Arc<DrugStore> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new snapshot, returning the previous one.
    pub fn replace(&self, store: DrugStore) -> Arc<DrugStore> {
        self.install(Arc::new(store))
    }

    fn install(&self, next: Arc<DrugStore>) -> Arc<DrugStore> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Load `path` into a fresh snapshot and swap it in.
    ///
    /// Returns the snapshot this call installed, even if another swap
    /// has happened since. On error the active snapshot is left untouched.
    pub fn reload(&self, path: &Path) -> Result<Arc<DrugStore>, StoreError> {
        let next = Arc::new(DrugStore::load(path)?);
        self.install(Arc::clone(&next));
        info!(path = %path.display(), records = next.len(), "drug database reloaded");
        Ok(next)
    }
}
