use std::sync::Arc;

use crate::DrugRecord;

/// Read-only access to a drug record set.
///
/// Implementations are immutable snapshots; keys are normalized
/// (see [`crate::normalize_key`]) and `keys` yields them in a stable order.
pub trait DrugSource {
    fn get(&self, key: &str) -> Option<&DrugRecord>;

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<T: DrugSource + ?Sized> DrugSource for &T {
    fn get(&self, key: &str) -> Option<&DrugRecord> {
        (**self).get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).keys()
    }
}

impl<T: DrugSource + ?Sized> DrugSource for Arc<T> {
    fn get(&self, key: &str) -> Option<&DrugRecord> {
        (**self).get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).keys()
    }
}
