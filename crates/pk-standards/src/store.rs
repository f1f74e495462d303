#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use pk_model::{DrugRecord, DrugSource, normalize_key};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::hash::sha256_hex;

/// Immutable snapshot of the drug reference table.
///
/// Keys are normalized at construction; iteration is in ascending key order.
/// Loading is strict: the first malformed entry aborts the whole load.
#[derive(Debug, Clone, Default)]
pub struct DrugStore {
    records: BTreeMap<String, DrugRecord>,
    fingerprint: Option<String>,
}

impl DrugStore {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let store = Self::parse(&text, &path.display().to_string())?;
        info!(
            path = %path.display(),
            records = store.len(),
            sha256 = store.fingerprint().unwrap_or_default(),
            "loaded drug database"
        );
        Ok(store)
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::parse(json, "<inline>")
    }

    /// Build a store from in-memory records, normalizing keys.
    pub fn from_records<I, K>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, DrugRecord)>,
        K: AsRef<str>,
    {
        let mut store = Self::default();
        let mut raw_keys: BTreeMap<String, String> = BTreeMap::new();
        for (raw_key, record) in records {
            let raw_key = raw_key.as_ref();
            let key = checked_key(raw_key, &record)?;
            if let Some(first) = raw_keys.get(&key) {
                return Err(StoreError::DuplicateKey {
                    key,
                    first: first.clone(),
                    second: raw_key.to_string(),
                });
            }
            raw_keys.insert(key.clone(), raw_key.to_string());
            store.records.insert(key, record);
        }
        Ok(store)
    }

    fn parse(json: &str, origin: &str) -> Result<Self, StoreError> {
        let entries = parse_top_level(json, origin)?;
        let mut records = Vec::with_capacity(entries.len());
        for (raw_key, value) in entries {
            let record = parse_record(&raw_key, value)?;
            records.push((raw_key, record));
        }
        let mut store = Self::from_records(records)?;
        store.fingerprint = Some(sha256_hex(json.as_bytes()));
        Ok(store)
    }

    /// SHA-256 of the source text, when the store was parsed from JSON.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DrugRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// Return a new snapshot with one more record.
    ///
    /// Existing keys are never overwritten.
    pub fn insert(&self, raw_key: &str, record: DrugRecord) -> Result<Self, StoreError> {
        let key = checked_key(raw_key, &record)?;
        if self.records.contains_key(&key) {
            return Err(StoreError::DuplicateRecord { key });
        }
        debug!(key = %key, "adding drug record");
        let mut records = self.records.clone();
        records.insert(key, record);
        Ok(Self {
            records,
            fingerprint: None,
        })
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.records).map_err(|source| StoreError::Json {
            origin: "<serialize>".to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let mut text = self.to_json_string()?;
        text.push('\n');
        std::fs::write(path, text).map_err(|e| StoreError::io(path, e))?;
        info!(path = %path.display(), records = self.len(), "saved drug database");
        Ok(())
    }
}

impl DrugSource for DrugStore {
    fn get(&self, key: &str) -> Option<&DrugRecord> {
        self.records.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.records.keys().map(String::as_str))
    }
}

pub(crate) fn parse_top_level(json: &str, origin: &str) -> Result<Map<String, Value>, StoreError> {
    serde_json::from_str(json).map_err(|source| StoreError::Json {
        origin: origin.to_string(),
        source,
    })
}

pub(crate) fn parse_record(raw_key: &str, value: Value) -> Result<DrugRecord, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::InvalidRecord {
        key: raw_key.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn checked_key(raw_key: &str, record: &DrugRecord) -> Result<String, StoreError> {
    let key = normalize_key(raw_key);
    if key.is_empty() {
        return Err(StoreError::InvalidRecord {
            key: raw_key.to_string(),
            message: "empty key".to_string(),
        });
    }
    if record.name.trim().is_empty() {
        return Err(StoreError::EmptyName {
            key: raw_key.to_string(),
        });
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_normalized_and_sorted() {
        let store = DrugStore::from_records([
            ("Vancomicina", DrugRecord::new("Vancomicina")),
            ("Piperacilina Tazobactam", DrugRecord::new("Pip-Tazo")),
            ("amicacina", DrugRecord::new("Amicacina")),
        ])
        .unwrap();
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(
            keys,
            vec!["amicacina", "piperacilina_tazobactam", "vancomicina"]
        );
        assert!(store.contains("vancomicina"));
        assert!(!store.contains("Vancomicina"));
    }

    #[test]
    fn colliding_keys_are_rejected() {
        let err = DrugStore::from_records([
            ("meropenem", DrugRecord::new("Meropenem")),
            (" Meropenem ", DrugRecord::new("Meropenem")),
        ])
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = DrugStore::from_records([("x", DrugRecord::new("  "))]).unwrap_err();
        assert!(matches!(err, StoreError::EmptyName { .. }));
    }

    #[test]
    fn insert_builds_new_snapshot() {
        let store = DrugStore::from_records([("meropenem", DrugRecord::new("Meropenem"))]).unwrap();
        let bigger = store
            .insert("Exemplo Medicamento", DrugRecord::new("Exemplo"))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(bigger.len(), 2);
        assert!(bigger.contains("exemplo_medicamento"));
        let err = bigger
            .insert("MEROPENEM", DrugRecord::new("Meropenem"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRecord { .. }));
    }
}
