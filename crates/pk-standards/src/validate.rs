#![deny(unsafe_code)]

//! Per-record validation of a drug database file.
//!
//! Unlike [`DrugStore::load`](crate::DrugStore::load), validation keeps
//! going past bad entries so every problem in the file is reported at once.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::StoreError;
use crate::store::{checked_key, parse_record, parse_top_level};

#[derive(Debug, Clone, Serialize)]
pub struct RecordCheck {
    /// Key as written in the file.
    pub key: String,
    pub error: Option<String>,
}

impl RecordCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for RecordCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "[OK] {}", self.key),
            Some(error) => write!(f, "[ERROR] {}: {error}", self.key),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub origin: String,
    pub records: Vec<RecordCheck>,
}

impl ValidationReport {
    pub fn ok_count(&self) -> usize {
        self.records.iter().filter(|check| check.is_ok()).count()
    }

    pub fn error_count(&self) -> usize {
        self.records.len() - self.ok_count()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }
}

/// Validate a database file. Fails only when the file cannot be read or is
/// not a JSON object at the top level.
pub fn validate_database(path: &Path) -> Result<ValidationReport, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    validate_with_origin(&text, &path.display().to_string())
}

pub fn validate_json_str(json: &str) -> Result<ValidationReport, StoreError> {
    validate_with_origin(json, "<inline>")
}

fn validate_with_origin(json: &str, origin: &str) -> Result<ValidationReport, StoreError> {
    let entries = parse_top_level(json, origin)?;
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    let mut records = Vec::with_capacity(entries.len());
    for (raw_key, value) in entries {
        let outcome = parse_record(&raw_key, value)
            .and_then(|record| checked_key(&raw_key, &record))
            .and_then(|key| match seen.get(&key) {
                Some(first) => Err(StoreError::DuplicateKey {
                    key,
                    first: first.clone(),
                    second: raw_key.clone(),
                }),
                None => {
                    seen.insert(key, raw_key.clone());
                    Ok(())
                }
            });
        if let Err(error) = &outcome {
            tracing::warn!(key = %raw_key, %error, "invalid drug record");
        }
        records.push(RecordCheck {
            key: raw_key,
            error: outcome.err().map(|e| e.to_string()),
        });
    }
    Ok(ValidationReport {
        origin: origin.to_string(),
        records,
    })
}
