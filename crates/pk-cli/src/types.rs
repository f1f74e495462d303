use std::path::PathBuf;

use pk_map::Candidate;
use pk_model::{DecisionVerdict, DrugRecord};

/// Result of resolving a typed name for `lookup`.
#[derive(Debug)]
pub struct LookupResult {
    pub name: String,
    /// Suggestions shown when the name was not an exact key.
    pub suggestions: Vec<Candidate>,
    /// The matched key and record (the primary suggestion when inexact).
    pub record: Option<(String, DrugRecord)>,
}

#[derive(Debug)]
pub enum DecideOutcome {
    Verdict(DecisionVerdict),
    /// The name was not an exact key; no verdict is built from a guess.
    Ambiguous {
        name: String,
        candidates: Vec<Candidate>,
    },
    NotFound {
        name: String,
    },
}

/// A record written by `add`.
#[derive(Debug)]
pub struct AddedRecord {
    pub key: String,
    pub path: PathBuf,
    /// Record count after the insert.
    pub records: usize,
}
