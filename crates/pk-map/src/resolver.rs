//! Resolution of free-text drug names against the store's key set.
//!
//! An exact key match always wins. Otherwise every key is scored with
//! [`similarity`] and the best few at or above the cutoff are returned as
//! suggestions, the first being the primary one.

use std::cmp::Ordering;

use pk_model::{DrugSource, normalize_key};
use serde::Serialize;
use tracing::debug;

use crate::score::similarity;

/// Minimum similarity for a key to be suggested.
pub const SIMILARITY_CUTOFF: f64 = 0.45;

/// Maximum number of suggestions returned.
pub const MAX_CANDIDATES: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub key: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Resolution {
    /// The normalized name is a store key.
    Exact { key: String },
    /// No exact key; suggestions ranked by descending similarity.
    Ambiguous { candidates: Vec<Candidate> },
    NotFound,
}

impl Resolution {
    /// The exact key, or the first suggestion.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Resolution::Exact { key } => Some(key),
            Resolution::Ambiguous { candidates } => candidates.first().map(|c| c.key.as_str()),
            Resolution::NotFound => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Resolution::Exact { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NameResolver {
    cutoff: f64,
    limit: usize,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self {
            cutoff: SIMILARITY_CUTOFF,
            limit: MAX_CANDIDATES,
        }
    }
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn resolve<S: DrugSource + ?Sized>(&self, source: &S, raw_name: &str) -> Resolution {
        let key = normalize_key(raw_name);
        if key.is_empty() {
            debug!("empty drug name");
            return Resolution::NotFound;
        }
        if source.contains(&key) {
            debug!(key = %key, "exact drug match");
            return Resolution::Exact { key };
        }

        let mut candidates: Vec<Candidate> = source
            .keys()
            .filter_map(|candidate| {
                let score = similarity(&key, candidate);
                (score >= self.cutoff).then(|| Candidate {
                    key: candidate.to_string(),
                    similarity: score,
                })
            })
            .collect();

        // Stable sort keeps store key order among equal scores.
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.limit);

        if candidates.is_empty() {
            debug!(key = %key, "no drug match");
            Resolution::NotFound
        } else {
            debug!(key = %key, suggestions = candidates.len(), "approximate drug match");
            Resolution::Ambiguous { candidates }
        }
    }
}

/// Resolve with the default cutoff and suggestion limit.
pub fn resolve<S: DrugSource + ?Sized>(source: &S, raw_name: &str) -> Resolution {
    NameResolver::default().resolve(source, raw_name)
}
