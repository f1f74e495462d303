//! Keyword heuristics used to color verdict sections.
//!
//! These only affect presentation; the engine's output is never parsed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Alert terms that escalate to [`Severity::Error`].
pub const TOXICITY_TERMS: &[&str] = &[
    "nephro",
    "ototox",
    "convuls",
    "seizure",
    "respiratory depression",
];

pub fn renal_severity(text: &str) -> Severity {
    if text.to_lowercase().contains("adjust") || text.contains('<') {
        Severity::Warning
    } else {
        Severity::Info
    }
}

pub fn site_severity(text: &str) -> Severity {
    let lower = text.to_lowercase();
    if lower.contains("low") || lower.contains("no specific data") {
        Severity::Warning
    } else {
        Severity::Info
    }
}

pub fn alert_severity(text: &str) -> Severity {
    let lower = text.to_lowercase();
    if TOXICITY_TERMS.iter().any(|term| lower.contains(term)) {
        Severity::Error
    } else {
        Severity::Warning
    }
}
