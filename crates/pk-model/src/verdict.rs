use serde::{Deserialize, Serialize};

/// Structured dosing summary for one drug and one patient context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionVerdict {
    pub drug: String,
    pub class: Option<String>,
    pub renal: String,
    pub obesity: String,
    pub hepatic: String,
    pub site: String,
    /// Record notes followed by clinical-flag advisories; `None` when empty.
    pub clinical_notes: Option<Vec<String>>,
    pub alerts: Option<String>,
}

impl DecisionVerdict {
    pub fn notes(&self) -> &[String] {
        self.clinical_notes.as_deref().unwrap_or(&[])
    }
}
