//! Per-drug creatinine-clearance threshold rules.
//!
//! Each rule maps one drug key to a threshold and two narrative fragments.
//! Adding a drug means adding a rule (in code or in a TOML file); the
//! engine never branches on drug identity.

use std::collections::BTreeMap;
use std::path::Path;

use pk_model::normalize_key;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RuleError;
use crate::narrative::{RENAL_FALLBACK, generic_clearance};

/// Environment variable naming a TOML file with renal rules.
pub const RENAL_RULES_ENV_VAR: &str = "PKHELPER_RENAL_RULES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenalRule {
    pub drug: String,
    /// Clearance (mL/min) at which the `at_or_above` text starts to apply.
    pub threshold: f64,
    pub below: String,
    pub at_or_above: String,
}

impl RenalRule {
    pub fn new(
        drug: impl Into<String>,
        threshold: f64,
        below: impl Into<String>,
        at_or_above: impl Into<String>,
    ) -> Self {
        Self {
            drug: drug.into(),
            threshold,
            below: below.into(),
            at_or_above: at_or_above.into(),
        }
    }

    /// Narrative fragment for a clearance value. The low side is exclusive:
    /// a clearance equal to the threshold gets the `at_or_above` text.
    pub fn fragment(&self, clearance: f64) -> String {
        if clearance < self.threshold {
            format!(
                "ClCr = {clearance:.1} mL/min (< {}): {}",
                self.threshold, self.below
            )
        } else {
            format!(
                "ClCr = {clearance:.1} mL/min (≥ {}): {}",
                self.threshold, self.at_or_above
            )
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        let invalid = |message: &str| RuleError::InvalidRule {
            drug: self.drug.clone(),
            message: message.to_string(),
        };
        if normalize_key(&self.drug).is_empty() {
            return Err(invalid("empty drug key"));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(invalid("threshold must be a positive number"));
        }
        if self.below.trim().is_empty() || self.at_or_above.trim().is_empty() {
            return Err(invalid("both narrative texts are required"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RenalRule>,
}

/// Renal threshold rules keyed by normalized drug key.
#[derive(Debug, Clone, PartialEq)]
pub struct RenalRuleTable {
    rules: BTreeMap<String, RenalRule>,
}

impl Default for RenalRuleTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RenalRuleTable {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Built-in rules.
    pub fn defaults() -> Self {
        let mut table = Self::empty();
        for rule in [
            RenalRule::new(
                "meropenem",
                50.0,
                "dose/interval adjustment very likely necessary.",
                "renal adjustment usually unnecessary in practice.",
            ),
            RenalRule::new(
                "fluconazol",
                50.0,
                "dose reduction or interval extension typically used.",
                "renal adjustment generally unnecessary.",
            ),
            RenalRule::new(
                "amicacina",
                60.0,
                "high-priority individualized adjustment and level monitoring.",
                "level monitoring still recommended per protocol.",
            ),
            RenalRule::new(
                "vancomicina",
                50.0,
                "high-priority dose/interval adjustment and AUC-based monitoring.",
                "empiric dosing possible but AUC-target monitoring (AUC 400-600) still recommended.",
            ),
        ] {
            table.insert(rule);
        }
        table
    }

    /// Parse rules from TOML (`[[rule]]` tables). Duplicate drugs in one
    /// file are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self, RuleError> {
        Self::parse(text, "<inline>")
    }

    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    fn parse(text: &str, origin: &str) -> Result<Self, RuleError> {
        let file: RuleFile = toml::from_str(text).map_err(|source| RuleError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        let mut table = Self::empty();
        for rule in file.rules {
            rule.validate()?;
            let drug = rule.drug.clone();
            if table.insert(rule).is_some() {
                return Err(RuleError::InvalidRule {
                    drug,
                    message: "duplicate rule".to_string(),
                });
            }
        }
        debug!(origin, rules = table.len(), "parsed renal rules");
        Ok(table)
    }

    /// Add or replace a rule; returns the rule it replaced.
    pub fn insert(&mut self, mut rule: RenalRule) -> Option<RenalRule> {
        let key = normalize_key(&rule.drug);
        rule.drug.clone_from(&key);
        self.rules.insert(key, rule)
    }

    /// Overlay `other` on top of this table; its rules win.
    #[must_use]
    pub fn merged_with(mut self, other: RenalRuleTable) -> Self {
        for rule in other.rules.into_values() {
            self.insert(rule);
        }
        self
    }

    pub fn get(&self, drug_key: &str) -> Option<&RenalRule> {
        self.rules.get(drug_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenalRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Clearance commentary for one drug.
    ///
    /// A drug with a rule always gets the rule's fragment; the generic
    /// fragment is only used for drugs without a rule that do have a base
    /// renal narrative. Without a clearance there is no commentary.
    pub fn evaluate(
        &self,
        drug_key: &str,
        clearance: Option<f64>,
        base_narrative: Option<&str>,
    ) -> Option<String> {
        let clearance = clearance?;
        match (self.get(drug_key), base_narrative) {
            (Some(rule), _) => {
                debug!(drug = drug_key, threshold = rule.threshold, "renal rule applied");
                Some(rule.fragment(clearance))
            }
            (None, Some(_)) => Some(generic_clearance(clearance)),
            (None, None) => None,
        }
    }

    /// Base renal narrative (or its fallback) followed by the clearance
    /// commentary, when there is one.
    pub fn summary(
        &self,
        drug_key: &str,
        clearance: Option<f64>,
        base_narrative: Option<&str>,
    ) -> String {
        let base = base_narrative.unwrap_or(RENAL_FALLBACK);
        match self.evaluate(drug_key, clearance, base_narrative) {
            Some(fragment) => format!("{base} {fragment}"),
            None => base.to_string(),
        }
    }
}
