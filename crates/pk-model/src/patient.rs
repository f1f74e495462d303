use serde::{Deserialize, Serialize};

/// Per-request patient and clinical context.
///
/// Clearance is creatinine clearance in mL/min, already computed upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientContext {
    pub clearance: Option<f64>,
    pub obese: bool,
    pub hepatic_impairment: bool,
    pub sepsis_or_shock: bool,
    pub mechanical_ventilation: bool,
    pub renal_replacement: bool,
    /// Tissue site key (see [`crate::TissueSite`]); normalized on use.
    pub infection_site: Option<String>,
}

impl PatientContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = Some(clearance);
        self
    }

    #[must_use]
    pub fn with_obese(mut self, obese: bool) -> Self {
        self.obese = obese;
        self
    }

    #[must_use]
    pub fn with_hepatic_impairment(mut self, impaired: bool) -> Self {
        self.hepatic_impairment = impaired;
        self
    }

    #[must_use]
    pub fn with_sepsis_or_shock(mut self, enable: bool) -> Self {
        self.sepsis_or_shock = enable;
        self
    }

    #[must_use]
    pub fn with_mechanical_ventilation(mut self, enable: bool) -> Self {
        self.mechanical_ventilation = enable;
        self
    }

    #[must_use]
    pub fn with_renal_replacement(mut self, enable: bool) -> Self {
        self.renal_replacement = enable;
        self
    }

    #[must_use]
    pub fn with_infection_site(mut self, site: impl Into<String>) -> Self {
        self.infection_site = Some(site.into());
        self
    }

    /// Clearance usable for threshold rules. Non-finite values count as absent.
    pub fn usable_clearance(&self) -> Option<f64> {
        self.clearance.filter(|value| value.is_finite())
    }

    /// Trimmed, lowercased infection site; `None` when unset or blank.
    pub fn normalized_site(&self) -> Option<String> {
        self.infection_site
            .as_deref()
            .map(|site| site.trim().to_lowercase())
            .filter(|site| !site.is_empty())
    }
}
