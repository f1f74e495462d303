//! Dose decision engine.
//!
//! Resolves one drug record by exact key and evaluates the renal, obesity,
//! hepatic, site, and clinical-flag blocks independently. Every missing
//! record field has a fixed fallback, so the only failure is an unknown key.

use pk_model::{
    DecisionVerdict, DrugSource, PatientContext, Pharmacokinetics, PkError, TissueSite,
    normalize_key,
};
use tracing::{debug, debug_span};

use crate::narrative::{
    HEPATIC_FALLBACK, NO_HEPATIC_IMPAIRMENT, NOT_OBESE, OBESE_FALLBACK,
    RENAL_REPLACEMENT_ADVISORY, SEPSIS_ADVISORY, SITE_NOT_PROVIDED, VENTILATION_ADVISORY,
    site_level, site_without_data,
};
use crate::renal::RenalRuleTable;

/// Stateless decision engine over an injected store snapshot.
#[derive(Debug, Clone)]
pub struct DoseEngine<S> {
    store: S,
    renal_rules: RenalRuleTable,
}

impl<S: DrugSource> DoseEngine<S> {
    /// Create an engine with the built-in renal rules.
    pub fn new(store: S) -> Self {
        Self::with_renal_rules(store, RenalRuleTable::defaults())
    }

    pub fn with_renal_rules(store: S, renal_rules: RenalRuleTable) -> Self {
        Self { store, renal_rules }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renal_rules(&self) -> &RenalRuleTable {
        &self.renal_rules
    }

    /// Build the verdict for `drug_key` under `context`.
    ///
    /// The key is normalized but never fuzzy-matched; callers resolve
    /// free-text names first. [`PkError::NotFound`] carries `drug_key` as
    /// given.
    pub fn decide(
        &self,
        drug_key: &str,
        context: &PatientContext,
    ) -> Result<DecisionVerdict, PkError> {
        let key = normalize_key(drug_key);
        let span = debug_span!("decide", drug = %key);
        let _guard = span.enter();

        let record = self
            .store
            .get(&key)
            .ok_or_else(|| PkError::NotFound {
                key: drug_key.to_string(),
            })?;
        let pk = &record.pharmacokinetics;

        let renal = self.renal_rules.summary(
            &key,
            context.usable_clearance(),
            pk.renal_adjustment.as_deref(),
        );
        let clinical_notes = clinical_notes(pk, context);
        debug!(notes = clinical_notes.len(), "verdict assembled");

        Ok(DecisionVerdict {
            drug: record.name.clone(),
            class: record.class.clone(),
            renal,
            obesity: obesity_summary(pk, context),
            hepatic: hepatic_summary(pk, context),
            site: site_summary(pk, context),
            clinical_notes: (!clinical_notes.is_empty()).then_some(clinical_notes),
            alerts: pk.alerts.clone(),
        })
    }
}

fn obesity_summary(pk: &Pharmacokinetics, context: &PatientContext) -> String {
    if context.obese {
        pk.obesity_adjustment
            .clone()
            .unwrap_or_else(|| OBESE_FALLBACK.to_string())
    } else {
        NOT_OBESE.to_string()
    }
}

fn hepatic_summary(pk: &Pharmacokinetics, context: &PatientContext) -> String {
    if context.hepatic_impairment {
        pk.hepatic_adjustment
            .clone()
            .unwrap_or_else(|| HEPATIC_FALLBACK.to_string())
    } else {
        NO_HEPATIC_IMPAIRMENT.to_string()
    }
}

fn site_summary(pk: &Pharmacokinetics, context: &PatientContext) -> String {
    let Some(site) = context.normalized_site() else {
        return SITE_NOT_PROVIDED.to_string();
    };
    let level = TissueSite::from_key(&site).and_then(|s| pk.tissue_penetration.get(s));
    match level {
        Some(level) => site_level(&site, level),
        None => site_without_data(&site),
    }
}

/// Record notes first, then flag advisories in fixed order.
fn clinical_notes(pk: &Pharmacokinetics, context: &PatientContext) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(text) = &pk.clinical_notes {
        notes.push(text.clone());
    }
    let advisories = [
        (context.sepsis_or_shock, SEPSIS_ADVISORY),
        (context.mechanical_ventilation, VENTILATION_ADVISORY),
        (context.renal_replacement, RENAL_REPLACEMENT_ADVISORY),
    ];
    notes.extend(
        advisories
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, text)| text.to_string()),
    );
    notes
}

#[cfg(test)]
mod tests {
    use pk_model::TissuePenetration;

    use super::*;

    #[test]
    fn site_summary_variants() {
        let pk = Pharmacokinetics {
            tissue_penetration: TissuePenetration {
                pulmao: Some("Good".to_string()),
                ..TissuePenetration::default()
            },
            ..Pharmacokinetics::default()
        };
        let ctx = PatientContext::new();
        assert_eq!(site_summary(&pk, &ctx), SITE_NOT_PROVIDED);
        let ctx = PatientContext::new().with_infection_site(" Pulmao ");
        assert_eq!(site_summary(&pk, &ctx), "Pulmao: Good.");
        let ctx = PatientContext::new().with_infection_site("osso");
        assert_eq!(site_summary(&pk, &ctx), "No specific data for site 'osso'.");
        let ctx = PatientContext::new().with_infection_site("Liver");
        assert_eq!(site_summary(&pk, &ctx), "No specific data for site 'liver'.");
    }

    #[test]
    fn flags_without_record_data_use_fallbacks() {
        let pk = Pharmacokinetics::default();
        let ctx = PatientContext::new()
            .with_obese(true)
            .with_hepatic_impairment(true);
        assert_eq!(obesity_summary(&pk, &ctx), OBESE_FALLBACK);
        assert_eq!(hepatic_summary(&pk, &ctx), HEPATIC_FALLBACK);
        assert!(clinical_notes(&pk, &ctx).is_empty());
    }
}
