//! Integration tests for the dose decision engine.

use pk_engine::narrative::{
    NO_HEPATIC_IMPAIRMENT, NOT_OBESE, RENAL_FALLBACK, RENAL_REPLACEMENT_ADVISORY,
    SEPSIS_ADVISORY, SITE_NOT_PROVIDED, VENTILATION_ADVISORY,
};
use pk_engine::{DoseEngine, RenalRule, RenalRuleTable};
use pk_model::{
    DrugRecord, DrugSource, PatientContext, Pharmacokinetics, PkError, TissuePenetration,
};
use pk_standards::{DrugStore, load_default_store};

fn meropenem() -> DrugRecord {
    DrugRecord::new("Meropenem")
        .with_class("Carbapenem")
        .with_pharmacokinetics(Pharmacokinetics {
            renal_adjustment: Some("Renally eliminated.".to_string()),
            obesity_adjustment: Some("Use the upper dose range.".to_string()),
            hepatic_adjustment: Some("No hepatic adjustment expected.".to_string()),
            tissue_penetration: TissuePenetration {
                pulmao: Some("Good".to_string()),
                bhe: Some("Moderate".to_string()),
                ..TissuePenetration::default()
            },
            clinical_notes: Some("Time-dependent killing.".to_string()),
            alerts: Some("Seizure risk.".to_string()),
            ..Pharmacokinetics::default()
        })
}

fn fixture_engine() -> DoseEngine<DrugStore> {
    let store = DrugStore::from_records([
        ("meropenem", meropenem()),
        ("bare", DrugRecord::new("Bare")),
        (
            "cefepima",
            DrugRecord::new("Cefepima").with_pharmacokinetics(Pharmacokinetics {
                renal_adjustment: Some("Reduce dose below 60 mL/min.".to_string()),
                ..Pharmacokinetics::default()
            }),
        ),
    ])
    .unwrap();
    DoseEngine::new(store)
}

#[test]
fn meropenem_low_clearance() {
    let engine = fixture_engine();
    let verdict = engine
        .decide("meropenem", &PatientContext::new().with_clearance(30.0))
        .unwrap();
    insta::assert_snapshot!(verdict.renal, @"Renally eliminated. ClCr = 30.0 mL/min (< 50): dose/interval adjustment very likely necessary.");
}

#[test]
fn meropenem_normal_clearance() {
    let engine = fixture_engine();
    let verdict = engine
        .decide("meropenem", &PatientContext::new().with_clearance(70.0))
        .unwrap();
    insta::assert_snapshot!(verdict.renal, @"Renally eliminated. ClCr = 70.0 mL/min (≥ 50): renal adjustment usually unnecessary in practice.");
}

#[test]
fn unknown_drug_is_not_found() {
    let engine = fixture_engine();
    let err = engine
        .decide("xyzmycin", &PatientContext::new())
        .unwrap_err();
    assert_eq!(
        err,
        PkError::NotFound {
            key: "xyzmycin".to_string()
        }
    );
}

#[test]
fn not_found_reports_the_key_as_given() {
    let engine = fixture_engine();
    let err = engine
        .decide("Xyz Mycin", &PatientContext::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "drug not found: Xyz Mycin");
}

#[test]
fn engine_does_not_fuzzy_match() {
    let engine = fixture_engine();
    assert!(engine.decide("meropenen", &PatientContext::new()).is_err());
    assert!(engine.decide("  MEROPENEM ", &PatientContext::new()).is_ok());
}

#[test]
fn empty_context_uses_fallbacks() {
    let engine = fixture_engine();
    let verdict = engine.decide("bare", &PatientContext::new()).unwrap();
    assert_eq!(verdict.drug, "Bare");
    assert_eq!(verdict.class, None);
    assert_eq!(verdict.renal, RENAL_FALLBACK);
    assert_eq!(verdict.obesity, NOT_OBESE);
    assert_eq!(verdict.hepatic, NO_HEPATIC_IMPAIRMENT);
    assert_eq!(verdict.site, SITE_NOT_PROVIDED);
    assert_eq!(verdict.clinical_notes, None);
    assert_eq!(verdict.alerts, None);
}

#[test]
fn every_bundled_drug_decides_with_empty_context() {
    let store = load_default_store().unwrap();
    let keys: Vec<String> = store.keys().map(str::to_string).collect();
    let engine = DoseEngine::new(store);
    let ctx = PatientContext::new();
    for key in keys {
        let first = engine.decide(&key, &ctx).unwrap();
        let second = engine.decide(&key, &ctx).unwrap();
        assert_eq!(first, second, "non-deterministic verdict for {key}");
        assert!(!first.renal.is_empty());
        assert_eq!(first.obesity, NOT_OBESE);
        assert_eq!(first.hepatic, NO_HEPATIC_IMPAIRMENT);
        assert_eq!(first.site, SITE_NOT_PROVIDED);
    }
}

#[test]
fn record_narratives_are_used_when_flags_set() {
    let engine = fixture_engine();
    let ctx = PatientContext::new()
        .with_obese(true)
        .with_hepatic_impairment(true)
        .with_infection_site("BHE");
    let verdict = engine.decide("meropenem", &ctx).unwrap();
    assert_eq!(verdict.drug, "Meropenem");
    assert_eq!(verdict.class.as_deref(), Some("Carbapenem"));
    assert_eq!(verdict.obesity, "Use the upper dose range.");
    assert_eq!(verdict.hepatic, "No hepatic adjustment expected.");
    assert_eq!(verdict.site, "Bhe: Moderate.");
    assert_eq!(verdict.alerts.as_deref(), Some("Seizure risk."));
}

#[test]
fn site_lookup_ignores_case_and_whitespace() {
    let engine = fixture_engine();
    let padded = engine
        .decide("meropenem", &PatientContext::new().with_infection_site(" Pulmao "))
        .unwrap();
    let plain = engine
        .decide("meropenem", &PatientContext::new().with_infection_site("pulmao"))
        .unwrap();
    assert_eq!(padded.site, plain.site);
    assert_eq!(plain.site, "Pulmao: Good.");
}

#[test]
fn flag_notes_follow_fixed_order() {
    let engine = fixture_engine();
    let ctx = PatientContext {
        renal_replacement: true,
        mechanical_ventilation: true,
        sepsis_or_shock: true,
        ..PatientContext::default()
    };

    let verdict = engine.decide("meropenem", &ctx).unwrap();
    assert_eq!(
        verdict.notes(),
        [
            "Time-dependent killing.",
            SEPSIS_ADVISORY,
            VENTILATION_ADVISORY,
            RENAL_REPLACEMENT_ADVISORY,
        ]
    );

    let verdict = engine.decide("bare", &ctx).unwrap();
    assert_eq!(
        verdict.notes(),
        [SEPSIS_ADVISORY, VENTILATION_ADVISORY, RENAL_REPLACEMENT_ADVISORY]
    );
}

#[test]
fn generic_renal_comment_for_unruled_drug() {
    let engine = fixture_engine();
    let verdict = engine
        .decide("cefepima", &PatientContext::new().with_clearance(42.0))
        .unwrap();
    insta::assert_snapshot!(verdict.renal, @"Reduce dose below 60 mL/min. Reported ClCr = 42.0 mL/min; interpret together with the adjustment recommendation above.");

    let verdict = engine
        .decide("bare", &PatientContext::new().with_clearance(42.0))
        .unwrap();
    assert_eq!(verdict.renal, RENAL_FALLBACK);
}

#[test]
fn non_finite_clearance_is_ignored() {
    let engine = fixture_engine();
    let verdict = engine
        .decide("meropenem", &PatientContext::new().with_clearance(f64::NAN))
        .unwrap();
    assert_eq!(verdict.renal, "Renally eliminated.");
}

#[test]
fn injected_rules_replace_defaults() {
    let store = DrugStore::from_records([("cefepima", DrugRecord::new("Cefepima"))]).unwrap();
    let mut rules = RenalRuleTable::empty();
    rules.insert(RenalRule::new(
        "cefepima",
        60.0,
        "reduce dose.",
        "standard dosing.",
    ));
    let engine = DoseEngine::with_renal_rules(&store, rules);
    let verdict = engine
        .decide("cefepima", &PatientContext::new().with_clearance(60.0))
        .unwrap();
    assert_eq!(
        verdict.renal,
        format!("{RENAL_FALLBACK} ClCr = 60.0 mL/min (≥ 60): standard dosing.")
    );
}

#[test]
fn verdict_json_shape() {
    let engine = fixture_engine();
    let verdict = engine
        .decide("bare", &PatientContext::new().with_sepsis_or_shock(true))
        .unwrap();
    let value = serde_json::to_value(&verdict).unwrap();
    assert_eq!(value["drug"], "Bare");
    assert!(value["class"].is_null());
    assert_eq!(value["clinical_notes"][0], SEPSIS_ADVISORY);
}
