use pk_cli::severity::{Severity, alert_severity, renal_severity, site_severity};

#[test]
fn renal_text_mentioning_adjustment_is_a_warning() {
    assert_eq!(
        renal_severity("Renally eliminated; adjust dose and interval to ClCr."),
        Severity::Warning
    );
    assert_eq!(
        renal_severity("Base. ClCr = 30.0 mL/min (< 50): dose reduction."),
        Severity::Warning
    );
    assert_eq!(renal_severity("Hepatic elimination."), Severity::Info);
}

#[test]
fn low_or_missing_site_data_is_a_warning() {
    assert_eq!(site_severity("Bhe: Low."), Severity::Warning);
    assert_eq!(
        site_severity("No specific data for site 'osso'."),
        Severity::Warning
    );
    assert_eq!(site_severity("Pulmao: Good."), Severity::Info);
}

#[test]
fn toxicity_alerts_escalate_to_error() {
    assert_eq!(
        alert_severity("Nephrotoxicity and ototoxicity; monitor levels."),
        Severity::Error
    );
    assert_eq!(
        alert_severity("Lowers valproate levels; SEIZURE risk at high exposure."),
        Severity::Error
    );
    assert_eq!(
        alert_severity("QT prolongation; many CYP interactions."),
        Severity::Warning
    );
}
