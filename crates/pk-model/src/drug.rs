use serde::{Deserialize, Serialize};

use crate::presence;
use crate::tissue::TissuePenetration;

/// One drug's pharmacokinetic reference record.
///
/// Every field except `name` is optional; an absent field is rendered as
/// "no data" by consumers and never causes a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrugRecord {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Pharmacologic class (e.g., "Carbapenem").
    #[serde(
        rename = "classe",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
    #[serde(
        rename = "farmacocinetica",
        default,
        deserialize_with = "presence::or_default"
    )]
    pub pharmacokinetics: Pharmacokinetics,
    /// Citations backing each PK field.
    #[serde(
        rename = "referencias",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub references: Option<References>,
}

impl DrugRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: None,
            pharmacokinetics: Pharmacokinetics::default(),
            references: None,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_pharmacokinetics(mut self, pk: Pharmacokinetics) -> Self {
        self.pharmacokinetics = pk;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pharmacokinetics {
    /// Volume of distribution (L/kg).
    #[serde(
        rename = "vd_L_kg",
        default,
        deserialize_with = "presence::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_of_distribution: Option<f64>,
    /// Plasma protein binding (%).
    #[serde(
        rename = "protein_binding_percent",
        default,
        deserialize_with = "presence::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub protein_binding_percent: Option<f64>,
    #[serde(
        rename = "acido_ou_base",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub acid_base: Option<String>,
    #[serde(
        rename = "pKa",
        default,
        deserialize_with = "presence::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub pka: Option<f64>,
    #[serde(
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub renal_adjustment: Option<String>,
    #[serde(
        rename = "obesos_pk",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub obesity_adjustment: Option<String>,
    #[serde(
        rename = "hepatopatas_pk",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hepatic_adjustment: Option<String>,
    #[serde(
        default,
        deserialize_with = "presence::or_default",
        skip_serializing_if = "TissuePenetration::is_empty"
    )]
    pub tissue_penetration: TissuePenetration,
    #[serde(
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub clinical_notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub alerts: Option<String>,
}

/// Citation strings, one per PK field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct References {
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub vd: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub protein_binding: Option<String>,
    #[serde(
        rename = "pKa",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pka: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub renal_adjustment: Option<String>,
    #[serde(
        rename = "obesos_pk",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub obesity_adjustment: Option<String>,
    #[serde(
        rename = "hepatopatas_pk",
        default,
        deserialize_with = "presence::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hepatic_adjustment: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub tissue_penetration: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub clinical_notes: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub alerts: Option<String>,
}

impl References {
    /// Labelled citations that are present, in field order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Volume of distribution", &self.vd),
            ("Protein binding", &self.protein_binding),
            ("pKa", &self.pka),
            ("Renal adjustment", &self.renal_adjustment),
            ("Obesity", &self.obesity_adjustment),
            ("Hepatic impairment", &self.hepatic_adjustment),
            ("Tissue penetration", &self.tissue_penetration),
            ("Clinical notes", &self.clinical_notes),
            ("Alerts", &self.alerts),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|text| (label, text)))
        .collect()
    }
}
