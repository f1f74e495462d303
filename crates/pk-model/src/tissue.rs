use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::presence;

/// Anatomical compartments with a tissue-penetration rating.
///
/// The keys are the ones used by the drug database file and by callers
/// passing an infection site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TissueSite {
    #[serde(rename = "pulmao")]
    Lung,
    #[serde(rename = "osso")]
    Bone,
    #[serde(rename = "bhe")]
    BloodBrainBarrier,
    #[serde(rename = "peritoneal")]
    Peritoneal,
    #[serde(rename = "pleural")]
    Pleural,
    #[serde(rename = "ocular")]
    Ocular,
    #[serde(rename = "bile")]
    Biliary,
}

impl TissueSite {
    pub const ALL: [TissueSite; 7] = [
        TissueSite::Lung,
        TissueSite::Bone,
        TissueSite::BloodBrainBarrier,
        TissueSite::Peritoneal,
        TissueSite::Pleural,
        TissueSite::Ocular,
        TissueSite::Biliary,
    ];

    /// Database key for this site.
    pub fn key(self) -> &'static str {
        match self {
            TissueSite::Lung => "pulmao",
            TissueSite::Bone => "osso",
            TissueSite::BloodBrainBarrier => "bhe",
            TissueSite::Peritoneal => "peritoneal",
            TissueSite::Pleural => "pleural",
            TissueSite::Ocular => "ocular",
            TissueSite::Biliary => "bile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TissueSite::Lung => "Lung",
            TissueSite::Bone => "Bone",
            TissueSite::BloodBrainBarrier => "Blood-brain barrier",
            TissueSite::Peritoneal => "Peritoneal",
            TissueSite::Pleural => "Pleural",
            TissueSite::Ocular => "Ocular",
            TissueSite::Biliary => "Biliary",
        }
    }

    /// Case- and whitespace-insensitive lookup by database key.
    pub fn from_key(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|site| site.key() == key)
    }
}

impl fmt::Display for TissueSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TissueSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            let known = Self::ALL.map(TissueSite::key).join(", ");
            format!("unknown tissue site {s:?} (expected one of: {known})")
        })
    }
}

/// Qualitative penetration level per site, e.g. `"Good"` or `"Low"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TissuePenetration {
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub pulmao: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub osso: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub bhe: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub peritoneal: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub pleural: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub ocular: Option<String>,
    #[serde(default, deserialize_with = "presence::text", skip_serializing_if = "Option::is_none")]
    pub bile: Option<String>,
}

impl TissuePenetration {
    pub fn get(&self, site: TissueSite) -> Option<&str> {
        let level = match site {
            TissueSite::Lung => &self.pulmao,
            TissueSite::Bone => &self.osso,
            TissueSite::BloodBrainBarrier => &self.bhe,
            TissueSite::Peritoneal => &self.peritoneal,
            TissueSite::Pleural => &self.pleural,
            TissueSite::Ocular => &self.ocular,
            TissueSite::Biliary => &self.bile,
        };
        level.as_deref()
    }

    /// Every site in fixed order, with its level when recorded.
    pub fn entries(&self) -> impl Iterator<Item = (TissueSite, Option<&str>)> + '_ {
        TissueSite::ALL.into_iter().map(|site| (site, self.get(site)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().all(|(_, level)| level.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_lookup_ignores_case_and_padding() {
        assert_eq!(TissueSite::from_key(" Pulmao "), Some(TissueSite::Lung));
        assert_eq!(TissueSite::from_key("BHE"), Some(TissueSite::BloodBrainBarrier));
        assert_eq!(TissueSite::from_key("liver"), None);
    }

    #[test]
    fn parse_error_lists_known_sites() {
        let err = "liver".parse::<TissueSite>().unwrap_err();
        assert!(err.contains("pulmao"));
        assert!(err.contains("bile"));
    }

    #[test]
    fn penetration_get_matches_field() {
        let tp = TissuePenetration {
            osso: Some("Moderate".to_string()),
            ..TissuePenetration::default()
        };
        assert_eq!(tp.get(TissueSite::Bone), Some("Moderate"));
        assert_eq!(tp.get(TissueSite::Lung), None);
        assert!(!tp.is_empty());
        assert!(TissuePenetration::default().is_empty());
    }
}
