//! Fixed narrative wording.
//!
//! Presentation layers scan these strings for keywords ("adjust", "<",
//! "no specific data"), so wording changes must keep those substrings.

pub const RENAL_FALLBACK: &str = "No specific renal-adjustment recommendation.";

pub const OBESE_FALLBACK: &str = "No specific recommendation for obese patients.";
pub const NOT_OBESE: &str = "No specific recommendation for non-obese patients.";

pub const HEPATIC_FALLBACK: &str = "No specific guidance for patients with hepatic impairment.";
pub const NO_HEPATIC_IMPAIRMENT: &str =
    "No specific recommendation for patients without hepatic impairment.";

pub const SITE_NOT_PROVIDED: &str = "Infection site not provided.";

pub const SEPSIS_ADVISORY: &str = "Sepsis/shock: avoid initial underdosing and favor full doses, \
     especially for time-dependent antibiotics and vancomycin.";
pub const VENTILATION_ADVISORY: &str = "Mechanical ventilation: critically ill patients may have \
     altered volume of distribution and clearance; consider therapeutic drug monitoring when \
     available.";
pub const RENAL_REPLACEMENT_ADVISORY: &str =
    "Renal replacement therapy: follow the local hemodialysis/CRRT protocol for dose adjustment.";

pub(crate) fn site_level(site: &str, level: &str) -> String {
    format!("{}: {level}.", capitalize(site))
}

pub(crate) fn site_without_data(site: &str) -> String {
    format!("No specific data for site '{site}'.")
}

pub(crate) fn generic_clearance(clearance: f64) -> String {
    format!(
        "Reported ClCr = {clearance:.1} mL/min; interpret together with the adjustment \
         recommendation above."
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
