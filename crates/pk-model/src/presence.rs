//! Field-presence rules shared by every optional record field.
//!
//! Missing, `null`, and blank strings all collapse to `None`. Numbers may be
//! written as JSON numbers or as numeric text; anything else is rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let value = trimmed
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("expected a number, found {raw:?}")))?;
            if value.is_finite() {
                Ok(Some(value))
            } else {
                Err(D::Error::custom(format!("expected a finite number, found {raw:?}")))
            }
        }
    }
}

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
