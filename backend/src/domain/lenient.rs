//! Forgiving field decoders for record bodies.
//!
//! The registry stores whatever the client submits, so a well-formed JSON
//! object never fails to decode because of a field's type. Scalars are
//! coerced to the field's type; `null` means "no value".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Render any JSON value as stored text.
///
/// Strings are kept verbatim, other scalars use their JSON spelling and
/// arrays or objects keep their compact JSON text.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Interpret any JSON value as a checkbox state.
fn flag_of(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => Some(number.as_f64().is_some_and(|n| n.abs() > 0.0)),
        Value::String(text) => Some(matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        )),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(entries) => Some(!entries.is_empty()),
    }
}

/// Text field; `null` decodes as the empty string.
pub mod text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

/// Patch text field; `null` leaves the stored value alone.
pub mod optional_text {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text_of(Value::deserialize(deserializer)?))
    }
}

/// Checkbox field; `null` decodes as `false`.
pub mod flag {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(flag_of(&Value::deserialize(deserializer)?).unwrap_or_default())
    }
}

/// Patch checkbox field; `null` leaves the stored value alone.
pub mod optional_flag {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(flag_of(&Value::deserialize(deserializer)?))
    }
}

/// Agreement type; `null` and blank strings decode as absent.
pub mod agreement {
    use super::*;
    use crate::domain::AgreementType;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<AgreementType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text_of(Value::deserialize(deserializer)?)
            .filter(|raw| !raw.trim().is_empty())
            .map(AgreementType::from))
    }
}
