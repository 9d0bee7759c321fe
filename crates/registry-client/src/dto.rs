//! Wire shapes exchanged with the registry API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Consent flow chosen for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementType {
    License,
    Mutual,
}

impl AgreementType {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Mutual => "mutual",
        }
    }
}

impl fmt::Display for AgreementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgreementType {
    type Err = UnknownAgreementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "license" => Ok(Self::License),
            "mutual" => Ok(Self::Mutual),
            other => Err(UnknownAgreementType(other.to_owned())),
        }
    }
}

/// Raised when an agreement type is neither `license` nor `mutual`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown agreement type {0:?}")]
pub struct UnknownAgreementType(String);

/// Agreement types the form does not offer decode as absent.
fn offered_agreement<'de, D>(deserializer: D) -> Result<Option<AgreementType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|raw| raw.parse().ok()))
}

/// Record as returned by the server.
///
/// Dates stay as `YYYY-MM-DD` strings; the list view compares them
/// lexicographically. The server stores agreement types verbatim, so an
/// unrecognised one reads as `None` and the edit form asks for a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "offered_agreement")]
    pub agreement_type: Option<AgreementType>,
    #[serde(default)]
    pub accept_license: bool,
    #[serde(default)]
    pub send_news_email: bool,
    pub created_date: String,
    pub updated_date: String,
}

/// Body sent on create and update.
///
/// `country` and `state` carry display names once the form has resolved them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
    pub state: String,
    pub agreement_type: AgreementType,
    pub accept_license: bool,
    pub send_news_email: bool,
}
