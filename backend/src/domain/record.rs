//! Record data model.
//!
//! A record is the only entity the registry stores: a contact-like profile
//! with geographic fields and agreement metadata. The store accepts field
//! values as submitted; format validation happens in the client.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;

/// Store-assigned record identifier.
///
/// Serialised as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Identifier following this one, or `None` once ids run out.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Consent flow chosen for a record.
///
/// Values other than `license` and `mutual` are kept verbatim so the store
/// can echo whatever the client submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgreementType {
    /// License acceptance; the form requires `acceptLicense`.
    License,
    /// Mutual agreement with an optional newsletter opt-in.
    Mutual,
    /// Any other submitted value.
    Other(String),
}

impl AgreementType {
    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::License => "license",
            Self::Mutual => "mutual",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for AgreementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AgreementType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "license" => Self::License,
            "mutual" => Self::Mutual,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for AgreementType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl Serialize for AgreementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgreementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Client-supplied record fields.
///
/// Missing or `null` values fall back to empty strings and `false`; unknown
/// keys such as `emailConfirm` are ignored. Scalars of the wrong type are
/// coerced rather than rejected, and a blank agreement type is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFields {
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub country: String,
    #[serde(deserialize_with = "lenient::text::deserialize")]
    pub state: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::agreement::deserialize"
    )]
    pub agreement_type: Option<AgreementType>,
    #[serde(deserialize_with = "lenient::flag::deserialize")]
    pub accept_license: bool,
    #[serde(deserialize_with = "lenient::flag::deserialize")]
    pub send_news_email: bool,
}

/// Partial update applied over an existing record.
///
/// `None` (or JSON `null`) leaves the stored value untouched, as does a
/// blank agreement type. Values are coerced like [`RecordFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text::deserialize")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::agreement::deserialize")]
    pub agreement_type: Option<AgreementType>,
    #[serde(deserialize_with = "lenient::optional_flag::deserialize")]
    pub accept_license: Option<bool>,
    #[serde(deserialize_with = "lenient::optional_flag::deserialize")]
    pub send_news_email: Option<bool>,
}

impl RecordPatch {
    /// Merge the supplied values into `fields`.
    pub fn apply_to(self, fields: &mut RecordFields) {
        let Self {
            name,
            phone,
            email,
            country,
            state,
            agreement_type,
            accept_license,
            send_news_email,
        } = self;

        if let Some(value) = name {
            fields.name = value;
        }
        if let Some(value) = phone {
            fields.phone = value;
        }
        if let Some(value) = email {
            fields.email = value;
        }
        if let Some(value) = country {
            fields.country = value;
        }
        if let Some(value) = state {
            fields.state = value;
        }
        if agreement_type.is_some() {
            fields.agreement_type = agreement_type;
        }
        if let Some(value) = accept_license {
            fields.accept_license = value;
        }
        if let Some(value) = send_news_email {
            fields.send_news_email = value;
        }
    }
}

impl From<RecordFields> for RecordPatch {
    fn from(value: RecordFields) -> Self {
        Self {
            name: Some(value.name),
            phone: Some(value.phone),
            email: Some(value.email),
            country: Some(value.country),
            state: Some(value.state),
            agreement_type: value.agreement_type,
            accept_license: Some(value.accept_license),
            send_news_email: Some(value.send_news_email),
        }
    }
}

/// Fields awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub fields: RecordFields,
    pub created_date: NaiveDate,
}

impl RecordDraft {
    /// Finish the record once the store has allocated `id`.
    #[must_use]
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            fields: self.fields,
            created_date: self.created_date,
            updated_date: self.created_date,
        }
    }
}

/// Stored record.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `created_date` never changes after creation.
/// - `updated_date >= created_date`.
///
/// Dates serialise as `YYYY-MM-DD` so plain string ordering matches
/// calendar ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: RecordFields,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
}

impl Record {
    /// Merge `patch` into the record and stamp the update date.
    ///
    /// The stamp never falls behind `created_date`, even if the clock does.
    pub fn apply(&mut self, patch: RecordPatch, today: NaiveDate) {
        patch.apply_to(&mut self.fields);
        self.updated_date = today.max(self.created_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn stored() -> Record {
        RecordDraft {
            fields: RecordFields {
                name: "Jo Lee".to_owned(),
                phone: "+15551234567".to_owned(),
                email: "jo@example.com".to_owned(),
                country: "United States".to_owned(),
                state: "California".to_owned(),
                agreement_type: Some(AgreementType::License),
                accept_license: true,
                send_news_email: false,
            },
            created_date: date(2026, 3, 1),
        }
        .into_record(RecordId::new(1))
    }

    #[rstest]
    fn record_serialises_flat_camel_case(stored: Record) {
        let value = serde_json::to_value(&stored).expect("record serialises");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Jo Lee",
                "phone": "+15551234567",
                "email": "jo@example.com",
                "country": "United States",
                "state": "California",
                "agreementType": "license",
                "acceptLicense": true,
                "sendNewsEmail": false,
                "createdDate": "2026-03-01",
                "updatedDate": "2026-03-01",
            })
        );
    }

    #[rstest]
    fn fields_ignore_unknown_keys_and_default_missing_ones() {
        let fields: RecordFields = serde_json::from_value(json!({
            "name": "Jo Lee",
            "emailConfirm": "jo@example.com",
        }))
        .expect("lenient payload");

        assert_eq!(fields.name, "Jo Lee");
        assert!(fields.email.is_empty());
        assert!(fields.agreement_type.is_none());
        assert!(!fields.accept_license);
    }

    #[rstest]
    #[case(json!("verbal"), Some(AgreementType::Other("verbal".to_owned())))]
    #[case(json!("mutual"), Some(AgreementType::Mutual))]
    #[case(json!(""), None)]
    #[case(json!("  "), None)]
    #[case(json!(null), None)]
    #[case(json!(7), Some(AgreementType::Other("7".to_owned())))]
    fn fields_keep_any_agreement_type(
        #[case] raw: serde_json::Value,
        #[case] expected: Option<AgreementType>,
    ) {
        let fields: RecordFields =
            serde_json::from_value(json!({ "agreementType": raw })).expect("lenient payload");
        assert_eq!(fields.agreement_type, expected);
    }

    #[rstest]
    fn fields_coerce_mistyped_scalars() {
        let fields: RecordFields = serde_json::from_value(json!({
            "name": null,
            "phone": 15_551_234_567_u64,
            "country": false,
            "acceptLicense": "true",
            "sendNewsEmail": 0,
        }))
        .expect("lenient payload");

        assert!(fields.name.is_empty());
        assert_eq!(fields.phone, "15551234567");
        assert_eq!(fields.country, "false");
        assert!(fields.accept_license);
        assert!(!fields.send_news_email);
    }

    #[rstest]
    fn unknown_agreement_type_is_echoed_verbatim(mut stored: Record) {
        stored.fields.agreement_type = Some(AgreementType::from("verbal"));
        let value = serde_json::to_value(&stored).expect("record serialises");
        assert_eq!(value.get("agreementType"), Some(&json!("verbal")));
    }

    #[rstest]
    fn apply_merges_only_supplied_fields(mut stored: Record) {
        let patch = RecordPatch {
            name: Some("Jo L.".to_owned()),
            ..RecordPatch::default()
        };

        stored.apply(patch, date(2026, 3, 5));

        assert_eq!(stored.fields.name, "Jo L.");
        assert_eq!(stored.fields.email, "jo@example.com");
        assert_eq!(stored.id, RecordId::new(1));
        assert_eq!(stored.created_date, date(2026, 3, 1));
        assert_eq!(stored.updated_date, date(2026, 3, 5));
    }

    #[rstest]
    fn apply_never_stamps_before_creation(mut stored: Record) {
        stored.apply(RecordPatch::default(), date(2025, 12, 31));
        assert_eq!(stored.updated_date, stored.created_date);
    }

    #[rstest]
    fn null_patch_values_leave_fields_untouched(mut stored: Record) {
        let patch: RecordPatch =
            serde_json::from_value(json!({ "sendNewsEmail": null, "state": "Nevada" }))
                .expect("patch deserialises");

        stored.apply(patch, date(2026, 3, 2));

        assert_eq!(stored.fields.state, "Nevada");
        assert!(!stored.fields.send_news_email);
    }

    #[rstest]
    fn next_id_stops_at_the_top_of_the_range() {
        assert_eq!(RecordId::new(41).next(), Some(RecordId::new(42)));
        assert_eq!(RecordId::new(u64::MAX).next(), None);
    }

    #[rstest]
    #[case("license", AgreementType::License)]
    #[case("mutual", AgreementType::Mutual)]
    fn agreement_type_parses_wire_names(#[case] raw: &str, #[case] expected: AgreementType) {
        assert_eq!(expected.to_string(), raw);
        assert_eq!(AgreementType::from(raw), expected);
    }
}
