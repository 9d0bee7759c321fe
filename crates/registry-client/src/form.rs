//! Create/edit form model with client-side validation.
//!
//! The server stores whatever it receives, so every format rule lives here
//! and runs before a submission is allowed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::dto::{AgreementType, Record, RecordPayload};
use crate::geo::{GeoCatalogue, Subdivision};

/// Maximum number of characters in a name.
pub const NAME_MAX: usize = 50;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Length is enforced separately.
        Regex::new("^[A-Za-z ]*$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+[0-9]+$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Domain labels are non-empty and there are at least two of them.
        Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether the form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit { id: u64 },
}

impl FormMode {
    /// Heading shown above the form.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Create New Record",
            Self::Edit { .. } => "Edit Record",
        }
    }
}

/// Input fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Phone,
    Email,
    EmailConfirm,
    Country,
    State,
    AgreementType,
    AcceptLicense,
}

impl FormField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::EmailConfirm => "emailConfirm",
            Self::Country => "country",
            Self::State => "state",
            Self::AgreementType => "agreementType",
            Self::AcceptLicense => "acceptLicense",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failing rule per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, &'static str>);

impl FormErrors {
    /// Message for `field`, if it failed validation.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn check(&mut self, field: FormField, rules: &[(bool, &'static str)]) {
        if let Some((_, message)) = rules.iter().find(|(failed, _)| *failed) {
            self.0.insert(field, *message);
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Current values of the record form.
///
/// `country` holds a country code. `state` holds a subdivision code, or a
/// display name when the stored value has no code in the catalogue. Use
/// [`RecordForm::select_country`] to change the country so the dependent
/// state is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub mode: FormMode,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub email_confirm: String,
    pub country: String,
    pub state: String,
    /// Raw selection; only `license` and `mutual` validate.
    pub agreement_type: String,
    pub accept_license: bool,
    pub send_news_email: bool,
}

impl RecordForm {
    /// Empty form for a new record.
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Form pre-populated from a fetched record.
    ///
    /// The confirmation email starts equal to the email, and stored display
    /// names are mapped back to codes where the catalogue knows them.
    #[must_use]
    pub fn from_record(record: &Record, geo: &GeoCatalogue) -> Self {
        let country = geo
            .country_by_name(&record.country)
            .or_else(|| geo.country(&record.country));
        let country_code = country.map_or_else(|| record.country.clone(), |c| c.code.clone());
        let state = country
            .and_then(|c| {
                c.subdivision_by_name(&record.state)
                    .or_else(|| c.subdivision(&record.state))
            })
            .map_or_else(|| record.state.clone(), |s| s.code.clone());

        Self {
            mode: FormMode::Edit { id: record.id },
            name: record.name.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            email_confirm: record.email.clone(),
            country: country_code,
            state,
            agreement_type: record
                .agreement_type
                .map(|kind| kind.as_str().to_owned())
                .unwrap_or_default(),
            accept_license: record.accept_license,
            send_news_email: record.send_news_email,
        }
    }

    /// Choose a country. The selected state is always cleared; an unknown
    /// code clears the country as well.
    pub fn select_country(&mut self, code: &str, geo: &GeoCatalogue) {
        self.country = geo
            .country(code)
            .map(|country| country.code.clone())
            .unwrap_or_default();
        self.state.clear();
    }

    /// State options for the selected country.
    #[must_use]
    pub fn state_options<'geo>(&self, geo: &'geo GeoCatalogue) -> &'geo [Subdivision] {
        geo.states(&self.country)
    }

    /// Run every rule.
    ///
    /// # Errors
    ///
    /// Returns the first failing message of each invalid field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check(
            FormField::Name,
            &[
                (self.name.is_empty(), "Name is required"),
                (self.name.chars().count() > NAME_MAX, "Name is too long"),
                (!name_regex().is_match(&self.name), "Only letters are allowed"),
            ],
        );
        errors.check(
            FormField::Phone,
            &[
                (self.phone.is_empty(), "Phone number is required"),
                (
                    !phone_regex().is_match(&self.phone),
                    "Phone number must start with +",
                ),
            ],
        );
        errors.check(
            FormField::Email,
            &[
                (self.email.is_empty(), "Email is required"),
                (!email_regex().is_match(&self.email), "Invalid email"),
            ],
        );
        errors.check(
            FormField::EmailConfirm,
            &[
                (
                    self.email_confirm.is_empty(),
                    "Email confirmation is required",
                ),
                (self.email_confirm != self.email, "Emails must match"),
            ],
        );
        errors.check(
            FormField::Country,
            &[(self.country.is_empty(), "Country is required")],
        );
        errors.check(
            FormField::State,
            &[(self.state.is_empty(), "State is required")],
        );
        let agreement = self.agreement();
        errors.check(
            FormField::AgreementType,
            &[(agreement.is_none(), "Agreement type is required")],
        );
        errors.check(
            FormField::AcceptLicense,
            &[(
                agreement == Some(AgreementType::License) && !self.accept_license,
                "You must accept the license agreement",
            )],
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Whether the submit action is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate and build the request body, resolving codes to display names.
    ///
    /// Codes the catalogue does not know are sent unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] when validation fails.
    pub fn to_payload(&self, geo: &GeoCatalogue) -> Result<RecordPayload, FormErrors> {
        self.validate()?;
        let agreement_type = self.agreement().ok_or_else(|| {
            let mut errors = FormErrors::default();
            errors.check(
                FormField::AgreementType,
                &[(true, "Agreement type is required")],
            );
            errors
        })?;
        let country = geo
            .country(&self.country)
            .map_or_else(|| self.country.clone(), |c| c.name.clone());
        let state = geo
            .state(&self.country, &self.state)
            .map_or_else(|| self.state.clone(), |s| s.name.clone());

        Ok(RecordPayload {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            country,
            state,
            agreement_type,
            accept_license: self.accept_license,
            send_news_email: self.send_news_email,
        })
    }

    fn agreement(&self) -> Option<AgreementType> {
        self.agreement_type.parse().ok()
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
