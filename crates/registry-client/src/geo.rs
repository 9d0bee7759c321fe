//! Bundled country and state/province reference data.
//!
//! The dataset is embedded at compile time from `data/geo.json`. It lists
//! every ISO 3166-1 country by alpha-2 code, each with its top-level
//! ISO 3166-2 subdivisions keyed by the code after the country prefix.
//! A country with no ISO subdivisions lists itself as its only entry.

use serde::Deserialize;
use thiserror::Error;

const BUNDLED_GEO_JSON: &str = include_str!("../data/geo.json");

/// Raised when geographic data cannot be decoded.
#[derive(Debug, Error)]
#[error("invalid geographic dataset: {0}")]
pub struct GeoError(#[from] serde_json::Error);

/// A state, province or similar first-level subdivision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subdivision {
    pub code: String,
    pub name: String,
}

/// A country and its subdivisions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default, rename = "states")]
    pub subdivisions: Vec<Subdivision>,
}

impl Country {
    /// Subdivision with `code` (ASCII case-insensitive).
    #[must_use]
    pub fn subdivision(&self, code: &str) -> Option<&Subdivision> {
        self.subdivisions
            .iter()
            .find(|state| state.code.eq_ignore_ascii_case(code))
    }

    /// Subdivision whose display name equals `name`.
    #[must_use]
    pub fn subdivision_by_name(&self, name: &str) -> Option<&Subdivision> {
        self.subdivisions.iter().find(|state| state.name == name)
    }
}

/// Lookup table of countries and their subdivisions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeoCatalogue {
    countries: Vec<Country>,
}

impl GeoCatalogue {
    /// Catalogue built from the dataset shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the embedded dataset is malformed.
    pub fn bundled() -> Result<Self, GeoError> {
        Self::from_json(BUNDLED_GEO_JSON)
    }

    /// Catalogue decoded from `{"countries": [{code, name, states: [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] when `raw` does not match that shape.
    pub fn from_json(raw: &str) -> Result<Self, GeoError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Country with `code` (ASCII case-insensitive).
    #[must_use]
    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    /// Country whose display name equals `name`.
    #[must_use]
    pub fn country_by_name(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.name == name)
    }

    /// Subdivisions of the country with `code`; empty when unknown.
    #[must_use]
    pub fn states(&self, country_code: &str) -> &[Subdivision] {
        self.country(country_code)
            .map(|country| country.subdivisions.as_slice())
            .unwrap_or_default()
    }

    /// Subdivision `state_code` within the country `country_code`.
    #[must_use]
    pub fn state(&self, country_code: &str, state_code: &str) -> Option<&Subdivision> {
        self.country(country_code)
            .and_then(|country| country.subdivision(state_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn geo() -> GeoCatalogue {
        GeoCatalogue::bundled().expect("bundled dataset decodes")
    }

    #[rstest]
    fn bundled_dataset_has_unique_country_codes(geo: GeoCatalogue) {
        let mut codes: Vec<_> = geo.countries().iter().map(|c| c.code.as_str()).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert!(geo.countries().iter().all(|c| !c.subdivisions.is_empty()));
    }

    #[rstest]
    fn bundled_dataset_covers_every_iso_country(geo: GeoCatalogue) {
        assert_eq!(geo.countries().len(), 249);
        for code in ["FR", "JP", "NZ", "ZA", "ES", "AQ", "VA"] {
            assert!(geo.country(code).is_some(), "missing {code}");
        }
        assert_eq!(geo.states("JP").len(), 47);
        assert_eq!(geo.states("FR").len(), 26);
        assert_eq!(geo.states("GB").len(), 4);
    }

    #[rstest]
    #[case("US", Some("United States"))]
    #[case("us", Some("United States"))]
    #[case("CA", Some("Canada"))]
    #[case("ZZ", None)]
    fn looks_up_countries_by_code(
        geo: GeoCatalogue,
        #[case] code: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(geo.country(code).map(|c| c.name.as_str()), expected);
    }

    #[rstest]
    fn looks_up_countries_by_name(geo: GeoCatalogue) {
        let country = geo.country_by_name("United Kingdom").expect("known country");
        assert_eq!(country.code, "GB");
        assert!(geo.country_by_name("Atlantis").is_none());
    }

    #[rstest]
    fn states_are_scoped_to_their_country(geo: GeoCatalogue) {
        assert_eq!(
            geo.state("US", "CA").map(|s| s.name.as_str()),
            Some("California")
        );
        assert!(geo.state("CA", "CA").is_none());
        assert!(geo.states("ZZ").is_empty());
        assert_eq!(geo.states("AU").len(), 8);
    }

    #[rstest]
    fn rejects_malformed_json() {
        assert!(GeoCatalogue::from_json("{\"countries\": 3}").is_err());
    }
}
