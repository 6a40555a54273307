use serde::{Deserialize, Serialize};

use crate::collation;

/// Country record as returned by the REST Countries API.
///
/// Only the fields the cards display are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: CountryName,
    pub cca2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    pub region: String,
    pub population: u64,
}

/// Name block of a country record
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CountryName {
    pub common: String,
}

impl Country {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// ISO 3166-1 alpha-2 code, used as list key and flag lookup key.
    pub fn country_code(&self) -> &str {
        &self.cca2
    }

    /// First listed capital, if the record has one.
    ///
    /// An empty string counts as missing.
    pub fn first_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|capitals| capitals.first())
            .map(String::as_str)
            .filter(|capital| !capital.is_empty())
    }
}

/// Sort countries ascending by common name using locale-aware comparison.
///
/// The sort is stable, so records sharing a name keep their API order.
pub fn sort_countries(mut countries: Vec<Country>) -> Vec<Country> {
    countries.sort_by(|a, b| collation::compare(a.common_name(), b.common_name()));
    countries
}

/// Parse the raw API body into country records.
pub fn parse_countries(body: &str) -> Result<Vec<Country>, serde_json::Error> {
    serde_json::from_str(body)
}
