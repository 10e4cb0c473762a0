use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys::AddressKey;

/// Placeholder stored in every address field that has no physical meaning,
/// e.g. the street of an online store.
pub const NOT_APPLICABLE: &str = "N/A";

/// Where a transaction took place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    city: String,
    country: String,
    name: String,
    #[serde(rename = "postal code")]
    postal_code: String,
    province: String,
    street: String,
}

impl Address {
    /// Arguments follow the order in which the wizard asks for them.
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            name: name.into(),
            postal_code: postal_code.into(),
            province: province.into(),
            street: street.into(),
        }
    }

    /// Address of a purchase made online: only the name carries information.
    pub fn online(name: impl Into<String>) -> Self {
        Self::new(
            name,
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            NOT_APPLICABLE,
            NOT_APPLICABLE,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn get(&self, key: AddressKey) -> &str {
        match key {
            AddressKey::Name => self.name(),
            AddressKey::Street => self.street(),
            AddressKey::City => self.city(),
            AddressKey::Province => self.province(),
            AddressKey::PostalCode => self.postal_code(),
            AddressKey::Country => self.country(),
        }
    }

    pub fn formatted(&self) -> String {
        AddressKey::STEPS
            .iter()
            .map(|key| self.get(*key))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
