use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editable attributes of an in-app product row.
///
/// Wire names match the JSON keys used by the backend, including the keys
/// of field-level validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Guid,
    Name,
    PriceId,
    Locale,
    Active,
    LogoUrl,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Guid,
        ProductField::Name,
        ProductField::PriceId,
        ProductField::Locale,
        ProductField::Active,
        ProductField::LogoUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Guid => "guid",
            ProductField::Name => "name",
            ProductField::PriceId => "price_id",
            ProductField::Locale => "locale",
            ProductField::Active => "active",
            ProductField::LogoUrl => "logo_url",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown product field: {}", s))
    }
}
