use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DraftError;

/// Server-assigned product identifier. Backends hand these out either as
/// strings (document ids) or integers, so both are accepted and held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawProductId", into = "String")]
pub struct ProductId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Integer(i64),
}

impl From<RawProductId> for ProductId {
    fn from(value: RawProductId) -> Self {
        match value {
            RawProductId::Text(text) => Self(text),
            RawProductId::Integer(number) => Self(number.to_string()),
        }
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product price. Kept as a decimal so that the scale the user typed is
/// preserved for display; goes over the wire as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub Decimal);

impl Price {
    pub fn parse(raw: &str) -> Result<Self, DraftError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DraftError::EmptyPrice);
        }
        let invalid = || DraftError::InvalidPrice {
            value: raw.to_string(),
        };
        // Digit separators are not something a numeric input produces.
        if trimmed.contains('_') {
            return Err(invalid());
        }
        let value = Decimal::from_str(trimmed).map_err(|_| invalid())?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DraftError::NegativePrice {
                value: raw.to_string(),
            });
        }
        Ok(Self(value))
    }
}

impl FromStr for Price {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero() {
            if let Some(whole) = self.0.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
