//! The in-progress "new product" form.
//!
//! A [`Draft`] is never edited in place: every change goes through
//! [`Draft::apply`], which consumes the old value and returns the new one.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{domain::Price, error::DraftError, protocol::NewProduct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    Price,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [DraftField::Title, DraftField::Description, DraftField::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Price => "price",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(DraftField::Title),
            "description" => Ok(DraftField::Description),
            "price" => Ok(DraftField::Price),
            other => Err(format!("unknown draft field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    Set { field: DraftField, value: String },
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    title: String,
    description: String,
    price: String,
}

impl Draft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn is_empty(&self) -> bool {
        self == &Draft::default()
    }

    #[must_use]
    pub fn apply(self, action: DraftAction) -> Draft {
        match action {
            DraftAction::Reset => Draft::default(),
            DraftAction::Set { field, value } => match field {
                DraftField::Title => Draft { title: value, ..self },
                DraftField::Description => Draft {
                    description: value,
                    ..self
                },
                DraftField::Price => Draft { price: value, ..self },
            },
        }
    }

    /// Validates the text fields and converts the price into its canonical form.
    pub fn to_new_product(&self) -> Result<NewProduct, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::EmptyDescription);
        }
        let price = Price::parse(&self.price)?;
        Ok(NewProduct {
            title: title.to_string(),
            description: description.to_string(),
            price,
        })
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
