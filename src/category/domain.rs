//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    database_id::CategoryId, transaction_type::TransactionType, validation::ValidationError,
    validation::deserialize_some,
};

/// A validated, non-empty category name with surrounding whitespace removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with leading and trailing whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [ValidationError::EmptyCategoryName] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            Err(ValidationError::EmptyCategoryName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is trimmed and not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label for grouping transactions of one type (e.g., 'Housing', 'Salary').
///
/// The pair of `name` and `category_type` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// A display hint for charts, e.g. "#ff8800".
    pub color: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A validated category that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub category_type: TransactionType,
    pub color: Option<String>,
}

impl NewCategory {
    /// Create a category with no color.
    pub fn new(name: CategoryName, category_type: TransactionType) -> Self {
        Self {
            name,
            category_type,
            color: None,
        }
    }
}

/// The changes to make to a saved category. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<CategoryName>,
    pub category_type: Option<TransactionType>,
    /// `Some(None)` clears the color.
    pub color: Option<Option<String>>,
}

impl CategoryUpdate {
    /// Whether this update would leave every field unchanged.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_type.is_none() && self.color.is_none()
    }

    /// Merge the supplied fields onto `category`.
    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(category_type) = self.category_type {
            category.category_type = category_type;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
    }
}

/// The JSON body for creating or updating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub category_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
}
