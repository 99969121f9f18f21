//! Rules that request payloads must satisfy before anything is written.
//!
//! Create payloads must supply every required field. Update payloads are
//! partial: only the fields that are present are checked, the rest are left
//! unchanged.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Deserializer};

use crate::{
    category::{CategoryInput, CategoryName, CategoryUpdate, NewCategory},
    dates::parse_date,
    transaction::{NewTransaction, TransactionInput, TransactionUpdate},
    transaction_type::TransactionType,
};

/// Why a request payload was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent, null or blank.
    #[error("Missing required fields")]
    MissingFields,

    /// A transaction `type` other than "income" or "expense".
    #[error("Invalid transaction type")]
    InvalidTransactionType,

    /// A category `type` other than "income" or "expense".
    #[error("Invalid category type")]
    InvalidCategoryType,

    /// A transaction amount that is zero, negative or not a finite number.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    /// A category name that is empty after trimming whitespace.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// A date that is neither `YYYY-MM-DD` nor an RFC 3339 date-time.
    #[error("Invalid date \"{0}\", expected a date like 2024-01-31")]
    InvalidDate(String),

    /// An amount filter that is not a number.
    #[error("Invalid amount \"{0}\"")]
    InvalidAmount(String),

    /// An analytics window that is not a whole number of at least one month.
    #[error("Invalid number of months \"{0}\", expected a whole number of at least 1")]
    InvalidMonths(String),

    /// The request body could not be read as the expected JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// Check a transaction create payload.
///
/// # Errors
/// Checks, in order: that `type`, `amount`, `date` and `category` are present,
/// that `type` is valid, that `amount` is greater than zero, and that `date` parses.
pub fn validate_new_transaction(input: TransactionInput) -> Result<NewTransaction, ValidationError> {
    let (Some(transaction_type), Some(amount), Some(date), Some(category)) = (
        non_blank(input.transaction_type),
        input.amount.flatten(),
        non_blank(input.date),
        non_blank(input.category),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    let transaction_type = parse_type(&transaction_type, ValidationError::InvalidTransactionType)?;
    let amount = check_amount(amount)?;
    let date = parse_date(&date)?;

    Ok(NewTransaction {
        transaction_type,
        amount,
        date,
        category,
        notes: input.notes.flatten(),
    })
}

/// Check a partial transaction update payload.
///
/// Blank strings for `type`, `date` and `category` count as not supplied.
/// `notes` may be set to `null` to clear it.
///
/// # Errors
/// Returns an error if a supplied `type` or `amount` is invalid, or a supplied
/// `date` does not parse.
pub fn validate_transaction_update(
    input: TransactionInput,
) -> Result<TransactionUpdate, ValidationError> {
    let transaction_type = non_blank(input.transaction_type)
        .map(|value| parse_type(&value, ValidationError::InvalidTransactionType))
        .transpose()?;
    let amount = input
        .amount
        .map(|amount| amount.ok_or(ValidationError::NonPositiveAmount).and_then(check_amount))
        .transpose()?;
    let date = non_blank(input.date)
        .map(|value| parse_date(&value))
        .transpose()?;

    Ok(TransactionUpdate {
        transaction_type,
        amount,
        date,
        category: non_blank(input.category),
        notes: input.notes,
    })
}

/// Check a category create payload.
///
/// # Errors
/// Returns an error if `name` or `type` is missing, or `type` is invalid.
pub fn validate_new_category(input: CategoryInput) -> Result<NewCategory, ValidationError> {
    let (Some(name), Some(category_type)) =
        (non_blank(input.name), non_blank(input.category_type))
    else {
        return Err(ValidationError::MissingFields);
    };

    Ok(NewCategory {
        name: CategoryName::new(&name)?,
        category_type: parse_type(&category_type, ValidationError::InvalidCategoryType)?,
        color: input.color.flatten(),
    })
}

/// Check a partial category update payload.
///
/// # Errors
/// Returns an error if a supplied `type` is invalid.
pub fn validate_category_update(input: CategoryInput) -> Result<CategoryUpdate, ValidationError> {
    let category_type = non_blank(input.category_type)
        .map(|value| parse_type(&value, ValidationError::InvalidCategoryType))
        .transpose()?;
    let name = non_blank(input.name)
        .map(|value| CategoryName::new(&value))
        .transpose()?;

    Ok(CategoryUpdate {
        name,
        category_type,
        color: input.color,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_type(value: &str, error: ValidationError) -> Result<TransactionType, ValidationError> {
    value.parse().map_err(|_| error)
}

fn check_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::NonPositiveAmount)
    }
}

/// Unwrap a JSON request body, turning a malformed body into a validation error.
pub(crate) fn read_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::InvalidBody(rejection.body_text()))
}

/// Deserialize a field that may be absent, null or set.
///
/// Use with `#[serde(default)]` so that an absent field is `None` and an
/// explicit `null` is `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}


#[cfg(test)]
mod category_validation_tests {
    use crate::{
        TransactionType,
        category::{CategoryInput, CategoryName},
        validation::{ValidationError, validate_category_update, validate_new_category},
    };

    #[test]
    fn trims_name() {
        let input = CategoryInput {
            name: Some("  Groceries ".to_owned()),
            category_type: Some("expense".to_owned()),
            color: None,
        };

        let got = validate_new_category(input).expect("input should be valid");

        assert_eq!(got.name, CategoryName::new_unchecked("Groceries"));
        assert_eq!(got.category_type, TransactionType::Expense);
    }

    #[test]
    fn requires_name_and_type() {
        let missing_name = CategoryInput {
            name: None,
            category_type: Some("income".to_owned()),
            color: None,
        };
        let missing_type = CategoryInput {
            name: Some("Gifts".to_owned()),
            category_type: None,
            color: None,
        };

        assert_eq!(
            validate_new_category(missing_name),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_new_category(missing_type),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn rejects_unknown_type() {
        let input = CategoryInput {
            name: Some("Gifts".to_owned()),
            category_type: Some("asset".to_owned()),
            color: None,
        };

        assert_eq!(
            validate_new_category(input),
            Err(ValidationError::InvalidCategoryType)
        );
    }

    #[test]
    fn update_rejects_unknown_type() {
        let input = CategoryInput {
            category_type: Some("asset".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            validate_category_update(input),
            Err(ValidationError::InvalidCategoryType)
        );
    }

    #[test]
    fn update_can_clear_color() {
        let input = CategoryInput {
            color: Some(None),
            ..Default::default()
        };

        let got = validate_category_update(input).expect("update should be valid");

        assert_eq!(got.color, Some(None));
        assert_eq!(got.name, None);
    }
}
