//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    database_id::TransactionId, dates::iso_date, transaction_type::TransactionType,
    validation::deserialize_some,
};

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The name of the category the transaction belongs to.
    ///
    /// This is matched against category names, it is not a foreign key.
    pub category: String,
    /// Free text notes about the transaction.
    pub notes: Option<String>,
    /// When the transaction was first saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A validated transaction that has not been saved yet.
///
/// Use [crate::validation::validate_new_transaction] to create one from
/// client input, or [NewTransaction::new] in trusted code.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub date: Date,
    pub category: String,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Create a transaction without notes.
    ///
    /// The caller should ensure that `amount` is greater than zero.
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        date: Date,
        category: &str,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            date,
            category: category.to_owned(),
            notes: None,
        }
    }

    /// Set the notes for the transaction.
    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_owned());
        self
    }
}

/// The changes to make to a saved transaction. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub date: Option<Date>,
    pub category: Option<String>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl TransactionUpdate {
    /// Whether this update would leave every field unchanged.
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.notes.is_none()
    }

    /// Merge the supplied fields onto `transaction`.
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(category) = self.category {
            transaction.category = category;
        }
        if let Some(notes) = self.notes {
            transaction.notes = notes;
        }
    }
}

/// The JSON body for creating or updating a transaction.
///
/// Every field is optional here so that missing fields can be reported as a
/// validation error rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    /// `Some(None)` is an explicit `null`, which is never a valid amount.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Option<f64>>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::{OffsetDateTime, macros::date};

    use crate::TransactionType;

    use super::{Transaction, TransactionInput, TransactionUpdate};

    fn transaction() -> Transaction {
        Transaction {
            id: 1,
            transaction_type: TransactionType::Expense,
            amount: 40.0,
            date: date!(2024 - 01 - 20),
            category: "Food and Dining".to_owned(),
            notes: Some("lunch".to_owned()),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_update_leaves_transaction_unchanged() {
        let mut got = transaction();

        TransactionUpdate::default().apply(&mut got);

        assert_eq!(got, transaction());
    }

    #[test]
    fn update_only_changes_supplied_fields() {
        let mut got = transaction();

        TransactionUpdate {
            amount: Some(55.5),
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut got);

        assert_eq!(got.amount, 55.5);
        assert_eq!(got.notes, None);
        assert_eq!(got.category, "Food and Dining");
        assert_eq!(got.date, date!(2024 - 01 - 20));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let got = serde_json::to_value(transaction()).unwrap();

        assert_eq!(got["type"], "expense");
        assert_eq!(got["date"], "2024-01-20");
        assert_eq!(got["createdAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn input_distinguishes_null_from_absent_notes() {
        let absent: TransactionInput = serde_json::from_value(json!({})).unwrap();
        let null: TransactionInput = serde_json::from_value(json!({ "notes": null })).unwrap();

        assert_eq!(absent.notes, None);
        assert_eq!(null.notes, Some(None));
    }
}
