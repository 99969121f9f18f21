//! Narrowing the transaction list by date, category, type and amount.

use rusqlite::types::Value;
use serde::Deserialize;
use time::Date;

use crate::{
    dates::{format_date, parse_date},
    transaction_type::TransactionType,
    validation::ValidationError,
};

/// The query string accepted by the transaction list and CSV export endpoints.
///
/// Empty values (e.g. `?category=`) are treated as not supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

/// Which transactions to return. Each `Some` field narrows the results,
/// bounds are inclusive and a missing bound is open-ended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl TransactionFilter {
    /// A filter that only restricts the date range.
    pub fn date_range(start_date: Option<Date>, end_date: Option<Date>) -> Self {
        Self {
            start_date,
            end_date,
            ..Default::default()
        }
    }

    /// Build the SQL `WHERE` clause for this filter and its parameters.
    ///
    /// Returns an empty string when the filter matches every transaction.
    pub(crate) fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(start_date) = self.start_date {
            conditions.push("date >= ?");
            params.push(Value::Text(format_date(start_date)));
        }
        if let Some(end_date) = self.end_date {
            conditions.push("date <= ?");
            params.push(Value::Text(format_date(end_date)));
        }
        if let Some(category) = &self.category {
            conditions.push("category = ?");
            params.push(Value::Text(category.clone()));
        }
        if let Some(transaction_type) = self.transaction_type {
            conditions.push("type = ?");
            params.push(Value::Text(transaction_type.as_str().to_owned()));
        }
        if let Some(min_amount) = self.min_amount {
            conditions.push("amount >= ?");
            params.push(Value::Real(min_amount));
        }
        if let Some(max_amount) = self.max_amount {
            conditions.push("amount <= ?");
            params.push(Value::Real(max_amount));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

impl TryFrom<TransactionQuery> for TransactionFilter {
    type Error = ValidationError;

    fn try_from(query: TransactionQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: non_empty(query.start_date)
                .map(|value| parse_date(&value))
                .transpose()?,
            end_date: non_empty(query.end_date)
                .map(|value| parse_date(&value))
                .transpose()?,
            category: non_empty(query.category),
            transaction_type: non_empty(query.transaction_type)
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ValidationError::InvalidTransactionType)
                })
                .transpose()?,
            min_amount: non_empty(query.min_amount)
                .map(|value| parse_amount(&value))
                .transpose()?,
            max_amount: non_empty(query.max_amount)
                .map(|value| parse_amount(&value))
                .transpose()?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ValidationError::InvalidAmount(text.to_owned()))
}
