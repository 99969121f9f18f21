//! Totals, per-month sums and expense breakdowns for a set of transactions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{transaction::Transaction, transaction_type::TransactionType};

/// A summary of income and spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses, negative when more was spent than earned.
    pub net_amount: f64,
    /// One entry per month that has at least one transaction, oldest first.
    pub monthly_data: Vec<MonthlySummary>,
    /// Expenses grouped by category, largest first.
    pub category_breakdown: Vec<CategorySpending>,
}

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month formatted as "YYYY-MM".
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// The amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    /// The share of total expenses, from 0 to 100.
    pub percentage: f64,
}

/// Summarize `transactions`.
///
/// Months without transactions are not included in [Analytics::monthly_data].
/// Percentages are zero when there are no expenses.
pub fn summarize(transactions: &[Transaction]) -> Analytics {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut monthly_totals: BTreeMap<(i32, u8), (f64, f64)> = BTreeMap::new();
    let mut category_totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        let month = (transaction.date.year(), u8::from(transaction.date.month()));
        let (income, expenses) = monthly_totals.entry(month).or_insert((0.0, 0.0));

        match transaction.transaction_type {
            TransactionType::Income => {
                total_income += transaction.amount;
                *income += transaction.amount;
            }
            TransactionType::Expense => {
                total_expenses += transaction.amount;
                *expenses += transaction.amount;
                *category_totals
                    .entry(transaction.category.as_str())
                    .or_insert(0.0) += transaction.amount;
            }
        }
    }

    let monthly_data = monthly_totals
        .into_iter()
        .map(|((year, month), (income, expenses))| MonthlySummary {
            month: format!("{year:04}-{month:02}"),
            income,
            expenses,
        })
        .collect();

    let mut category_breakdown: Vec<_> = category_totals
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            category: category.to_owned(),
            amount,
            percentage: if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            },
        })
        .collect();
    category_breakdown.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    Analytics {
        total_income,
        total_expenses,
        net_amount: total_income - total_expenses,
        monthly_data,
        category_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        TransactionType,
        analytics::{CategorySpending, MonthlySummary},
        transaction::Transaction,
    };

    use super::summarize;

    fn transaction(
        id: i64,
        transaction_type: TransactionType,
        amount: f64,
        date: Date,
        category: &str,
    ) -> Transaction {
        let now = OffsetDateTime::now_utc();

        Transaction {
            id,
            transaction_type,
            amount,
            date,
            category: category.to_owned(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn summarizes_two_months() {
        let transactions = vec![
            transaction(1, TransactionType::Income, 100.0, date!(2024 - 01 - 15), "Salary"),
            transaction(2, TransactionType::Expense, 40.0, date!(2024 - 01 - 20), "Food"),
            transaction(3, TransactionType::Expense, 60.0, date!(2024 - 02 - 01), "Housing"),
        ];

        let analytics = summarize(&transactions);

        assert_eq!(analytics.total_income, 100.0);
        assert_eq!(analytics.total_expenses, 100.0);
        assert_eq!(analytics.net_amount, 0.0);
        assert_eq!(
            analytics.monthly_data,
            vec![
                MonthlySummary {
                    month: "2024-01".to_owned(),
                    income: 100.0,
                    expenses: 40.0,
                },
                MonthlySummary {
                    month: "2024-02".to_owned(),
                    income: 0.0,
                    expenses: 60.0,
                },
            ]
        );

        let categories: Vec<_> = analytics
            .category_breakdown
            .iter()
            .map(|spending| spending.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Housing", "Food"]);
        let total_percentage: f64 = analytics
            .category_breakdown
            .iter()
            .map(|spending| spending.percentage)
            .sum();
        assert!((total_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn months_are_sorted_regardless_of_input_order() {
        let transactions = vec![
            transaction(1, TransactionType::Expense, 5.0, date!(2024 - 03 - 02), "Food"),
            transaction(2, TransactionType::Expense, 5.0, date!(2023 - 12 - 31), "Food"),
            transaction(3, TransactionType::Income, 5.0, date!(2024 - 01 - 01), "Salary"),
        ];

        let months: Vec<_> = summarize(&transactions)
            .monthly_data
            .into_iter()
            .map(|summary| summary.month)
            .collect();

        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
    }

    #[test]
    fn groups_expenses_by_category() {
        let transactions = vec![
            transaction(1, TransactionType::Expense, 10.0, date!(2024 - 01 - 01), "Food"),
            transaction(2, TransactionType::Expense, 30.0, date!(2024 - 01 - 02), "Rent"),
            transaction(3, TransactionType::Expense, 10.0, date!(2024 - 01 - 03), "Food"),
            transaction(4, TransactionType::Income, 999.0, date!(2024 - 01 - 04), "Salary"),
        ];

        let breakdown = summarize(&transactions).category_breakdown;

        assert_eq!(
            breakdown,
            vec![
                CategorySpending {
                    category: "Rent".to_owned(),
                    amount: 30.0,
                    percentage: 60.0,
                },
                CategorySpending {
                    category: "Food".to_owned(),
                    amount: 20.0,
                    percentage: 40.0,
                },
            ]
        );
    }

    #[test]
    fn ties_are_ordered_by_category_name() {
        let transactions = vec![
            transaction(1, TransactionType::Expense, 10.0, date!(2024 - 01 - 01), "Travel"),
            transaction(2, TransactionType::Expense, 10.0, date!(2024 - 01 - 02), "Books"),
        ];

        let categories: Vec<_> = summarize(&transactions)
            .category_breakdown
            .into_iter()
            .map(|spending| spending.category)
            .collect();

        assert_eq!(categories, vec!["Books", "Travel"]);
    }

    #[test]
    fn income_only_has_empty_breakdown() {
        let transactions = vec![transaction(
            1,
            TransactionType::Income,
            50.0,
            date!(2024 - 05 - 05),
            "Salary",
        )];

        let analytics = summarize(&transactions);

        assert_eq!(analytics.net_amount, 50.0);
        assert!(analytics.category_breakdown.is_empty());
    }

    #[test]
    fn no_transactions_gives_zeroes() {
        let analytics = summarize(&[]);

        assert_eq!(analytics.total_income, 0.0);
        assert_eq!(analytics.total_expenses, 0.0);
        assert_eq!(analytics.net_amount, 0.0);
        assert!(analytics.monthly_data.is_empty());
        assert!(analytics.category_breakdown.is_empty());
    }
}
