//! Default categories created the first time a category type has none.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    category::{Category, CategoryName, NewCategory, count_categories, upsert_category},
    transaction_type::TransactionType,
};

/// The built-in expense categories.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 3] = ["Food and Dining", "Housing", "Transportation"];

/// The built-in income categories.
pub const DEFAULT_INCOME_CATEGORIES: [&str; 3] = ["Salary", "Freelance", "Dividends"];

fn default_category_names(category_type: TransactionType) -> &'static [&'static str] {
    match category_type {
        TransactionType::Expense => &DEFAULT_EXPENSE_CATEGORIES,
        TransactionType::Income => &DEFAULT_INCOME_CATEGORIES,
    }
}

/// Add the default categories for each transaction type that has no categories.
///
/// The counts and inserts run in one exclusive SQL transaction and each default
/// is upserted by name and type, so calling this repeatedly, or from
/// concurrent requests, never creates duplicates.
///
/// Returns the categories that were seeded, which is empty if every type
/// already had categories.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn ensure_seeded(connection: &Connection) -> Result<Vec<Category>, Error> {
    let sql_transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;
    let mut seeded = Vec::new();

    for category_type in TransactionType::ALL {
        if count_categories(category_type, &sql_transaction)? > 0 {
            continue;
        }

        for name in default_category_names(category_type) {
            let category = NewCategory::new(CategoryName::new_unchecked(name), category_type);
            seeded.push(upsert_category(category, &sql_transaction)?);
        }

        tracing::info!("Seeded default {category_type} categories.");
    }

    sql_transaction.commit()?;

    Ok(seeded)
}
