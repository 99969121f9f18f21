//! Database operations for transactions.

use rusqlite::{Connection, Row, params_from_iter};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate},
};

const COLUMNS: &str = "id, type, amount, date, category, notes, created_at, updated_at";

/// Create a new transaction in the database.
///
/// The ID and timestamps are assigned by the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (type, amount, date, category, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        ))?
        .query_row(
            (
                transaction.transaction_type,
                transaction.amount,
                transaction.date,
                transaction.category,
                transaction.notes,
                now,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(not_found_or)
}

/// Get the transactions that match `filter`, newest first.
///
/// Transactions on the same date are ordered by ID, newest first, so the order
/// is stable.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, params) = filter.where_clause();
    let query =
        format!("SELECT {COLUMNS} FROM \"transaction\" {where_clause} ORDER BY date DESC, id DESC");

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Merge `update` onto the transaction with `id` and save it.
///
/// An empty update returns the transaction untouched, including its
/// `updated_at` timestamp.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;
    let mut transaction = get_transaction(id, &sql_transaction)?;

    if update.is_empty() {
        return Ok(transaction);
    }

    update.apply(&mut transaction);

    let transaction = sql_transaction
        .prepare(&format!(
            "UPDATE \"transaction\"
             SET type = ?1, amount = ?2, date = ?3, category = ?4, notes = ?5, updated_at = ?6
             WHERE id = ?7
             RETURNING {COLUMNS}"
        ))?
        .query_row(
            (
                transaction.transaction_type,
                transaction.amount,
                transaction.date,
                &transaction.category,
                &transaction.notes,
                OffsetDateTime::now_utc(),
                id,
            ),
            map_transaction_row,
        )
        .map_err(not_found_or)?;

    sql_transaction.commit()?;

    Ok(transaction)
}

/// Delete the transaction with `id` and return it.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "DELETE FROM \"transaction\" WHERE id = ?1 RETURNING {COLUMNS}"
        ))?
        .query_row([id], map_transaction_row)
        .map_err(not_found_or)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            amount REAL NOT NULL CHECK (amount > 0),
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
    )
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        transaction_type: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn not_found_or(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
        error => error.into(),
    }
}
