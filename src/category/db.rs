//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::{Category, CategoryName, CategoryUpdate, NewCategory},
    database_id::CategoryId,
    transaction_type::TransactionType,
};

const COLUMNS: &str = "id, name, type, color, created_at, updated_at";

/// Create a category and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateCategory] if a category with the same name and type exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    let now = OffsetDateTime::now_utc();

    let category = connection
        .prepare(&format!(
            "INSERT INTO category (name, type, color, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {COLUMNS}"
        ))?
        .query_row(
            (
                category.name.as_ref(),
                category.category_type,
                category.color,
                now,
            ),
            map_row,
        )?;

    Ok(category)
}

/// Create the category if no category has the same name and type.
///
/// Returns the stored category either way. This is safe to call repeatedly.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn upsert_category(category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    let now = OffsetDateTime::now_utc();

    let category = connection
        .prepare(&format!(
            "INSERT INTO category (name, type, color, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(name, type) DO UPDATE SET updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        ))?
        .query_row(
            (
                category.name.as_ref(),
                category.category_type,
                category.color,
                now,
            ),
            map_row,
        )?;

    Ok(category)
}

/// Retrieve a single category by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if `id` does not refer to a valid category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_category(id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!("SELECT {COLUMNS} FROM category WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_row)
        .map_err(not_found_or)
}

/// Retrieve categories ordered alphabetically by name, optionally only those of `category_type`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_categories(
    category_type: Option<TransactionType>,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let categories = match category_type {
        Some(category_type) => connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM category WHERE type = ?1 ORDER BY name ASC, id ASC"
            ))?
            .query_map([category_type], map_row)?
            .collect::<Result<Vec<_>, _>>(),
        None => connection
            .prepare(&format!(
                "SELECT {COLUMNS} FROM category ORDER BY name ASC, id ASC"
            ))?
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>(),
    };

    categories.map_err(|error| error.into())
}

/// Count the categories of `category_type`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_categories(
    category_type: TransactionType,
    connection: &Connection,
) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM category WHERE type = ?1",
            [category_type],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Merge `update` onto the category with `id` and save it.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if `id` does not refer to a valid category,
/// - [Error::DuplicateCategory] if the new name and type clash with another category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_category(
    id: CategoryId,
    update: CategoryUpdate,
    connection: &Connection,
) -> Result<Category, Error> {
    let sql_transaction = connection.unchecked_transaction()?;
    let mut category = get_category(id, &sql_transaction)?;

    if update.is_empty() {
        return Ok(category);
    }

    update.apply(&mut category);

    let category = sql_transaction
        .prepare(&format!(
            "UPDATE category SET name = ?1, type = ?2, color = ?3, updated_at = ?4
             WHERE id = ?5
             RETURNING {COLUMNS}"
        ))?
        .query_row(
            (
                category.name.as_ref(),
                category.category_type,
                &category.color,
                OffsetDateTime::now_utc(),
                id,
            ),
            map_row,
        )
        .map_err(not_found_or)?;

    sql_transaction.commit()?;

    Ok(category)
}

/// Delete a category by ID and return it.
///
/// Transactions that refer to the category by name are left as they are.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if `id` does not refer to a valid category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_category(id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!(
            "DELETE FROM category WHERE id = ?1 RETURNING {COLUMNS}"
        ))?
        .query_row([id], map_row)
        .map_err(not_found_or)
}

/// Initialize the category table and indexes.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            color TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(name, type)
        );

        CREATE INDEX IF NOT EXISTS idx_category_type ON category(type);",
    )
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Category {
        id: row.get(0)?,
        name: CategoryName::new_unchecked(&raw_name),
        category_type: row.get(2)?,
        color: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn not_found_or(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound,
        error => error.into(),
    }
}
