//! Category management for grouping transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod seed;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_category_endpoint;
pub use db::{
    count_categories, create_category, create_category_table, delete_category, get_categories,
    get_category, update_category, upsert_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryInput, CategoryName, CategoryUpdate, NewCategory};
pub use edit::update_category_endpoint;
pub use list::{get_categories_endpoint, get_category_endpoint};
pub use seed::ensure_seeded;

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
