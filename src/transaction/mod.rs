//! Recording, listing, changing and deleting transactions.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod filter;
mod list;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    get_transactions, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, TransactionInput, TransactionUpdate};
pub use edit::update_transaction_endpoint;
pub use filter::{TransactionFilter, TransactionQuery};
pub use list::{get_transaction_endpoint, get_transactions_endpoint};

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
