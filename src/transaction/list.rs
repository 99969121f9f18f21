//! Endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    response::ApiResponse,
    transaction::{
        Transaction, TransactionFilter, TransactionQuery, TransactionState, get_transaction,
        get_transactions,
    },
};

/// List the transactions matching the query string, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, Error> {
    let filter = TransactionFilter::try_from(query)?;
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_transactions(&filter, &connection)?;
    tracing::debug!("Found {} transactions for {filter:?}", transactions.len());

    Ok(Json(ApiResponse::success(transactions)))
}

/// Get a single transaction by its ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<ApiResponse<Transaction>>, Error> {
    let Path(transaction_id) = transaction_id.map_err(|_| Error::TransactionNotFound)?;
    let connection = lock_connection(&state.db_connection)?;

    let transaction = get_transaction(transaction_id, &connection)?;

    Ok(Json(ApiResponse::success(transaction)))
}
