//! Transaction deletion endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    response::ApiResponse,
    transaction::{Transaction, TransactionState, delete_transaction},
};

/// Delete a transaction and respond with the removed record.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<ApiResponse<Transaction>>, Error> {
    let Path(transaction_id) = transaction_id.map_err(|_| Error::TransactionNotFound)?;
    let connection = lock_connection(&state.db_connection)?;

    let transaction = delete_transaction(transaction_id, &connection)?;
    tracing::info!("Deleted transaction {transaction_id}");

    Ok(Json(ApiResponse::success(transaction)))
}
