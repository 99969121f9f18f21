//! Transaction update endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    response::ApiResponse,
    transaction::{Transaction, TransactionInput, TransactionState, update_transaction},
    validation::{read_json, validate_transaction_update},
};

/// Apply a partial update to a transaction. Fields missing from the body are left unchanged.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<ApiResponse<Transaction>>, Error> {
    let Path(transaction_id) = transaction_id.map_err(|_| Error::TransactionNotFound)?;
    let update = validate_transaction_update(read_json(payload)?)?;
    let connection = lock_connection(&state.db_connection)?;

    let transaction = update_transaction(transaction_id, update, &connection)?;
    tracing::info!("Updated transaction {transaction_id}");

    Ok(Json(ApiResponse::success(transaction)))
}
