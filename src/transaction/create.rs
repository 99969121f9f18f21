//! Transaction creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    db::lock_connection,
    response::ApiResponse,
    transaction::{Transaction, TransactionInput, TransactionState, create_transaction},
    validation::{read_json, validate_new_transaction},
};

/// Validate and save a new transaction, responding with the stored record.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Transaction>>), Error> {
    let new_transaction = validate_new_transaction(read_json(payload)?)?;
    let connection = lock_connection(&state.db_connection)?;

    let transaction = create_transaction(new_transaction, &connection)?;
    tracing::info!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(transaction))))
}

#[cfg(test)]
mod create_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        TransactionType, build_router, endpoints,
        response::ApiResponse,
        test_utils::get_test_app_state,
        transaction::{Transaction, get_transaction},
    };

    #[tokio::test]
    async fn can_create_transaction() {
        let state = get_test_app_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "income",
                "amount": 1000,
                "date": "2024-01-15T00:00:00.000Z",
                "category": "Salary",
                "notes": "January"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Transaction> = response.json();
        let transaction = body.data.expect("response should contain the transaction");
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(transaction.amount, 1000.0);
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
        assert_eq!(transaction.category, "Salary");
        assert_eq!(transaction.notes.as_deref(), Some("January"));
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Ok(transaction)
        );
    }

    #[tokio::test]
    async fn missing_fields_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "type": "income" }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Missing required fields"));
    }

    #[tokio::test]
    async fn non_positive_amount_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "expense",
                "amount": -3,
                "date": "2024-01-15",
                "category": "Housing"
            }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Amount must be greater than 0"));
    }

    #[tokio::test]
    async fn invalid_type_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "type": "transfer",
                "amount": 3,
                "date": "2024-01-15",
                "category": "Housing"
            }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Invalid transaction type"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({ "amount": "a lot" }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
    }
}
