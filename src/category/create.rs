//! Category creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    category::{Category, CategoryInput, CategoryState, create_category},
    db::lock_connection,
    response::ApiResponse,
    validation::{read_json, validate_new_category},
};

/// Validate and save a new category.
///
/// Responds with 409 Conflict if a category with the same name and type exists.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), Error> {
    let new_category = validate_new_category(read_json(payload)?)?;
    let connection = lock_connection(&state.db_connection)?;

    let category = create_category(new_category, &connection)?;
    tracing::info!("Created category {} \"{}\"", category.id, category.name);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        TransactionType, build_router,
        category::{Category, CategoryName},
        endpoints,
        response::ApiResponse,
        test_utils::get_test_app_state,
    };

    #[tokio::test]
    async fn can_create_category() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "  Gym ", "type": "expense", "color": "#123456" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let category = response.json::<ApiResponse<Category>>().data.unwrap();
        assert_eq!(category.name, CategoryName::new_unchecked("Gym"));
        assert_eq!(category.category_type, TransactionType::Expense);
        assert_eq!(category.color.as_deref(), Some("#123456"));
    }

    #[tokio::test]
    async fn duplicate_category_is_conflict() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();
        let body = json!({ "name": "Gym", "type": "expense" });
        server
            .post(endpoints::CATEGORIES)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post(endpoints::CATEGORIES).json(&body).await;

        response.assert_status(StatusCode::CONFLICT);
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Category already exists"));
    }

    #[tokio::test]
    async fn missing_name_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "   ", "type": "income" }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Missing required fields"));
    }

    #[tokio::test]
    async fn invalid_type_is_bad_request() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "Gym", "type": "liability" }))
            .await;

        response.assert_status_bad_request();
        let body: ApiResponse<()> = response.json();
        assert_eq!(body, ApiResponse::error("Invalid category type"));
    }
}
