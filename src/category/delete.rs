//! Category deletion endpoint.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Error,
    category::{Category, CategoryState, delete_category},
    database_id::CategoryId,
    db::lock_connection,
    response::ApiResponse,
};

/// Delete a category and respond with the removed record.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<ApiResponse<Category>>, Error> {
    let Path(category_id) = category_id.map_err(|_| Error::CategoryNotFound)?;
    let connection = lock_connection(&state.db_connection)?;

    let category = delete_category(category_id, &connection)?;
    tracing::info!("Deleted category {category_id}");

    Ok(Json(ApiResponse::success(category)))
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use axum_test::TestServer;

    use crate::{
        TransactionType, build_router,
        category::{Category, CategoryName, NewCategory, create_category},
        endpoints::{self, format_endpoint},
        response::ApiResponse,
        test_utils::get_test_app_state,
    };

    #[tokio::test]
    async fn delete_category_endpoint_succeeds() {
        let state = get_test_app_state();
        let category = create_category(
            NewCategory::new(CategoryName::new_unchecked("Test"), TransactionType::Income),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        let server = TestServer::new(build_router(state)).unwrap();
        let endpoint = format_endpoint(endpoints::CATEGORY, category.id);

        let response = server.delete(&endpoint).await;

        response.assert_status_ok();
        let body: ApiResponse<Category> = response.json();
        assert_eq!(body, ApiResponse::success(category));
        server.get(&endpoint).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_category_is_not_found() {
        let server = TestServer::new(build_router(get_test_app_state())).unwrap();

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY, 999999))
            .await;

        response.assert_status_not_found();
    }
}
