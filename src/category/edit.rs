//! Category update endpoint.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    category::{Category, CategoryInput, CategoryState, update_category},
    database_id::CategoryId,
    db::lock_connection,
    response::ApiResponse,
    validation::{read_json, validate_category_update},
};

/// Apply a partial update to a category.
///
/// Renaming a category does not change the category name stored on existing transactions.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<Json<ApiResponse<Category>>, Error> {
    let Path(category_id) = category_id.map_err(|_| Error::CategoryNotFound)?;
    let update = validate_category_update(read_json(payload)?)?;
    let connection = lock_connection(&state.db_connection)?;

    let category = update_category(category_id, update, &connection)?;
    tracing::info!("Updated category {category_id}");

    Ok(Json(ApiResponse::success(category)))
}
