//! Endpoints for reading categories.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
};
use serde::Deserialize;

use crate::{
    Error,
    category::{Category, CategoryState, ensure_seeded, get_categories, get_category},
    database_id::CategoryId,
    db::lock_connection,
    response::ApiResponse,
    transaction_type::TransactionType,
    validation::ValidationError,
};

/// The query string for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    /// Only list categories of this type.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// List categories sorted by name, seeding the defaults for any type that has none.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<ApiResponse<Vec<Category>>>, Error> {
    let category_type = query
        .category_type
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<TransactionType>()
                .map_err(|_| ValidationError::InvalidCategoryType)
        })
        .transpose()?;

    let connection = lock_connection(&state.db_connection)?;
    ensure_seeded(&connection)?;
    let categories = get_categories(category_type, &connection)?;

    Ok(Json(ApiResponse::success(categories)))
}

/// Get a single category by its ID.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<ApiResponse<Category>>, Error> {
    let Path(category_id) = category_id.map_err(|_| Error::CategoryNotFound)?;
    let connection = lock_connection(&state.db_connection)?;

    let category = get_category(category_id, &connection)?;

    Ok(Json(ApiResponse::success(category)))
}
