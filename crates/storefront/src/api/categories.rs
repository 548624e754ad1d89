//! Category endpoints:
//! - GET /api/categories - List all categories
//! - GET /api/categories/:id - Get one category
//! - POST /api/categories - Create a category (unique name)
//! - PUT /api/categories/:id - Rename / re-describe a category
//! - DELETE /api/categories/:id - Delete a category that no product uses

use super::dto::{CategoryRequest, CategoryResponse};
use super::state::AppState;
use crate::error::ServiceError;
use crate::model::CategoryId;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ServiceError> {
    let categories = state.categories.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<CategoryResponse>, ServiceError> {
    let Path(id) = id?;
    let category = state.categories.get_category(CategoryId(id)).await?;
    Ok(Json(category.into()))
}

pub async fn create_category(
    State(state): State<AppState>,
    body: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), ServiceError> {
    let Json(body) = body?;
    let category = state.categories.create_category(body.into()).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
    body: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, ServiceError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let category = state
        .categories
        .update_category(CategoryId(id), body.into())
        .await?;
    Ok(Json(category.into()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(id) = id?;
    state
        .categories
        .delete_category(CategoryId(id), &state.products)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
