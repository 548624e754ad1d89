//! Product endpoints:
//! - GET /api/products - List products, optionally by category or price range (paged)
//! - GET /api/products/low-stock - Products with stock below a threshold
//! - GET /api/products/:id - Get one product
//! - POST /api/products - Create a product in an existing category
//! - PUT /api/products/:id - Partially update a product
//! - DELETE /api/products/:id - Delete a product
//!
//! Responses carry the category name, looked up from the category store at read time.

use super::dto::{CreateProductRequest, PageResponse, ProductResponse, UpdateProductRequest};
use super::params::{LowStockParams, ProductFilter, ProductListParams};
use super::state::AppState;
use crate::category_actor::CategoryError;
use crate::error::ServiceError;
use crate::model::{CategoryId, Product, ProductId};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

async fn category_name(state: &AppState, id: CategoryId) -> Result<Option<String>, ServiceError> {
    match state.categories.get_category(id).await {
        Ok(category) => Ok(Some(category.name)),
        Err(CategoryError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn category_names(state: &AppState) -> Result<HashMap<CategoryId, String>, ServiceError> {
    Ok(state
        .categories
        .list_categories()
        .await?
        .into_iter()
        .map(|category| (category.id, category.name))
        .collect())
}

async fn respond_with(state: &AppState, product: Product) -> Result<ProductResponse, ServiceError> {
    let name = category_name(state, product.category_id).await?;
    Ok(ProductResponse::new(product, name))
}

pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> Result<Json<PageResponse<ProductResponse>>, ServiceError> {
    let Query(params) = params?;
    let page_request = params.page_request(&state.api)?;

    let page = match params.filter()? {
        ProductFilter::Category(id) => {
            state.products.products_by_category(id, page_request).await?
        }
        ProductFilter::PriceBetween { min, max } => {
            state
                .products
                .products_by_price_range(min, max, page_request)
                .await?
        }
        ProductFilter::All => state.products.list_products(page_request).await?,
    };

    let names = category_names(&state).await?;
    Ok(Json(PageResponse::from_page(page, |product| {
        let name = names.get(&product.category_id).cloned();
        ProductResponse::new(product, name)
    })))
}

pub async fn low_stock(
    State(state): State<AppState>,
    params: Result<Query<LowStockParams>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, ServiceError> {
    let Query(params) = params?;
    let threshold = params.threshold(&state.api)?;
    let products = state.products.low_stock(threshold).await?;

    let names = category_names(&state).await?;
    Ok(Json(
        products
            .into_iter()
            .map(|product| {
                let name = names.get(&product.category_id).cloned();
                ProductResponse::new(product, name)
            })
            .collect(),
    ))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<ProductResponse>, ServiceError> {
    let Path(id) = id?;
    let product = state.products.get_product(ProductId(id)).await?;
    Ok(Json(respond_with(&state, product).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ServiceError> {
    let Json(body) = body?;
    let product = state.products.create_product(body.into()).await?;
    Ok((StatusCode::CREATED, Json(respond_with(&state, product).await?)))
}

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, ServiceError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let product = state
        .products
        .update_product(ProductId(id), body.into())
        .await?;
    Ok(Json(respond_with(&state, product).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(id) = id?;
    state.products.delete_product(ProductId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
