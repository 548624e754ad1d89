//! Order endpoints:
//! - GET /api/orders - List orders, optionally by status or customer email (paged)
//! - GET /api/orders/:id - Get one order
//! - POST /api/orders - Place an order (reserves stock)
//! - PATCH /api/orders/:id/status?status=SHIPPED - Move an order to another status
//! - POST /api/orders/:id/cancel - Cancel an order (restores stock)

use super::dto::{CreateOrderRequest, OrderResponse, PageResponse};
use super::params::{OrderFilter, OrderListParams, StatusParams};
use super::state::AppState;
use crate::error::ServiceError;
use crate::model::OrderId;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

pub async fn list_orders(
    State(state): State<AppState>,
    params: Result<Query<OrderListParams>, QueryRejection>,
) -> Result<Json<PageResponse<OrderResponse>>, ServiceError> {
    let Query(params) = params?;
    let page_request = params.page_request(&state.api)?;

    let page = match params.filter()? {
        OrderFilter::Status(status) => state.orders.orders_by_status(status, page_request).await?,
        OrderFilter::CustomerEmail(email) => {
            state.orders.orders_by_customer(email, page_request).await?
        }
        OrderFilter::All => state.orders.list_orders(page_request).await?,
    };

    Ok(Json(PageResponse::from_page(page, OrderResponse::from)))
}

pub async fn get_order(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<OrderResponse>, ServiceError> {
    let Path(id) = id?;
    let order = state.orders.get_order(OrderId(id)).await?;
    Ok(Json(order.into()))
}

pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ServiceError> {
    let Json(body) = body?;
    let order = state.orders.create_order(body.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> Result<Json<OrderResponse>, ServiceError> {
    let Path(id) = id?;
    let Query(params) = params?;
    let status = params.status()?;

    let order = state.orders.update_status(OrderId(id), status).await?;
    info!(order_id = %order.id, status = %order.status, "Order status changed");
    Ok(Json(order.into()))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let Path(id) = id?;
    state.orders.cancel_order(OrderId(id)).await?;
    info!(order_id = id, "Order cancelled");
    Ok(StatusCode::NO_CONTENT)
}
