//! # HTTP API
//!
//! JSON over axum. Handlers translate requests into client calls and
//! [`ServiceError`](crate::error::ServiceError)s into status codes:
//!
//! | Error | Status |
//! |-------|--------|
//! | `NotFound` | 404 |
//! | `Validation` | 400 |
//! | `DuplicateResource`, `InsufficientStock`, `InvalidStatusTransition` | 422 |
//! | `Internal` | 500 |

pub mod categories;
pub mod dto;
pub mod error;
pub mod orders;
pub mod params;
pub mod products;
pub mod state;

pub use state::AppState;

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Liveness check. Does not touch the stores.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Categories
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Products
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/low-stock", get(products::low_stock))
        .route(
            "/api/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/status", patch(orders::update_status))
        .route("/api/orders/:id/cancel", post(orders::cancel_order))
        .with_state(state)
}
