use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storefront::api::{self, AppState};
use storefront::config::Config;
use storefront::lifecycle::StoreSystem;
use tower::ServiceExt;

fn app(system: &StoreSystem) -> Router {
    api::router(AppState::new(system, Config::default().api))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let system = StoreSystem::new(8);
    let app = app(&system);

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_category_endpoints() {
    let system = StoreSystem::new(8);
    let app = app(&system);

    let (status, created) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Books", "description": "Paper and ink" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert!(created["createdAt"].is_string());

    let (status, error) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Books" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "DUPLICATE_RESOURCE");
    assert_eq!(error["message"], "Category with name 'Books' already exists");

    let (status, error) =
        send(&app, "POST", "/api/categories", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, "GET", "/api/categories/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send(&app, "GET", "/api/categories/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");

    let (status, _) = send(&app, "GET", "/api/categories/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/categories/1",
        Some(json!({ "name": "Used Books" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Used Books");

    let (status, list) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Atlas", "price": "45.00", "stock": 2, "categoryId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(&app, "DELETE", "/api/categories/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONFLICT");
    assert_eq!(error["message"], "Category category_1 still has products");

    let (status, _) = send(&app, "DELETE", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/api/categories/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "DELETE", "/api/categories/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_product_endpoints() {
    let system = StoreSystem::new(8);
    let app = app(&system);

    send(&app, "POST", "/api/categories", Some(json!({ "name": "Tools" }))).await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Hammer", "price": "10.00", "stock": 5, "categoryId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["categoryName"], "Tools");
    assert_eq!(created["price"], "10.00");

    send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Saw", "price": "25.50", "stock": 40, "categoryId": 1 })),
    )
    .await;

    let (status, error) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Ghost", "price": "1.00", "stock": 1, "categoryId": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Dust", "price": "0.001", "stock": 1, "categoryId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, page) = send(
        &app,
        "GET",
        "/api/products?categoryId=1&sortBy=price&direction=desc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["content"][0]["name"], "Saw");
    assert_eq!(page["last"], true);

    let (status, page) = send(
        &app,
        "GET",
        "/api/products?minPrice=20&maxPrice=30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"].as_array().unwrap().len(), 1);

    let (status, low) = send(&app, "GET", "/api/products/low-stock", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(low.as_array().unwrap().len(), 1);
    assert_eq!(low[0]["name"], "Hammer");

    let (status, _) = send(&app, "GET", "/api/products?sortBy=colour", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/products/1",
        Some(json!({ "stock": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stock"], 50);
    assert_eq!(updated["name"], "Hammer");

    let (status, _) = send(&app, "DELETE", "/api/products/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", "/api/products/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_endpoints() {
    let system = StoreSystem::new(8);
    let app = app(&system);

    send(&app, "POST", "/api/categories", Some(json!({ "name": "Tools" }))).await;
    send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Hammer", "price": "10.00", "stock": 5, "categoryId": 1 })),
    )
    .await;

    let order = |quantity: u32| {
        json!({
            "customerName": "Alice",
            "customerEmail": "alice@example.com",
            "shippingAddress": "42 Wallaby Way, Sydney",
            "items": [{ "productId": 1, "quantity": quantity }]
        })
    };

    let (status, created) = send(&app, "POST", "/api/orders", Some(order(3))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["totalAmount"], "30.00");
    assert_eq!(created["items"][0]["productName"], "Hammer");

    let (status, error) = send(&app, "POST", "/api/orders", Some(order(3))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INSUFFICIENT_STOCK");
    assert_eq!(
        error["message"],
        "Insufficient stock for product: Hammer. Available: 2, Requested: 3"
    );

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "customerName": "Alice", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, shipped) =
        send(&app, "PATCH", "/api/orders/1/status?status=shipped", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shipped["status"], "SHIPPED");

    let (status, _) = send(&app, "PATCH", "/api/orders/1/status", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PATCH", "/api/orders/1/status?status=LOST", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, page) = send(&app, "GET", "/api/orders?status=SHIPPED", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 1);

    let (status, page) = send(
        &app,
        "GET",
        "/api/orders?customerEmail=nobody@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 0);

    let (status, body) = send(&app, "POST", "/api/orders/1/cancel", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, product) = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["stock"], 5);

    let (status, error) = send(&app, "POST", "/api/orders/1/cancel", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_STATUS_TRANSITION");
    assert_eq!(error["message"], "Order is already cancelled");

    let (status, _) = send(&app, "GET", "/api/orders/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}
