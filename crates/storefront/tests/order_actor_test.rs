use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use rust_decimal::Decimal;
use storefront::clients::{OrderClient, ProductClient};
use storefront::model::{
    OrderCreate, OrderId, OrderLine, OrderStatus, Product, ProductId, StockReservation,
};
use storefront::order_actor::OrderError;
use storefront::product_actor::{ProductActionResult, ProductError};

fn order_for(lines: &[(u32, u32)]) -> OrderCreate {
    OrderCreate {
        customer_name: "Alice".to_string(),
        customer_email: "alice@example.com".to_string(),
        shipping_address: "42 Wallaby Way, Sydney".to_string(),
        items: lines
            .iter()
            .map(|&(product, quantity)| OrderLine {
                product_id: ProductId(product),
                quantity,
            })
            .collect(),
    }
}

fn reserved(product: u32, cents: i64, quantity: u32) -> ProductActionResult {
    ProductActionResult::Reserved(StockReservation {
        product_id: ProductId(product),
        product_name: format!("Product {product}"),
        unit_price: Decimal::new(cents, 2),
        quantity,
    })
}

/// Spawns a real Order actor whose product store is `product_mock`.
fn spawn_orders(product_mock: &MockClient<Product>) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let product_client = ProductClient::new(product_mock.client());
    let (order_actor, order_generic_client) = storefront::order_actor::new(10);
    let handle = tokio::spawn(order_actor.run(product_client));
    (OrderClient::new(order_generic_client), handle)
}

/// Real Order actor with a mocked Product store.
///
/// Placing the order sends one reservation transaction; cancelling it sends one restock
/// transaction. The order is priced from what the product store handed back.
#[tokio::test]
async fn test_order_lifecycle_against_mocked_products() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_transaction()
        .return_ok(vec![reserved(1, 1000, 3), reserved(2, 250, 2)]);
    product_mock
        .expect_transaction()
        .return_ok(vec![ProductActionResult::Restocked(13), ProductActionResult::Restocked(12)]);

    let (order_client, handle) = spawn_orders(&product_mock);

    let order = order_client
        .create_order(order_for(&[(1, 3), (2, 2)]))
        .await
        .unwrap();
    assert_eq!(order.id, OrderId(1));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::new(3500, 2));
    assert_eq!(order.items[0].product_name, "Product 1");
    assert_eq!(order.items[1].subtotal, Decimal::new(500, 2));

    order_client.cancel_order(order.id).await.unwrap();
    let stored = order_client.get_order(order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_reservation_stores_nothing() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_transaction()
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                product: "Product 1".into(),
                available: 1,
                requested: 3,
            },
        )));
    product_mock
        .expect_transaction()
        .return_ok(vec![reserved(1, 1000, 1)]);

    let (order_client, handle) = spawn_orders(&product_mock);

    let err = order_client
        .create_order(order_for(&[(1, 3)]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        OrderError::Product(ProductError::InsufficientStock {
            product: "Product 1".into(),
            available: 1,
            requested: 3,
        })
    );
    assert!(!order_client.exists(OrderId(1)).await.unwrap());

    // The failed attempt did not use up an id
    let order = order_client.create_order(order_for(&[(1, 1)])).await.unwrap();
    assert_eq!(order.id, OrderId(1));

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_order_never_reaches_products() {
    // No expectations: any request to the product store would fail verify()
    let product_mock = MockClient::<Product>::new();
    let (order_client, handle) = spawn_orders(&product_mock);

    let mut bad_email = order_for(&[(1, 1)]);
    bad_email.customer_email = "not-an-email".into();
    assert!(matches!(
        order_client.create_order(bad_email).await,
        Err(OrderError::Validation(_))
    ));

    assert!(matches!(
        order_client.create_order(order_for(&[])).await,
        Err(OrderError::Validation(_))
    ));

    assert!(matches!(
        order_client.create_order(order_for(&[(1, 0)])).await,
        Err(OrderError::Validation(_))
    ));

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_restock_leaves_order_unchanged() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_transaction()
        .return_ok(vec![reserved(7, 199, 1)]);
    product_mock
        .expect_transaction()
        .return_err(FrameworkError::ActorClosed);

    let (order_client, handle) = spawn_orders(&product_mock);

    let order = order_client.create_order(order_for(&[(7, 1)])).await.unwrap();

    let err = order_client
        .update_status(order.id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            OrderError::Product(ProductError::ActorCommunicationError(_))
        ),
        "{err:?}"
    );

    let stored = order_client.get_order(order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.updated_at, order.updated_at);

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

/// A product deleted after the order was placed is left out of the restock; the other
/// lines still go back in one transaction and the order is cancelled.
#[tokio::test]
async fn test_cancel_skips_products_deleted_since_ordering() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_transaction()
        .return_ok(vec![reserved(7, 199, 1), reserved(8, 450, 2)]);
    product_mock
        .expect_transaction()
        .return_err(FrameworkError::NotFound("product_7".into()));
    product_mock
        .expect_transaction()
        .return_ok(vec![ProductActionResult::Restocked(5)]);

    let (order_client, handle) = spawn_orders(&product_mock);

    let order = order_client
        .create_order(order_for(&[(7, 1), (8, 2)]))
        .await
        .unwrap();

    order_client.cancel_order(order.id).await.unwrap();
    let stored = order_client.get_order(order.id).await.unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_transitions_that_skip_the_product_store() {
    let mut product_mock = MockClient::<Product>::new();
    product_mock
        .expect_transaction()
        .return_ok(vec![reserved(1, 500, 1)]);

    let (order_client, handle) = spawn_orders(&product_mock);
    let order = order_client.create_order(order_for(&[(1, 1)])).await.unwrap();

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Delivered,
    ] {
        let updated = order_client.update_status(order.id, status).await.unwrap();
        assert_eq!(updated.status, status);
    }

    let err = order_client.cancel_order(order.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Cannot cancel a delivered order");

    let err = order_client
        .update_status(order.id, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot change status of a delivered order");

    product_mock.verify();

    drop(order_client);
    handle.await.unwrap();
}
