//! # Order Client
//!
//! Order processing service. Placing, reading and moving orders through their lifecycle;
//! the rules themselves run inside the Order actor (see [`crate::order_actor`]).
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderSortField, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, Page, PageRequest, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Orchestration (stock reservation and restoration) happens in the Order actor's hooks, so
/// every call here is a single request to that actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::InvalidPage(msg)) => OrderError::Validation(msg),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places an order: validates it, reserves stock for every line and stores it as
    /// `PENDING`. All-or-nothing.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: PageRequest<OrderSortField>,
    ) -> Result<Page<Order>, OrderError> {
        self.find_page(OrderQuery::All, page).await
    }

    #[instrument(skip(self))]
    pub async fn orders_by_status(
        &self,
        status: OrderStatus,
        page: PageRequest<OrderSortField>,
    ) -> Result<Page<Order>, OrderError> {
        self.find_page(OrderQuery::Status(status), page).await
    }

    #[instrument(skip(self))]
    pub async fn orders_by_customer(
        &self,
        email: String,
        page: PageRequest<OrderSortField>,
    ) -> Result<Page<Order>, OrderError> {
        self.find_page(OrderQuery::CustomerEmail(email), page).await
    }

    async fn find_page(
        &self,
        query: OrderQuery,
        page: PageRequest<OrderSortField>,
    ) -> Result<Page<Order>, OrderError> {
        self.inner
            .find_page(query, page)
            .await
            .map_err(Self::map_error)
    }

    /// Moves an order to `status`, restoring stock when that status is `CANCELLED`.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Transition(status))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Cancel)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}
