use super::actions::OrderAction;
use super::OrderError;
use crate::clients::ProductClient;
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderSortField, OrderStatus};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::ops::RangeInclusive;
use tracing::{error, info};

const CUSTOMER_NAME_LEN: RangeInclusive<usize> = 2..=100;
const SHIPPING_ADDRESS_LEN: RangeInclusive<usize> = 10..=200;

fn trimmed_within(
    field: &str,
    value: &str,
    bounds: RangeInclusive<usize>,
) -> Result<String, OrderError> {
    let value = value.trim();
    if !bounds.contains(&value.chars().count()) {
        return Err(OrderError::Validation(format!(
            "{field} must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )));
    }
    Ok(value.to_string())
}

/// `local@domain`: one `@`, no whitespace, and a domain made of non-empty dot-separated
/// labels. A bare host such as `localhost` is accepted.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').all(|label| !label.is_empty())
}

/// Checks the customer data and the lines; returns the payload with trimmed fields.
fn validate(params: OrderCreate) -> Result<OrderCreate, OrderError> {
    let customer_name = trimmed_within("customer name", &params.customer_name, CUSTOMER_NAME_LEN)?;
    let customer_email = params.customer_email.trim().to_string();
    if customer_email.is_empty() {
        return Err(OrderError::Validation("customer email is required".into()));
    }
    if !is_valid_email(&customer_email) {
        return Err(OrderError::Validation(format!(
            "'{customer_email}' is not a valid email address"
        )));
    }
    let shipping_address = trimmed_within(
        "shipping address",
        &params.shipping_address,
        SHIPPING_ADDRESS_LEN,
    )?;
    if params.items.is_empty() {
        return Err(OrderError::Validation(
            "order must contain at least one item".into(),
        ));
    }
    if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
        return Err(OrderError::Validation(format!(
            "quantity for {} must be at least 1",
            line.product_id
        )));
    }
    Ok(OrderCreate {
        customer_name,
        customer_email,
        shipping_address,
        items: params.items,
    })
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Query = OrderQuery;
    type SortField = OrderSortField;
    type Context = ProductClient;
    type Error = OrderError;

    /// Validates the request and builds a `PENDING` order with unpriced lines.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, validate(params)?))
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::All => true,
            OrderQuery::Status(status) => self.status == *status,
            OrderQuery::CustomerEmail(email) => self.customer_email == *email,
        }
    }

    fn compare_by(&self, other: &Self, field: &OrderSortField) -> Ordering {
        match field {
            OrderSortField::Id => self.id.cmp(&other.id),
            OrderSortField::CreatedAt => self.created_at.cmp(&other.created_at),
            OrderSortField::UpdatedAt => self.updated_at.cmp(&other.updated_at),
            OrderSortField::TotalAmount => self.total_amount.cmp(&other.total_amount),
            OrderSortField::Status => self.status.cmp(&other.status),
            OrderSortField::CustomerName => self.customer_name.cmp(&other.customer_name),
        }
    }

    /// Reserves stock for every line in one product-store transaction, then prices the lines
    /// from the reservation snapshots.
    ///
    /// The first missing product or short line aborts the reservation as a whole. If pricing
    /// overflows after the reservation committed, the stock is released again.
    async fn on_create(&mut self, ctx: &ProductClient) -> Result<(), Self::Error> {
        let lines = self.lines();
        let reservations = ctx.reserve_all(&lines).await?;

        if self.price_from(&reservations).is_none() {
            if let Err(e) = ctx.restock_all(&lines).await {
                error!(order_id = %self.id, error = %e, "Failed to release stock after pricing overflow");
            }
            return Err(OrderError::AmountOverflow);
        }

        info!(
            order_id = %self.id,
            lines = self.items.len(),
            total = %self.total_amount,
            "Stock reserved"
        );
        Ok(())
    }

    /// Orders are only changed through actions.
    async fn on_update(&mut self, _update: (), _ctx: &ProductClient) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles status changes. Stock is restored before the status moves to `CANCELLED`;
    /// if the restock fails the order stays as it was.
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &ProductClient,
    ) -> Result<Order, Self::Error> {
        let next = match action {
            OrderAction::Transition(next) => {
                self.status.check_transition(next)?;
                next
            }
            OrderAction::Cancel => {
                self.status.check_cancel()?;
                OrderStatus::Cancelled
            }
        };

        if next == OrderStatus::Cancelled {
            ctx.restock_all(&self.lines()).await?;
            info!(order_id = %self.id, lines = self.items.len(), "Stock restored");
        }

        self.set_status(next);
        Ok(self.clone())
    }
}
