use crate::model::{ProductId, StockReservation};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// `DELIVERED` and `CANCELLED` are terminal; everything before them can move freely, including
/// backwards. See [`OrderStatus::check_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// A cancelled order never changes again; a delivered one may only be re-marked delivered.
    pub fn check_transition(self, next: OrderStatus) -> Result<(), StatusRejection> {
        match (self, next) {
            (OrderStatus::Cancelled, _) => Err(StatusRejection::FromCancelled),
            (OrderStatus::Delivered, OrderStatus::Delivered) => Ok(()),
            (OrderStatus::Delivered, _) => Err(StatusRejection::FromDelivered),
            _ => Ok(()),
        }
    }

    pub fn check_cancel(self) -> Result<(), StatusRejection> {
        match self {
            OrderStatus::Delivered => Err(StatusRejection::CancelDelivered),
            OrderStatus::Cancelled => Err(StatusRejection::AlreadyCancelled),
            _ => Ok(()),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

/// Why a status change was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusRejection {
    #[error("Cannot change status of a cancelled order")]
    FromCancelled,
    #[error("Cannot change status of a delivered order")]
    FromDelivered,
    #[error("Cannot cancel a delivered order")]
    CancelDelivered,
    #[error("Order is already cancelled")]
    AlreadyCancelled,
}

/// One line of an order. Owned by the order; references its product by id only.
///
/// `unit_price` and `product_name` are frozen when the order is placed and never follow later
/// product changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl OrderItem {
    /// A line that has not been priced yet.
    pub fn unpriced(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            product_name: String::new(),
            quantity,
            unit_price: Decimal::ZERO,
            subtotal: Decimal::ZERO,
        }
    }

    /// Builds a priced line from a reservation. `None` if the subtotal overflows.
    pub fn from_reservation(reservation: &StockReservation) -> Option<Self> {
        Some(Self {
            product_id: reservation.product_id,
            product_name: reservation.product_name.clone(),
            quantity: reservation.quantity,
            unit_price: reservation.unit_price,
            subtotal: line_subtotal(reservation.unit_price, reservation.quantity)?,
        })
    }
}

/// `unit_price × quantity`, exact. `None` on overflow.
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}

/// Sum of the line subtotals. `None` on overflow.
pub fn order_total<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> Option<Decimal> {
    items
        .into_iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.subtotal))
}

/// Represents a customer order together with its line items.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`]) and stock reservation
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub status: OrderStatus,
    /// Always the sum of the item subtotals.
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A `PENDING` order whose lines are not priced yet.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            shipping_address: params.shipping_address,
            status: OrderStatus::Pending,
            total_amount: Decimal::ZERO,
            items: params
                .items
                .into_iter()
                .map(|line| OrderItem::unpriced(line.product_id, line.quantity))
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// `(product, quantity)` for every line, in order.
    pub fn lines(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| (item.product_id, item.quantity))
            .collect()
    }

    /// Replaces the lines with priced ones and recomputes the total.
    ///
    /// Leaves the order untouched and returns `None` when any amount overflows.
    pub fn price_from(&mut self, reservations: &[StockReservation]) -> Option<()> {
        let items = reservations
            .iter()
            .map(OrderItem::from_reservation)
            .collect::<Option<Vec<_>>>()?;
        let total = order_total(&items)?;
        self.items = items;
        self.total_amount = total;
        Some(())
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderQuery {
    All,
    Status(OrderStatus),
    /// Exact match.
    CustomerEmail(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSortField {
    Id,
    #[default]
    CreatedAt,
    UpdatedAt,
    TotalAmount,
    Status,
    CustomerName,
}

impl FromStr for OrderSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "createdat" | "created_at" => Ok(Self::CreatedAt),
            "updatedat" | "updated_at" => Ok(Self::UpdatedAt),
            "totalamount" | "total_amount" => Ok(Self::TotalAmount),
            "status" => Ok(Self::Status),
            "customername" | "customer_name" => Ok(Self::CustomerName),
            _ => Err(format!("cannot sort orders by '{s}'")),
        }
    }
}
