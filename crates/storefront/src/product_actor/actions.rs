use crate::model::StockReservation;

/// Custom actions for Product entities.
///
/// Orders never send these one by one: they go through
/// [`ResourceClient::transact`](actor_framework::ResourceClient::transact) so that every line
/// of an order is reserved (or restored) in a single all-or-nothing step.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Takes units out of stock.
    ///
    /// # Errors
    /// Fails with `InsufficientStock` if the requested amount exceeds available stock.
    Reserve(u32),
    /// Puts units back into stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    Reserved(StockReservation),
    /// New stock level.
    Restocked(u32),
}
