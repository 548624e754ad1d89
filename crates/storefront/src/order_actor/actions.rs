use crate::model::OrderStatus;

/// Custom actions for Order entities. Both answer with the order as committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderAction {
    /// Moves the order to the given status. Moving into `CANCELLED` puts every line's quantity
    /// back into stock first.
    Transition(OrderStatus),
    /// Cancels the order and puts its stock back.
    Cancel,
}
