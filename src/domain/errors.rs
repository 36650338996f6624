use thiserror::Error;

use super::order::OrderStatus;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("Cart item not found")]
    CartItemNotFound,
    #[error("Address not found")]
    AddressNotFound,
    #[error("No items in cart")]
    EmptyCart,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Order is already cancelled")]
    AlreadyCancelled,
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Rejects text longer than the `VARCHAR(max)` column it is stored in.
/// PostgreSQL counts characters, not bytes.
pub fn ensure_max_chars(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
