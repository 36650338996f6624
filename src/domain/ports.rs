use chrono::{DateTime, Utc};

use super::address::{Address, NewAddress};
use super::cart::{CartItem, NewCartItem};
use super::errors::DomainError;
use super::order::{CancelledOrderView, CheckoutInput, OrderRecord, OrderStatus};

pub trait CartRepository: Send + Sync + 'static {
    fn add_item(&self, user_id: i32, item: NewCartItem) -> Result<CartItem, DomainError>;
    /// Items in insertion order.
    fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>, DomainError>;
    /// Deletes the item only if it belongs to `user_id`.
    fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<CartItem, DomainError>;
}

pub trait AddressRepository: Send + Sync + 'static {
    fn create(&self, user_id: i32, address: NewAddress) -> Result<Address, DomainError>;
    fn list_for_user(&self, user_id: i32) -> Result<Vec<Address>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Turns the user's cart into an order and empties the cart, all or nothing.
    fn checkout(&self, input: &CheckoutInput) -> Result<OrderRecord, DomainError>;
    fn list_all(&self) -> Result<Vec<OrderRecord>, DomainError>;
    fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderRecord>, DomainError>;
    /// Newest cancellation first.
    fn list_cancelled(&self) -> Result<Vec<CancelledOrderView>, DomainError>;
    fn set_status(&self, order_id: i32, status: OrderStatus) -> Result<OrderRecord, DomainError>;
    fn cancel(
        &self,
        order_id: i32,
        reason: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<OrderRecord, DomainError>;
    fn delete(&self, order_id: i32) -> Result<OrderRecord, DomainError>;
}
