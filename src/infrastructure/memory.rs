//! Process-local repository used by the endpoint and service tests.
//!
//! Every operation holds one lock for its whole duration, which gives the
//! same all-or-nothing checkout the PostgreSQL transaction provides.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::address::{Address, NewAddress};
use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::order::{CancelledOrderView, CheckoutInput, NewOrder, OrderRecord, OrderStatus};
use crate::domain::ports::{AddressRepository, CartRepository, OrderRepository};

#[derive(Debug, Default)]
struct State {
    carts: Vec<CartItem>,
    addresses: Vec<Address>,
    orders: Vec<OrderRecord>,
    next_cart_id: i32,
    next_address_id: i32,
    next_order_id: i32,
}

impl State {
    fn order_mut(&mut self, order_id: i32) -> Result<&mut OrderRecord, DomainError> {
        self.orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::OrderNotFound)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|e| DomainError::Internal(format!("state lock poisoned: {e}")))
    }
}

impl CartRepository for InMemoryRepository {
    fn add_item(&self, user_id: i32, item: NewCartItem) -> Result<CartItem, DomainError> {
        let mut state = self.lock()?;
        state.next_cart_id += 1;
        let row = CartItem {
            id: state.next_cart_id,
            user_id,
            image: item.image,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            weight: item.weight,
            purity: item.purity,
            added_at: Utc::now(),
        };
        state.carts.push(row.clone());
        Ok(row)
    }

    fn list_items(&self, user_id: i32) -> Result<Vec<CartItem>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .carts
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    fn remove_item(&self, user_id: i32, cart_item_id: i32) -> Result<CartItem, DomainError> {
        let mut state = self.lock()?;
        let pos = state
            .carts
            .iter()
            .position(|c| c.id == cart_item_id && c.user_id == user_id)
            .ok_or(DomainError::CartItemNotFound)?;
        Ok(state.carts.remove(pos))
    }
}

impl AddressRepository for InMemoryRepository {
    fn create(&self, user_id: i32, a: NewAddress) -> Result<Address, DomainError> {
        let mut state = self.lock()?;
        state.next_address_id += 1;
        let address = Address {
            id: state.next_address_id,
            user_id,
            name: a.name,
            mobile: a.mobile,
            pincode: a.pincode,
            flat: a.flat,
            street: a.street,
            cod: a.cod,
            city: a.city,
            state: a.state,
            landmark: a.landmark,
            address_type: a.address_type,
        };
        state.addresses.push(address.clone());
        Ok(address)
    }

    fn list_for_user(&self, user_id: i32) -> Result<Vec<Address>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl OrderRepository for InMemoryRepository {
    fn checkout(&self, input: &CheckoutInput) -> Result<OrderRecord, DomainError> {
        let mut state = self.lock()?;

        let address = state
            .addresses
            .iter()
            .find(|a| a.id == input.address_id && a.user_id == input.user_id)
            .cloned()
            .ok_or(DomainError::AddressNotFound)?;
        let cart: Vec<CartItem> = state
            .carts
            .iter()
            .filter(|c| c.user_id == input.user_id)
            .cloned()
            .collect();

        let new_order = NewOrder::from_checkout(input, &address, &cart)?;

        state.next_order_id += 1;
        let record = OrderRecord {
            id: state.next_order_id,
            user_id: new_order.user_id,
            address_id: new_order.address_id,
            address: new_order.address,
            payment_method: new_order.payment_method,
            expected_delivery: new_order.expected_delivery,
            subtotal: new_order.subtotal,
            total_amount: new_order.total_amount,
            order_summary: new_order.order_summary,
            status: new_order.status,
            cancellation_reason: None,
            cancelled_at: None,
            order_date: Utc::now(),
        };
        state.orders.push(record.clone());
        state.carts.retain(|c| !cart.iter().any(|taken| taken.id == c.id));

        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<OrderRecord>, DomainError> {
        Ok(self.lock()?.orders.clone())
    }

    fn list_for_user(&self, user_id: i32) -> Result<Vec<OrderRecord>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_cancelled(&self) -> Result<Vec<CancelledOrderView>, DomainError> {
        let state = self.lock()?;
        let mut cancelled: Vec<&OrderRecord> = state
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Cancelled)
            .collect();
        cancelled.sort_by(|a, b| b.cancelled_at.cmp(&a.cancelled_at));
        Ok(cancelled
            .into_iter()
            .map(|o| CancelledOrderView {
                id: o.id,
                status: o.status,
                cancellation_reason: o.cancellation_reason.clone(),
            })
            .collect())
    }

    fn set_status(&self, order_id: i32, status: OrderStatus) -> Result<OrderRecord, DomainError> {
        let mut state = self.lock()?;
        let order = state.order_mut(order_id)?;
        order.status.ensure_transition(status)?;
        order.status = status;
        Ok(order.clone())
    }

    fn cancel(
        &self,
        order_id: i32,
        reason: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<OrderRecord, DomainError> {
        let mut state = self.lock()?;
        let order = state.order_mut(order_id)?;
        order.status.ensure_cancellable()?;
        order.status = OrderStatus::Cancelled;
        order.cancellation_reason = Some(reason.to_string());
        order.cancelled_at = Some(cancelled_at);
        Ok(order.clone())
    }

    fn delete(&self, order_id: i32) -> Result<OrderRecord, DomainError> {
        let mut state = self.lock()?;
        let pos = state
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(DomainError::OrderNotFound)?;
        Ok(state.orders.remove(pos))
    }
}
