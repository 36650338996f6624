use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::address::{Address, AddressSnapshot};
use super::cart::CartItem;
use super::errors::{ensure_max_chars, DomainError};

pub const REFUND_NOTICE: &str = "Refund (if applicable) will be processed within 2-3 working days";

const UNKNOWN_PRODUCT: &str = "Unknown Product";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Approved,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Approved => "approved",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Checks an operational status change.
    ///
    /// Any move between the non-terminal states is allowed, including
    /// `processing -> completed`. Nothing leaves `cancelled`, and nothing enters
    /// it here: cancellation goes through [`OrderStatus::ensure_cancellable`] so
    /// that a reason and timestamp are always recorded.
    pub fn ensure_transition(self, next: OrderStatus) -> Result<(), DomainError> {
        if self.is_terminal() || next.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            });
        }
        Ok(())
    }

    pub fn ensure_cancellable(self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::AlreadyCancelled);
        }
        Ok(())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => Ok(OrderStatus::Processing),
            "approved" => Ok(OrderStatus::Approved),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::validation(format!("Invalid order status '{s}'"))),
        }
    }
}

/// One cart row as it looked when the order was placed.
///
/// Fields are optional because snapshots are stored as JSON and may predate
/// the current shape; [`OrderItemView`] applies the display defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LineItemSnapshot {
    pub cart_item_id: Option<i32>,
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    pub quantity: Option<i32>,
    pub weight: Option<String>,
    pub purity: Option<String>,
    pub image: Option<String>,
}

impl From<&CartItem> for LineItemSnapshot {
    fn from(item: &CartItem) -> Self {
        Self {
            cart_item_id: Some(item.id),
            name: Some(item.name.clone()),
            price: Some(item.price.clone()),
            quantity: Some(item.quantity),
            weight: item.weight.clone(),
            purity: item.purity.clone(),
            image: item.image.clone(),
        }
    }
}

/// Decodes a stored `order_summary` document item by item. Entries that do not
/// decode become empty snapshots rather than failing the whole order.
pub fn decode_summary(value: &serde_json::Value) -> Vec<LineItemSnapshot> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

/// Fixed display shape of an ordered product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemView {
    pub title: String,
    pub quantity: i32,
    pub purity: Option<String>,
    pub price: BigDecimal,
    pub image: Option<String>,
}

impl From<&LineItemSnapshot> for OrderItemView {
    fn from(s: &LineItemSnapshot) -> Self {
        Self {
            title: s
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity: s.quantity.filter(|q| *q >= 1).unwrap_or(1),
            purity: s.purity.clone().filter(|p| !p.is_empty()),
            price: s.price.clone().unwrap_or_else(BigDecimal::zero),
            image: s.image.clone().filter(|i| !i.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub user_id: i32,
    pub address_id: i32,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
}

impl CheckoutInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.payment_method.trim().is_empty() {
            return Err(DomainError::validation("Payment method is required"));
        }
        ensure_max_chars("paymentMethod", &self.payment_method, 64)
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub address_id: i32,
    pub address: AddressSnapshot,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
    pub subtotal: BigDecimal,
    pub total_amount: BigDecimal,
    pub order_summary: Vec<LineItemSnapshot>,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Prices a cart against a delivery address.
    ///
    /// Callers run this between loading the address and cart rows and writing
    /// the order, inside the same transaction.
    pub fn from_checkout(
        input: &CheckoutInput,
        address: &Address,
        cart: &[CartItem],
    ) -> Result<Self, DomainError> {
        if address.user_id != input.user_id || address.id != input.address_id {
            return Err(DomainError::AddressNotFound);
        }
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        if cart.iter().any(|item| item.user_id != input.user_id) {
            return Err(DomainError::Internal(format!(
                "cart for user {} contains foreign items",
                input.user_id
            )));
        }

        let subtotal = cart
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + item.line_total());

        Ok(Self {
            user_id: input.user_id,
            address_id: input.address_id,
            address: AddressSnapshot::from(address),
            payment_method: input.payment_method.clone(),
            expected_delivery: input.expected_delivery,
            total_amount: subtotal.clone(),
            subtotal,
            order_summary: cart.iter().map(LineItemSnapshot::from).collect(),
            status: OrderStatus::Processing,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub address: AddressSnapshot,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
    pub subtotal: BigDecimal,
    pub total_amount: BigDecimal,
    pub order_summary: Vec<LineItemSnapshot>,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub order_date: DateTime<Utc>,
}

impl OrderRecord {
    pub fn items(&self) -> Vec<OrderItemView> {
        self.order_summary.iter().map(OrderItemView::from).collect()
    }
}

#[derive(Debug, Clone)]
pub struct CancelledOrderView {
    pub id: i32,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
}
