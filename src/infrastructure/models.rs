use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::address::{Address, AddressSnapshot, NewAddress};
use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::order::{decode_summary, CancelledOrderView, NewOrder, OrderRecord, OrderStatus};
use crate::schema::{addresses, carts, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub id: i32,
    pub user_id: i32,
    pub image: Option<String>,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub weight: Option<String>,
    pub purity: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub user_id: i32,
    pub image: Option<String>,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub weight: Option<String>,
    pub purity: Option<String>,
}

impl NewCartRow {
    pub fn new(user_id: i32, item: NewCartItem) -> Self {
        Self {
            user_id,
            image: item.image,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            weight: item.weight,
            purity: item.purity,
        }
    }
}

impl From<CartRow> for CartItem {
    fn from(r: CartRow) -> Self {
        CartItem {
            id: r.id,
            user_id: r.user_id,
            image: r.image,
            name: r.name,
            price: r.price,
            quantity: r.quantity,
            weight: r.weight,
            purity: r.purity,
            added_at: r.added_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AddressRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub mobile: String,
    pub pincode: String,
    pub flat: String,
    pub street: String,
    pub cod: bool,
    pub city: String,
    pub state: String,
    pub landmark: Option<String>,
    pub address_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = addresses)]
pub struct NewAddressRow {
    pub user_id: i32,
    pub name: String,
    pub mobile: String,
    pub pincode: String,
    pub flat: String,
    pub street: String,
    pub cod: bool,
    pub city: String,
    pub state: String,
    pub landmark: Option<String>,
    pub address_type: String,
}

impl NewAddressRow {
    pub fn new(user_id: i32, a: NewAddress) -> Self {
        Self {
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
            address_type: a.address_type.as_str().to_string(),
        }
    }
}

impl TryFrom<AddressRow> for Address {
    type Error = DomainError;

    fn try_from(r: AddressRow) -> Result<Self, Self::Error> {
        let address_type = r.address_type.parse().map_err(|_| {
            DomainError::Internal(format!(
                "address {} has unknown type '{}'",
                r.id, r.address_type
            ))
        })?;
        Ok(Address {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            mobile: r.mobile,
            pincode: r.pincode,
            flat: r.flat,
            street: r.street,
            cod: r.cod,
            city: r.city,
            state: r.state,
            landmark: r.landmark,
            address_type,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub address: Value,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
    pub subtotal: BigDecimal,
    pub total_amount: BigDecimal,
    pub order_summary: Value,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub user_id: i32,
    pub address_id: i32,
    pub address: Value,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
    pub subtotal: BigDecimal,
    pub total_amount: BigDecimal,
    pub order_summary: Value,
    pub status: String,
}

impl TryFrom<NewOrder> for NewOrderRow {
    type Error = DomainError;

    fn try_from(o: NewOrder) -> Result<Self, Self::Error> {
        Ok(NewOrderRow {
            user_id: o.user_id,
            address_id: o.address_id,
            address: serde_json::to_value(&o.address)?,
            payment_method: o.payment_method,
            expected_delivery: o.expected_delivery,
            subtotal: o.subtotal,
            total_amount: o.total_amount,
            order_summary: serde_json::to_value(&o.order_summary)?,
            status: o.status.as_str().to_string(),
        })
    }
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = DomainError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        let status = parse_status(r.id, &r.status)?;
        let address: AddressSnapshot = serde_json::from_value(r.address)?;
        Ok(OrderRecord {
            id: r.id,
            user_id: r.user_id,
            address_id: r.address_id,
            address,
            payment_method: r.payment_method,
            expected_delivery: r.expected_delivery,
            subtotal: r.subtotal,
            total_amount: r.total_amount,
            order_summary: decode_summary(&r.order_summary),
            status,
            cancellation_reason: r.cancellation_reason,
            cancelled_at: r.cancelled_at,
            order_date: r.order_date,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub struct CancelledOrderRow {
    pub id: i32,
    pub status: String,
    pub cancellation_reason: Option<String>,
}

impl TryFrom<CancelledOrderRow> for CancelledOrderView {
    type Error = DomainError;

    fn try_from(r: CancelledOrderRow) -> Result<Self, Self::Error> {
        Ok(CancelledOrderView {
            id: r.id,
            status: parse_status(r.id, &r.status)?,
            cancellation_reason: r.cancellation_reason,
        })
    }
}

/// A status column outside the known set is corrupt data, not bad input.
pub fn parse_status(order_id: i32, raw: &str) -> Result<OrderStatus, DomainError> {
    raw.parse().map_err(|_| {
        DomainError::Internal(format!("order {order_id} has unknown status '{raw}'"))
    })
}
