use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{CancellationReceipt, OrderService};
use crate::domain::address::AddressSnapshot;
use crate::domain::order::{
    CancelledOrderView, CheckoutInput, LineItemSnapshot, OrderItemView, OrderRecord, OrderStatus,
};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: Option<i32>,
    pub address_id: Option<i32>,
    pub payment_method: Option<String>,
    /// Calendar date, e.g. "2024-01-10"
    pub expected_delivery: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    pub order_id: i32,
    pub subtotal: String,
    pub total_amount: String,
}

/// Full stored order, snapshots included.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub address_id: i32,
    pub address: AddressSnapshot,
    pub payment_method: String,
    pub expected_delivery: Option<NaiveDate>,
    pub subtotal: String,
    pub total_amount: String,
    pub order_summary: Vec<LineItemSnapshot>,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub order_date: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(o: OrderRecord) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            address_id: o.address_id,
            address: o.address,
            payment_method: o.payment_method,
            expected_delivery: o.expected_delivery,
            subtotal: o.subtotal.to_string(),
            total_amount: o.total_amount.to_string(),
            order_summary: o.order_summary,
            status: o.status,
            cancellation_reason: o.cancellation_reason,
            cancelled_at: o.cancelled_at.map(|t| t.to_rfc3339()),
            order_date: o.order_date.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub title: String,
    pub quantity: i32,
    pub purity: Option<String>,
    pub price: String,
    pub image: Option<String>,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(i: OrderItemView) -> Self {
        Self {
            title: i.title,
            quantity: i.quantity,
            purity: i.purity,
            price: i.price.to_string(),
            image: i.image,
        }
    }
}

/// A user's order with its line items in display shape.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderResponse {
    pub order_id: i32,
    pub created_at: String,
    pub status: OrderStatus,
    pub address: AddressSnapshot,
    pub total_amount: String,
    /// Key spelled as the order dashboards read it.
    #[serde(rename = "ordersummary")]
    pub order_summary: Vec<OrderItemResponse>,
}

impl From<OrderRecord> for UserOrderResponse {
    fn from(o: OrderRecord) -> Self {
        let items = o.items();
        Self {
            order_id: o.id,
            created_at: o.order_date.to_rfc3339(),
            status: o.status,
            address: o.address,
            total_amount: o.total_amount.to_string(),
            order_summary: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserOrdersResponse {
    pub orders: Vec<UserOrderResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelledOrderResponse {
    pub id: i32,
    pub status: OrderStatus,
    pub cancellation_reason: Option<String>,
}

impl From<CancelledOrderView> for CancelledOrderResponse {
    fn from(c: CancelledOrderView) -> Self {
        Self {
            id: c.id,
            status: c.status,
            cancellation_reason: c.cancellation_reason,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: Option<i32>,
    /// One of processing, approved, completed
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusResponse {
    pub message: String,
    pub order_id: i32,
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    pub order_id: Option<i32>,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderResponse {
    pub message: String,
    pub order_id: i32,
    pub status: OrderStatus,
    pub reason: String,
    /// Local time in the reporting timezone, e.g. "10/1/2024, 2:34:05 pm"
    pub cancelled_at: String,
    pub refund_info: String,
}

impl From<CancellationReceipt> for CancelOrderResponse {
    fn from(r: CancellationReceipt) -> Self {
        Self {
            message: "Order cancelled successfully".to_string(),
            order_id: r.order_id,
            status: r.status,
            reason: r.reason,
            cancelled_at: r.cancelled_at_local,
            refund_info: r.refund_info.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteOrderResponse {
    pub message: String,
    pub order: OrderResponse,
}

/// Body of the `/cancelorder` delete route, which names the record `deletedOrder`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedOrderResponse {
    pub message: String,
    pub deleted_order: OrderResponse,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /order/checkout
///
/// Converts the user's whole cart into one order against a saved address.
/// The address lookup, cart read, order insert and cart clean-up happen in a
/// single database transaction: either all of it is committed or none of it.
#[utoipa::path(
    post,
    path = "/order/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = CheckoutResponse),
        (status = 400, description = "Missing fields, unknown address or empty cart"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn checkout(
    svc: web::Data<OrderService>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(user_id), Some(address_id), Some(payment_method)) =
        (body.user_id, body.address_id, body.payment_method)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    let input = CheckoutInput {
        user_id,
        address_id,
        payment_method,
        expected_delivery: body.expected_delivery,
    };

    let order = web::block(move || svc.checkout(input)).await??;

    Ok(HttpResponse::Ok().json(CheckoutResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.id,
        subtotal: order.subtotal.to_string(),
        total_amount: order.total_amount.to_string(),
    }))
}

/// GET /order/all
#[utoipa::path(
    get,
    path = "/order/all",
    responses(
        (status = 200, description = "Every order", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_all_orders(svc: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || svc.list_all_orders()).await??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /order/list/{user_id}
///
/// Returns the user's orders with line items normalized to
/// `{title, quantity, purity, price, image}`.
#[utoipa::path(
    get,
    path = "/order/list/{user_id}",
    params(
        ("user_id" = i32, Path, description = "Order owner"),
    ),
    responses(
        (status = 200, description = "Orders of the user", body = UserOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_user_orders(
    svc: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let orders = web::block(move || svc.list_orders_for_user(user_id)).await??;

    Ok(HttpResponse::Ok().json(UserOrdersResponse {
        orders: orders.into_iter().map(UserOrderResponse::from).collect(),
    }))
}

/// GET /order/cancelled
#[utoipa::path(
    get,
    path = "/order/cancelled",
    responses(
        (status = 200, description = "Cancelled orders, newest cancellation first", body = Vec<CancelledOrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_cancelled_orders(svc: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let cancelled = web::block(move || svc.list_cancelled_orders()).await??;

    let body: Vec<CancelledOrderResponse> = cancelled
        .into_iter()
        .map(CancelledOrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /order/update-status
#[utoipa::path(
    post,
    path = "/order/update-status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 400, description = "Unknown status or order already cancelled"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    svc: web::Data<OrderService>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(order_id), Some(status)) = (body.order_id, body.status) else {
        return Err(AppError::BadRequest(
            "Order ID and status are required".to_string(),
        ));
    };

    let order = web::block(move || svc.set_status(order_id, &status)).await??;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        message: "Status updated successfully".to_string(),
        order_id: order.id,
        status: order.status,
    }))
}

/// POST /order/cancel-order
///
/// Cancels an order that is not cancelled yet and records the reason.
#[utoipa::path(
    post,
    path = "/order/cancel-order",
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = CancelOrderResponse),
        (status = 400, description = "Missing fields or order already cancelled"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    svc: web::Data<OrderService>,
    body: web::Json<CancelOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(order_id), Some(reason)) = (body.order_id, body.reason) else {
        return Err(AppError::BadRequest(
            "Order ID and reason are required".to_string(),
        ));
    };

    let receipt = web::block(move || svc.cancel_order(order_id, &reason)).await??;

    Ok(HttpResponse::Ok().json(CancelOrderResponse::from(receipt)))
}

/// DELETE /order/delete/{order_id}
///
/// Removes the order row whatever its status and returns what was deleted.
#[utoipa::path(
    delete,
    path = "/order/delete/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order deleted", body = DeleteOrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    svc: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || svc.delete_order(order_id)).await??;

    Ok(HttpResponse::Ok().json(DeleteOrderResponse {
        message: "Order deleted successfully".to_string(),
        order: order.into(),
    }))
}

// ── /cancelorder routes ──────────────────────────────────────────────────────

/// POST /cancelorder/add
#[utoipa::path(
    post,
    path = "/cancelorder/add",
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = CancelOrderResponse),
        (status = 400, description = "Missing fields or order already cancelled"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cancelorder"
)]
pub async fn add_cancellation(
    svc: web::Data<OrderService>,
    body: web::Json<CancelOrderRequest>,
) -> Result<HttpResponse, AppError> {
    cancel_order(svc, body).await
}

/// GET /cancelorder/all
#[utoipa::path(
    get,
    path = "/cancelorder/all",
    responses(
        (status = 200, description = "Cancelled orders, newest cancellation first", body = Vec<CancelledOrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cancelorder"
)]
pub async fn list_cancellations(svc: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    list_cancelled_orders(svc).await
}

/// DELETE /cancelorder/{order_id}
#[utoipa::path(
    delete,
    path = "/cancelorder/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order deleted", body = DeletedOrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cancelorder"
)]
pub async fn delete_cancellation(
    svc: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || svc.delete_order(order_id)).await??;

    Ok(HttpResponse::Ok().json(DeletedOrderResponse {
        message: "Order deleted successfully".to_string(),
        deleted_order: order.into(),
    }))
}
