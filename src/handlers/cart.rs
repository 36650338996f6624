use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::CartService;
use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Catalog fields of the product being added. Everything except `name` and
/// `price` is an opaque snapshot.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartProductRequest {
    pub name: Option<String>,
    /// Decimal price with at most two decimal places, as a JSON number or
    /// string, e.g. "5000.50". Parsed from its written digits, never via f64.
    #[schema(value_type = Option<String>)]
    pub price: Option<Value>,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    pub image: Option<String>,
    pub weight: Option<String>,
    pub purity: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub user_id: Option<i32>,
    pub product: Option<CartProductRequest>,
}

impl AddToCartRequest {
    fn into_domain(self) -> Result<(i32, NewCartItem), DomainError> {
        let missing = || DomainError::validation("Missing required fields");
        let user_id = self.user_id.ok_or_else(missing)?;
        let product = self.product.ok_or_else(missing)?;
        let name = product.name.filter(|n| !n.trim().is_empty()).ok_or_else(missing)?;
        let price = product
            .price
            .ok_or_else(|| DomainError::validation("Price is required"))
            .and_then(parse_price)?;

        Ok((
            user_id,
            NewCartItem {
                image: product.image,
                name,
                price,
                quantity: product.quantity.unwrap_or(1),
                weight: product.weight,
                purity: product.purity,
            },
        ))
    }
}

/// JSON numbers keep the digits the client wrote: serde_json prints an f64
/// in its shortest round-trip form, so `1499.99` reads back as "1499.99".
fn parse_price(raw: Value) -> Result<BigDecimal, DomainError> {
    let text = match raw {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(DomainError::validation("Price must be a decimal number")),
    };
    BigDecimal::from_str(&text)
        .map_err(|_| DomainError::validation(format!("Invalid price '{text}'")))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: i32,
    pub user_id: i32,
    pub image: Option<String>,
    pub name: String,
    pub price: String,
    pub quantity: i32,
    pub weight: Option<String>,
    pub purity: Option<String>,
    pub added_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(c: CartItem) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            image: c.image,
            name: c.name,
            price: c.price.to_string(),
            quantity: c.quantity,
            weight: c.weight,
            purity: c.purity,
            added_at: c.added_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddToCartResponse {
    pub message: String,
    pub item: CartItemResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartListResponse {
    pub cart: Vec<CartItemResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartOwnerParams {
    /// Owner of the cart item; deletion is refused for anyone else.
    pub user_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /order/addcart
///
/// Appends one product to the user's cart. Adding the same product again
/// creates a second line rather than bumping the quantity.
#[utoipa::path(
    post,
    path = "/order/addcart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Product added to cart", body = AddToCartResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    svc: web::Data<CartService>,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let (user_id, item) = body.into_inner().into_domain()?;

    let added = web::block(move || svc.add_to_cart(user_id, item)).await??;

    Ok(HttpResponse::Ok().json(AddToCartResponse {
        message: "Product added to cart successfully".to_string(),
        item: added.into(),
    }))
}

/// GET /order/cartlist/{user_id}
#[utoipa::path(
    get,
    path = "/order/cartlist/{user_id}",
    params(
        ("user_id" = i32, Path, description = "Cart owner"),
    ),
    responses(
        (status = 200, description = "Cart items in insertion order", body = CartListResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn list_cart(
    svc: web::Data<CartService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let items = web::block(move || svc.list_cart(user_id)).await??;

    Ok(HttpResponse::Ok().json(CartListResponse {
        cart: items.into_iter().map(CartItemResponse::from).collect(),
    }))
}

/// DELETE /order/cartdelete/{cart_id}?userId=
#[utoipa::path(
    delete,
    path = "/order/cartdelete/{cart_id}",
    params(
        ("cart_id" = i32, Path, description = "Cart item id"),
        ("userId" = i32, Query, description = "Owner of the cart item"),
    ),
    responses(
        (status = 200, description = "Cart item deleted", body = MessageResponse),
        (status = 400, description = "userId missing"),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn remove_cart_item(
    svc: web::Data<CartService>,
    path: web::Path<i32>,
    query: web::Query<CartOwnerParams>,
) -> Result<HttpResponse, AppError> {
    let cart_item_id = path.into_inner();
    let user_id = query
        .into_inner()
        .user_id
        .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;

    web::block(move || svc.remove_cart_item(user_id, cart_item_id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Cart item deleted successfully".to_string(),
    }))
}
