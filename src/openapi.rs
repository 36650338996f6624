use utoipa::OpenApi;

use crate::domain::address::{AddressSnapshot, AddressType};
use crate::domain::order::{LineItemSnapshot, OrderStatus};
use crate::handlers::{addresses, cart, orders};

#[derive(OpenApi)]
#[openapi(
    info(title = "Gold order service", description = "Cart, checkout and order lifecycle API"),
    paths(
        cart::add_to_cart,
        cart::list_cart,
        cart::remove_cart_item,
        orders::checkout,
        orders::list_all_orders,
        orders::list_user_orders,
        orders::list_cancelled_orders,
        orders::update_status,
        orders::cancel_order,
        orders::delete_order,
        orders::add_cancellation,
        orders::list_cancellations,
        orders::delete_cancellation,
        addresses::create_address,
        addresses::list_addresses,
    ),
    components(schemas(
        AddressSnapshot,
        AddressType,
        LineItemSnapshot,
        OrderStatus,
        cart::AddToCartRequest,
        cart::CartProductRequest,
        cart::AddToCartResponse,
        cart::CartItemResponse,
        cart::CartListResponse,
        cart::MessageResponse,
        orders::CheckoutRequest,
        orders::CheckoutResponse,
        orders::OrderResponse,
        orders::OrderItemResponse,
        orders::UserOrderResponse,
        orders::UserOrdersResponse,
        orders::CancelledOrderResponse,
        orders::UpdateStatusRequest,
        orders::UpdateStatusResponse,
        orders::CancelOrderRequest,
        orders::CancelOrderResponse,
        orders::DeleteOrderResponse,
        orders::DeletedOrderResponse,
        addresses::CreateAddressRequest,
        addresses::CreateAddressResponse,
        addresses::AddressResponse,
    )),
    tags(
        (name = "cart", description = "Pending line items per user"),
        (name = "orders", description = "Checkout, status changes, cancellation and queries"),
        (name = "cancelorder", description = "Cancellation desk routes"),
        (name = "addresses", description = "Saved delivery addresses"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/order/addcart",
            "/order/cartlist/{user_id}",
            "/order/cartdelete/{cart_id}",
            "/order/checkout",
            "/order/all",
            "/order/list/{user_id}",
            "/order/cancelled",
            "/order/update-status",
            "/order/cancel-order",
            "/order/delete/{order_id}",
            "/cancelorder/add",
            "/cancelorder/all",
            "/cancelorder/{order_id}",
            "/users/addresses",
            "/users/addresses/{user_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
