pub mod address_service;
pub mod cart_service;
pub mod order_service;

pub use address_service::AddressService;
pub use cart_service::CartService;
pub use order_service::{CancellationReceipt, OrderService};
