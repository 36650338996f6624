pub mod address;
pub mod cart;
pub mod errors;
pub mod order;
pub mod ports;
