pub mod addresses;
pub mod cart;
pub mod orders;
