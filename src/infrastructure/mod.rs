pub mod address_repo;
pub mod cart_repo;
pub mod memory;
pub mod models;
pub mod order_repo;

pub use memory::InMemoryRepository;
pub use order_repo::DieselRepository;
