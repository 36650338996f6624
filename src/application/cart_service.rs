use std::sync::Arc;

use log::*;

use crate::domain::cart::{CartItem, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;

pub type DynCartRepository = Arc<dyn CartRepository>;

#[derive(Clone)]
pub struct CartService {
    repo: DynCartRepository,
}

impl CartService {
    pub fn new(repo: DynCartRepository) -> Self {
        Self { repo }
    }

    /// Appends a line item. Adding the same product twice yields two rows.
    pub fn add_to_cart(&self, user_id: i32, item: NewCartItem) -> Result<CartItem, DomainError> {
        let item = item.validated()?;
        let added = self.repo.add_item(user_id, item)?;
        info!(
            "Added '{}' x{} to cart of user {} (item {})",
            added.name, added.quantity, user_id, added.id
        );
        Ok(added)
    }

    pub fn list_cart(&self, user_id: i32) -> Result<Vec<CartItem>, DomainError> {
        self.repo.list_items(user_id)
    }

    pub fn remove_cart_item(&self, user_id: i32, cart_item_id: i32) -> Result<CartItem, DomainError> {
        let removed = self.repo.remove_item(user_id, cart_item_id).inspect_err(|e| {
            if matches!(e, DomainError::CartItemNotFound) {
                debug!("User {user_id} tried to remove missing cart item {cart_item_id}");
            }
        })?;
        info!("Removed cart item {cart_item_id} for user {user_id}");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::*;
    use crate::infrastructure::InMemoryRepository;

    fn service() -> CartService {
        CartService::new(Arc::new(InMemoryRepository::new()))
    }

    fn item(name: &str, price: i64, quantity: i32) -> NewCartItem {
        NewCartItem {
            image: None,
            name: name.to_string(),
            price: BigDecimal::from(price),
            quantity,
            weight: None,
            purity: None,
        }
    }

    #[test]
    fn repeated_adds_create_distinct_rows() {
        let svc = service();
        let first = svc.add_to_cart(42, item("Gold Coin", 5000, 1)).unwrap();
        let second = svc.add_to_cart(42, item("Gold Coin", 5000, 1)).unwrap();

        assert_ne!(first.id, second.id);
        let cart = svc.list_cart(42).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].id, first.id);
        assert_eq!(cart[1].id, second.id);
    }

    #[test]
    fn invalid_item_is_not_stored() {
        let svc = service();
        assert!(matches!(
            svc.add_to_cart(42, item("", 5000, 1)),
            Err(DomainError::Validation(_))
        ));
        assert!(svc.list_cart(42).unwrap().is_empty());
    }

    #[test]
    fn stored_price_has_two_decimal_places() {
        let added = service().add_to_cart(42, item("Chain", 1200, 1)).unwrap();
        assert_eq!(added.price.to_string(), "1200.00");
    }

    #[test]
    fn empty_cart_lists_nothing() {
        assert!(service().list_cart(7).unwrap().is_empty());
    }

    #[test]
    fn only_the_owner_can_remove_an_item() {
        let svc = service();
        let added = svc.add_to_cart(42, item("Ring", 3000, 1)).unwrap();

        assert!(matches!(
            svc.remove_cart_item(43, added.id),
            Err(DomainError::CartItemNotFound)
        ));
        assert_eq!(svc.list_cart(42).unwrap().len(), 1);

        svc.remove_cart_item(42, added.id).unwrap();
        assert!(svc.list_cart(42).unwrap().is_empty());
        assert!(matches!(
            svc.remove_cart_item(42, added.id),
            Err(DomainError::CartItemNotFound)
        ));
    }
}
