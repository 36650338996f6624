use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use log::*;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    CancelledOrderView, CheckoutInput, OrderRecord, OrderStatus, REFUND_NOTICE,
};
use crate::domain::ports::OrderRepository;

pub type DynOrderRepository = Arc<dyn OrderRepository>;

/// Confirmation handed back after a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancellationReceipt {
    pub order_id: i32,
    pub status: OrderStatus,
    pub reason: String,
    pub cancelled_at: DateTime<Utc>,
    /// `cancelled_at` rendered in the reporting timezone, e.g. `10/1/2024, 3:04:05 pm`.
    pub cancelled_at_local: String,
    pub refund_info: &'static str,
}

#[derive(Clone)]
pub struct OrderService {
    repo: DynOrderRepository,
    reporting_offset: FixedOffset,
}

impl OrderService {
    pub fn new(repo: DynOrderRepository, reporting_offset: FixedOffset) -> Self {
        Self {
            repo,
            reporting_offset,
        }
    }

    pub fn checkout(&self, input: CheckoutInput) -> Result<OrderRecord, DomainError> {
        input.validate()?;
        match self.repo.checkout(&input) {
            Ok(order) => {
                info!(
                    "Placed order {} for user {}: {} item(s), total {}",
                    order.id,
                    order.user_id,
                    order.order_summary.len(),
                    order.total_amount
                );
                Ok(order)
            }
            Err(e @ (DomainError::AddressNotFound | DomainError::EmptyCart)) => {
                warn!(
                    "Checkout rejected for user {} (address {}): {e}",
                    input.user_id, input.address_id
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn list_all_orders(&self) -> Result<Vec<OrderRecord>, DomainError> {
        self.repo.list_all()
    }

    pub fn list_orders_for_user(&self, user_id: i32) -> Result<Vec<OrderRecord>, DomainError> {
        self.repo.list_for_user(user_id)
    }

    pub fn list_cancelled_orders(&self) -> Result<Vec<CancelledOrderView>, DomainError> {
        self.repo.list_cancelled()
    }

    /// Overwrites the status of a live order. Unknown status names are
    /// rejected before touching storage.
    pub fn set_status(&self, order_id: i32, status: &str) -> Result<OrderRecord, DomainError> {
        let status: OrderStatus = status.parse()?;
        let order = self.repo.set_status(order_id, status)?;
        info!("Order {order_id} is now {status}");
        Ok(order)
    }

    pub fn cancel_order(&self, order_id: i32, reason: &str) -> Result<CancellationReceipt, DomainError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::validation("Order ID and reason are required"));
        }
        let order = self.repo.cancel(order_id, reason, Utc::now())?;
        let cancelled_at = order.cancelled_at.unwrap_or_else(Utc::now);
        info!("Order {order_id} cancelled: {reason}");

        Ok(CancellationReceipt {
            order_id: order.id,
            status: order.status,
            reason: reason.to_string(),
            cancelled_at,
            cancelled_at_local: format_reporting_time(cancelled_at, self.reporting_offset),
            refund_info: REFUND_NOTICE,
        })
    }

    pub fn delete_order(&self, order_id: i32) -> Result<OrderRecord, DomainError> {
        let order = self.repo.delete(order_id)?;
        info!("Deleted order {order_id} (was {})", order.status);
        Ok(order)
    }
}

/// Renders an instant as `d/m/yyyy, h:mm:ss am` in the given offset.
pub fn format_reporting_time(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%-d/%-m/%Y, %-I:%M:%S %P")
        .to_string()
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::config::default_reporting_offset;
    use crate::domain::address::{AddressType, NewAddress};
    use crate::domain::cart::NewCartItem;
    use crate::domain::ports::{AddressRepository, CartRepository};
    use crate::infrastructure::InMemoryRepository;

    struct Fixture {
        repo: InMemoryRepository,
        svc: OrderService,
    }

    fn fixture() -> Fixture {
        let repo = InMemoryRepository::new();
        let svc = OrderService::new(Arc::new(repo.clone()), default_reporting_offset());
        Fixture { repo, svc }
    }

    fn add_address(repo: &InMemoryRepository, user_id: i32) -> i32 {
        repo.create(
            user_id,
            NewAddress {
                name: "Meera".to_string(),
                mobile: "9822222222".to_string(),
                pincode: "110001".to_string(),
                flat: "A-1".to_string(),
                street: "Janpath".to_string(),
                cod: true,
                city: "New Delhi".to_string(),
                state: "Delhi".to_string(),
                landmark: None,
                address_type: AddressType::Home,
            },
        )
        .unwrap()
        .id
    }

    fn add_item(repo: &InMemoryRepository, user_id: i32, name: &str, price: i64, quantity: i32) {
        repo.add_item(
            user_id,
            NewCartItem {
                image: Some(format!("https://cdn.example/{name}.jpg")),
                name: name.to_string(),
                price: BigDecimal::from(price),
                quantity,
                weight: Some("10g".to_string()),
                purity: Some("24K".to_string()),
            },
        )
        .unwrap();
    }

    fn checkout_input(user_id: i32, address_id: i32) -> CheckoutInput {
        CheckoutInput {
            user_id,
            address_id,
            payment_method: "COD".to_string(),
            expected_delivery: NaiveDate::from_ymd_opt(2024, 1, 10),
        }
    }

    fn place_order(f: &Fixture, user_id: i32) -> OrderRecord {
        let address_id = add_address(&f.repo, user_id);
        add_item(&f.repo, user_id, "Gold Coin", 5000, 2);
        add_item(&f.repo, user_id, "Ring", 3000, 1);
        f.svc.checkout(checkout_input(user_id, address_id)).unwrap()
    }

    #[test]
    fn checkout_places_order_and_clears_cart() {
        let f = fixture();
        let order = place_order(&f, 42);

        assert_eq!(order.user_id, 42);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.subtotal, BigDecimal::from(13000));
        assert_eq!(order.total_amount, BigDecimal::from(13000));
        assert_eq!(order.order_summary.len(), 2);
        assert!(f.repo.list_items(42).unwrap().is_empty());
        assert_eq!(f.svc.list_all_orders().unwrap().len(), 1);
    }

    #[test]
    fn checkout_with_empty_cart_creates_nothing() {
        let f = fixture();
        let address_id = add_address(&f.repo, 42);

        let err = f.svc.checkout(checkout_input(42, address_id)).unwrap_err();

        assert!(matches!(err, DomainError::EmptyCart));
        assert!(f.svc.list_all_orders().unwrap().is_empty());
    }

    #[test]
    fn checkout_with_someone_elses_address_keeps_cart() {
        let f = fixture();
        let foreign = add_address(&f.repo, 7);
        add_item(&f.repo, 42, "Ring", 3000, 1);

        let err = f.svc.checkout(checkout_input(42, foreign)).unwrap_err();

        assert!(matches!(err, DomainError::AddressNotFound));
        assert_eq!(f.repo.list_items(42).unwrap().len(), 1);
        assert!(f.svc.list_all_orders().unwrap().is_empty());
    }

    #[test]
    fn checkout_requires_payment_method() {
        let f = fixture();
        let mut input = checkout_input(42, 1);
        input.payment_method = " ".to_string();
        assert!(matches!(
            f.svc.checkout(input),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn cancelling_twice_keeps_first_reason() {
        let f = fixture();
        let order = place_order(&f, 42);

        let receipt = f.svc.cancel_order(order.id, "changed mind").unwrap();
        assert_eq!(receipt.status, OrderStatus::Cancelled);
        assert_eq!(receipt.reason, "changed mind");
        assert_eq!(receipt.refund_info, REFUND_NOTICE);

        let err = f.svc.cancel_order(order.id, "second thoughts").unwrap_err();
        assert!(matches!(err, DomainError::AlreadyCancelled));

        let stored = &f.svc.list_orders_for_user(42).unwrap()[0];
        assert_eq!(stored.cancellation_reason.as_deref(), Some("changed mind"));
        assert_eq!(stored.cancelled_at, Some(receipt.cancelled_at));
    }

    #[test]
    fn cancelling_unknown_order_writes_nothing() {
        let f = fixture();
        place_order(&f, 42);

        assert!(matches!(
            f.svc.cancel_order(99, "changed mind"),
            Err(DomainError::OrderNotFound)
        ));
        assert!(f.svc.list_cancelled_orders().unwrap().is_empty());
    }

    #[test]
    fn cancel_requires_reason() {
        let f = fixture();
        let order = place_order(&f, 42);
        assert!(matches!(
            f.svc.cancel_order(order.id, "  "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn status_updates_allow_skipping_approval() {
        let f = fixture();
        let order = place_order(&f, 42);

        let done = f.svc.set_status(order.id, "completed").unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
    }

    #[test]
    fn status_updates_reject_garbage_and_missing_orders() {
        let f = fixture();
        let order = place_order(&f, 42);

        assert!(matches!(
            f.svc.set_status(order.id, "teleported"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.svc.set_status(999, "approved"),
            Err(DomainError::OrderNotFound)
        ));
    }

    #[test]
    fn cancelled_orders_cannot_be_revived() {
        let f = fixture();
        let order = place_order(&f, 42);
        f.svc.cancel_order(order.id, "duplicate").unwrap();

        assert!(matches!(
            f.svc.set_status(order.id, "processing"),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn cancelled_list_is_newest_first() {
        let f = fixture();
        let first = place_order(&f, 1);
        let second = place_order(&f, 2);
        let third = place_order(&f, 3);

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        f.repo.cancel(second.id, "late", base).unwrap();
        f.repo
            .cancel(first.id, "wrong size", base + chrono::Duration::hours(1))
            .unwrap();

        let cancelled = f.svc.list_cancelled_orders().unwrap();
        let ids: Vec<i32> = cancelled.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert!(!ids.contains(&third.id));
        assert_eq!(cancelled[0].cancellation_reason.as_deref(), Some("wrong size"));
    }

    #[test]
    fn delete_works_from_any_state() {
        let f = fixture();
        let order = place_order(&f, 42);
        f.svc.cancel_order(order.id, "changed mind").unwrap();

        let deleted = f.svc.delete_order(order.id).unwrap();
        assert_eq!(deleted.id, order.id);
        assert_eq!(deleted.status, OrderStatus::Cancelled);
        assert!(matches!(
            f.svc.delete_order(order.id),
            Err(DomainError::OrderNotFound)
        ));
    }

    #[test]
    fn user_orders_normalize_back_to_line_items() {
        let f = fixture();
        place_order(&f, 42);
        place_order(&f, 43);

        let orders = f.svc.list_orders_for_user(42).unwrap();
        assert_eq!(orders.len(), 1);
        let items = orders[0].items();
        assert_eq!(items[0].title, "Gold Coin");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, BigDecimal::from(5000));
        assert_eq!(items[1].title, "Ring");
        assert_eq!(items[1].purity.as_deref(), Some("24K"));
    }

    #[test]
    fn reporting_time_uses_fixed_offset() {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 4, 5).unwrap();
        assert_eq!(
            format_reporting_time(at, default_reporting_offset()),
            "10/1/2024, 2:34:05 pm"
        );
    }
}
