use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::errors::{ensure_max_chars, DomainError};

/// Prices are stored as `NUMERIC(14,2)`.
pub const PRICE_SCALE: i64 = 2;
const PRICE_LIMIT: i64 = 1_000_000_000_000;

const NAME_MAX_CHARS: usize = 255;
const ATTRIBUTE_MAX_CHARS: usize = 64;

/// A pending line item owned by one user until checkout.
#[derive(Debug, Clone)]
pub struct CartItem {
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

impl CartItem {
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity.max(1))
    }
}

/// Catalog fields captured when a product is put in the cart.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub image: Option<String>,
    pub name: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub weight: Option<String>,
    pub purity: Option<String>,
}

impl NewCartItem {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Missing required fields"));
        }
        ensure_max_chars("name", &self.name, NAME_MAX_CHARS)?;
        if let Some(weight) = &self.weight {
            ensure_max_chars("weight", weight, ATTRIBUTE_MAX_CHARS)?;
        }
        if let Some(purity) = &self.purity {
            ensure_max_chars("purity", purity, ATTRIBUTE_MAX_CHARS)?;
        }
        if self.price <= BigDecimal::zero() {
            return Err(DomainError::validation("Price must be greater than zero"));
        }
        let (_, scale) = self.price.normalized().as_bigint_and_exponent();
        if scale > PRICE_SCALE {
            return Err(DomainError::validation(
                "Price must have at most 2 decimal places",
            ));
        }
        if self.price >= BigDecimal::from(PRICE_LIMIT) {
            return Err(DomainError::validation(
                "Price must be below 1000000000000",
            ));
        }
        if self.quantity < 1 {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }
        Ok(())
    }

    /// Validates the item and fixes the price to two decimal places, the form
    /// every repository stores.
    pub fn validated(mut self) -> Result<Self, DomainError> {
        self.validate()?;
        self.price = self.price.with_scale(PRICE_SCALE);
        Ok(self)
    }
}
